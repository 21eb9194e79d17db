use crate::tile::Tile;
use zappy_types::{requirement_for_level, ResourceKind};

/// Whether a player at `level`, standing on a tile with `same_level_count`
/// other players of the same level present, and the given tile resources,
/// may launch an incantation (§4.8).
pub fn requirement_met(level: u8, same_level_count: u32, tile_resources: &[u32; ResourceKind::COUNT]) -> bool {
    let Some(req) = requirement_for_level(level) else {
        return false;
    };
    if same_level_count < req.same_level_players {
        return false;
    }
    ResourceKind::ALL
        .into_iter()
        .all(|kind| tile_resources[kind.id()] >= req.resources[kind.id()])
}

/// Remove the resources an incantation at `level` consumes from `tile`,
/// called once the incantation succeeds (§4.8).
pub fn consume_requirement_resources(level: u8, tile: &mut Tile) {
    if let Some(req) = requirement_for_level(level) {
        for kind in ResourceKind::ALL {
            tile.take_resource(kind, req.resources[kind.id()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_eight_player_can_never_incant() {
        let resources = [0; ResourceKind::COUNT];
        assert!(!requirement_met(8, 100, &resources));
    }

    #[test]
    fn level_one_needs_exactly_one_linemate_and_no_companions() {
        let mut resources = [0; ResourceKind::COUNT];
        resources[ResourceKind::Linemate.id()] = 1;
        assert!(requirement_met(1, 0, &resources));
    }

    #[test]
    fn missing_resources_blocks_incantation() {
        let resources = [0; ResourceKind::COUNT];
        assert!(!requirement_met(1, 0, &resources));
    }

    #[test]
    fn consume_only_removes_the_requirement_amount() {
        let mut tile = Tile::default();
        tile.add_resource(ResourceKind::Linemate, 3);
        consume_requirement_resources(1, &mut tile);
        assert_eq!(tile.resource_count(ResourceKind::Linemate), 2);
    }
}
