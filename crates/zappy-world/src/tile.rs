use zappy_types::ResourceKind;

/// One cell of the grid: a resource count per kind, and an ordered list of
/// occupant player ids in arrival order (§3 "Tile").
#[derive(Debug, Clone, Default)]
pub struct Tile {
    resources: [u32; ResourceKind::COUNT],
    occupants: Vec<u32>,
}

impl Tile {
    pub fn resource_count(&self, kind: ResourceKind) -> u32 {
        self.resources[kind.id()]
    }

    pub fn add_resource(&mut self, kind: ResourceKind, amount: u32) {
        self.resources[kind.id()] += amount;
    }

    /// Remove up to `amount` of `kind`, returning how much was actually
    /// available. Never underflows (§3 invariant: counts stay >= 0).
    pub fn take_resource(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let available = self.resources[kind.id()];
        let taken = available.min(amount);
        self.resources[kind.id()] -= taken;
        taken
    }

    pub fn resources(&self) -> &[u32; ResourceKind::COUNT] {
        &self.resources
    }

    pub fn occupants(&self) -> &[u32] {
        &self.occupants
    }

    pub fn add_occupant(&mut self, player_id: u32) {
        if !self.occupants.contains(&player_id) {
            self.occupants.push(player_id);
        }
    }

    pub fn remove_occupant(&mut self, player_id: u32) {
        self.occupants.retain(|&id| id != player_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_resource_never_goes_negative() {
        let mut tile = Tile::default();
        tile.add_resource(ResourceKind::Food, 2);
        assert_eq!(tile.take_resource(ResourceKind::Food, 5), 2);
        assert_eq!(tile.resource_count(ResourceKind::Food), 0);
    }

    #[test]
    fn occupancy_is_a_set() {
        let mut tile = Tile::default();
        tile.add_occupant(1);
        tile.add_occupant(1);
        assert_eq!(tile.occupants(), &[1]);
        tile.remove_occupant(1);
        assert!(tile.occupants().is_empty());
    }
}
