use crate::tile::Tile;
use rand::Rng;
use zappy_types::{Orientation, Position, ResourceKind};

/// The toroidal grid: tiles indexed row-major, wrapping on both axes (§3 "World").
#[derive(Debug, Clone)]
pub struct World {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl World {
    pub fn new(width: u32, height: u32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::default(); count],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reduce a signed coordinate pair to the canonical in-bounds position,
    /// wrapping on both axes.
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        let w = self.width as i32;
        let h = self.height as i32;
        let wx = ((x % w) + w) % w;
        let wy = ((y % h) + h) % h;
        Position::new(wx as u32, wy as u32)
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    pub fn tile(&self, pos: Position) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    pub fn tile_mut(&mut self, pos: Position) -> &mut Tile {
        let idx = self.index(pos);
        &mut self.tiles[idx]
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> {
        self.tiles.iter().enumerate().map(move |(i, t)| {
            let x = (i as u32) % self.width;
            let y = (i as u32) / self.width;
            (Position::new(x, y), t)
        })
    }

    /// The tile directly ahead of `pos` when facing `orientation`, wrapped.
    pub fn step(&self, pos: Position, orientation: Orientation) -> Position {
        let (dx, dy) = orientation.front_offset();
        self.wrap(pos.x as i32 + dx, pos.y as i32 + dy)
    }

    /// Wrap-minimal displacement from `from` to `to`, per axis.
    pub fn wrap_delta_to(&self, from: Position, to: Position) -> (i32, i32) {
        let dx = zappy_types::wrap_delta(to.x as i32, from.x as i32, self.width as i32);
        let dy = zappy_types::wrap_delta(to.y as i32, from.y as i32, self.height as i32);
        (dx, dy)
    }

    pub fn total_resource(&self, kind: ResourceKind) -> u32 {
        self.tiles.iter().map(|t| t.resource_count(kind)).sum()
    }

    /// Positions in the player's vision cone, grouped by depth (0 = the
    /// player's own tile, 1..=level the rows ahead), each row ordered from
    /// the orientation's left edge to its right edge (GLOSSARY "Look cone").
    pub fn look_cone(&self, origin: Position, orientation: Orientation, level: u8) -> Vec<Vec<Position>> {
        (0..=level as i32)
            .map(|depth| {
                (-depth..=depth)
                    .map(|offset| {
                        let (dx, dy) = orientation.cone_offset(depth, offset);
                        self.wrap(origin.x as i32 + dx, origin.y as i32 + dy)
                    })
                    .collect()
            })
            .collect()
    }

    /// Scatter the initial resource quantities so each kind reaches its
    /// target density across the grid (§4.9).
    pub fn init_resources(&mut self, rng: &mut impl Rng) {
        for kind in ResourceKind::ALL {
            let target = self.target_amount(kind);
            self.scatter(kind, target, rng);
        }
    }

    /// Top up every resource kind back to its target density (§4.1 step
    /// (vii), §4.9); called every `RESOURCE_RESPAWN_INTERVAL_TICKS` ticks.
    pub fn respawn_resources(&mut self, rng: &mut impl Rng) {
        for kind in ResourceKind::ALL {
            let target = self.target_amount(kind);
            let current = self.total_resource(kind);
            if current < target {
                tracing::trace!(resource = kind.name(), added = target - current, "respawning resource");
                self.scatter(kind, target - current, rng);
            }
        }
    }

    fn target_amount(&self, kind: ResourceKind) -> u32 {
        ((self.width * self.height) as f64 * kind.target_density()).floor() as u32
    }

    fn scatter(&mut self, kind: ResourceKind, amount: u32, rng: &mut impl Rng) {
        if self.tiles.is_empty() {
            return;
        }
        for _ in 0..amount {
            let idx = rng.gen_range(0..self.tiles.len());
            self.tiles[idx].add_resource(kind, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn wrap_identity_inside_bounds() {
        let world = World::new(10, 10);
        assert_eq!(world.wrap(3, 4), Position::new(3, 4));
    }

    #[test]
    fn wrap_handles_negative_and_overflow() {
        let world = World::new(10, 10);
        assert_eq!(world.wrap(-1, -1), Position::new(9, 9));
        assert_eq!(world.wrap(10, 10), Position::new(0, 0));
    }

    #[test]
    fn forward_wraps_around_the_edge() {
        let world = World::new(10, 10);
        let origin = Position::new(9, 5);
        let mut pos = origin;
        for _ in 0..10 {
            pos = world.step(pos, Orientation::East);
        }
        assert_eq!(pos, origin);
    }

    #[test]
    fn look_cone_has_level_squared_plus_level_plus_one_tiles() {
        let world = World::new(20, 20);
        let cone = world.look_cone(Position::new(5, 5), Orientation::North, 2);
        let total: usize = cone.iter().map(|row| row.len()).sum();
        assert_eq!(total, 2 * 2 + 2 + 1);
        assert_eq!(cone[0], vec![Position::new(5, 5)]);
    }

    #[test]
    fn respawn_never_overshoots_below_target() {
        let mut world = World::new(10, 10);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        world.init_resources(&mut rng);
        let before = world.total_resource(ResourceKind::Food);
        world.respawn_resources(&mut rng);
        let after = world.total_resource(ResourceKind::Food);
        assert!(after >= before);
    }
}
