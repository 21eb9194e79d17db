use crate::player::Player;

/// Flat, id-indexed storage for every player that has ever joined. Ids are
/// stable for a player's whole lifetime: a departed player's slot is left
/// empty rather than shifted, so GUI references to `#id` never silently
/// point at a different player (§3 "Player").
#[derive(Debug, Clone, Default)]
pub struct Players {
    slots: Vec<Option<Player>>,
}

impl Players {
    pub fn insert(&mut self, build: impl FnOnce(u32) -> Player) -> u32 {
        let id = self.slots.len() as u32;
        self.slots.push(Some(build(id)));
        id
    }

    pub fn get(&self, id: u32) -> Option<&Player> {
        self.slots.get(id as usize).and_then(|p| p.as_ref())
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.slots.get_mut(id as usize).and_then(|p| p.as_mut())
    }

    pub fn remove(&mut self, id: u32) -> Option<Player> {
        self.slots.get_mut(id as usize).and_then(|slot| slot.take())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.slots.iter().filter_map(|p| p.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.slots.iter_mut().filter_map(|p| p.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zappy_types::{Orientation, Position};

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut players = Players::default();
        let a = players.insert(|id| Player::new(id, "t".to_string(), Position::new(0, 0), Orientation::North));
        let b = players.insert(|id| Player::new(id, "t".to_string(), Position::new(0, 0), Orientation::North));
        players.remove(a);
        assert!(players.get(a).is_none());
        assert!(players.get(b).is_some());
        let c = players.insert(|id| Player::new(id, "t".to_string(), Position::new(0, 0), Orientation::North));
        assert_ne!(c, a);
        assert_ne!(c, b);
    }
}
