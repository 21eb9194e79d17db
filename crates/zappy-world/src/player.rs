use crate::action::ActionQueue;
use zappy_types::{Orientation, Position, ResourceKind, INITIAL_LIFE_TICKS};

/// A connected AI client's full state (§3 "Player"). Ownership lives in a
/// single flat, id-indexed array (`crate::players::Players`); a `Player`
/// never outlives its slot.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub team_name: String,
    pub level: u8,
    pub position: Position,
    pub orientation: Orientation,
    inventory: [u32; ResourceKind::COUNT],
    pub life_ticks: i64,
    pub queue: ActionQueue,
    pub incanting: bool,
}

impl Player {
    pub fn new(id: u32, team_name: String, position: Position, orientation: Orientation) -> Self {
        let mut inventory = [0u32; ResourceKind::COUNT];
        inventory[ResourceKind::Food.id()] = 10;
        Self {
            id,
            team_name,
            level: 1,
            position,
            orientation,
            inventory,
            life_ticks: INITIAL_LIFE_TICKS,
            queue: ActionQueue::default(),
            incanting: false,
        }
    }

    pub fn inventory(&self) -> &[u32; ResourceKind::COUNT] {
        &self.inventory
    }

    pub fn inventory_count(&self, kind: ResourceKind) -> u32 {
        self.inventory[kind.id()]
    }

    pub fn add_to_inventory(&mut self, kind: ResourceKind, amount: u32) {
        self.inventory[kind.id()] += amount;
    }

    /// Remove up to `amount` of `kind` from inventory, returning how much
    /// was actually available.
    pub fn take_from_inventory(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let available = self.inventory[kind.id()];
        let taken = available.min(amount);
        self.inventory[kind.id()] -= taken;
        taken
    }

    /// Drain one tick of life. Called unconditionally every tick.
    pub fn decrement_life(&mut self) {
        self.life_ticks -= 1;
    }

    /// Every `FOOD_TICK_INTERVAL` ticks, consume one Food if available and
    /// top life back to its initial cap; otherwise life keeps draining
    /// (§4.5 "Starvation & food clock").
    pub fn apply_food_tick(&mut self) {
        if self.inventory[ResourceKind::Food.id()] > 0 {
            self.inventory[ResourceKind::Food.id()] -= 1;
            self.life_ticks = INITIAL_LIFE_TICKS;
        }
    }

    pub fn is_starved(&self) -> bool {
        self.life_ticks <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_player() -> Player {
        Player::new(1, "team".to_string(), Position::new(0, 0), Orientation::North)
    }

    #[test]
    fn take_then_set_is_idempotent() {
        let mut player = new_player();
        let taken = player.take_from_inventory(ResourceKind::Food, 3);
        player.add_to_inventory(ResourceKind::Food, taken);
        assert_eq!(player.inventory_count(ResourceKind::Food), 10);
    }

    #[test]
    fn take_never_goes_negative() {
        let mut player = new_player();
        assert_eq!(player.take_from_inventory(ResourceKind::Linemate, 5), 0);
    }

    #[test]
    fn starvation_triggers_when_life_reaches_zero() {
        let mut player = new_player();
        player.life_ticks = 1;
        player.decrement_life();
        assert!(player.is_starved());
    }

    #[test]
    fn food_tick_tops_life_back_to_the_cap_when_food_available() {
        let mut player = new_player();
        player.life_ticks = 1;
        player.apply_food_tick();
        assert_eq!(player.life_ticks, zappy_types::INITIAL_LIFE_TICKS);
        assert_eq!(player.inventory_count(ResourceKind::Food), 9);
    }

    #[test]
    fn food_tick_without_food_leaves_life_draining() {
        let mut player = new_player();
        player.take_from_inventory(ResourceKind::Food, 10);
        player.life_ticks = 1;
        player.apply_food_tick();
        assert_eq!(player.life_ticks, 1);
    }

}
