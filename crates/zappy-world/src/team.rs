/// A named faction with a fixed client capacity (§3 "Team").
#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    max_clients: u32,
    current_clients: u32,
}

impl Team {
    pub fn new(name: String, max_clients: u32) -> Self {
        Self {
            name,
            max_clients,
            current_clients: 0,
        }
    }

    pub fn max_clients(&self) -> u32 {
        self.max_clients
    }

    pub fn current_clients(&self) -> u32 {
        self.current_clients
    }

    pub fn free_slots(&self) -> u32 {
        self.max_clients.saturating_sub(self.current_clients)
    }

    /// Admit one client if a slot is free, incrementing `current_clients`.
    pub fn try_admit(&mut self) -> bool {
        if self.free_slots() > 0 {
            self.current_clients += 1;
            true
        } else {
            false
        }
    }

    /// Release a slot, e.g. on disconnect or death.
    pub fn release(&mut self) {
        self.current_clients = self.current_clients.saturating_sub(1);
    }

    /// A successful Fork raises the team's capacity by one egg slot (§4.5).
    pub fn grow_capacity(&mut self) {
        self.max_clients += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_capacity() {
        let mut team = Team::new("x".to_string(), 2);
        assert!(team.try_admit());
        assert!(team.try_admit());
        assert!(!team.try_admit());
        assert_eq!(team.current_clients(), 2);
    }

    #[test]
    fn release_frees_a_slot() {
        let mut team = Team::new("x".to_string(), 1);
        assert!(team.try_admit());
        team.release();
        assert!(team.try_admit());
    }

    #[test]
    fn fork_grows_capacity_without_admitting() {
        let mut team = Team::new("x".to_string(), 1);
        assert!(team.try_admit());
        team.grow_capacity();
        assert_eq!(team.free_slots(), 1);
    }
}
