use serde::{Deserialize, Serialize};

/// The seven gatherable resource kinds, in their stable wire order (0..6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Food,
    Linemate,
    Deraumere,
    Sibur,
    Mendiane,
    Phiras,
    Thystame,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Food,
        ResourceKind::Linemate,
        ResourceKind::Deraumere,
        ResourceKind::Sibur,
        ResourceKind::Mendiane,
        ResourceKind::Phiras,
        ResourceKind::Thystame,
    ];

    pub const COUNT: usize = 7;

    pub fn id(self) -> usize {
        match self {
            ResourceKind::Food => 0,
            ResourceKind::Linemate => 1,
            ResourceKind::Deraumere => 2,
            ResourceKind::Sibur => 3,
            ResourceKind::Mendiane => 4,
            ResourceKind::Phiras => 5,
            ResourceKind::Thystame => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Food => "food",
            ResourceKind::Linemate => "linemate",
            ResourceKind::Deraumere => "deraumere",
            ResourceKind::Sibur => "sibur",
            ResourceKind::Mendiane => "mendiane",
            ResourceKind::Phiras => "phiras",
            ResourceKind::Thystame => "thystame",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Target density, as a fraction of tile count, used both for the
    /// initial scatter and for periodic respawn (§4.9).
    pub fn target_density(self) -> f64 {
        match self {
            ResourceKind::Food => 0.5,
            ResourceKind::Linemate => 0.3,
            ResourceKind::Deraumere => 0.15,
            ResourceKind::Sibur => 0.1,
            ResourceKind::Mendiane => 0.1,
            ResourceKind::Phiras => 0.08,
            ResourceKind::Thystame => 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_wire_order() {
        for (i, r) in ResourceKind::ALL.into_iter().enumerate() {
            assert_eq!(r.id(), i);
        }
    }

    #[test]
    fn name_round_trip() {
        for r in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_name(r.name()), Some(r));
        }
    }
}
