use zappy_types::Position;

/// A slot created by Fork, recorded purely for GUI observability (`enw`):
/// admission is immediate against the team's raised capacity, so nothing
/// here is ever consumed by a later join (§3 "Egg", §4.5 "Fork").
#[derive(Debug, Clone)]
pub struct Egg {
    pub id: u32,
    pub team_name: String,
    pub position: Position,
}

impl Egg {
    pub fn new(id: u32, team_name: String, position: Position) -> Self {
        Self { id, team_name, position }
    }
}
