/// The AI command repertoire, tagged by verb. Argument-bearing verbs carry
/// their parsed argument; the rest are unit variants. One executor table
/// dispatches on this instead of a class hierarchy per verb (§9 design note).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Forward,
    Right,
    Left,
    Look,
    Inventory,
    Take,
    Set,
    Eject,
    Broadcast,
    Incantation,
    Fork,
    ConnectNbr,
}

impl CommandKind {
    /// Static cost table, in ticks (§4.1).
    pub fn cost_ticks(&self) -> u32 {
        match self {
            CommandKind::Forward => 7,
            CommandKind::Right => 7,
            CommandKind::Left => 7,
            CommandKind::Look => 7,
            CommandKind::Inventory => 1,
            CommandKind::Take => 7,
            CommandKind::Set => 7,
            CommandKind::Eject => 7,
            CommandKind::Broadcast => 7,
            CommandKind::Incantation => 300,
            CommandKind::Fork => 42,
            CommandKind::ConnectNbr => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_table_matches_spec() {
        assert_eq!(CommandKind::Forward.cost_ticks(), 7);
        assert_eq!(CommandKind::Inventory.cost_ticks(), 1);
        assert_eq!(CommandKind::Incantation.cost_ticks(), 300);
        assert_eq!(CommandKind::Fork.cost_ticks(), 42);
        assert_eq!(CommandKind::ConnectNbr.cost_ticks(), 0);
    }
}
