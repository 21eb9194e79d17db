use serde::{Deserialize, Serialize};

/// Facing direction of a player. Wire-encoded as 1..4 (N, E, S, W);
/// stored internally as 0..3 for cheap modular rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Orientation::North,
            1 => Orientation::East,
            2 => Orientation::South,
            _ => Orientation::West,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

    /// Wire encoding used by both protocols: 1..4.
    pub fn to_wire(self) -> u8 {
        self.index() + 1
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        if (1..=4).contains(&value) {
            Some(Self::from_index(value - 1))
        } else {
            None
        }
    }

    pub fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The orientation directly opposite this one.
    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Offset of the tile directly in front, in (dx, dy) grid units.
    /// N decreases y, E increases x, S increases y, W decreases x.
    pub fn front_offset(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, -1),
            Orientation::East => (1, 0),
            Orientation::South => (0, 1),
            Orientation::West => (-1, 0),
        }
    }

    /// Offset of a look-cone tile at the given depth (distance ahead) and
    /// lateral offset, per the orientation mapping in the GLOSSARY.
    pub fn cone_offset(self, depth: i32, offset: i32) -> (i32, i32) {
        match self {
            Orientation::North => (offset, -depth),
            Orientation::East => (depth, offset),
            Orientation::South => (-offset, depth),
            Orientation::West => (-depth, -offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_right_turns_is_identity() {
        let mut o = Orientation::North;
        for _ in 0..4 {
            o = o.turn_right();
        }
        assert_eq!(o, Orientation::North);
    }

    #[test]
    fn four_left_turns_is_identity() {
        let mut o = Orientation::East;
        for _ in 0..4 {
            o = o.turn_left();
        }
        assert_eq!(o, Orientation::East);
    }

    #[test]
    fn right_then_left_is_identity() {
        let o = Orientation::South;
        assert_eq!(o.turn_right().turn_left(), o);
    }

    #[test]
    fn wire_round_trip() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_wire(o.to_wire()), Some(o));
        }
    }
}
