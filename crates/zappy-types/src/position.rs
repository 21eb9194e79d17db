use serde::{Deserialize, Serialize};

/// A tile coordinate on the toroidal grid. Always kept in-bounds for a
/// given (width, height) by `World::wrap`; this type itself is a plain pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}
