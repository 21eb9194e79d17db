pub mod action;
pub mod egg;
pub mod incantation;
pub mod player;
pub mod players;
pub mod team;
pub mod tile;
pub mod world;

pub use action::{ActionQueue, QueuedAction};
pub use egg::Egg;
pub use player::Player;
pub use players::Players;
pub use team::Team;
pub use tile::Tile;
pub use world::World;
