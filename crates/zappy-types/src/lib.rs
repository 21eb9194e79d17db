pub mod command;
pub mod direction;
pub mod incantation;
pub mod orientation;
pub mod position;
pub mod resource;

pub use command::CommandKind;
pub use direction::{broadcast_sector, eject_arrival_direction, wrap_delta};
pub use incantation::{requirement_for_level, IncantationRequirement};
pub use orientation::Orientation;
pub use position::Position;
pub use resource::ResourceKind;

/// Initial life meter, in ticks (§3).
pub const INITIAL_LIFE_TICKS: i64 = 1260;

/// Ticks between automatic food consumption (§4.5 "Starvation & food clock").
pub const FOOD_TICK_INTERVAL: i64 = 126;

/// Maximum command text length accepted from an AI client (§3 "Action").
pub const MAX_COMMAND_LEN: usize = 31;

/// Maximum team name length (§3 "Team").
pub const MAX_TEAM_NAME_LEN: usize = 50;

/// Ticks between resource respawn passes (§4.9).
pub const RESOURCE_RESPAWN_INTERVAL_TICKS: u64 = 20;
