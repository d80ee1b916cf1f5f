//! The fixed-step game simulation. Nothing in here touches the terminal;
//! everything is driven by [`Session::tick`] and activation inputs, which
//! keeps the whole game testable headless.

pub mod collision;
pub mod obstacles;
pub mod player;
pub mod state;

pub use obstacles::{ObstacleField, ObstaclePair};
pub use player::Player;
pub use state::{Phase, Session, TickReport};
