//! Game state machine and the wheels that drive it.

pub mod engine;
pub mod wheel;

pub use engine::{GameEngine, RoundOutcome};
pub use wheel::{standard_layout, RandomWheel, RiggedWheel, Wheel};
