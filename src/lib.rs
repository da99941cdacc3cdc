//! Traitor Roulette: a three-round betting game on a 37-pocket wheel,
//! plus a brute-force search over percentage-of-bankroll strategies.
//!
//! The game itself lives in [`game`], bet sizing in [`strategy`], the
//! parallel strategy sweep in [`sweep`], and report rendering in
//! [`report`]. The [`console`] module drives a single interactive game.

pub mod config;
pub mod console;
pub mod game;
pub mod report;
pub mod strategy;
pub mod sweep;
pub mod types;
