//! Bet-sizing strategy.

pub mod sizer;

pub use sizer::size_bet;
