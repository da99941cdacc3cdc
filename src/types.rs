//! Shared types for the Traitor Roulette simulator.
//!
//! These types form the data model used across all modules: the pocket
//! classification that defines the wheel, the player's colour call, the
//! game lifecycle states, and the domain error enum. They are designed
//! to be stable so that game, strategy, and sweep modules can depend on
//! them without circular references.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pockets on the wheel.
pub const POCKET_COUNT: u8 = 37;

/// All bets are placed in increments of this many chips.
pub const BET_INCREMENT: u64 = 2000;

/// A game is over after this many rounds.
pub const MAX_ROUNDS: u32 = 3;

/// The bankroll is capped at this multiple of the initial bankroll.
pub const BANKROLL_MULTIPLIER: u64 = 3;

// ---------------------------------------------------------------------------
// Pockets
// ---------------------------------------------------------------------------

/// Colour classification of a wheel pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PocketColor {
    Green,
    Red,
    Black,
    Traitor,
}

impl PocketColor {
    /// All pocket colours (useful for iteration).
    pub const ALL: &'static [PocketColor] = &[
        PocketColor::Green,
        PocketColor::Red,
        PocketColor::Black,
        PocketColor::Traitor,
    ];

    /// Classify a pocket number.
    ///
    /// Pocket 0 is the single Green; every other multiple of 3 is a
    /// Traitor; the remaining even numbers are Black and odd are Red.
    /// This yields 1 Green, 12 Red, 12 Black and 12 Traitor pockets.
    pub fn of(number: u8) -> Self {
        if number == 0 {
            PocketColor::Green
        } else if number % 3 == 0 {
            PocketColor::Traitor
        } else if number % 2 == 0 {
            PocketColor::Black
        } else {
            PocketColor::Red
        }
    }
}

impl fmt::Display for PocketColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PocketColor::Green => write!(f, "Green"),
            PocketColor::Red => write!(f, "Red"),
            PocketColor::Black => write!(f, "Black"),
            PocketColor::Traitor => write!(f, "Traitor"),
        }
    }
}

/// A single wheel outcome. Equality and hashing cover both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pocket {
    /// Slot number in 0..37.
    pub number: u8,
    pub color: PocketColor,
}

impl Pocket {
    /// The pocket at a wheel slot, classified by the layout rule.
    pub fn new(number: u8) -> Self {
        debug_assert!(number < POCKET_COUNT);
        Pocket {
            number,
            color: PocketColor::of(number),
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.color)
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

/// The player's colour call for one round. Only Red and Black can be
/// called; Green and Traitor pockets pay out (or don't) on their own
/// terms regardless of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    Red,
    Black,
}

impl Prediction {
    /// The pocket colour this call wins on.
    pub fn color(&self) -> PocketColor {
        match self {
            Prediction::Red => PocketColor::Red,
            Prediction::Black => PocketColor::Black,
        }
    }

    /// Uniform random call from the given stream.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            Prediction::Red
        } else {
            Prediction::Black
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Red => write!(f, "Red"),
            Prediction::Black => write!(f, "Black"),
        }
    }
}

/// Callers starting from a pocket colour go through this boundary so
/// that Green/Traitor calls surface as the dedicated error.
impl TryFrom<PocketColor> for Prediction {
    type Error = GameError;

    fn try_from(color: PocketColor) -> Result<Self, Self::Error> {
        match color {
            PocketColor::Red => Ok(Prediction::Red),
            PocketColor::Black => Ok(Prediction::Black),
            other => Err(GameError::InvalidPrediction(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Game lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle classification of a game, derived from bankroll and round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Rounds remain and the bankroll is strictly between 0 and the cap.
    Active,
    /// Bankroll hit 0.
    Busted,
    /// Bankroll reached the cap of 3x the initial bankroll.
    Capped,
    /// All three rounds played without busting or capping.
    RoundLimitReached,
}

impl GameStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        *self != GameStatus::Active
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "🟢 ACTIVE"),
            GameStatus::Busted => write!(f, "🔴 BUSTED"),
            GameStatus::Capped => write!(f, "🏆 CAPPED"),
            GameStatus::RoundLimitReached => write!(f, "🏁 ROUND LIMIT"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the simulator.
///
/// All of these are precondition violations surfaced immediately; the
/// engine never retries or silently corrects a bad call.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid bet size: {bet} (bankroll: {bankroll}, initial: {initial})")]
    InvalidBetSize {
        bet: u64,
        bankroll: u64,
        initial: u64,
    },

    #[error("Invalid prediction: {0} (only Red or Black can be called)")]
    InvalidPrediction(PocketColor),

    #[error("Game has already ended: {status}")]
    GameAlreadyEnded { status: GameStatus },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
