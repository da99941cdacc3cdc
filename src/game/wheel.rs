//! Wheel implementations.
//!
//! The engine only needs one thing from a wheel: spin it, get a pocket.
//! The [`Wheel`] trait keeps the engine generic so that tests and the
//! sweep can inject a deterministic wheel while interactive play uses
//! an entropy-seeded one.

use crate::types::{GameError, Pocket, PocketColor, POCKET_COUNT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 37 pockets of the standard layout, in slot order.
pub fn standard_layout() -> [Pocket; POCKET_COUNT as usize] {
    std::array::from_fn(|i| Pocket::new(i as u8))
}

/// Anything the engine can spin.
pub trait Wheel {
    /// Produce the next pocket.
    fn spin(&mut self) -> Pocket;
}

// ---------------------------------------------------------------------------
// Random wheel
// ---------------------------------------------------------------------------

/// A fair wheel: every spin picks one of the 37 pockets uniformly.
#[derive(Debug, Clone)]
pub struct RandomWheel {
    pockets: [Pocket; POCKET_COUNT as usize],
    rng: ChaCha8Rng,
}

impl RandomWheel {
    /// A wheel driven by the given stream.
    pub fn new(rng: ChaCha8Rng) -> Self {
        RandomWheel {
            pockets: standard_layout(),
            rng,
        }
    }

    /// A reproducible wheel for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// A wheel seeded from OS entropy, for interactive play.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl Wheel for RandomWheel {
    fn spin(&mut self) -> Pocket {
        self.pockets[self.rng.gen_range(0..self.pockets.len())]
    }
}

// ---------------------------------------------------------------------------
// Rigged wheel
// ---------------------------------------------------------------------------

/// A wheel that lands on a fixed sequence of pockets, cycling forever.
///
/// Used by tests to script exact round outcomes.
#[derive(Debug, Clone)]
pub struct RiggedWheel {
    pockets: Vec<Pocket>,
    spins: usize,
}

impl RiggedWheel {
    /// A wheel that cycles through the given pockets in order.
    pub fn new(pockets: Vec<Pocket>) -> Result<Self, GameError> {
        if pockets.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "a rigged wheel needs at least one pocket".to_string(),
            ));
        }
        Ok(RiggedWheel { pockets, spins: 0 })
    }

    /// Convenience constructor from colours. Each colour is mapped to
    /// the lowest-numbered pocket of that colour.
    pub fn of_colors(colors: &[PocketColor]) -> Result<Self, GameError> {
        let pockets = colors
            .iter()
            .map(|color| {
                let number = match color {
                    PocketColor::Green => 0,
                    PocketColor::Red => 1,
                    PocketColor::Black => 2,
                    PocketColor::Traitor => 3,
                };
                Pocket::new(number)
            })
            .collect();
        Self::new(pockets)
    }
}

impl Wheel for RiggedWheel {
    fn spin(&mut self) -> Pocket {
        let pocket = self.pockets[self.spins % self.pockets.len()];
        self.spins += 1;
        pocket
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
