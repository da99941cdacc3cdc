//! The three-round betting game.
//!
//! A game starts from an initial bankroll, runs for at most three
//! rounds, and ends early when the bankroll hits zero or reaches the
//! cap of three times the initial bankroll. Each round the player bets
//! some chips on Red or Black, the wheel spins, and the payout is
//! three times the bet on a Traitor pocket, twice the bet on a colour
//! match, and nothing otherwise. Winnings are clamped so the bankroll
//! never exceeds the cap.

use crate::game::wheel::Wheel;
use crate::types::{
    GameError, GameStatus, Pocket, PocketColor, Prediction, BANKROLL_MULTIPLIER, BET_INCREMENT,
    MAX_ROUNDS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything that happened in one resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Round number the bet was placed in (1-based).
    pub round: u32,
    pub bet: u64,
    pub prediction: Prediction,
    pub pocket: Pocket,
    /// Chips paid out, after clamping to the bankroll cap.
    pub winnings: u64,
    /// Bankroll after the round resolved.
    pub bankroll: u64,
}

/// Game state machine, generic over the wheel so tests can script spins.
#[derive(Debug, Clone)]
pub struct GameEngine<W: Wheel> {
    wheel: W,
    initial_bankroll: u64,
    max_bankroll: u64,
    bankroll: u64,
    round: u32,
}

impl<W: Wheel> GameEngine<W> {
    /// Start a game with the given wheel and initial bankroll.
    ///
    /// The bankroll must be a positive multiple of the bet increment,
    /// and small enough that the cap of three times it fits in a u64.
    pub fn new(wheel: W, initial_bankroll: u64) -> Result<Self, GameError> {
        if initial_bankroll == 0 || initial_bankroll % BET_INCREMENT != 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "initial bankroll must be a positive multiple of {BET_INCREMENT}, got {initial_bankroll}"
            )));
        }
        let max_bankroll = initial_bankroll.checked_mul(BANKROLL_MULTIPLIER).ok_or_else(|| {
            GameError::InvalidConfiguration(format!(
                "initial bankroll {initial_bankroll} overflows the bankroll cap"
            ))
        })?;
        Ok(GameEngine {
            wheel,
            initial_bankroll,
            max_bankroll,
            bankroll: initial_bankroll,
            round: 1,
        })
    }

    /// Play one round: validate the bet, spin, settle the payout.
    ///
    /// Validation order matters and is part of the game's contract: bet
    /// size is checked against the initial bankroll, then against the
    /// increment rule, then against the current bankroll, and only then
    /// is the ended state checked. A zero bet on an active game is
    /// legal and plays the round.
    pub fn play(&mut self, bet: u64, prediction: Prediction) -> Result<RoundOutcome, GameError> {
        if bet > self.initial_bankroll {
            return Err(self.invalid_bet(bet));
        }
        // Below one increment of chips the player may go all-in with
        // whatever is left, so the increment rule is waived there.
        if bet % BET_INCREMENT != 0 && self.bankroll >= BET_INCREMENT {
            return Err(self.invalid_bet(bet));
        }
        if bet > self.bankroll {
            return Err(self.invalid_bet(bet));
        }
        if self.has_game_ended() {
            return Err(GameError::GameAlreadyEnded {
                status: self.status(),
            });
        }

        self.bankroll -= bet;
        let pocket = self.wheel.spin();
        let raw = if pocket.color == PocketColor::Traitor {
            bet * 3
        } else if pocket.color == prediction.color() {
            bet * 2
        } else {
            0
        };
        let winnings = raw.min(self.max_bankroll - self.bankroll);
        self.bankroll += winnings;

        let outcome = RoundOutcome {
            round: self.round,
            bet,
            prediction,
            pocket,
            winnings,
            bankroll: self.bankroll,
        };
        self.round += 1;

        debug!(
            round = outcome.round,
            bet,
            prediction = %prediction,
            pocket = %pocket,
            winnings,
            bankroll = self.bankroll,
            "round resolved"
        );

        Ok(outcome)
    }

    /// Whether the game is over: busted, capped, or out of rounds.
    pub fn has_game_ended(&self) -> bool {
        self.bankroll == 0 || self.bankroll >= self.max_bankroll || self.round > MAX_ROUNDS
    }

    /// Lifecycle classification. Busted takes precedence over the
    /// round limit when both apply.
    pub fn status(&self) -> GameStatus {
        if self.bankroll == 0 {
            GameStatus::Busted
        } else if self.bankroll >= self.max_bankroll {
            GameStatus::Capped
        } else if self.round > MAX_ROUNDS {
            GameStatus::RoundLimitReached
        } else {
            GameStatus::Active
        }
    }

    /// Start over with the original bankroll. The wheel keeps spinning
    /// from wherever it was.
    pub fn reset(&mut self) {
        self.bankroll = self.initial_bankroll;
        self.round = 1;
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }

    pub fn initial_bankroll(&self) -> u64 {
        self.initial_bankroll
    }

    pub fn max_bankroll(&self) -> u64 {
        self.max_bankroll
    }

    /// Current round number, 1-based. Past the last round this is 4.
    pub fn round(&self) -> u32 {
        self.round
    }

    fn invalid_bet(&self, bet: u64) -> GameError {
        GameError::InvalidBetSize {
            bet,
            bankroll: self.bankroll,
            initial: self.initial_bankroll,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
