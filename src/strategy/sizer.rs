//! Percentage-of-bankroll bet sizing.

use crate::types::BET_INCREMENT;

/// Turn a strategy percentage into a legal bet.
///
/// The raw amount is `bankroll * percentage / 100`, rounded to the
/// nearest bet increment with ties going away from zero. A rounded
/// amount of zero is bumped to one increment so the strategy always
/// has chips in play. The result is then clamped to the current
/// bankroll and finally to the initial bankroll, in that order.
pub fn size_bet(percentage: f64, initial_bankroll: u64, bankroll: u64) -> u64 {
    let raw = bankroll as f64 * percentage / 100.0;
    let increments = (raw / BET_INCREMENT as f64).round();
    let mut bet = (increments as u64).saturating_mul(BET_INCREMENT);
    if bet == 0 {
        bet = BET_INCREMENT;
    }
    if bet > bankroll {
        bet = bankroll;
    }
    if bet > initial_bankroll {
        bet = initial_bankroll;
    }
    bet
}
