//! Interactive play session.
//!
//! Reads colour calls and bet sizes line by line, plays them against
//! the engine, and narrates each round. Generic over the input and
//! output streams so tests can drive a whole session from a string.

use crate::game::{GameEngine, Wheel};
use crate::types::{GameError, Prediction};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// Run one game interactively until it ends or the input runs out.
pub fn play_session<W, R, O>(game: &mut GameEngine<W>, input: &mut R, output: &mut O) -> Result<()>
where
    W: Wheel,
    R: BufRead,
    O: Write,
{
    while !game.has_game_ended() {
        write!(
            output,
            "Which color do you want to bet on? r for red, b for black: "
        )?;
        output.flush()?;
        let Some(answer) = read_trimmed(input)? else {
            break;
        };
        let prediction = match answer.as_str() {
            "r" => Prediction::Red,
            "b" => Prediction::Black,
            _ => {
                writeln!(output, "Invalid color")?;
                continue;
            }
        };

        write!(
            output,
            "How much do you want to bet? Your bankroll is {}$, bet sizes are in increments of 2000$: ",
            game.bankroll()
        )?;
        output.flush()?;
        let Some(answer) = read_trimmed(input)? else {
            break;
        };
        let Ok(bet) = answer.parse::<u64>() else {
            writeln!(output, "Invalid bet")?;
            continue;
        };

        match game.play(bet, prediction) {
            Ok(outcome) => {
                writeln!(output, "The winning pocket is {}", outcome.pocket)?;
                writeln!(
                    output,
                    "You won {}$. Your bankroll is now {}$.",
                    outcome.winnings, outcome.bankroll
                )?;
            }
            Err(err @ GameError::InvalidBetSize { .. }) => {
                debug!(error = %err, "rejected bet");
                writeln!(output, "{err}")?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    writeln!(output, "Game over: {}", game.status())?;
    writeln!(output, "Your final bankroll is {}$", game.bankroll())?;
    Ok(())
}

/// One trimmed line of input, or `None` at end of input.
fn read_trimmed<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
