//! Roulette on a single-zero (European) wheel.
//!
//! Bet types:
//! - Straight (single number, 35:1)
//! - Red / Black / Even / Odd / Low / High (1:1)
//! - Dozen / Column (2:1)
//!
//! Zero loses every bet except a straight bet on zero. Payouts are fixed by
//! the table, so the house edge is 1/37 for every bet.

use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{
    GameConfig, GameOutcome, GameType, RouletteBet, RouletteColor, RouletteOutcome, RED_NUMBERS,
};

/// Check if a number is red.
pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

pub fn color(number: u8) -> RouletteColor {
    if number == 0 {
        RouletteColor::Green
    } else if is_red(number) {
        RouletteColor::Red
    } else {
        RouletteColor::Black
    }
}

/// Check if a bet wins for a given result.
pub fn bet_wins(bet: RouletteBet, result: u8) -> bool {
    // Zero loses all except straight bet on 0
    if result == 0 {
        return bet == RouletteBet::Straight(0);
    }

    match bet {
        RouletteBet::Straight(number) => number == result,
        RouletteBet::Red => is_red(result),
        RouletteBet::Black => !is_red(result),
        RouletteBet::Even => result % 2 == 0,
        RouletteBet::Odd => result % 2 == 1,
        RouletteBet::Low => (1..=18).contains(&result),
        RouletteBet::High => (19..=36).contains(&result),
        RouletteBet::Dozen(dozen) => (result - 1) / 12 == dozen,
        // Column 0: 1, 4, 7, ... 34
        // Column 1: 2, 5, 8, ... 35
        // Column 2: 3, 6, 9, ... 36
        RouletteBet::Column(column) => (result - 1) % 3 == column,
    }
}

/// Total-return multiplier for a winning bet (stake included).
pub fn payout_multiplier(bet: RouletteBet) -> f64 {
    match bet {
        RouletteBet::Straight(_) => 36.0,
        RouletteBet::Red
        | RouletteBet::Black
        | RouletteBet::Even
        | RouletteBet::Odd
        | RouletteBet::Low
        | RouletteBet::High => 2.0,
        RouletteBet::Dozen(_) | RouletteBet::Column(_) => 3.0,
    }
}

fn validate(bet: RouletteBet) -> Result<(), EngineError> {
    match bet {
        RouletteBet::Straight(number) if number > 36 => Err(EngineError::invalid(
            "roulette number",
            format!("{number} is not on the wheel (0-36)"),
        )),
        RouletteBet::Dozen(index) | RouletteBet::Column(index) if index > 2 => Err(
            EngineError::invalid("roulette group", format!("{index} is not 0, 1 or 2")),
        ),
        _ => Ok(()),
    }
}

pub struct Roulette;

impl SoloGame for Roulette {
    type Params = RouletteBet;
    type Table = ();

    const GAME_TYPE: GameType = GameType::Roulette;

    fn build(_config: &GameConfig) -> Result<(), EngineError> {
        Ok(())
    }

    fn resolve(_table: &(), bet: &RouletteBet, rng: &mut GameRng) -> Result<Resolution, EngineError> {
        validate(*bet)?;
        let number = rng.spin_roulette();
        let multiplier = if bet_wins(*bet, number) {
            payout_multiplier(*bet)
        } else {
            0.0
        };
        Ok(Resolution::new(
            multiplier,
            GameOutcome::Roulette(RouletteOutcome {
                number,
                color: color(number),
                bet: *bet,
            }),
        ))
    }
}
