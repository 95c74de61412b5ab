//! Number guess: a uniform target from 1-100 against the player's guess.
//!
//! Pays by distance: exact, within 5, within 10. Guesses near the edges of the
//! range have fewer neighbours, so each guess gets its own calibrated table.

use super::paytable::calibrate;
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{
    GameConfig, GameOutcome, GameType, NumberGuessOutcome, NUMBER_GUESS_CLOSE, NUMBER_GUESS_MAX,
    NUMBER_GUESS_NEAR,
};

const RAW_EXACT: f64 = 50.0;
const RAW_NEAR: f64 = 5.0;
const RAW_CLOSE: f64 = 1.5;

/// Distance tier, as an index into a guess's table.
pub fn tier(distance: u8) -> Option<usize> {
    match distance {
        0 => Some(0),
        d if d <= NUMBER_GUESS_NEAR => Some(1),
        d if d <= NUMBER_GUESS_CLOSE => Some(2),
        _ => None,
    }
}

/// Targets falling in each tier for `guess`.
fn tier_counts(guess: u8) -> [u32; 3] {
    let mut counts = [0u32; 3];
    for target in 1..=NUMBER_GUESS_MAX {
        if let Some(t) = tier(guess.abs_diff(target)) {
            counts[t] += 1;
        }
    }
    counts
}

/// Calibrated pays per guess, `[exact, near, close]`.
#[derive(Clone, Debug)]
pub struct NumberGuessTable {
    pays: Vec<[f64; 3]>,
}

impl NumberGuessTable {
    pub fn multiplier(&self, guess: u8, target: u8) -> f64 {
        let row = match self.pays.get(guess.wrapping_sub(1) as usize) {
            Some(row) => row,
            None => return 0.0,
        };
        tier(guess.abs_diff(target)).map_or(0.0, |t| row[t])
    }
}

pub struct NumberGuess;

impl SoloGame for NumberGuess {
    type Params = u8;
    type Table = NumberGuessTable;

    const GAME_TYPE: GameType = GameType::NumberGuess;

    fn build(config: &GameConfig) -> Result<NumberGuessTable, EngineError> {
        let total = NUMBER_GUESS_MAX as f64;
        let mut pays = Vec::with_capacity(NUMBER_GUESS_MAX as usize);
        for guess in 1..=NUMBER_GUESS_MAX {
            let counts = tier_counts(guess);
            let entries = [
                (counts[0] as f64 / total, RAW_EXACT),
                (counts[1] as f64 / total, RAW_NEAR),
                (counts[2] as f64 / total, RAW_CLOSE),
            ];
            let row = calibrate(
                Self::GAME_TYPE,
                &entries,
                config.return_to_player(),
                config.max_multiplier,
            )?;
            pays.push([row[0], row[1], row[2]]);
        }
        Ok(NumberGuessTable { pays })
    }

    fn resolve(
        table: &NumberGuessTable,
        guess: &u8,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        if !(1..=NUMBER_GUESS_MAX).contains(guess) {
            return Err(EngineError::invalid(
                "guess",
                format!("{guess} is outside 1-{NUMBER_GUESS_MAX}"),
            ));
        }
        let target = rng.next_bounded(NUMBER_GUESS_MAX) + 1;
        let distance = guess.abs_diff(target);
        Ok(Resolution::new(
            table.multiplier(*guess, target),
            GameOutcome::NumberGuess(NumberGuessOutcome {
                guess: *guess,
                target,
                distance,
            }),
        ))
    }
}
