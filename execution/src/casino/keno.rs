//! Keno: 20 numbers drawn from 1-80.
//!
//! The player picks 1-10 numbers. Each pick count has its own raw paytable
//! (hits -> raw pay) calibrated against the hypergeometric hit distribution.

use super::paytable::{calibrate, hypergeometric};
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{
    GameConfig, GameOutcome, GameType, KenoOutcome, KENO_DRAWN, KENO_MAX_PICKS, KENO_POOL,
};
use std::collections::BTreeSet;

/// Raw pays indexed by `[picks - 1][hits]`.
const RAW_PAYTABLES: [&[f64]; KENO_MAX_PICKS] = [
    &[0.0, 3.5],
    &[0.0, 1.0, 9.0],
    &[0.0, 0.0, 2.5, 25.0],
    &[0.0, 0.0, 1.5, 5.0, 75.0],
    &[0.0, 0.0, 0.0, 3.0, 15.0, 500.0],
    &[0.0, 0.0, 0.0, 2.0, 5.0, 50.0, 1_500.0],
    &[0.0, 0.0, 0.0, 1.0, 3.0, 20.0, 100.0, 5_000.0],
    &[0.0, 0.0, 0.0, 0.0, 2.0, 10.0, 50.0, 500.0, 10_000.0],
    &[0.0, 0.0, 0.0, 0.0, 1.0, 5.0, 25.0, 200.0, 2_000.0, 25_000.0],
    &[0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 20.0, 100.0, 1_000.0, 5_000.0, 100_000.0],
];

/// Probability of `hits` matches with `picks` numbers chosen.
pub fn hit_probability(picks: usize, hits: usize) -> f64 {
    hypergeometric(
        KENO_POOL as u32,
        picks as u32,
        KENO_DRAWN as u32,
        hits as u32,
    )
}

/// Calibrated keno paytables, one per pick count.
#[derive(Clone, Debug)]
pub struct KenoTable {
    pays: Vec<Vec<f64>>,
}

impl KenoTable {
    pub fn multiplier(&self, picks: usize, hits: usize) -> f64 {
        picks
            .checked_sub(1)
            .and_then(|i| self.pays.get(i))
            .and_then(|row| row.get(hits))
            .copied()
            .unwrap_or(0.0)
    }

    /// Expected total return for a given pick count.
    pub fn expected_return(&self, picks: usize) -> f64 {
        (0..=picks)
            .map(|hits| hit_probability(picks, hits) * self.multiplier(picks, hits))
            .sum()
    }
}

fn validate(numbers: &BTreeSet<u8>) -> Result<(), EngineError> {
    if numbers.is_empty() || numbers.len() > KENO_MAX_PICKS {
        return Err(EngineError::invalid(
            "numbers",
            format!("pick between 1 and {KENO_MAX_PICKS} numbers, got {}", numbers.len()),
        ));
    }
    if let Some(bad) = numbers.iter().find(|&&n| n == 0 || n > KENO_POOL) {
        return Err(EngineError::invalid(
            "numbers",
            format!("{bad} is outside 1-{KENO_POOL}"),
        ));
    }
    Ok(())
}

pub struct Keno;

impl SoloGame for Keno {
    type Params = BTreeSet<u8>;
    type Table = KenoTable;

    const GAME_TYPE: GameType = GameType::Keno;

    fn build(config: &GameConfig) -> Result<KenoTable, EngineError> {
        let pays = RAW_PAYTABLES
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let picks = i + 1;
                let entries: Vec<(f64, f64)> = raw
                    .iter()
                    .enumerate()
                    .map(|(hits, &pay)| (hit_probability(picks, hits), pay))
                    .collect();
                calibrate(
                    Self::GAME_TYPE,
                    &entries,
                    config.return_to_player(),
                    config.max_multiplier,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KenoTable { pays })
    }

    fn resolve(
        table: &KenoTable,
        numbers: &BTreeSet<u8>,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        validate(numbers)?;

        let drawn_numbers: BTreeSet<u8> = rng
            .sample_distinct(KENO_POOL, KENO_DRAWN)
            .into_iter()
            .map(|n| n + 1)
            .collect();
        let hits = numbers.intersection(&drawn_numbers).count();

        Ok(Resolution::new(
            table.multiplier(numbers.len(), hits),
            GameOutcome::Keno(KenoOutcome {
                drawn_numbers,
                chosen_numbers: numbers.clone(),
                hits: hits as u8,
            }),
        ))
    }
}
