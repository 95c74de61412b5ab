//! Mines on a 5x5 grid with a batch reveal.
//!
//! Mines and picks are independent uniform subsets of the grid. Picks are
//! revealed in order and the round stops at the first mine. Surviving every
//! pick pays `(1 - edge) / P(survive)`, capped at the configured maximum.

use super::paytable::hypergeometric;
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{GameConfig, GameOutcome, GameType, MinesOutcome, MINES_GRID_SIZE};
use std::collections::BTreeSet;

/// Mines bet shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinesBet {
    pub mine_count: u8,
    pub pick_count: u8,
}

impl MinesBet {
    pub fn new(mine_count: u8, pick_count: u8) -> Self {
        Self {
            mine_count,
            pick_count,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.mine_count >= MINES_GRID_SIZE {
            return Err(EngineError::invalid(
                "mine_count",
                format!(
                    "{} must be below the grid size of {MINES_GRID_SIZE}",
                    self.mine_count
                ),
            ));
        }
        let safe = MINES_GRID_SIZE - self.mine_count;
        if self.pick_count == 0 || self.pick_count > safe {
            return Err(EngineError::invalid(
                "pick_count",
                format!(
                    "{} must be between 1 and {safe} with {} mines",
                    self.pick_count, self.mine_count
                ),
            ));
        }
        Ok(())
    }
}

/// Chance of revealing `picks` cells without touching any of `mines`.
pub fn survival_probability(mines: u8, picks: u8) -> f64 {
    hypergeometric(MINES_GRID_SIZE as u32, mines as u32, picks as u32, 0)
}

#[derive(Clone, Debug)]
pub struct MinesTable {
    rtp: f64,
    cap: f64,
}

impl MinesTable {
    pub fn new(rtp: f64, cap: f64) -> Self {
        Self { rtp, cap }
    }

    /// Multiplier paid for clearing every pick.
    ///
    /// A board without mines carries no risk and settles as a push.
    pub fn multiplier(&self, bet: MinesBet) -> f64 {
        if bet.mine_count == 0 {
            return 1.0;
        }
        let survive = survival_probability(bet.mine_count, bet.pick_count);
        if survive <= 0.0 {
            return 0.0;
        }
        (self.rtp / survive).min(self.cap)
    }
}

pub struct Mines;

impl SoloGame for Mines {
    type Params = MinesBet;
    type Table = MinesTable;

    const GAME_TYPE: GameType = GameType::Mines;

    fn build(config: &GameConfig) -> Result<MinesTable, EngineError> {
        Ok(MinesTable::new(
            config.return_to_player(),
            config.max_multiplier,
        ))
    }

    fn resolve(
        table: &MinesTable,
        bet: &MinesBet,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        bet.validate()?;

        let mine_positions: BTreeSet<u8> = rng
            .sample_distinct(MINES_GRID_SIZE, bet.mine_count)
            .into_iter()
            .collect();
        let picks = rng.sample_distinct(MINES_GRID_SIZE, bet.pick_count);

        let mut revealed_positions = Vec::with_capacity(picks.len());
        let mut hit_mine = false;
        for cell in picks {
            revealed_positions.push(cell);
            if mine_positions.contains(&cell) {
                hit_mine = true;
                break;
            }
        }

        let multiplier = if hit_mine { 0.0 } else { table.multiplier(*bet) };
        Ok(Resolution::new(
            multiplier,
            GameOutcome::Mines(MinesOutcome {
                mine_positions,
                revealed_positions,
                hit_mine,
            }),
        ))
    }
}
