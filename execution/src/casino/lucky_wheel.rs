//! Lucky wheel: one weighted spin over a fixed prize table.

use super::paytable::calibrate;
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{GameConfig, GameOutcome, GameType, LuckyWheelOutcome};

/// Segment weights, out of 100.
pub const WEIGHTS: [u32; 7] = [35, 20, 20, 12, 8, 4, 1];

const RAW_PAYS: [f64; 7] = [0.0, 0.5, 1.0, 1.5, 2.0, 5.0, 10.0];

const ICONS: [&str; 7] = ["💀", "🥉", "🔁", "🥈", "🥇", "💰", "👑"];

#[derive(Clone, Debug)]
pub struct WheelTable {
    pays: [f64; 7],
}

impl WheelTable {
    pub fn segments(&self) -> usize {
        self.pays.len()
    }

    pub fn multiplier(&self, segment: usize) -> f64 {
        self.pays.get(segment).copied().unwrap_or(0.0)
    }

    pub fn label(&self, segment: usize) -> String {
        let icon = ICONS.get(segment).copied().unwrap_or("❔");
        format!("{icon} {:.2}x", self.multiplier(segment))
    }
}

pub struct LuckyWheel;

impl SoloGame for LuckyWheel {
    type Params = ();
    type Table = WheelTable;

    const GAME_TYPE: GameType = GameType::LuckyWheel;

    fn build(config: &GameConfig) -> Result<WheelTable, EngineError> {
        let total: u32 = WEIGHTS.iter().sum();
        let entries: Vec<(f64, f64)> = WEIGHTS
            .iter()
            .zip(RAW_PAYS)
            .map(|(&w, raw)| (w as f64 / total as f64, raw))
            .collect();
        let calibrated = calibrate(
            Self::GAME_TYPE,
            &entries,
            config.return_to_player(),
            config.max_multiplier,
        )?;
        let mut pays = [0.0; 7];
        pays.copy_from_slice(&calibrated);
        Ok(WheelTable { pays })
    }

    fn resolve(
        table: &WheelTable,
        _params: &(),
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        let segment = rng.weighted_index(&WEIGHTS);
        Ok(Resolution::new(
            table.multiplier(segment),
            GameOutcome::LuckyWheel(LuckyWheelOutcome {
                segment,
                label: table.label(segment),
            }),
        ))
    }
}
