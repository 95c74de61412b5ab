//! Crash: a multiplier climbs from 1.00x until it crashes.
//!
//! The player names a cash-out target up front. The crash point is
//! `(1 - edge) / (1 - u)` for uniform `u`, so `P(crash >= t) = (1 - edge) / t`
//! and a cash-out at `t` returns `1 - edge` in expectation for every target.
//! Points below 1.00x crash instantly.

use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{CrashOutcome, GameConfig, GameOutcome, GameType, CRASH_MIN_TARGET};

/// Crash curve parameters for one config.
#[derive(Clone, Debug)]
pub struct CrashTable {
    rtp: f64,
    max: f64,
}

impl CrashTable {
    pub fn new(rtp: f64, max: f64) -> Self {
        Self { rtp, max }
    }

    /// Sample a crash point, floored to cents.
    pub fn crash_point(&self, rng: &mut GameRng) -> f64 {
        let u = rng.next_f64();
        let raw = (self.rtp / (1.0 - u)).clamp(1.0, self.max);
        floor_cents(raw)
    }

    /// Chance the curve reaches `target`.
    pub fn survival(&self, target: f64) -> f64 {
        if target <= 1.0 {
            return 1.0;
        }
        if target > self.max {
            return 0.0;
        }
        (self.rtp / target).min(1.0)
    }
}

fn floor_cents(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize a requested cash-out target to cents and check its range.
pub fn normalize_target(target: f64, max: f64) -> Result<f64, EngineError> {
    if !target.is_finite() {
        return Err(EngineError::invalid("cashout_target", "must be a number"));
    }
    let target = round_cents(target);
    if target < CRASH_MIN_TARGET || target > max {
        return Err(EngineError::invalid(
            "cashout_target",
            format!("{target:.2}x is outside {CRASH_MIN_TARGET:.2}x-{max:.2}x"),
        ));
    }
    Ok(target)
}

pub struct Crash;

impl SoloGame for Crash {
    type Params = f64;
    type Table = CrashTable;

    const GAME_TYPE: GameType = GameType::Crash;

    fn build(config: &GameConfig) -> Result<CrashTable, EngineError> {
        if config.max_multiplier < CRASH_MIN_TARGET {
            return Err(EngineError::config(
                Self::GAME_TYPE,
                format!("max multiplier must be at least {CRASH_MIN_TARGET}"),
            ));
        }
        Ok(CrashTable::new(
            config.return_to_player(),
            config.max_multiplier,
        ))
    }

    fn resolve(
        table: &CrashTable,
        cashout_target: &f64,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        let target = normalize_target(*cashout_target, table.max)?;
        let crash_point = table.crash_point(rng);
        let multiplier = if crash_point >= target { target } else { 0.0 };
        Ok(Resolution::new(
            multiplier,
            GameOutcome::Crash(CrashOutcome {
                crash_point,
                cashout_target: target,
            }),
        ))
    }
}
