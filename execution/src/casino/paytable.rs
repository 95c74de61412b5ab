//! Payout calibration.
//!
//! Weighted-table games start from a raw paytable that only fixes the *shape*
//! of the payouts. [calibrate] scales it so the expected total return equals
//! `1 - house_edge` while no single entry exceeds `max_multiplier`.

use super::EngineError;
use luckybot_types::casino::GameType;

/// Bisection steps; the scale converges far below f64 display precision.
const CALIBRATION_ITERATIONS: usize = 200;

/// Slack allowed when checking whether a target is reachable.
const EPSILON: f64 = 1e-12;

/// Expected total return of `(probability, multiplier)` pairs.
pub fn expected_return(entries: &[(f64, f64)]) -> f64 {
    entries.iter().map(|(p, m)| p * m).sum()
}

/// Scale raw multipliers so that `Σ p·min(s·r, cap) == target`.
///
/// Returns the calibrated multipliers in the same order as `entries`.
pub fn calibrate(
    game: GameType,
    entries: &[(f64, f64)],
    target: f64,
    cap: f64,
) -> Result<Vec<f64>, EngineError> {
    let min_raw = entries
        .iter()
        .filter(|(p, r)| *p > 0.0 && *r > 0.0)
        .map(|(_, r)| *r)
        .fold(f64::INFINITY, f64::min);
    if !min_raw.is_finite() {
        return Err(EngineError::config(game, "paytable has no paying outcome"));
    }

    let capped_return = |scale: f64| -> f64 {
        entries
            .iter()
            .map(|(p, r)| p * (scale * r).min(cap))
            .sum::<f64>()
    };

    // At this scale every paying entry sits at the cap.
    let mut hi = cap / min_raw;
    if capped_return(hi) + EPSILON < target {
        return Err(EngineError::config(
            game,
            format!("max multiplier {cap} cannot reach a return of {target:.4}"),
        ));
    }
    let mut lo = 0.0;
    for _ in 0..CALIBRATION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if capped_return(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok(entries.iter().map(|(_, r)| (hi * r).min(cap)).collect())
}

/// Binomial coefficient as a float (exact for the sizes used here).
pub fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Probability of exactly `hits` successes when drawing `draws` items without
/// replacement from `population` items of which `successes` are marked.
pub fn hypergeometric(population: u32, successes: u32, draws: u32, hits: u32) -> f64 {
    if hits > successes || hits > draws || draws - hits > population - successes {
        return 0.0;
    }
    binomial(successes, hits) * binomial(population - successes, draws - hits)
        / binomial(population, draws)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrate_hits_target() {
        let entries = [(0.5, 0.0), (0.3, 1.0), (0.2, 2.0)];
        let calibrated = calibrate(GameType::LuckyWheel, &entries, 0.95, 10.0).unwrap();
        let paired: Vec<(f64, f64)> = entries
            .iter()
            .zip(&calibrated)
            .map(|((p, _), m)| (*p, *m))
            .collect();
        assert!((expected_return(&paired) - 0.95).abs() < 1e-9);
        // Shape preserved.
        assert_eq!(calibrated[0], 0.0);
        assert!((calibrated[2] / calibrated[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_calibrate_respects_cap() {
        let entries = [(0.9, 0.0), (0.09, 1.0), (0.01, 100.0)];
        let calibrated = calibrate(GameType::Slots, &entries, 0.9, 50.0).unwrap();
        assert_eq!(calibrated[2], 50.0);
        let paired: Vec<(f64, f64)> = entries
            .iter()
            .zip(&calibrated)
            .map(|((p, _), m)| (*p, *m))
            .collect();
        assert!((expected_return(&paired) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_calibrate_unreachable() {
        let entries = [(0.99, 0.0), (0.01, 1.0)];
        let result = calibrate(GameType::Keno, &entries, 0.9, 10.0);
        assert!(matches!(
            result,
            Err(EngineError::Configuration {
                game: GameType::Keno,
                ..
            })
        ));
    }

    #[test]
    fn test_calibrate_requires_paying_entry() {
        let entries = [(1.0, 0.0)];
        assert!(calibrate(GameType::Keno, &entries, 0.9, 10.0).is_err());
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(25, 3), 2300.0);
        assert_eq!(binomial(3, 5), 0.0);
        assert!((binomial(80, 20) - 3_535_316_142_212_174_320.0).abs() / 3.5e18 < 1e-12);
    }

    #[test]
    fn test_hypergeometric_sums_to_one() {
        for picks in 1..=10 {
            let total: f64 = (0..=picks).map(|h| hypergeometric(80, picks, 20, h)).sum();
            assert!((total - 1.0).abs() < 1e-12, "picks {picks}: {total}");
        }
        // One pick hits with probability 20/80.
        assert!((hypergeometric(80, 1, 20, 1) - 0.25).abs() < 1e-12);
    }
}
