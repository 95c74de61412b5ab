//! Slots: three independent weighted reels.
//!
//! Three of a kind pays the symbol's line, any two matching reels pay the
//! consolation line, anything else loses. The raw pays below only fix the
//! shape of the table; `build` scales them to the configured return.

use super::paytable::{calibrate, expected_return};
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{GameConfig, GameOutcome, GameType, SlotLine, SlotSymbol, SlotsOutcome};

/// Reel weights, in [SlotSymbol::ALL] order.
const WEIGHTS: [u32; 7] = [30, 25, 20, 12, 8, 4, 1];

/// Raw three-of-a-kind pays, in [SlotSymbol::ALL] order.
const TRIPLE_RAW: [f64; 7] = [5.0, 8.0, 10.0, 20.0, 40.0, 100.0, 500.0];

/// Raw consolation pay for any pair.
const PAIR_RAW: f64 = 1.0;

fn symbol_probability(symbol: SlotSymbol) -> f64 {
    let total: u32 = WEIGHTS.iter().sum();
    WEIGHTS[symbol as usize] as f64 / total as f64
}

/// Spin one reel.
fn spin_reel(rng: &mut GameRng) -> SlotSymbol {
    SlotSymbol::ALL[rng.weighted_index(&WEIGHTS)]
}

/// Classify three reels into a paying line.
pub fn evaluate(reels: &[SlotSymbol; 3]) -> SlotLine {
    let [a, b, c] = *reels;
    if a == b && b == c {
        SlotLine::ThreeOfAKind(a)
    } else if a == b || a == c {
        SlotLine::Pair(a)
    } else if b == c {
        SlotLine::Pair(b)
    } else {
        SlotLine::NoMatch
    }
}

/// Calibrated slots multipliers.
#[derive(Clone, Debug)]
pub struct Paytable {
    triple: [f64; 7],
    pair: [f64; 7],
}

impl Paytable {
    pub fn multiplier(&self, line: SlotLine) -> f64 {
        match line {
            SlotLine::ThreeOfAKind(symbol) => self.triple[symbol as usize],
            SlotLine::Pair(symbol) => self.pair[symbol as usize],
            SlotLine::NoMatch => 0.0,
        }
    }

    /// Expected total return of the table.
    pub fn expected_return(&self) -> f64 {
        let entries: Vec<(f64, f64)> = SlotSymbol::ALL
            .iter()
            .flat_map(|&symbol| {
                let p = symbol_probability(symbol);
                [
                    (p.powi(3), self.triple[symbol as usize]),
                    (3.0 * p.powi(2) * (1.0 - p), self.pair[symbol as usize]),
                ]
            })
            .collect();
        expected_return(&entries)
    }
}

pub struct Slots;

impl SoloGame for Slots {
    type Params = ();
    type Table = Paytable;

    const GAME_TYPE: GameType = GameType::Slots;

    fn build(config: &GameConfig) -> Result<Paytable, EngineError> {
        // Entries alternate: triple, pair for each symbol.
        let entries: Vec<(f64, f64)> = SlotSymbol::ALL
            .iter()
            .flat_map(|&symbol| {
                let p = symbol_probability(symbol);
                [
                    (p.powi(3), TRIPLE_RAW[symbol as usize]),
                    (3.0 * p.powi(2) * (1.0 - p), PAIR_RAW),
                ]
            })
            .collect();
        let calibrated = calibrate(
            Self::GAME_TYPE,
            &entries,
            config.return_to_player(),
            config.max_multiplier,
        )?;

        let mut table = Paytable {
            triple: [0.0; 7],
            pair: [0.0; 7],
        };
        for (i, pays) in calibrated.chunks(2).enumerate() {
            table.triple[i] = pays[0];
            table.pair[i] = pays[1];
        }
        Ok(table)
    }

    fn resolve(
        table: &Paytable,
        _params: &(),
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        let reels = [spin_reel(rng), spin_reel(rng), spin_reel(rng)];
        let line = evaluate(&reels);
        Ok(Resolution::new(
            table.multiplier(line),
            GameOutcome::Slots(SlotsOutcome { reels, line }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::test_rng;
    use luckybot_types::casino::{GameConfigs, Volatility};

    fn default_table() -> Paytable {
        let configs = GameConfigs::default();
        Slots::build(configs.get(GameType::Slots).unwrap()).unwrap()
    }

    #[test]
    fn test_evaluate_lines() {
        use SlotSymbol::*;
        assert_eq!(evaluate(&[Seven, Seven, Seven]), SlotLine::ThreeOfAKind(Seven));
        assert_eq!(evaluate(&[Cherry, Cherry, Lemon]), SlotLine::Pair(Cherry));
        assert_eq!(evaluate(&[Bell, Lemon, Bell]), SlotLine::Pair(Bell));
        assert_eq!(evaluate(&[Lemon, Grape, Grape]), SlotLine::Pair(Grape));
        assert_eq!(evaluate(&[Cherry, Lemon, Orange]), SlotLine::NoMatch);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let total: f64 = SlotSymbol::ALL.iter().map(|&s| symbol_probability(s)).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_paytable_matches_house_edge() {
        let table = default_table();
        assert!((table.expected_return() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_jackpot_is_capped() {
        let table = default_table();
        let jackpot = table.multiplier(SlotLine::ThreeOfAKind(SlotSymbol::Seven));
        assert_eq!(jackpot, 250.0);
        // Rarer symbols never pay less than common ones.
        for pair in SlotSymbol::ALL.windows(2) {
            assert!(
                table.multiplier(SlotLine::ThreeOfAKind(pair[0]))
                    <= table.multiplier(SlotLine::ThreeOfAKind(pair[1]))
            );
        }
        assert_eq!(table.multiplier(SlotLine::NoMatch), 0.0);
    }

    #[test]
    fn test_tighter_edge_pays_less() {
        let loose = default_table();
        let tight = Slots::build(&GameConfig::new(10, 100, 0.2, 250.0, Volatility::High)).unwrap();
        let line = SlotLine::Pair(SlotSymbol::Cherry);
        assert!(tight.multiplier(line) < loose.multiplier(line));
        assert!((tight.expected_return() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_consistent() {
        let table = default_table();
        for round in 0..500 {
            let mut rng = test_rng(round);
            let resolution = Slots::resolve(&table, &(), &mut rng).unwrap();
            match resolution.outcome {
                GameOutcome::Slots(SlotsOutcome { reels, line }) => {
                    assert_eq!(line, evaluate(&reels));
                    assert_eq!(resolution.multiplier, table.multiplier(line));
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
    }
}
