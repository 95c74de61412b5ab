//! Integration tests for the solo engine.
//!
//! These run full rounds through [SoloEngine] and check the properties every
//! caller relies on: bounded payouts, long-run returns, replayability.

#[cfg(test)]
mod tests {
    use crate::casino::GameRng;
    use crate::engine::SoloEngine;
    use crate::mocks::{create_seed, test_engine, test_rng, TEST_USER};
    use luckybot_types::casino::{
        BaccaratSide, BetRequest, BlackjackStrategy, DiceBet, GameOutcome, GameParams, GameType,
        RouletteBet, RpsChoice,
    };
    use std::collections::BTreeSet;

    const BET: u64 = 10_000;

    /// A representative bet for each game.
    fn sample_params(game: GameType) -> GameParams {
        match game {
            GameType::Slots => GameParams::Slots,
            GameType::Roulette => GameParams::Roulette {
                bet: RouletteBet::Red,
            },
            GameType::Blackjack => GameParams::Blackjack {
                strategy: BlackjackStrategy::default(),
            },
            GameType::Crash => GameParams::Crash {
                cashout_target: 2.0,
            },
            GameType::Mines => GameParams::Mines {
                mine_count: 3,
                pick_count: 2,
            },
            GameType::Baccarat => GameParams::Baccarat {
                choice: BaccaratSide::Player,
            },
            GameType::Keno => GameParams::Keno {
                numbers: [7, 42].into_iter().collect(),
            },
            GameType::Dice => GameParams::Dice { bet: DiceBet::Odd },
            GameType::SlotDice => GameParams::SlotDice,
            GameType::RockPaperScissors => GameParams::RockPaperScissors {
                choice: Some(RpsChoice::Paper),
            },
            GameType::NumberGuess => GameParams::NumberGuess { guess: 50 },
            GameType::LuckyWheel => GameParams::LuckyWheel,
        }
    }

    /// Average `win_amount / bet` over `trials` rounds on one rng stream.
    fn empirical_return(engine: &SoloEngine, game: GameType, trials: u64) -> f64 {
        let request = BetRequest::new(TEST_USER, BET, sample_params(game));
        let mut rng = GameRng::new(&create_seed(7), TEST_USER, game as u64);
        let returned: u64 = (0..trials)
            .map(|_| engine.play(&request, &mut rng).unwrap().win_amount)
            .sum();
        returned as f64 / (BET * trials) as f64
    }

    fn assert_return(game: GameType, expected: f64, trials: u64, tolerance: f64) {
        let engine = test_engine();
        let rtp = empirical_return(&engine, game, trials);
        assert!(
            (rtp - expected).abs() < tolerance,
            "{game}: return {rtp:.4}, expected {expected:.4} ± {tolerance}"
        );
    }

    fn configured_return(game: GameType) -> f64 {
        test_engine().config(game).unwrap().return_to_player()
    }

    /// Conservation: payouts never go negative or past the configured cap.
    #[test]
    fn test_payouts_bounded() {
        let engine = test_engine();
        for game in GameType::ALL {
            let max = engine.config(game).unwrap().max_payout(BET);
            let request = BetRequest::new(TEST_USER, BET, sample_params(game));
            for round in 0..2_000 {
                let mut rng = test_rng(round);
                let result = engine.play(&request, &mut rng).unwrap();
                assert!(result.win_amount <= max, "{game}: {}", result.win_amount);
                assert!(result.multiplier >= 0.0);
                assert_eq!(
                    result.win_amount,
                    (BET as f64 * result.multiplier).round() as u64
                );
                assert_eq!(result.won, result.win_amount > BET);
            }
        }
    }

    /// Replaying a round from its seed reproduces the result exactly.
    #[test]
    fn test_rounds_replay() {
        let engine = test_engine();
        for game in GameType::ALL {
            let request = BetRequest::new(TEST_USER, BET, sample_params(game));
            for round in 0..50 {
                let first = engine.play(&request, &mut test_rng(round)).unwrap();
                let second = engine.play(&request, &mut test_rng(round)).unwrap();
                assert_eq!(first, second, "{game} round {round}");
            }
        }
    }

    #[test]
    fn test_slots_return() {
        assert_return(GameType::Slots, configured_return(GameType::Slots), 200_000, 0.025);
    }

    #[test]
    fn test_roulette_return() {
        assert_return(GameType::Roulette, 36.0 / 37.0, 100_000, 0.015);
    }

    #[test]
    fn test_blackjack_return() {
        assert_return(
            GameType::Blackjack,
            configured_return(GameType::Blackjack),
            100_000,
            0.02,
        );
    }

    #[test]
    fn test_crash_return() {
        assert_return(GameType::Crash, configured_return(GameType::Crash), 100_000, 0.015);
    }

    #[test]
    fn test_mines_return() {
        assert_return(GameType::Mines, configured_return(GameType::Mines), 100_000, 0.01);
    }

    #[test]
    fn test_baccarat_return() {
        assert_return(
            GameType::Baccarat,
            configured_return(GameType::Baccarat),
            100_000,
            0.015,
        );
    }

    #[test]
    fn test_keno_return() {
        assert_return(GameType::Keno, configured_return(GameType::Keno), 200_000, 0.025);
    }

    #[test]
    fn test_dice_return() {
        assert_return(GameType::Dice, configured_return(GameType::Dice), 100_000, 0.015);
    }

    #[test]
    fn test_slot_dice_return() {
        assert_return(
            GameType::SlotDice,
            configured_return(GameType::SlotDice),
            400_000,
            0.025,
        );
    }

    #[test]
    fn test_rock_paper_scissors_return() {
        assert_return(
            GameType::RockPaperScissors,
            configured_return(GameType::RockPaperScissors),
            100_000,
            0.015,
        );
    }

    #[test]
    fn test_number_guess_return() {
        assert_return(
            GameType::NumberGuess,
            configured_return(GameType::NumberGuess),
            400_000,
            0.035,
        );
    }

    #[test]
    fn test_lucky_wheel_return() {
        assert_return(
            GameType::LuckyWheel,
            configured_return(GameType::LuckyWheel),
            100_000,
            0.02,
        );
    }

    /// Every pocket comes up about 1/37 of the time.
    #[test]
    fn test_roulette_pockets_uniform() {
        let mut rng = test_rng(11);
        let spins = 370_000;
        let mut counts = [0u32; 37];
        for _ in 0..spins {
            counts[rng.spin_roulette() as usize] += 1;
        }
        for (pocket, &count) in counts.iter().enumerate() {
            let freq = count as f64 / spins as f64;
            assert!(
                (freq - 1.0 / 37.0).abs() < 0.0015,
                "pocket {pocket}: {freq:.5}"
            );
        }
    }

    /// Red wins 18/37 of the time, not half.
    #[test]
    fn test_red_win_rate() {
        let engine = test_engine();
        let mut rng = test_rng(12);
        let plays = 10_000;
        let wins = (0..plays)
            .filter(|_| {
                engine
                    .play_roulette(100, RouletteBet::Red, &mut rng)
                    .unwrap()
                    .won
            })
            .count();
        let rate = wins as f64 / plays as f64;
        assert!((rate - 18.0 / 37.0).abs() < 0.025, "rate {rate:.4}");
    }

    #[test]
    fn test_keno_end_to_end() {
        let engine = test_engine();
        let numbers: BTreeSet<u8> = (1..=10).collect();
        for round in 0..500 {
            let result = engine.play_keno(BET, &numbers, &mut test_rng(round)).unwrap();
            match result.outcome {
                GameOutcome::Keno(outcome) => {
                    assert_eq!(outcome.drawn_numbers.len(), 20);
                    let hits = outcome.drawn_numbers.range(1..=10).count();
                    assert_eq!(outcome.hits as usize, hits);
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
    }

    #[test]
    fn test_mines_without_mines_never_lose() {
        let engine = test_engine();
        for round in 0..500 {
            let result = engine.play_mines(BET, 0, 10, &mut test_rng(round)).unwrap();
            assert!(result.win_amount >= BET);
            assert!(result.is_push(BET));
            match result.outcome {
                GameOutcome::Mines(outcome) => {
                    assert!(!outcome.hit_mine);
                    assert_eq!(outcome.revealed_positions.len(), 10);
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
    }

    #[test]
    fn test_results_carry_summary() {
        let engine = test_engine();
        for game in GameType::ALL {
            let request = BetRequest::new(TEST_USER, BET, sample_params(game));
            let result = engine.play(&request, &mut test_rng(3)).unwrap();
            assert_eq!(result.game_type(), game);
            assert!(result.display_text.lines().count() >= 2);
        }
    }
}
