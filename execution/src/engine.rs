//! The solo game engine.
//!
//! [SoloEngine] holds the static config table and the paytables derived from
//! it. It keeps no per-round state: every call takes its own [GameRng], so a
//! shared engine can serve any number of threads.

use crate::casino::baccarat::Baccarat;
use crate::casino::blackjack::Blackjack;
use crate::casino::crash::{Crash, CrashTable};
use crate::casino::dice::{Dice, DiceTable};
use crate::casino::display;
use crate::casino::keno::{Keno, KenoTable};
use crate::casino::lucky_wheel::{LuckyWheel, WheelTable};
use crate::casino::mines::{Mines, MinesBet, MinesTable};
use crate::casino::number_guess::{NumberGuess, NumberGuessTable};
use crate::casino::rock_paper_scissors::{RockPaperScissors, RpsTable};
use crate::casino::roulette::Roulette;
use crate::casino::slot_dice::{SlotDice, SlotDiceTable};
use crate::casino::slots::{Paytable, Slots};
use crate::casino::{EngineError, GameRng, SoloGame};
use luckybot_types::casino::{
    BaccaratSide, BetRequest, BlackjackStrategy, DiceBet, GameConfig, GameConfigs, GameParams,
    GameResult, GameType, RouletteBet, RpsChoice,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Paytables for every configured game; `None` when the game has no config.
///
/// Roulette, blackjack and baccarat pay by fixed rules and have no entry.
#[derive(Clone, Debug, Default)]
struct Tables {
    slots: Option<Paytable>,
    crash: Option<CrashTable>,
    mines: Option<MinesTable>,
    keno: Option<KenoTable>,
    dice: Option<DiceTable>,
    slot_dice: Option<SlotDiceTable>,
    rock_paper_scissors: Option<RpsTable>,
    number_guess: Option<NumberGuessTable>,
    lucky_wheel: Option<WheelTable>,
}

fn validate_config(game: GameType, config: &GameConfig) -> Result<(), EngineError> {
    if !(0.0..1.0).contains(&config.house_edge) {
        return Err(EngineError::config(
            game,
            format!("house edge {} is outside [0, 1)", config.house_edge),
        ));
    }
    if !config.max_multiplier.is_finite() || config.max_multiplier < 1.0 {
        return Err(EngineError::config(
            game,
            format!("max multiplier {} is below 1", config.max_multiplier),
        ));
    }
    if config.min_bet == 0 || config.min_bet > config.max_bet {
        return Err(EngineError::config(
            game,
            format!(
                "bet limits {}-{} are not a valid range",
                config.min_bet, config.max_bet
            ),
        ));
    }
    Ok(())
}

fn build<G: SoloGame>(configs: &GameConfigs) -> Result<Option<G::Table>, EngineError> {
    configs.get(G::GAME_TYPE).map(G::build).transpose()
}

/// Resolves bets for every solo game.
#[derive(Clone, Debug)]
pub struct SoloEngine {
    configs: GameConfigs,
    tables: Tables,
}

impl SoloEngine {
    /// Validate `configs` and derive every paytable.
    pub fn new(configs: GameConfigs) -> Result<Self, EngineError> {
        for (game, config) in configs.iter() {
            validate_config(*game, config)?;
        }
        let tables = Tables {
            slots: build::<Slots>(&configs)?,
            crash: build::<Crash>(&configs)?,
            mines: build::<Mines>(&configs)?,
            keno: build::<Keno>(&configs)?,
            dice: build::<Dice>(&configs)?,
            slot_dice: build::<SlotDice>(&configs)?,
            rock_paper_scissors: build::<RockPaperScissors>(&configs)?,
            number_guess: build::<NumberGuess>(&configs)?,
            lucky_wheel: build::<LuckyWheel>(&configs)?,
        };
        debug!(games = configs.len(), "solo engine ready");
        Ok(Self { configs, tables })
    }

    pub fn configs(&self) -> &GameConfigs {
        &self.configs
    }

    /// Config for `game`, or a configuration error when it has none.
    pub fn config(&self, game: GameType) -> Result<&GameConfig, EngineError> {
        self.configs
            .get(game)
            .ok_or_else(|| EngineError::config(game, "no config registered"))
    }

    /// Resolve a bet request.
    pub fn play(&self, request: &BetRequest, rng: &mut GameRng) -> Result<GameResult, EngineError> {
        let bet = request.bet_amount;
        let result = match &request.params {
            GameParams::Slots => self.play_slots(bet, rng),
            GameParams::Roulette { bet: wager } => self.play_roulette(bet, *wager, rng),
            GameParams::Blackjack { strategy } => self.play_blackjack(bet, *strategy, rng),
            GameParams::Crash { cashout_target } => self.play_crash(bet, *cashout_target, rng),
            GameParams::Mines {
                mine_count,
                pick_count,
            } => self.play_mines(bet, *mine_count, *pick_count, rng),
            GameParams::Baccarat { choice } => self.play_baccarat(bet, *choice, rng),
            GameParams::Keno { numbers } => self.play_keno(bet, numbers, rng),
            GameParams::Dice { bet: wager } => self.play_dice(bet, *wager, rng),
            GameParams::SlotDice => self.play_slot_dice(bet, rng),
            GameParams::RockPaperScissors { choice } => {
                self.play_rock_paper_scissors(bet, *choice, rng)
            }
            GameParams::NumberGuess { guess } => self.play_number_guess(bet, *guess, rng),
            GameParams::LuckyWheel => self.play_lucky_wheel(bet, rng),
        };

        match &result {
            Ok(outcome) => debug!(
                game = %request.game_type(),
                user = request.user_id,
                bet,
                multiplier = outcome.multiplier,
                win_amount = outcome.win_amount,
                "round resolved"
            ),
            Err(err) => debug!(
                game = %request.game_type(),
                user = request.user_id,
                bet,
                error = %err,
                "bet rejected"
            ),
        }
        result
    }

    fn run<G: SoloGame>(
        &self,
        table: Option<&G::Table>,
        bet_amount: u64,
        params: &G::Params,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        let config = self.config(G::GAME_TYPE)?;
        let table = table.ok_or_else(|| EngineError::config(G::GAME_TYPE, "no paytable"))?;
        if bet_amount == 0 {
            return Err(EngineError::invalid("bet_amount", "must be positive"));
        }
        let resolution = G::resolve(table, params, rng)?;
        Ok(display::assemble(bet_amount, config, resolution))
    }

    pub fn play_slots(&self, bet_amount: u64, rng: &mut GameRng) -> Result<GameResult, EngineError> {
        self.run::<Slots>(self.tables.slots.as_ref(), bet_amount, &(), rng)
    }

    pub fn play_roulette(
        &self,
        bet_amount: u64,
        bet: RouletteBet,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<Roulette>(Some(&()), bet_amount, &bet, rng)
    }

    pub fn play_blackjack(
        &self,
        bet_amount: u64,
        strategy: BlackjackStrategy,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<Blackjack>(Some(&()), bet_amount, &strategy, rng)
    }

    pub fn play_crash(
        &self,
        bet_amount: u64,
        cashout_target: f64,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<Crash>(self.tables.crash.as_ref(), bet_amount, &cashout_target, rng)
    }

    pub fn play_mines(
        &self,
        bet_amount: u64,
        mine_count: u8,
        pick_count: u8,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        let bet = MinesBet::new(mine_count, pick_count);
        self.run::<Mines>(self.tables.mines.as_ref(), bet_amount, &bet, rng)
    }

    pub fn play_baccarat(
        &self,
        bet_amount: u64,
        choice: BaccaratSide,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<Baccarat>(Some(&()), bet_amount, &choice, rng)
    }

    pub fn play_keno(
        &self,
        bet_amount: u64,
        numbers: &BTreeSet<u8>,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<Keno>(self.tables.keno.as_ref(), bet_amount, numbers, rng)
    }

    pub fn play_dice(
        &self,
        bet_amount: u64,
        bet: DiceBet,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<Dice>(self.tables.dice.as_ref(), bet_amount, &bet, rng)
    }

    pub fn play_slot_dice(
        &self,
        bet_amount: u64,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<SlotDice>(self.tables.slot_dice.as_ref(), bet_amount, &(), rng)
    }

    /// Play rock-paper-scissors; `None` lets the engine throw for the player.
    pub fn play_rock_paper_scissors(
        &self,
        bet_amount: u64,
        choice: Option<RpsChoice>,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<RockPaperScissors>(
            self.tables.rock_paper_scissors.as_ref(),
            bet_amount,
            &choice,
            rng,
        )
    }

    pub fn play_number_guess(
        &self,
        bet_amount: u64,
        guess: u8,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<NumberGuess>(self.tables.number_guess.as_ref(), bet_amount, &guess, rng)
    }

    pub fn play_lucky_wheel(
        &self,
        bet_amount: u64,
        rng: &mut GameRng,
    ) -> Result<GameResult, EngineError> {
        self.run::<LuckyWheel>(self.tables.lucky_wheel.as_ref(), bet_amount, &(), rng)
    }
}
