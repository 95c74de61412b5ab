use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

mod config;
pub mod constants;

pub use config::{BetLimitError, GameConfig, GameConfigs, Volatility};
pub use constants::*;


/// Solo games offered by the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GameType {
    Slots = 0,
    Roulette = 1,
    Blackjack = 2,
    Crash = 3,
    Mines = 4,
    Baccarat = 5,
    Keno = 6,
    Dice = 7,
    SlotDice = 8,
    RockPaperScissors = 9,
    NumberGuess = 10,
    LuckyWheel = 11,
}

impl GameType {
    pub const ALL: [GameType; 12] = [
        GameType::Slots,
        GameType::Roulette,
        GameType::Blackjack,
        GameType::Crash,
        GameType::Mines,
        GameType::Baccarat,
        GameType::Keno,
        GameType::Dice,
        GameType::SlotDice,
        GameType::RockPaperScissors,
        GameType::NumberGuess,
        GameType::LuckyWheel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GameType::Slots => "slots",
            GameType::Roulette => "roulette",
            GameType::Blackjack => "blackjack",
            GameType::Crash => "crash",
            GameType::Mines => "mines",
            GameType::Baccarat => "baccarat",
            GameType::Keno => "keno",
            GameType::Dice => "dice",
            GameType::SlotDice => "slot_dice",
            GameType::RockPaperScissors => "rock_paper_scissors",
            GameType::NumberGuess => "number_guess",
            GameType::LuckyWheel => "lucky_wheel",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|game| game.name() == s)
            .ok_or_else(|| format!("unknown game: {s}"))
    }
}

/// Roulette wagers. Numbers are validated by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouletteBet {
    /// Single number 0-36 (35:1).
    Straight(u8),
    Red,
    Black,
    Even,
    Odd,
    /// 1-18.
    Low,
    /// 19-36.
    High,
    /// 0 = 1-12, 1 = 13-24, 2 = 25-36 (2:1).
    Dozen(u8),
    /// Column 0 starts at 1, column 1 at 2, column 2 at 3 (2:1).
    Column(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouletteColor {
    Green,
    Red,
    Black,
}

/// Automatic blackjack play: hit while the hand is below `stand_on`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackStrategy {
    pub stand_on: u8,
}

impl Default for BlackjackStrategy {
    fn default() -> Self {
        Self {
            stand_on: DEFAULT_STAND_ON,
        }
    }
}

/// Baccarat bet choice, also used to name the winning hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaccaratSide {
    Player,
    Banker,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceBet {
    /// Exact face 1-6.
    Exact(u8),
    /// 1-3.
    Low,
    /// 4-6.
    High,
    Even,
    Odd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

impl RpsChoice {
    pub const ALL: [RpsChoice; 3] = [RpsChoice::Rock, RpsChoice::Paper, RpsChoice::Scissors];

    /// The choice this one defeats.
    pub fn beats(&self) -> RpsChoice {
        match self {
            RpsChoice::Rock => RpsChoice::Scissors,
            RpsChoice::Paper => RpsChoice::Rock,
            RpsChoice::Scissors => RpsChoice::Paper,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RpsChoice::Rock => "🪨",
            RpsChoice::Paper => "📄",
            RpsChoice::Scissors => "✂️",
        }
    }
}

/// Game-specific parameters of a bet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameParams {
    Slots,
    Roulette {
        bet: RouletteBet,
    },
    Blackjack {
        #[serde(default)]
        strategy: BlackjackStrategy,
    },
    Crash {
        cashout_target: f64,
    },
    Mines {
        mine_count: u8,
        pick_count: u8,
    },
    Baccarat {
        choice: BaccaratSide,
    },
    Keno {
        #[serde(deserialize_with = "distinct_numbers")]
        numbers: BTreeSet<u8>,
    },
    Dice {
        bet: DiceBet,
    },
    SlotDice,
    RockPaperScissors {
        #[serde(default)]
        choice: Option<RpsChoice>,
    },
    NumberGuess {
        guess: u8,
    },
    LuckyWheel,
}

/// Reads keno picks as a list, rejecting repeats instead of collapsing them.
fn distinct_numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<u8>, D::Error> {
    let picks = Vec::<u8>::deserialize(deserializer)?;
    let count = picks.len();
    let numbers: BTreeSet<u8> = picks.into_iter().collect();
    if numbers.len() != count {
        return Err(de::Error::custom("keno numbers must be distinct"));
    }
    Ok(numbers)
}

impl GameParams {
    pub fn game_type(&self) -> GameType {
        match self {
            GameParams::Slots => GameType::Slots,
            GameParams::Roulette { .. } => GameType::Roulette,
            GameParams::Blackjack { .. } => GameType::Blackjack,
            GameParams::Crash { .. } => GameType::Crash,
            GameParams::Mines { .. } => GameType::Mines,
            GameParams::Baccarat { .. } => GameType::Baccarat,
            GameParams::Keno { .. } => GameType::Keno,
            GameParams::Dice { .. } => GameType::Dice,
            GameParams::SlotDice => GameType::SlotDice,
            GameParams::RockPaperScissors { .. } => GameType::RockPaperScissors,
            GameParams::NumberGuess { .. } => GameType::NumberGuess,
            GameParams::LuckyWheel => GameType::LuckyWheel,
        }
    }
}

/// A bet the caller has already validated against the player's balance and
/// the game's limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetRequest {
    pub user_id: u64,
    pub bet_amount: u64,
    pub params: GameParams,
}

impl BetRequest {
    pub fn new(user_id: u64, bet_amount: u64, params: GameParams) -> Self {
        Self {
            user_id,
            bet_amount,
            params,
        }
    }

    pub fn game_type(&self) -> GameType {
        self.params.game_type()
    }
}

/// Slot reel symbols, most common first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Orange,
    Grape,
    Bell,
    Diamond,
    Seven,
}

impl SlotSymbol {
    pub const ALL: [SlotSymbol; 7] = [
        SlotSymbol::Cherry,
        SlotSymbol::Lemon,
        SlotSymbol::Orange,
        SlotSymbol::Grape,
        SlotSymbol::Bell,
        SlotSymbol::Diamond,
        SlotSymbol::Seven,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            SlotSymbol::Cherry => "🍒",
            SlotSymbol::Lemon => "🍋",
            SlotSymbol::Orange => "🍊",
            SlotSymbol::Grape => "🍇",
            SlotSymbol::Bell => "🔔",
            SlotSymbol::Diamond => "💎",
            SlotSymbol::Seven => "7️⃣",
        }
    }
}

/// Winning line on a slots spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotLine {
    ThreeOfAKind(SlotSymbol),
    Pair(SlotSymbol),
    NoMatch,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotsOutcome {
    pub reels: [SlotSymbol; 3],
    pub line: SlotLine,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouletteOutcome {
    pub number: u8,
    pub color: RouletteColor,
    pub bet: RouletteBet,
}

/// How a blackjack round settled, from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackSettlement {
    Natural,
    Win,
    DealerBust,
    Push,
    DealerWins,
    DealerNatural,
    PlayerBust,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlackjackOutcome {
    pub player_cards: Vec<u8>,
    pub dealer_cards: Vec<u8>,
    pub player_value: u8,
    pub dealer_value: u8,
    pub settlement: BlackjackSettlement,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrashOutcome {
    pub crash_point: f64,
    pub cashout_target: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinesOutcome {
    pub mine_positions: BTreeSet<u8>,
    /// Cells in reveal order; ends at the first mine, if any.
    pub revealed_positions: Vec<u8>,
    pub hit_mine: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaccaratOutcome {
    pub player_cards: Vec<u8>,
    pub banker_cards: Vec<u8>,
    pub player_value: u8,
    pub banker_value: u8,
    pub winner: BaccaratSide,
    pub choice: BaccaratSide,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KenoOutcome {
    pub drawn_numbers: BTreeSet<u8>,
    pub chosen_numbers: BTreeSet<u8>,
    pub hits: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiceOutcome {
    pub roll: u8,
    pub bet: DiceBet,
}

/// Symbols on the composite slot die, in reel-digit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotDiceSymbol {
    Bar,
    Grapes,
    Lemon,
    Seven,
}

impl SlotDiceSymbol {
    pub fn emoji(&self) -> &'static str {
        match self {
            SlotDiceSymbol::Bar => "🅱️",
            SlotDiceSymbol::Grapes => "🍇",
            SlotDiceSymbol::Lemon => "🍋",
            SlotDiceSymbol::Seven => "7️⃣",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotDiceOutcome {
    /// Die value 1-64.
    pub value: u8,
    pub reels: [SlotDiceSymbol; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpsResult {
    Win,
    Draw,
    Loss,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpsOutcome {
    pub player: RpsChoice,
    pub bot: RpsChoice,
    pub result: RpsResult,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberGuessOutcome {
    pub guess: u8,
    pub target: u8,
    pub distance: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LuckyWheelOutcome {
    pub segment: usize,
    pub label: String,
}

/// Raw simulated state of a resolved round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameOutcome {
    Slots(SlotsOutcome),
    Roulette(RouletteOutcome),
    Blackjack(BlackjackOutcome),
    Crash(CrashOutcome),
    Mines(MinesOutcome),
    Baccarat(BaccaratOutcome),
    Keno(KenoOutcome),
    Dice(DiceOutcome),
    SlotDice(SlotDiceOutcome),
    RockPaperScissors(RpsOutcome),
    NumberGuess(NumberGuessOutcome),
    LuckyWheel(LuckyWheelOutcome),
}

impl GameOutcome {
    pub fn game_type(&self) -> GameType {
        match self {
            GameOutcome::Slots(_) => GameType::Slots,
            GameOutcome::Roulette(_) => GameType::Roulette,
            GameOutcome::Blackjack(_) => GameType::Blackjack,
            GameOutcome::Crash(_) => GameType::Crash,
            GameOutcome::Mines(_) => GameType::Mines,
            GameOutcome::Baccarat(_) => GameType::Baccarat,
            GameOutcome::Keno(_) => GameType::Keno,
            GameOutcome::Dice(_) => GameType::Dice,
            GameOutcome::SlotDice(_) => GameType::SlotDice,
            GameOutcome::RockPaperScissors(_) => GameType::RockPaperScissors,
            GameOutcome::NumberGuess(_) => GameType::NumberGuess,
            GameOutcome::LuckyWheel(_) => GameType::LuckyWheel,
        }
    }
}

/// What the engine hands back for one round.
///
/// `multiplier` is total-return-inclusive: 0 is a lost stake, 1.0 returns the
/// stake, 2.0 doubles it. `win_amount = round(bet * multiplier)` and `won` is
/// set only when the player ends the round ahead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub won: bool,
    pub win_amount: u64,
    pub multiplier: f64,
    pub outcome: GameOutcome,
    pub display_text: String,
    pub animation_frames: Vec<String>,
}

impl GameResult {
    pub fn game_type(&self) -> GameType {
        self.outcome.game_type()
    }

    /// Net change to apply to the player's balance once the stake was taken
    /// into account (`win_amount - bet_amount`).
    ///
    /// Saturates at the `i64` bounds.
    pub fn balance_delta(&self, bet_amount: u64) -> i64 {
        let delta = self.win_amount as i128 - bet_amount as i128;
        delta.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// True when the stake came back unchanged.
    pub fn is_push(&self, bet_amount: u64) -> bool {
        self.win_amount == bet_amount
    }
}
