//! Slot dice: the 64-sided composite slot machine die.
//!
//! A value 1-64 encodes three reels of four symbols each; `value - 1` is read
//! in base 4 with the left reel in the lowest digit.

use super::paytable::calibrate;
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{
    GameConfig, GameOutcome, GameType, SlotDiceOutcome, SlotDiceSymbol, SLOT_DICE_FACES,
};

const SYMBOLS: [SlotDiceSymbol; 4] = [
    SlotDiceSymbol::Bar,
    SlotDiceSymbol::Grapes,
    SlotDiceSymbol::Lemon,
    SlotDiceSymbol::Seven,
];

/// Winning combinations, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combo {
    TripleSeven,
    Triple,
    TwoSevens,
    Nothing,
}

const RAW_TRIPLE_SEVEN: f64 = 20.0;
const RAW_TRIPLE: f64 = 10.0;
const RAW_TWO_SEVENS: f64 = 2.0;

/// Decode a die value (1-64) into its three reels.
pub fn decode(value: u8) -> [SlotDiceSymbol; 3] {
    let index = value.saturating_sub(1) % SLOT_DICE_FACES;
    [
        SYMBOLS[(index & 3) as usize],
        SYMBOLS[((index >> 2) & 3) as usize],
        SYMBOLS[((index >> 4) & 3) as usize],
    ]
}

pub fn combo(reels: &[SlotDiceSymbol; 3]) -> Combo {
    let sevens = reels.iter().filter(|&&s| s == SlotDiceSymbol::Seven).count();
    if sevens == 3 {
        Combo::TripleSeven
    } else if reels[0] == reels[1] && reels[1] == reels[2] {
        Combo::Triple
    } else if sevens == 2 {
        Combo::TwoSevens
    } else {
        Combo::Nothing
    }
}

#[derive(Clone, Debug)]
pub struct SlotDiceTable {
    triple_seven: f64,
    triple: f64,
    two_sevens: f64,
}

impl SlotDiceTable {
    pub fn multiplier(&self, combo: Combo) -> f64 {
        match combo {
            Combo::TripleSeven => self.triple_seven,
            Combo::Triple => self.triple,
            Combo::TwoSevens => self.two_sevens,
            Combo::Nothing => 0.0,
        }
    }
}

pub struct SlotDice;

impl SoloGame for SlotDice {
    type Params = ();
    type Table = SlotDiceTable;

    const GAME_TYPE: GameType = GameType::SlotDice;

    fn build(config: &GameConfig) -> Result<SlotDiceTable, EngineError> {
        let faces = SLOT_DICE_FACES as f64;
        // 1 triple seven, 3 other triples, 9 layouts with exactly two sevens.
        let entries = [
            (1.0 / faces, RAW_TRIPLE_SEVEN),
            (3.0 / faces, RAW_TRIPLE),
            (9.0 / faces, RAW_TWO_SEVENS),
        ];
        let pays = calibrate(
            Self::GAME_TYPE,
            &entries,
            config.return_to_player(),
            config.max_multiplier,
        )?;
        Ok(SlotDiceTable {
            triple_seven: pays[0],
            triple: pays[1],
            two_sevens: pays[2],
        })
    }

    fn resolve(
        table: &SlotDiceTable,
        _params: &(),
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        let value = rng.next_bounded(SLOT_DICE_FACES) + 1;
        let reels = decode(value);
        Ok(Resolution::new(
            table.multiplier(combo(&reels)),
            GameOutcome::SlotDice(SlotDiceOutcome { value, reels }),
        ))
    }
}
