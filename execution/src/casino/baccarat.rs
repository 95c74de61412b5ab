//! Punto banco baccarat, single deck, one bet per round.
//!
//! Bet types (stake included):
//! - Player: 2.0x
//! - Banker: 1.95x (5% commission)
//! - Tie: 9.0x (8:1)
//!
//! Player and banker bets push on a tie. Drawing follows the standard tableau
//! and a natural 8 or 9 on either hand ends the deal.

use super::cards::Shoe;
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{BaccaratOutcome, BaccaratSide, GameConfig, GameOutcome, GameType};

const PLAYER_MULTIPLIER: f64 = 2.0;
const BANKER_MULTIPLIER: f64 = 1.95;
const TIE_MULTIPLIER: f64 = 9.0;

/// Get card value for Baccarat (0-9).
/// Face cards and 10s = 0, Ace = 1, others = face value.
pub fn card_value(card: u8) -> u8 {
    let rank = (card % 13) + 1; // 1-13
    match rank {
        1 => 1,
        2..=9 => rank,
        _ => 0,
    }
}

/// Calculate hand total (mod 10).
pub fn hand_total(cards: &[u8]) -> u8 {
    cards.iter().map(|&c| card_value(c)).sum::<u8>() % 10
}

fn is_natural(total: u8) -> bool {
    total >= 8
}

/// Player draws on 0-5, stands on 6-7.
pub fn player_draws(player_total: u8) -> bool {
    player_total <= 5
}

/// Banker third-card rule.
///
/// `player_third` is the baccarat value (0-9) of the player's third card, or
/// `None` when the player stood.
pub fn banker_draws(banker_total: u8, player_third: Option<u8>) -> bool {
    let Some(v) = player_third else {
        return banker_total <= 5;
    };
    match banker_total {
        0..=2 => true,
        3 => v != 8,
        4 => (2..=7).contains(&v),
        5 => (4..=7).contains(&v),
        6 => v == 6 || v == 7,
        _ => false,
    }
}

/// Total return for `choice` once `winner` is known.
pub fn payout_multiplier(choice: BaccaratSide, winner: BaccaratSide) -> f64 {
    match (choice, winner) {
        (BaccaratSide::Tie, BaccaratSide::Tie) => TIE_MULTIPLIER,
        (BaccaratSide::Player | BaccaratSide::Banker, BaccaratSide::Tie) => 1.0,
        (BaccaratSide::Player, BaccaratSide::Player) => PLAYER_MULTIPLIER,
        (BaccaratSide::Banker, BaccaratSide::Banker) => BANKER_MULTIPLIER,
        _ => 0.0,
    }
}

/// Deal a full coup from an ordered shoe.
///
/// Cards alternate player, banker, player, banker; third cards follow.
pub fn deal(shoe: &mut Shoe, choice: BaccaratSide) -> Result<Resolution, EngineError> {
    let mut player_cards = Vec::with_capacity(3);
    let mut banker_cards = Vec::with_capacity(3);
    for _ in 0..2 {
        player_cards.push(shoe.draw()?);
        banker_cards.push(shoe.draw()?);
    }

    let player_total = hand_total(&player_cards);
    let banker_total = hand_total(&banker_cards);

    if !is_natural(player_total) && !is_natural(banker_total) {
        let mut player_third = None;
        if player_draws(player_total) {
            let card = shoe.draw()?;
            player_cards.push(card);
            player_third = Some(card_value(card));
        }
        if banker_draws(banker_total, player_third) {
            banker_cards.push(shoe.draw()?);
        }
    }

    let player_value = hand_total(&player_cards);
    let banker_value = hand_total(&banker_cards);
    let winner = match player_value.cmp(&banker_value) {
        std::cmp::Ordering::Greater => BaccaratSide::Player,
        std::cmp::Ordering::Less => BaccaratSide::Banker,
        std::cmp::Ordering::Equal => BaccaratSide::Tie,
    };

    Ok(Resolution::new(
        payout_multiplier(choice, winner),
        GameOutcome::Baccarat(BaccaratOutcome {
            player_cards,
            banker_cards,
            player_value,
            banker_value,
            winner,
            choice,
        }),
    ))
}

pub struct Baccarat;

impl SoloGame for Baccarat {
    type Params = BaccaratSide;
    type Table = ();

    const GAME_TYPE: GameType = GameType::Baccarat;

    fn build(_config: &GameConfig) -> Result<(), EngineError> {
        Ok(())
    }

    fn resolve(
        _table: &(),
        choice: &BaccaratSide,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        let mut shoe = Shoe::shuffled(rng);
        deal(&mut shoe, *choice)
    }
}
