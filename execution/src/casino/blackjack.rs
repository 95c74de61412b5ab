//! Blackjack with automatic play.
//!
//! Deal order is player, player, dealer, dealer from a single shuffled deck.
//! Naturals settle immediately. Otherwise the player hits while below the
//! strategy's `stand_on` total, then the dealer draws to 17 and stands on all
//! 17s. A busted player loses before the dealer draws.
//!
//! Payouts (stake included): natural 2.5x, win 2.0x, push 1.0x.

use super::cards::Shoe;
use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{
    BlackjackOutcome, BlackjackSettlement, BlackjackStrategy, GameConfig, GameOutcome, GameType,
    BLACKJACK,
};

/// Dealer stands on any total at or above this.
const DEALER_STANDS_ON: u8 = 17;

/// Lowest `stand_on` accepted; below 12 a hit can never bust.
const MIN_STAND_ON: u8 = 12;

const NATURAL_MULTIPLIER: f64 = 2.5;
const WIN_MULTIPLIER: f64 = 2.0;
const PUSH_MULTIPLIER: f64 = 1.0;

/// Calculate the value of a blackjack hand.
///
/// Aces count 11 until that would bust, then drop to 1 one at a time.
/// Returns the total and whether an ace is still counted as 11.
pub fn hand_value(cards: &[u8]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for &card in cards {
        let rank = (card % 13) + 1; // 1=Ace, 2-10, 11=J, 12=Q, 13=K
        if rank == 1 {
            aces += 1;
            value += 11;
        } else if rank >= 10 {
            value += 10;
        } else {
            value += rank as u16;
        }
    }

    while value > BLACKJACK as u16 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= BLACKJACK as u16;
    (value.min(255) as u8, is_soft)
}

/// Check if hand is a blackjack (21 with 2 cards).
pub fn is_blackjack(cards: &[u8]) -> bool {
    cards.len() == 2 && hand_value(cards).0 == BLACKJACK
}

/// Check if hand is over 21.
pub fn is_bust(cards: &[u8]) -> bool {
    hand_value(cards).0 > BLACKJACK
}

fn settlement_multiplier(settlement: BlackjackSettlement) -> f64 {
    match settlement {
        BlackjackSettlement::Natural => NATURAL_MULTIPLIER,
        BlackjackSettlement::Win | BlackjackSettlement::DealerBust => WIN_MULTIPLIER,
        BlackjackSettlement::Push => PUSH_MULTIPLIER,
        BlackjackSettlement::DealerWins
        | BlackjackSettlement::DealerNatural
        | BlackjackSettlement::PlayerBust => 0.0,
    }
}

/// Play a full round from an ordered shoe.
///
/// Deterministic in the card sequence, which lets callers replay a round from
/// a known deck.
pub fn play_out(shoe: &mut Shoe, strategy: BlackjackStrategy) -> Result<Resolution, EngineError> {
    let mut player_cards = vec![shoe.draw()?, shoe.draw()?];
    let mut dealer_cards = vec![shoe.draw()?, shoe.draw()?];

    let player_bj = is_blackjack(&player_cards);
    let dealer_bj = is_blackjack(&dealer_cards);

    let settlement = if player_bj || dealer_bj {
        if player_bj && dealer_bj {
            BlackjackSettlement::Push
        } else if player_bj {
            BlackjackSettlement::Natural
        } else {
            BlackjackSettlement::DealerNatural
        }
    } else {
        while hand_value(&player_cards).0 < strategy.stand_on {
            player_cards.push(shoe.draw()?);
        }

        if is_bust(&player_cards) {
            BlackjackSettlement::PlayerBust
        } else {
            while hand_value(&dealer_cards).0 < DEALER_STANDS_ON {
                dealer_cards.push(shoe.draw()?);
            }

            let (p_val, _) = hand_value(&player_cards);
            let (d_val, _) = hand_value(&dealer_cards);
            if d_val > BLACKJACK {
                BlackjackSettlement::DealerBust
            } else if p_val > d_val {
                BlackjackSettlement::Win
            } else if p_val == d_val {
                BlackjackSettlement::Push
            } else {
                BlackjackSettlement::DealerWins
            }
        }
    };

    let outcome = BlackjackOutcome {
        player_value: hand_value(&player_cards).0,
        dealer_value: hand_value(&dealer_cards).0,
        player_cards,
        dealer_cards,
        settlement,
    };
    Ok(Resolution::new(
        settlement_multiplier(settlement),
        GameOutcome::Blackjack(outcome),
    ))
}

pub struct Blackjack;

impl SoloGame for Blackjack {
    type Params = BlackjackStrategy;
    type Table = ();

    const GAME_TYPE: GameType = GameType::Blackjack;

    fn build(_config: &GameConfig) -> Result<(), EngineError> {
        Ok(())
    }

    fn resolve(
        _table: &(),
        strategy: &BlackjackStrategy,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        if !(MIN_STAND_ON..=BLACKJACK).contains(&strategy.stand_on) {
            return Err(EngineError::invalid(
                "stand_on",
                format!(
                    "{} is outside {MIN_STAND_ON}-{BLACKJACK}",
                    strategy.stand_on
                ),
            ));
        }
        let mut shoe = Shoe::shuffled(rng);
        play_out(&mut shoe, *strategy)
    }
}
