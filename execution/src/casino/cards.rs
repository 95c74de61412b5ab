//! Card helpers shared by blackjack and baccarat.
//!
//! Cards are 0-51: suit = card/13, rank = card%13 (0 = Ace, 12 = King).

use super::{EngineError, GameRng};

const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];
const SUITS: [&str; 4] = ["♠", "♥", "♦", "♣"];

/// Get card rank (0-12 for A-K).
pub fn card_rank(card: u8) -> u8 {
    card % 13
}

/// Human-readable card, e.g. `10♥`.
pub fn card_label(card: u8) -> String {
    let suit = SUITS[(card / 13) as usize % SUITS.len()];
    format!("{}{}", RANKS[card_rank(card) as usize], suit)
}

/// Space-separated labels for a hand.
pub fn hand_label(cards: &[u8]) -> String {
    cards
        .iter()
        .map(|&c| card_label(c))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered cards dealt front to back.
///
/// Play uses a freshly shuffled deck; tests inject exact sequences.
#[derive(Clone, Debug)]
pub struct Shoe {
    cards: Vec<u8>,
    next: usize,
}

impl Shoe {
    pub fn shuffled(rng: &mut GameRng) -> Self {
        Self::from_cards(rng.create_deck())
    }

    pub fn from_cards(cards: Vec<u8>) -> Self {
        Self { cards, next: 0 }
    }

    pub fn draw(&mut self) -> Result<u8, EngineError> {
        let card = *self.cards.get(self.next).ok_or(EngineError::DeckExhausted)?;
        self.next += 1;
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}
