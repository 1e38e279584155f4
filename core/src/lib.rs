#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod types;

/// Fixed roster the decks draw from. Every deal uses the first `pair_count`
/// members and puts two cards of each on the board.
pub const ROSTER: [&str; 8] = [
    "HAEL", "JUNO", "MIRAE", "SAEBOM", "DOYUN", "EUNHO", "CHAEL", "WOOJIN",
];

/// Display name for a card identity, falling back to a placeholder for
/// identities outside the roster.
pub fn member_name(id: CardId) -> &'static str {
    ROSTER.get(usize::from(id)).copied().unwrap_or("?")
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn pair_count(self) -> PairCount {
        use Difficulty::*;
        match self {
            Easy => 4,
            Medium => 6,
            Hard => 8,
        }
    }

    /// Next difficulty in the easy → medium → hard → easy cycle.
    pub const fn next(self) -> Self {
        use Difficulty::*;
        match self {
            Easy => Medium,
            Medium => Hard,
            Hard => Easy,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

/// An ordered deal of cards.
///
/// Invariant: every identity present appears exactly twice. A deck is built
/// fresh for every deal and replaced, never reshuffled in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let mut copies: BTreeMap<CardId, u8> = BTreeMap::new();
        for card in &cards {
            *copies.entry(card.id()).or_insert(0) += 1;
        }
        if copies.values().any(|&count| count != 2) {
            return Err(GameError::UnbalancedDeck);
        }
        Ok(Self { cards })
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2) as PairCount
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if usize::from(index) < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub(crate) fn card_mut(&mut self, index: CardIndex) -> &mut Card {
        &mut self.cards[usize::from(index)]
    }

    pub(crate) fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }
}

impl Index<CardIndex> for Deck {
    type Output = Card;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[usize::from(index)]
    }
}
