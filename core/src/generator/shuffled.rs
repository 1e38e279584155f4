use alloc::vec::Vec;

use super::*;

/// Deals two cards per selected roster member and applies a uniform
/// Fisher–Yates shuffle, so every permutation of the deck is equally likely
/// for a uniform seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Deck {
        use rand::prelude::*;

        let available = ROSTER.len() as PairCount;
        let mut pair_count = difficulty.pair_count();
        if pair_count > available {
            log::warn!(
                "Roster too small for requested deal, dealing {} pairs instead of {}",
                available,
                pair_count
            );
            pair_count = available;
        }

        let mut cards: Vec<Card> = Vec::with_capacity(usize::from(pair_count) * 2);
        for id in 0..pair_count {
            cards.push(Card::new(id));
            cards.push(Card::new(id));
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        cards.shuffle(&mut rng);

        Deck::from_cards(cards).expect("paired deal is always balanced")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn identity_histogram(deck: &Deck) -> Vec<u8> {
        let mut counts = Vec::new();
        for card in deck.iter() {
            let slot = usize::from(card.id());
            if counts.len() <= slot {
                counts.resize(slot + 1, 0);
            }
            counts[slot] += 1;
        }
        counts
    }

    #[test]
    fn deal_has_two_cards_per_identity_at_every_difficulty() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let deck = ShuffledDeckGenerator::new(7).generate(difficulty);

            assert_eq!(deck.card_count(), usize::from(difficulty.pair_count()) * 2);
            assert_eq!(deck.pair_count(), difficulty.pair_count());
            assert!(identity_histogram(&deck).iter().all(|&count| count == 2));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_order() {
        let first = ShuffledDeckGenerator::new(42).generate(Difficulty::Hard);
        let second = ShuffledDeckGenerator::new(42).generate(Difficulty::Hard);

        assert_eq!(first, second);
    }

    #[test]
    fn seeds_produce_distinct_permutations() {
        let orderings: Vec<Vec<CardId>> = (0..20)
            .map(|seed| {
                ShuffledDeckGenerator::new(seed)
                    .generate(Difficulty::Medium)
                    .iter()
                    .map(|card| card.id())
                    .collect()
            })
            .collect();

        let first = &orderings[0];
        assert!(orderings.iter().any(|ordering| ordering != first));
    }

    #[test]
    fn shuffle_preserves_the_identity_multiset() {
        let deck = ShuffledDeckGenerator::new(1234).generate(Difficulty::Medium);
        let mut ids: Vec<CardId> = deck.iter().map(|card| card.id()).collect();
        ids.sort_unstable();

        assert_eq!(ids, [0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }
}
