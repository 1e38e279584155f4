use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    /// Dealt but not started; flips are ignored.
    Ready,
    Playing,
    /// Two mismatched cards are face-up; flips are ignored until the pending
    /// un-flip settles the turn.
    Resolving,
    Ended,
}

impl EngineState {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// The clock runs in both `Playing` and `Resolving`.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Playing | Self::Resolving)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Face-up unresolved cards, in flip order. Holding at most two is a
/// structural property of the type, not a runtime check.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnState {
    NoneUp,
    OneUp(CardIndex),
    TwoUp(CardIndex, CardIndex),
}

impl TurnState {
    pub const fn contains(self, index: CardIndex) -> bool {
        match self {
            Self::NoneUp => false,
            Self::OneUp(first) => first == index,
            Self::TwoUp(first, second) => first == index || second == index,
        }
    }

    pub const fn count(self) -> u8 {
        match self {
            Self::NoneUp => 0,
            Self::OneUp(_) => 1,
            Self::TwoUp(_, _) => 2,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::NoneUp
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    /// First card of a turn went face-up.
    FirstUp,
    /// Second card completed the pair.
    Matched,
    /// Second card did not match; the engine is now resolving and expects a
    /// `resolve_mismatch` call after the reveal delay.
    Mismatched,
    /// The last pair fell and the game ended.
    Won,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// The memory-matching state machine.
///
/// Owns the deal and the per-run counters; knows nothing about rendering or
/// timers. The caller feeds it discrete events (flips, clock ticks, the
/// delayed mismatch un-flip) and reads outcomes back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairEngine {
    deck: Deck,
    turn: TurnState,
    matched_pairs: PairCount,
    moves: Saturating<u32>,
    elapsed_secs: u32,
    state: EngineState,
}

impl PairEngine {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            turn: Default::default(),
            matched_pairs: 0,
            moves: Saturating(0),
            elapsed_secs: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pair_count(&self) -> PairCount {
        self.deck.pair_count()
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Whether the card at `index` currently shows its face, either matched
    /// or part of the open turn.
    pub fn is_face_up(&self, index: CardIndex) -> bool {
        self.turn.contains(index)
            || self
                .deck
                .validate_index(index)
                .map_or(false, |index| self.deck[index].is_matched())
    }

    /// Begins a run on the current deal from any state, zeroing all counters
    /// and turn state.
    pub fn start(&mut self) {
        self.turn = TurnState::NoneUp;
        self.matched_pairs = 0;
        self.moves = Saturating(0);
        self.elapsed_secs = 0;
        self.state = EngineState::Playing;
        for card in self.deck.cards_mut() {
            card.clear_matched();
        }
        log::info!("Game started: {} pairs on the board", self.deck.pair_count());
    }

    /// Flips the card at `index` face-up.
    ///
    /// Everything the click policy calls a no-op comes back as `NoChange`:
    /// flips outside `Playing`, on matched cards, on a card already up, or
    /// while two cards are up. Only an out-of-range index is an error.
    pub fn flip(&mut self, index: CardIndex) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        let index = self.deck.validate_index(index)?;

        if !self.state.accepts_input() {
            return Ok(NoChange);
        }
        if self.deck[index].is_matched() || self.turn.contains(index) {
            return Ok(NoChange);
        }

        Ok(match self.turn {
            TurnState::TwoUp(_, _) => NoChange,
            TurnState::NoneUp => {
                self.turn = TurnState::OneUp(index);
                FirstUp
            }
            TurnState::OneUp(first) => {
                self.moves += 1;

                if self.deck[first].id() == self.deck[index].id() {
                    self.deck.card_mut(first).mark_matched();
                    self.deck.card_mut(index).mark_matched();
                    self.matched_pairs += 1;
                    self.turn = TurnState::NoneUp;

                    if self.matched_pairs == self.deck.pair_count() {
                        self.state = EngineState::Ended;
                        log::info!("Game over, final score: {}", self.score());
                        Won
                    } else {
                        Matched
                    }
                } else {
                    self.turn = TurnState::TwoUp(first, index);
                    self.state = EngineState::Resolving;
                    Mismatched
                }
            }
        })
    }

    /// Turns a mismatched pair back face-down after the reveal delay.
    ///
    /// No-op outside `Resolving`, so a stale delayed callback that outlived
    /// its deal cannot disturb a newer one.
    pub fn resolve_mismatch(&mut self) -> MarkOutcome {
        match (self.state, self.turn) {
            (EngineState::Resolving, TurnState::TwoUp(_, _)) => {
                self.turn = TurnState::NoneUp;
                self.state = EngineState::Playing;
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    /// Advances the clock by one second while a run is in progress. Ticks
    /// arriving after the game ended leave the clock frozen.
    pub fn tick(&mut self) -> MarkOutcome {
        if self.state.is_running() {
            self.elapsed_secs += 1;
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        }
    }

    /// Current score, recomputed from the counters on every call so the
    /// displayed value can never drift from its inputs.
    pub fn score(&self) -> u32 {
        let base = u32::from(self.matched_pairs) * 100;
        let time_bonus = 300u32.saturating_sub(self.elapsed_secs) * 2;
        let move_penalty = self.moves.0 * 5;
        (base + time_bonus).saturating_sub(move_penalty)
    }
}

/// Qualitative end-of-game rating.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResultTier {
    pub min_score: u32,
    pub emoji: &'static str,
    pub message: &'static str,
}

/// Rank-ordered, best first. Lookup takes the first tier the score reaches,
/// so a score sitting exactly on a boundary lands in the higher tier.
pub const RESULT_TIERS: [ResultTier; 4] = [
    ResultTier {
        min_score: 1000,
        emoji: "🏆",
        message: "Unreal! Certified superfan!",
    },
    ResultTier {
        min_score: 700,
        emoji: "⭐",
        message: "Great run! You really know the members!",
    },
    ResultTier {
        min_score: 400,
        emoji: "👍",
        message: "Nice one! Keep playing and climb higher!",
    },
    ResultTier {
        min_score: 0,
        emoji: "💪",
        message: "Warm-up round! Give it another go!",
    },
];

impl ResultTier {
    pub fn for_score(score: u32) -> &'static ResultTier {
        RESULT_TIERS
            .iter()
            .find(|tier| score >= tier.min_score)
            .unwrap_or(&RESULT_TIERS[RESULT_TIERS.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Unshuffled deal: indices `2k` and `2k + 1` hold identity `k`.
    fn ordered_deck(pairs: PairCount) -> Deck {
        let cards: Vec<Card> = (0..pairs)
            .flat_map(|id| [Card::new(id), Card::new(id)])
            .collect();
        Deck::from_cards(cards).unwrap()
    }

    fn started_engine(pairs: PairCount) -> PairEngine {
        let mut engine = PairEngine::new(ordered_deck(pairs));
        engine.start();
        engine
    }

    fn match_pair(engine: &mut PairEngine, pair: PairCount) -> FlipOutcome {
        assert_eq!(engine.flip(pair * 2).unwrap(), FlipOutcome::FirstUp);
        engine.flip(pair * 2 + 1).unwrap()
    }

    #[test]
    fn flips_before_start_are_ignored() {
        let mut engine = PairEngine::new(ordered_deck(4));

        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.turn(), TurnState::NoneUp);
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn out_of_range_flip_is_an_error() {
        let mut engine = started_engine(4);

        assert_eq!(engine.flip(8), Err(GameError::InvalidIndex));
    }

    #[test]
    fn matching_pair_resolves_in_place() {
        let mut engine = started_engine(4);

        assert_eq!(match_pair(&mut engine, 0), FlipOutcome::Matched);
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(engine.moves(), 1);
        assert_eq!(engine.turn(), TurnState::NoneUp);
        assert!(engine.deck()[0].is_matched());
        assert!(engine.deck()[1].is_matched());
        assert_eq!(engine.state(), EngineState::Playing);
    }

    #[test]
    fn mismatch_blocks_input_until_resolved() {
        let mut engine = started_engine(4);

        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::FirstUp);
        assert_eq!(engine.flip(2).unwrap(), FlipOutcome::Mismatched);
        assert_eq!(engine.state(), EngineState::Resolving);
        assert_eq!(engine.moves(), 1);

        // third click while two cards are up changes nothing
        assert_eq!(engine.flip(4).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.turn(), TurnState::TwoUp(0, 2));
        assert_eq!(engine.moves(), 1);

        assert_eq!(engine.resolve_mismatch(), MarkOutcome::Changed);
        assert_eq!(engine.turn(), TurnState::NoneUp);
        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.matched_pairs(), 0);
        assert!(!engine.is_face_up(0));
        assert!(!engine.is_face_up(2));
    }

    #[test]
    fn resolve_mismatch_outside_resolving_is_a_no_op() {
        let mut engine = started_engine(4);

        assert_eq!(engine.resolve_mismatch(), MarkOutcome::NoChange);

        engine.flip(0).unwrap();
        assert_eq!(engine.resolve_mismatch(), MarkOutcome::NoChange);
        assert_eq!(engine.turn(), TurnState::OneUp(0));
    }

    #[test]
    fn matched_cards_ignore_further_clicks() {
        let mut engine = started_engine(4);
        match_pair(&mut engine, 0);

        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.moves(), 1);

        // still a no-op when one unrelated card is up
        engine.flip(2).unwrap();
        assert_eq!(engine.flip(1).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.turn(), TurnState::OneUp(2));
    }

    #[test]
    fn clicking_the_same_card_twice_is_not_a_move() {
        let mut engine = started_engine(4);

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.turn(), TurnState::OneUp(0));
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn last_pair_ends_the_game_and_freezes_the_clock() {
        let mut engine = started_engine(4);
        engine.tick();

        for pair in 0..3 {
            assert_eq!(match_pair(&mut engine, pair), FlipOutcome::Matched);
        }
        assert_eq!(match_pair(&mut engine, 3), FlipOutcome::Won);
        assert_eq!(engine.state(), EngineState::Ended);
        assert_eq!(engine.matched_pairs(), 4);

        // no input and no clock after the end
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.tick(), MarkOutcome::NoChange);
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn clock_runs_while_resolving() {
        let mut engine = started_engine(4);

        engine.flip(0).unwrap();
        engine.flip(2).unwrap();
        assert_eq!(engine.state(), EngineState::Resolving);
        assert_eq!(engine.tick(), MarkOutcome::Changed);
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn start_resets_a_finished_run() {
        let mut engine = started_engine(4);
        engine.tick();
        for pair in 0..4 {
            match_pair(&mut engine, pair);
        }
        assert_eq!(engine.state(), EngineState::Ended);

        engine.start();

        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.matched_pairs(), 0);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.elapsed_secs(), 0);
        assert!(engine.deck().iter().all(|card| !card.is_matched()));
    }

    #[test]
    fn score_matches_the_worked_example() {
        // 6 matched pairs, 250 s, 20 moves => 600 + 100 - 100 = 600
        let mut engine = started_engine(6);
        for _ in 0..250 {
            engine.tick();
        }
        for _ in 0..14 {
            engine.flip(0).unwrap();
            engine.flip(2).unwrap();
            engine.resolve_mismatch();
        }
        for pair in 0..6 {
            match_pair(&mut engine, pair);
        }

        assert_eq!(engine.moves(), 20);
        assert_eq!(engine.elapsed_secs(), 250);
        assert_eq!(engine.score(), 600);
        assert_eq!(ResultTier::for_score(engine.score()).min_score, 400);
    }

    #[test]
    fn time_bonus_never_goes_negative() {
        let mut engine = started_engine(4);
        for _ in 0..320 {
            engine.tick();
        }
        match_pair(&mut engine, 0);

        // base 100, bonus 0 (not -40), penalty 5
        assert_eq!(engine.score(), 95);
    }

    #[test]
    fn score_floors_at_zero() {
        let mut engine = started_engine(4);
        for _ in 0..300 {
            engine.tick();
        }
        for _ in 0..50 {
            engine.flip(0).unwrap();
            engine.flip(2).unwrap();
            engine.resolve_mismatch();
        }

        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn tier_boundaries_resolve_upwards() {
        assert_eq!(ResultTier::for_score(1000).emoji, "🏆");
        assert_eq!(ResultTier::for_score(999).emoji, "⭐");
        assert_eq!(ResultTier::for_score(700).emoji, "⭐");
        assert_eq!(ResultTier::for_score(400).min_score, 400);
        assert_eq!(ResultTier::for_score(399).min_score, 0);
        assert_eq!(ResultTier::for_score(0).min_score, 0);
    }

    #[test]
    fn turn_state_never_reports_more_than_two() {
        let mut engine = started_engine(4);

        assert_eq!(engine.turn().count(), 0);
        engine.flip(0).unwrap();
        assert_eq!(engine.turn().count(), 1);
        engine.flip(2).unwrap();
        assert_eq!(engine.turn().count(), 2);
        engine.flip(4).unwrap();
        engine.flip(5).unwrap();
        assert_eq!(engine.turn().count(), 2);
    }
}
