//! Review session over a selection of cards from one deck.
//! Wrong answers are retried in later rounds until every card has been
//! answered correctly once.

use super::selection::StudyMode;
use super::{Card, DeckId, ReviewPolicy, ReviewTimes, Timestamp};
use crate::database::CardStore;
use crate::error::Result;
use crate::study::answer_card;

struct SessionCard {
    card: Card,
    answered_correctly: bool,
}

/// Manages a review session with multiple rounds.
/// Every answer is scheduled and stored immediately; rounds only decide
/// what is shown next in this session.
pub struct ReviewSession {
    pub deck_id: DeckId,
    pub show_back: bool,
    pub round_number: usize,
    cards: Vec<SessionCard>,
    current_round: Vec<usize>,
    current_index: usize,
}

impl ReviewSession {
    /// Starts a session with the cards due at `now`, those whose review
    /// time is closest to `now` first.
    pub fn new_from_due_cards(deck_id: DeckId, cards: &[Card], now: Timestamp) -> Self {
        Self::for_mode(deck_id, cards, StudyMode::Due, now)
    }

    /// Starts a session with the cards `mode` picks, in the order it picks them.
    pub fn for_mode(deck_id: DeckId, cards: &[Card], mode: StudyMode, now: Timestamp) -> Self {
        Self::from_cards(deck_id, mode.select(cards, now).into_iter().cloned().collect())
    }

    pub fn from_cards(deck_id: DeckId, cards: Vec<Card>) -> Self {
        let current_round = (0..cards.len()).collect();
        let cards = cards
            .into_iter()
            .map(|card| SessionCard {
                card,
                answered_correctly: false,
            })
            .collect();

        Self {
            deck_id,
            show_back: false,
            round_number: 1,
            cards,
            current_round,
            current_index: 0,
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        if self.is_completed() {
            return None;
        }
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.cards.get(idx))
            .map(|entry| &entry.card)
    }

    pub fn toggle_back(&mut self) {
        self.show_back = !self.show_back;
    }

    /// Schedules the current card for this answer, stores it and moves on.
    /// Returns `None` once the session is complete.
    pub fn answer<S: CardStore + ?Sized>(
        &mut self,
        store: &mut S,
        policy: &ReviewPolicy,
        was_correct: bool,
        now: Timestamp,
    ) -> Result<Option<ReviewTimes>> {
        if self.is_completed() {
            return Ok(None);
        }
        let Some(entry) = self
            .current_round
            .get(self.current_index)
            .copied()
            .and_then(|idx| self.cards.get_mut(idx))
        else {
            return Ok(None);
        };

        let times = answer_card(store, policy, entry.card.id, was_correct, now)?;
        entry.card.apply_review(times);
        entry.answered_correctly = was_correct;

        self.next_card();
        Ok(Some(times))
    }

    fn next_card(&mut self) {
        self.show_back = false;
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the cards answered wrongly in this one.
    /// If there are none, the session is complete.
    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| {
                self.cards
                    .get(idx)
                    .map(|entry| !entry.answered_correctly)
                    .unwrap_or(false)
            })
            .collect();

        if !failed.is_empty() {
            self.current_round = failed;
            self.current_index = 0;
            self.round_number += 1;
        }
    }

    pub fn learned_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| {
                self.cards
                    .get(idx)
                    .map(|entry| entry.answered_correctly)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    /// True when nothing was due or every card in the round was answered correctly.
    pub fn is_completed(&self) -> bool {
        self.learned_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Retry): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
