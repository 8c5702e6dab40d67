//! Answering cards and listing decks with their study metrics.

use crate::database::CardStore;
use crate::error::Result;
use crate::format::format_time_remaining;
use crate::models::study_metrics::{StudyMetrics, aggregate};
use crate::models::{CardId, Deck, DeckId, ReviewPolicy, ReviewTimes, Timestamp};
use log::debug;
use serde::Serialize;

/// Reads a card's history, schedules it for the answer given at `now` and
/// stores the new timestamps.
pub fn answer_card<S: CardStore + ?Sized>(
    store: &mut S,
    policy: &ReviewPolicy,
    card_id: CardId,
    was_correct: bool,
    now: Timestamp,
) -> Result<ReviewTimes> {
    let card = store.get_card(card_id)?;
    let times = policy.schedule(card.last_review_at, card.next_review_at, was_correct, now);
    store.put_review_times(card_id, times)?;

    debug!(
        "Card {card_id} answered {}: next review in {}s",
        if was_correct { "correctly" } else { "wrongly" },
        times.interval()
    );
    Ok(times)
}

/// A deck together with metrics derived from its cards at query time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckOverview {
    pub deck: Deck,
    pub metrics: StudyMetrics,
}

impl DeckOverview {
    pub fn cards_for_study(&self) -> usize {
        self.metrics.due_count
    }

    pub fn cards_reviewed(&self) -> usize {
        self.metrics.not_due_count
    }

    /// "N cards for study" when anything is due, else a countdown to the next review.
    pub fn status(&self, now: Timestamp) -> String {
        match self.metrics.due_count {
            0 if self.metrics.total() == 0 => "no cards".to_string(),
            0 => format_time_remaining(self.metrics.time_remaining(now)),
            1 => "1 card for study".to_string(),
            n => format!("{n} cards for study"),
        }
    }
}

pub fn deck_overview<S: CardStore + ?Sized>(
    store: &S,
    deck_id: DeckId,
    now: Timestamp,
) -> Result<DeckOverview> {
    let deck = store.get_deck(deck_id)?;
    let cards = store.cards_in_deck(deck_id)?;
    Ok(DeckOverview {
        deck,
        metrics: aggregate(&cards, now),
    })
}

/// Every deck, the ones with most cards due first.
pub fn deck_overviews<S: CardStore + ?Sized>(store: &S, now: Timestamp) -> Result<Vec<DeckOverview>> {
    let mut overviews = store
        .decks()?
        .into_iter()
        .map(|deck| deck_overview(store, deck.id, now))
        .collect::<Result<Vec<_>>>()?;
    overviews.sort_by(|a, b| b.cards_for_study().cmp(&a.cards_for_study()));
    Ok(overviews)
}
