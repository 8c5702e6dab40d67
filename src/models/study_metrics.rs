//! Per-deck study metrics: how many cards are due, how many are not, and the
//! single timestamp a deck listing reports.
//!
//! The timestamp is the earliest overdue time when anything is due, else the
//! earliest upcoming review, else `now`. Callers showing a live countdown
//! re-run the aggregation on their own timer.

use super::{Card, Timestamp};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMetrics {
    pub due_count: usize,
    pub not_due_count: usize,
    pub earliest_relevant_at: Timestamp,
}

impl StudyMetrics {
    pub fn total(&self) -> usize {
        self.due_count + self.not_due_count
    }

    pub fn has_due(&self) -> bool {
        self.due_count > 0
    }

    /// Seconds from `now` to the relevant timestamp; negative when overdue.
    pub fn time_remaining(&self, now: Timestamp) -> i64 {
        self.earliest_relevant_at.saturating_sub(now)
    }
}

/// Splits cards into due and not due at `now`.
///
/// An unscheduled card counts as due at `now`, so it only decides the
/// timestamp when no scheduled card is overdue.
pub fn aggregate<'a, I>(cards: I, now: Timestamp) -> StudyMetrics
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut due_count = 0;
    let mut not_due_count = 0;
    let mut earliest_due: Option<Timestamp> = None;
    let mut earliest_upcoming: Option<Timestamp> = None;

    for card in cards {
        let at = card.next_review_at.due_at(now);
        if card.is_due(now) {
            due_count += 1;
            earliest_due = Some(earliest_due.map_or(at, |min| min.min(at)));
        } else {
            not_due_count += 1;
            earliest_upcoming = Some(earliest_upcoming.map_or(at, |min| min.min(at)));
        }
    }

    StudyMetrics {
        due_count,
        not_due_count,
        earliest_relevant_at: earliest_due.or(earliest_upcoming).unwrap_or(now),
    }
}

/// Seconds until the soonest review across all cards, negative if one is
/// overdue. `None` for an empty deck.
pub fn time_to_next_review<'a, I>(cards: I, now: Timestamp) -> Option<i64>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .map(|card| card.next_review_at.due_at(now))
        .min()
        .map(|soonest| soonest.saturating_sub(now))
}
