//! Picking and ordering cards for a study run.
//!
//! Difficulty is approximated by how many words the answer has.
use super::{Card, NextReview, Timestamp};

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cards sorted from shortest to longest answer, ties kept in input order.
pub fn by_difficulty(cards: &[Card]) -> Vec<&Card> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by_key(|card| word_count(&card.back));
    sorted
}

/// The easiest `percent` of the cards, at least one when any exist.
pub fn easiest_percent(cards: &[Card], percent: u32) -> Vec<&Card> {
    let mut easiest = by_difficulty(cards);
    easiest.truncate(share_of(easiest.len(), percent));
    easiest
}

/// The `percent` of scheduled, overdue cards that have waited longest.
///
/// Unscheduled cards are left out: they have no overdue time to rank by.
pub fn most_overdue_percent(cards: &[Card], now: Timestamp, percent: u32) -> Vec<&Card> {
    let mut overdue: Vec<&Card> = by_difficulty(cards)
        .into_iter()
        .filter(|card| matches!(card.next_review_at, NextReview::At(at) if at < now))
        .collect();
    overdue.sort_by_key(|card| card.next_review_at.due_at(now));
    overdue.truncate(share_of(overdue.len(), percent));
    overdue
}

/// Order for a continuous review: cards whose next review is closest to
/// `now`, in either direction, come first.
pub fn review_order(cards: &[Card], now: Timestamp) -> Vec<&Card> {
    let mut ordered: Vec<&Card> = cards.iter().collect();
    ordered.sort_by_key(|card| card.next_review_at.due_at(now).abs_diff(now));
    ordered
}

/// Which cards a study run picks from a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyMode {
    /// Every due card, closest review first.
    Due,
    /// The easiest `percent` of all cards, due or not.
    Easiest { percent: u32 },
    /// The `percent` of overdue cards that have waited longest.
    MostOverdue { percent: u32 },
}

pub const EASIEST_DEFAULT_PERCENT: u32 = 1;
pub const MOST_OVERDUE_DEFAULT_PERCENT: u32 = 10;

impl StudyMode {
    pub fn select(self, cards: &[Card], now: Timestamp) -> Vec<&Card> {
        match self {
            StudyMode::Due => review_order(cards, now)
                .into_iter()
                .filter(|card| card.is_due(now))
                .collect(),
            StudyMode::Easiest { percent } => easiest_percent(cards, percent),
            StudyMode::MostOverdue { percent } => most_overdue_percent(cards, now, percent),
        }
    }
}

fn share_of(len: usize, percent: u32) -> usize {
    (len * percent as usize).div_ceil(100).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardId, DeckId};

    const NOW: Timestamp = 1_000_000;

    fn card(id: i64, back: &str, next: Option<Timestamp>) -> Card {
        let mut card = Card::new(CardId(id), DeckId(1), format!("q{id}"), back.to_string());
        card.next_review_at = NextReview::from(next);
        card.last_review_at = next.map(|n| n - 30);
        card
    }

    fn ids(cards: &[&Card]) -> Vec<i64> {
        cards.iter().map(|card| card.id.0).collect()
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("One."), 1);
        assert_eq!(word_count("  leading and trailing spaces  "), 4);
        assert_eq!(word_count("tab\tand\nnewline"), 3);
    }

    #[test]
    fn test_by_difficulty_sorts_by_answer_length() {
        let cards = vec![
            card(1, "This is a short sentence.", None),
            card(2, "A very long sentence with many words to test the sorting functionality.", None),
            card(3, "Medium length.", None),
            card(4, "One.", None),
            card(5, "", None),
            card(6, "  leading and trailing spaces  ", None),
        ];
        assert_eq!(ids(&by_difficulty(&cards)), vec![5, 4, 3, 6, 1, 2]);
    }

    #[test]
    fn test_easiest_percent_rounds_up() {
        let cards: Vec<Card> = (0..150).map(|i| card(i, &"w ".repeat(i as usize), None)).collect();
        let easiest = easiest_percent(&cards, 1);
        assert_eq!(ids(&easiest), vec![0, 1]);

        let empty: Vec<Card> = Vec::new();
        assert!(easiest_percent(&empty, 10).is_empty());
        assert_eq!(easiest_percent(&cards, 250).len(), 150);
    }

    #[test]
    fn test_most_overdue_percent_skips_unscheduled_and_upcoming() {
        let mut cards = vec![card(100, "x", None), card(101, "x", Some(NOW + 10))];
        for i in 0..20 {
            cards.push(card(i, "x", Some(NOW - 100 * (i + 1))));
        }
        let picked = most_overdue_percent(&cards, NOW, 10);
        // 20 overdue cards, 10% of them, longest waiting first
        assert_eq!(ids(&picked), vec![19, 18]);
    }

    #[test]
    fn test_review_order_closest_first() {
        let cards = vec![
            card(1, "a", Some(NOW - 500)),
            card(2, "a", Some(NOW + 100)),
            card(3, "a", None),
            card(4, "a", Some(NOW + 2_000)),
        ];
        assert_eq!(ids(&review_order(&cards, NOW)), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_study_mode_select() {
        let cards = vec![
            card(1, "a long answer here", Some(NOW - 50)),
            card(2, "short", Some(NOW + 100)),
            card(3, "two words", Some(NOW - 900)),
            card(4, "three whole words", None),
        ];
        assert_eq!(ids(&StudyMode::Due.select(&cards, NOW)), vec![4, 1, 3]);
        assert_eq!(ids(&StudyMode::Easiest { percent: 50 }.select(&cards, NOW)), vec![2, 3]);
        assert_eq!(
            ids(&StudyMode::MostOverdue { percent: 100 }.select(&cards, NOW)),
            vec![3, 1]
        );
    }
}
