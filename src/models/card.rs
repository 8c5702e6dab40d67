//! Card is a pair <front, back> plus the timestamps the scheduler works on.
use super::{DeckId, NextReview, ReviewTimes, Timestamp};
use crate::error::{FlashcardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub last_review_at: Option<Timestamp>,
    #[serde(default)]
    pub next_review_at: NextReview,
}

impl Card {
    /// A fresh card, never reviewed.
    pub fn new(id: CardId, deck_id: DeckId, front: String, back: String) -> Self {
        Self {
            id,
            deck_id,
            front,
            back,
            last_review_at: None,
            next_review_at: NextReview::Unscheduled,
        }
    }

    pub fn is_virgin(&self) -> bool {
        self.last_review_at.is_none() && self.next_review_at == NextReview::Unscheduled
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at.is_due(now)
    }

    pub fn apply_review(&mut self, times: ReviewTimes) {
        self.last_review_at = Some(times.last_review_at);
        self.next_review_at = NextReview::At(times.next_review_at);
    }

    /// Forgets the review history so the card is studied as new.
    pub fn reset_schedule(&mut self) {
        self.last_review_at = None;
        self.next_review_at = NextReview::Unscheduled;
    }
}

/// Trims card text and rejects it when nothing is left.
pub fn validate_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FlashcardError::InvalidCard(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Review timestamps are either both unset or both set.
pub fn validate_schedule(last_review_at: Option<Timestamp>, next_review_at: NextReview) -> Result<()> {
    match (last_review_at, next_review_at) {
        (None, NextReview::Unscheduled) | (Some(_), NextReview::At(_)) => Ok(()),
        (Some(last), NextReview::Unscheduled) => Err(FlashcardError::InvalidCard(format!(
            "lastReviewAt is {last} but nextReviewAt is null"
        ))),
        (None, NextReview::At(next)) => Err(FlashcardError::InvalidCard(format!(
            "nextReviewAt is {next} but lastReviewAt is null"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card::new(CardId(1), DeckId(1), "cześć".to_string(), "hello".to_string())
    }

    #[test]
    fn test_card_creation_is_virgin() {
        let card = sample_card();
        assert_eq!(card.front, "cześć");
        assert_eq!(card.back, "hello");
        assert!(card.is_virgin());
        assert!(card.is_due(0));
    }

    #[test]
    fn test_apply_review_and_reset() {
        let mut card = sample_card();
        card.apply_review(ReviewTimes {
            last_review_at: 100,
            next_review_at: 130,
        });
        assert!(!card.is_virgin());
        assert_eq!(card.last_review_at, Some(100));
        assert_eq!(card.next_review_at, NextReview::At(130));
        assert!(!card.is_due(120));
        assert!(card.is_due(131));

        card.reset_schedule();
        assert!(card.is_virgin());
    }

    #[test]
    fn test_deserialize_with_missing_timestamps() {
        let json = r#"{"id": 4, "deckId": 2, "front": "dziękuję", "back": "thank you"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, CardId(4));
        assert_eq!(card.deck_id, DeckId(2));
        assert!(card.is_virgin());
    }

    #[test]
    fn test_validate_text_trims() {
        assert_eq!(validate_text("front", "  proszę ").unwrap(), "proszę");
        assert!(validate_text("front", "   ").is_err());
    }

    #[test]
    fn test_validate_schedule() {
        assert!(validate_schedule(None, NextReview::Unscheduled).is_ok());
        assert!(validate_schedule(Some(1), NextReview::At(2)).is_ok());
        assert!(validate_schedule(Some(1), NextReview::Unscheduled).is_err());
        assert!(validate_schedule(None, NextReview::At(2)).is_err());
    }
}
