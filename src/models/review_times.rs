//! Review timestamps shared by the scheduler, the aggregator and storage.
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// When a card is next shown. Stored and serialized as a nullable integer,
/// where null means the card was never scheduled and is due right away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Timestamp>", into = "Option<Timestamp>")]
pub enum NextReview {
    #[default]
    Unscheduled,
    At(Timestamp),
}

impl NextReview {
    /// Unscheduled cards are always due; scheduled ones once their time has strictly passed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self {
            NextReview::Unscheduled => true,
            NextReview::At(at) => *at < now,
        }
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            NextReview::Unscheduled => None,
            NextReview::At(at) => Some(*at),
        }
    }

    /// Point in time this card counts as due, with unscheduled cards due `now`.
    pub fn due_at(&self, now: Timestamp) -> Timestamp {
        self.timestamp().unwrap_or(now)
    }
}

impl From<Option<Timestamp>> for NextReview {
    fn from(value: Option<Timestamp>) -> Self {
        value.map_or(NextReview::Unscheduled, NextReview::At)
    }
}

impl From<NextReview> for Option<Timestamp> {
    fn from(value: NextReview) -> Self {
        value.timestamp()
    }
}

/// Output of the scheduler: both fields are always set after a review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTimes {
    pub last_review_at: Timestamp,
    pub next_review_at: Timestamp,
}

impl ReviewTimes {
    /// Seconds between this review and the next one.
    pub fn interval(&self) -> i64 {
        self.next_review_at.saturating_sub(self.last_review_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscheduled_is_always_due() {
        assert!(NextReview::Unscheduled.is_due(0));
        assert!(NextReview::Unscheduled.is_due(i64::MIN));
    }

    #[test]
    fn test_due_only_after_time_passes() {
        let next = NextReview::At(1_000);
        assert!(!next.is_due(999));
        assert!(!next.is_due(1_000));
        assert!(next.is_due(1_001));
    }

    #[test]
    fn test_serializes_as_nullable_integer() {
        assert_eq!(serde_json::to_string(&NextReview::Unscheduled).unwrap(), "null");
        assert_eq!(serde_json::to_string(&NextReview::At(42)).unwrap(), "42");

        let parsed: NextReview = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, NextReview::Unscheduled);
        let parsed: NextReview = serde_json::from_str("1700000000").unwrap();
        assert_eq!(parsed, NextReview::At(1_700_000_000));
    }

    #[test]
    fn test_review_times_camel_case() {
        let times = ReviewTimes {
            last_review_at: 10,
            next_review_at: 40,
        };
        let json = serde_json::to_string(&times).unwrap();
        assert_eq!(json, r#"{"lastReviewAt":10,"nextReviewAt":40}"#);
        assert_eq!(times.interval(), 30);
    }
}
