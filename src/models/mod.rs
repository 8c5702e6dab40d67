pub mod card;
pub mod deck;
pub mod review_session;
pub mod review_times;
pub mod scheduler;
pub mod selection;
pub mod study_metrics;

pub use card::{Card, CardId};
pub use deck::{Deck, DeckId};
pub use review_session::ReviewSession;
pub use review_times::{NextReview, ReviewTimes, Timestamp};
pub use scheduler::{ReviewPolicy, schedule};
pub use study_metrics::{StudyMetrics, aggregate};
