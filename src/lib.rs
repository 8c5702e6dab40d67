pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod study;

pub use error::{FlashcardError, Result};
pub use models::{
    Card, CardId, Deck, DeckId, NextReview, ReviewPolicy, ReviewSession, ReviewTimes,
    StudyMetrics, Timestamp, aggregate, schedule,
};
