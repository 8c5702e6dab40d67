//! Error types for the flashcard review crate
//!
//! Scheduling and aggregation never fail; everything here comes from the
//! storage, file and configuration boundary.

use crate::models::{CardId, DeckId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlashcardError {
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Deck not found: {0}")]
    DeckNotFound(DeckId),

    /// Card payload rejected at the boundary (empty text, half-set schedule)
    #[error("Invalid card: {0}")]
    InvalidCard(String),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
