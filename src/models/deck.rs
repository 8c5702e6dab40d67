//! Deck is a named set of cards. Cards point back at their deck; the deck
//! only lists their ids.
use super::CardId;
use crate::error::{FlashcardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COLOR: &str = "#FFFFFF";
pub const MIN_NAME_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub i64);

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl Deck {
    pub fn new(id: DeckId, name: String) -> Self {
        Self {
            id,
            name,
            color: DEFAULT_COLOR.to_string(),
            card_ids: Vec::new(),
        }
    }
}

/// Trims a deck name and checks its minimum length.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(FlashcardError::InvalidDeck(format!(
            "name '{trimmed}' is shorter than {MIN_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
