//! JSON import/export of decks, review history included.
//!
//! The file is a loosely-typed payload, so every card is validated before
//! anything is written to a store.

use crate::database::CardStore;
use crate::error::{FlashcardError, Result};
use crate::models::card::{validate_schedule, validate_text};
use crate::models::deck::{DEFAULT_COLOR, validate_name};
use crate::models::{DeckId, NextReview, ReviewTimes, Timestamp};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckExport {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub cards: Vec<CardExport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardExport {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub last_review_at: Option<Timestamp>,
    #[serde(default)]
    pub next_review_at: NextReview,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl DeckExport {
    /// Snapshot of a stored deck and its cards.
    pub fn from_store<S: CardStore + ?Sized>(store: &S, deck_id: DeckId) -> Result<Self> {
        let deck = store.get_deck(deck_id)?;
        let cards = store
            .cards_in_deck(deck_id)?
            .into_iter()
            .map(|card| CardExport {
                front: card.front,
                back: card.back,
                last_review_at: card.last_review_at,
                next_review_at: card.next_review_at,
            })
            .collect();

        Ok(Self {
            name: deck.name,
            color: deck.color,
            cards,
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        let mut fronts = HashSet::new();
        for card in &self.cards {
            let front = validate_text("front", &card.front)?;
            validate_text("back", &card.back)?;
            validate_schedule(card.last_review_at, card.next_review_at)?;
            // a repeated front would land on the same stored card
            if !fronts.insert(front) {
                return Err(FlashcardError::InvalidCard(format!(
                    "front '{}' appears more than once",
                    card.front.trim()
                )));
            }
        }
        Ok(())
    }

    /// Creates a new deck in `store` holding these cards and their history.
    pub fn import_into<S: CardStore + ?Sized>(&self, store: &mut S) -> Result<DeckId> {
        self.validate()?;

        let deck_id = store.add_deck(&self.name, Some(self.color.as_str()))?;
        for card in &self.cards {
            let card_id = store.add_card(deck_id, &card.front, &card.back)?;
            if let (Some(last_review_at), NextReview::At(next_review_at)) =
                (card.last_review_at, card.next_review_at)
            {
                store.put_review_times(
                    card_id,
                    ReviewTimes {
                        last_review_at,
                        next_review_at,
                    },
                )?;
            }
        }
        Ok(deck_id)
    }
}

/// Exports a deck to a JSON file at the specified path.
pub fn export_json_to_path<P: AsRef<Path>>(deck: &DeckExport, path: P) -> Result<()> {
    let json_string = serde_json::to_string_pretty(deck)?;
    fs::write(path.as_ref(), json_string)?;
    info!("Deck '{}' exported to '{}'", deck.name, path.as_ref().display());
    Ok(())
}

/// Reads and validates a deck from a JSON file.
pub fn import_json<P: AsRef<Path>>(path: P) -> Result<DeckExport> {
    let contents = fs::read_to_string(path.as_ref())?;
    let deck: DeckExport = serde_json::from_str(&contents)?;
    deck.validate()?;

    info!("Deck '{}' read from '{}'", deck.name, path.as_ref().display());
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn create_test_deck() -> DeckExport {
        DeckExport {
            name: "Test Deck".to_string(),
            color: "#336699".to_string(),
            cards: vec![
                CardExport {
                    front: "hello".to_string(),
                    back: "cześć".to_string(),
                    last_review_at: None,
                    next_review_at: NextReview::Unscheduled,
                },
                CardExport {
                    front: "goodbye".to_string(),
                    back: "do widzenia".to_string(),
                    last_review_at: Some(1_000_000),
                    next_review_at: NextReview::At(1_002_000),
                },
            ],
        }
    }

    #[test]
    fn test_export_and_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let deck = create_test_deck();

        export_json_to_path(&deck, &path).unwrap();
        assert!(path.exists());

        let imported = import_json(&path).unwrap();
        assert_eq!(imported, deck);
    }

    #[test]
    fn test_import_loose_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loose.json");
        let json_content = r#"{
  "name": "Import Test Deck",
  "cards": [
    { "front": "test term", "back": "test definition" },
    { "front": "seen", "back": "before", "lastReviewAt": 10, "nextReviewAt": 40 }
  ]
}"#;
        fs::write(&path, json_content).unwrap();

        let deck = import_json(&path).unwrap();
        assert_eq!(deck.color, "#FFFFFF");
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.cards[0].next_review_at, NextReview::Unscheduled);
        assert_eq!(deck.cards[1].next_review_at, NextReview::At(40));
    }

    #[test]
    fn test_import_rejects_half_set_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("half.json");
        fs::write(
            &path,
            r#"{"name": "Broken", "cards": [{"front": "a", "back": "b", "nextReviewAt": 5}]}"#,
        )
        .unwrap();

        assert!(matches!(import_json(&path), Err(FlashcardError::InvalidCard(_))));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json("nonexistent_file_xyz123.json");
        assert!(matches!(result, Err(FlashcardError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(FlashcardError::Json(_))));
    }

    #[test]
    fn test_store_roundtrip_keeps_history() {
        let mut store = MemoryStore::new();
        let deck_id = create_test_deck().import_into(&mut store).unwrap();

        let cards = store.cards_in_deck(deck_id).unwrap();
        assert!(cards[0].is_virgin());
        assert_eq!(cards[1].last_review_at, Some(1_000_000));
        assert_eq!(cards[1].next_review_at, NextReview::At(1_002_000));

        let exported = DeckExport::from_store(&store, deck_id).unwrap();
        assert_eq!(exported, create_test_deck());
    }

    #[test]
    fn test_import_into_validates_before_writing() {
        let mut store = MemoryStore::new();
        let mut deck = create_test_deck();
        deck.cards[1].back = "   ".to_string();

        assert!(deck.import_into(&mut store).is_err());
        assert!(store.decks().unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_duplicate_fronts() {
        let mut store = MemoryStore::new();
        let mut deck = create_test_deck();
        deck.cards.push(CardExport {
            front: " goodbye ".to_string(),
            back: "pa".to_string(),
            last_review_at: Some(10),
            next_review_at: NextReview::At(40),
        });

        assert!(matches!(deck.validate(), Err(FlashcardError::InvalidCard(_))));
        assert!(matches!(
            deck.import_into(&mut store),
            Err(FlashcardError::InvalidCard(_))
        ));
        assert!(store.decks().unwrap().is_empty());
    }
}
