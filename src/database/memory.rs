//! In-memory card store.
use super::CardStore;
use crate::error::{FlashcardError, Result};
use crate::models::card::validate_text;
use crate::models::deck::{DEFAULT_COLOR, validate_name};
use crate::models::{Card, CardId, Deck, DeckId, ReviewTimes};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    decks: BTreeMap<DeckId, Deck>,
    cards: BTreeMap<CardId, Card>,
    last_deck_id: i64,
    last_card_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards
            .get_mut(&id)
            .ok_or(FlashcardError::CardNotFound(id))
    }
}

impl CardStore for MemoryStore {
    fn add_deck(&mut self, name: &str, color: Option<&str>) -> Result<DeckId> {
        let name = validate_name(name)?;
        if self.decks.values().any(|deck| deck.name == name) {
            return Err(FlashcardError::InvalidDeck(format!("deck '{name}' already exists")));
        }

        self.last_deck_id += 1;
        let id = DeckId(self.last_deck_id);
        let mut deck = Deck::new(id, name);
        deck.color = color.unwrap_or(DEFAULT_COLOR).to_string();
        self.decks.insert(id, deck);
        Ok(id)
    }

    fn add_card(&mut self, deck_id: DeckId, front: &str, back: &str) -> Result<CardId> {
        let front = validate_text("front", front)?;
        let back = validate_text("back", back)?;
        if !self.decks.contains_key(&deck_id) {
            return Err(FlashcardError::DeckNotFound(deck_id));
        }

        if let Some(existing) = self
            .cards
            .values()
            .find(|card| card.deck_id == deck_id && card.front == front)
        {
            return Ok(existing.id);
        }

        self.last_card_id += 1;
        let id = CardId(self.last_card_id);
        self.cards.insert(id, Card::new(id, deck_id, front, back));
        if let Some(deck) = self.decks.get_mut(&deck_id) {
            deck.card_ids.push(id);
        }
        Ok(id)
    }

    fn get_deck(&self, id: DeckId) -> Result<Deck> {
        self.decks
            .get(&id)
            .cloned()
            .ok_or(FlashcardError::DeckNotFound(id))
    }

    fn decks(&self) -> Result<Vec<Deck>> {
        Ok(self.decks.values().cloned().collect())
    }

    fn get_card(&self, id: CardId) -> Result<Card> {
        self.cards
            .get(&id)
            .cloned()
            .ok_or(FlashcardError::CardNotFound(id))
    }

    fn cards_in_deck(&self, deck_id: DeckId) -> Result<Vec<Card>> {
        let deck = self.get_deck(deck_id)?;
        Ok(deck
            .card_ids
            .iter()
            .filter_map(|id| self.cards.get(id).cloned())
            .collect())
    }

    fn put_review_times(&mut self, id: CardId, times: ReviewTimes) -> Result<()> {
        self.card_mut(id)?.apply_review(times);
        Ok(())
    }

    fn reset_card(&mut self, id: CardId) -> Result<()> {
        self.card_mut(id)?.reset_schedule();
        Ok(())
    }
}
