//! The storage seam the review flow talks to.
//!
//! Implementations own card and deck records and hand out copies. Writes go
//! through `&mut self`, one card at a time; there are no cross-card
//! transactions.

use crate::error::Result;
use crate::models::{Card, CardId, Deck, DeckId, ReviewTimes};

pub trait CardStore {
    /// Creates a deck. Names are trimmed, at least 3 characters and unique.
    fn add_deck(&mut self, name: &str, color: Option<&str>) -> Result<DeckId>;

    /// Adds a never-reviewed card to a deck.
    ///
    /// Adding the same front twice to one deck returns the existing card.
    fn add_card(&mut self, deck_id: DeckId, front: &str, back: &str) -> Result<CardId>;

    fn get_deck(&self, id: DeckId) -> Result<Deck>;

    fn decks(&self) -> Result<Vec<Deck>>;

    fn get_card(&self, id: CardId) -> Result<Card>;

    fn cards_in_deck(&self, deck_id: DeckId) -> Result<Vec<Card>>;

    /// Overwrites both review timestamps of a card.
    fn put_review_times(&mut self, id: CardId, times: ReviewTimes) -> Result<()>;

    /// Clears both review timestamps so the card is new again.
    fn reset_card(&mut self, id: CardId) -> Result<()>;
}
