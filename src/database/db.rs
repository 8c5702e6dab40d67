//! SQLite card store
//!
//! Keeps decks and cards in two tables. Review timestamps are nullable
//! INTEGER columns holding seconds since the epoch.

use super::CardStore;
use crate::clock::SECONDS_PER_DAY;
use crate::error::{FlashcardError, Result};
use crate::models::card::validate_text;
use crate::models::deck::{DEFAULT_COLOR, validate_name};
use crate::models::{Card, CardId, Deck, DeckId, NextReview, ReviewTimes, Timestamp};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const CARD_COLUMNS: &str = "id, deck_id, front, back, last_review_at, next_review_at";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure the tables exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!("Opened card database at {}", path.as_ref().display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn deck_exists(&self, id: DeckId) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM decks WHERE id = ?1", params![id.0], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Fixes timestamps left behind by older versions that stored zeros or
    /// other values far in the past.
    ///
    /// A last review below `floor` becomes `now`; a next review below `floor`
    /// becomes one day after the (possibly fixed) last review. Returns how
    /// many cards changed.
    pub fn repair_legacy_timestamps(&mut self, now: Timestamp, floor: Timestamp) -> Result<usize> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE last_review_at < ?1 OR next_review_at < ?1"
        ))?;
        let stale = stmt
            .query_map(params![floor], card_from_row)?
            .collect::<rusqlite::Result<Vec<Card>>>()?;
        drop(stmt);

        for card in &stale {
            let last = card.last_review_at.map(|last| if last < floor { now } else { last });
            let next = match card.next_review_at {
                NextReview::At(next) if next < floor => {
                    Some(last.unwrap_or(now).saturating_add(SECONDS_PER_DAY))
                }
                other => other.timestamp(),
            };
            self.conn.execute(
                "UPDATE cards SET last_review_at = ?1, next_review_at = ?2 WHERE id = ?3",
                params![last, next, card.id.0],
            )?;
            debug!("Repaired timestamps of card {}: last={last:?} next={next:?}", card.id);
        }

        if !stale.is_empty() {
            info!("Timestamps fixed in {} cards", stale.len());
        }
        Ok(stale.len())
    }
}

/// Creates the decks and cards tables if missing.
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS decks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL DEFAULT '#FFFFFF'
        )",
        (),
    )?;

    // Same front twice in one deck is ignored on insert
    conn.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_id INTEGER NOT NULL,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            last_review_at INTEGER,
            next_review_at INTEGER,
            FOREIGN KEY (deck_id) REFERENCES decks(id) ON DELETE CASCADE,
            UNIQUE(deck_id, front)
        )",
        (),
    )?;

    Ok(())
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: CardId(row.get(0)?),
        deck_id: DeckId(row.get(1)?),
        front: row.get(2)?,
        back: row.get(3)?,
        last_review_at: row.get(4)?,
        next_review_at: NextReview::from(row.get::<_, Option<i64>>(5)?),
    })
}

impl CardStore for SqliteStore {
    fn add_deck(&mut self, name: &str, color: Option<&str>) -> Result<DeckId> {
        let name = validate_name(name)?;
        let taken: Option<i64> = self
            .conn
            .query_row("SELECT id FROM decks WHERE name = ?1", params![name], |row| row.get(0))
            .optional()?;
        if taken.is_some() {
            return Err(FlashcardError::InvalidDeck(format!("deck '{name}' already exists")));
        }

        self.conn.execute(
            "INSERT INTO decks (name, color) VALUES (?1, ?2)",
            params![name, color.unwrap_or(DEFAULT_COLOR)],
        )?;
        let id = DeckId(self.conn.last_insert_rowid());
        info!("Deck '{name}' created with id {id}");
        Ok(id)
    }

    fn add_card(&mut self, deck_id: DeckId, front: &str, back: &str) -> Result<CardId> {
        let front = validate_text("front", front)?;
        let back = validate_text("back", back)?;
        if !self.deck_exists(deck_id)? {
            return Err(FlashcardError::DeckNotFound(deck_id));
        }

        self.conn.execute(
            "INSERT OR IGNORE INTO cards (deck_id, front, back) VALUES (?1, ?2, ?3)",
            params![deck_id.0, front, back],
        )?;

        let id: i64 = self.conn.query_row(
            "SELECT id FROM cards WHERE deck_id = ?1 AND front = ?2",
            params![deck_id.0, front],
            |row| row.get(0),
        )?;
        Ok(CardId(id))
    }

    fn get_deck(&self, id: DeckId) -> Result<Deck> {
        let deck = self
            .conn
            .query_row(
                "SELECT id, name, color FROM decks WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(Deck {
                        id: DeckId(row.get(0)?),
                        name: row.get(1)?,
                        color: row.get(2)?,
                        card_ids: Vec::new(),
                    })
                },
            )
            .optional()?;
        let mut deck = deck.ok_or(FlashcardError::DeckNotFound(id))?;

        let mut stmt = self
            .conn
            .prepare("SELECT id FROM cards WHERE deck_id = ?1 ORDER BY id")?;
        deck.card_ids = stmt
            .query_map(params![id.0], |row| Ok(CardId(row.get(0)?)))?
            .collect::<rusqlite::Result<Vec<CardId>>>()?;

        Ok(deck)
    }

    fn decks(&self) -> Result<Vec<Deck>> {
        let mut stmt = self.conn.prepare("SELECT id FROM decks ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| Ok(DeckId(row.get(0)?)))?
            .collect::<rusqlite::Result<Vec<DeckId>>>()?;

        ids.into_iter().map(|id| self.get_deck(id)).collect()
    }

    fn get_card(&self, id: CardId) -> Result<Card> {
        self.conn
            .query_row(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
                params![id.0],
                card_from_row,
            )
            .optional()?
            .ok_or(FlashcardError::CardNotFound(id))
    }

    fn cards_in_deck(&self, deck_id: DeckId) -> Result<Vec<Card>> {
        if !self.deck_exists(deck_id)? {
            return Err(FlashcardError::DeckNotFound(deck_id));
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE deck_id = ?1 ORDER BY id"
        ))?;
        let cards = stmt
            .query_map(params![deck_id.0], card_from_row)?
            .collect::<rusqlite::Result<Vec<Card>>>()?;
        Ok(cards)
    }

    fn put_review_times(&mut self, id: CardId, times: ReviewTimes) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET last_review_at = ?1, next_review_at = ?2 WHERE id = ?3",
            params![times.last_review_at, times.next_review_at, id.0],
        )?;
        if changed == 0 {
            return Err(FlashcardError::CardNotFound(id));
        }
        Ok(())
    }

    fn reset_card(&mut self, id: CardId) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET last_review_at = NULL, next_review_at = NULL WHERE id = ?1",
            params![id.0],
        )?;
        if changed == 0 {
            return Err(FlashcardError::CardNotFound(id));
        }
        Ok(())
    }
}
