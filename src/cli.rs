//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use flashcard_review::models::selection::{
    EASIEST_DEFAULT_PERCENT, MOST_OVERDUE_DEFAULT_PERCENT, StudyMode,
};
use std::path::PathBuf;

/// Flashcards - study decks on a spaced repetition schedule
#[derive(Parser, Debug)]
#[command(name = "flashcards")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this Unix timestamp as the current time
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub now: Option<i64>,

    /// Subcommand to execute, `decks` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List decks with cards due and the next review
    Decks {
        /// Print the deck overviews as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new deck
    AddDeck {
        name: String,

        /// Hex colour, e.g. #FFAA00
        #[arg(long)]
        color: Option<String>,
    },

    /// Add a card to a deck
    AddCard {
        deck_id: i64,
        front: String,
        back: String,
    },

    /// List the cards of a deck in review order
    Cards { deck_id: i64 },

    /// Record an answer for one card
    Answer {
        card_id: i64,

        #[arg(value_enum)]
        outcome: Outcome,
    },

    /// Forget a card's review history
    Reset { card_id: i64 },

    /// Review cards of a deck interactively
    Study {
        deck_id: i64,

        /// Which cards to review
        #[arg(long, value_enum, default_value_t = Mode::Due)]
        mode: Mode,

        /// Share of the deck for `easiest` (default 1) and `overdue` (default 10)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        percent: Option<u32>,
    },

    /// Fix review timestamps left by older versions
    Repair,

    /// Write a deck and its review history to a JSON file
    Export { deck_id: i64, path: PathBuf },

    /// Create a deck from a JSON file
    Import { path: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Correct,
    Wrong,
}

impl Outcome {
    pub fn was_correct(self) -> bool {
        self == Outcome::Correct
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Every card due now
    Due,
    /// Cards with the shortest answers, due or not
    Easiest,
    /// Overdue cards that have waited longest
    Overdue,
}

impl Mode {
    pub fn study_mode(self, percent: Option<u32>) -> StudyMode {
        match self {
            Mode::Due => StudyMode::Due,
            Mode::Easiest => StudyMode::Easiest {
                percent: percent.unwrap_or(EASIEST_DEFAULT_PERCENT),
            },
            Mode::Overdue => StudyMode::MostOverdue {
                percent: percent.unwrap_or(MOST_OVERDUE_DEFAULT_PERCENT),
            },
        }
    }
}
