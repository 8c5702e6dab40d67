mod cli;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use flashcard_review::clock::{Clock, ManualClock, SystemClock};
use flashcard_review::config::Config;
use flashcard_review::database::{CardStore, SqliteStore};
use flashcard_review::export::{DeckExport, export_json_to_path, import_json};
use flashcard_review::format::{format_time_remaining, format_timestamp};
use flashcard_review::models::selection::{StudyMode, review_order};
use flashcard_review::models::study_metrics::time_to_next_review;
use flashcard_review::models::{CardId, DeckId, ReviewSession};
use flashcard_review::study::{answer_card, deck_overviews};
use log::{LevelFilter, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use cli::{Cli, Commands};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashcards")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("flashcards.log");
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Pipe(target));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn seed_sample_data(store: &mut SqliteStore) -> Result<()> {
    if !store.decks()?.is_empty() {
        return Ok(());
    }

    let deck_id = store.add_deck("Polish Vocabulary", None)?;
    store.add_card(deck_id, "cześć", "hello")?;
    store.add_card(deck_id, "dziękuję", "thank you")?;
    store.add_card(deck_id, "proszę", "please")?;

    println!("Sample data created!");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut store = SqliteStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;
    seed_sample_data(&mut store)?;

    let clock: Box<dyn Clock> = match cli.now {
        Some(now) => Box::new(ManualClock::new(now)),
        None => Box::new(SystemClock),
    };

    match cli.command.unwrap_or(Commands::Decks { json: false }) {
        Commands::Decks { json } => list_decks(&store, clock.as_ref(), json),
        Commands::AddDeck { name, color } => {
            let id = store.add_deck(&name, color.as_deref())?;
            println!("{} deck '{}' with id {}", "Created".green(), name.trim(), id);
            Ok(())
        }
        Commands::AddCard { deck_id, front, back } => {
            let id = store.add_card(DeckId(deck_id), &front, &back)?;
            println!("{} card {}", "Added".green(), id);
            Ok(())
        }
        Commands::Cards { deck_id } => list_cards(&store, DeckId(deck_id), clock.as_ref()),
        Commands::Answer { card_id, outcome } => {
            let now = clock.now();
            let times = answer_card(
                &mut store,
                &config.scheduling,
                CardId(card_id),
                outcome.was_correct(),
                now,
            )?;
            println!(
                "Card {}: {}",
                card_id,
                format_time_remaining(times.next_review_at.saturating_sub(now))
            );
            Ok(())
        }
        Commands::Reset { card_id } => {
            store.reset_card(CardId(card_id))?;
            println!("Card {card_id} will be studied as new");
            Ok(())
        }
        Commands::Study {
            deck_id,
            mode,
            percent,
        } => study(
            &mut store,
            &config,
            DeckId(deck_id),
            mode.study_mode(percent),
            clock.as_ref(),
        ),
        Commands::Repair => {
            let fixed = store.repair_legacy_timestamps(clock.now(), config.legacy_timestamp_floor)?;
            println!("Timestamps fixed in {fixed} cards.");
            Ok(())
        }
        Commands::Export { deck_id, path } => {
            let deck = DeckExport::from_store(&store, DeckId(deck_id))?;
            export_json_to_path(&deck, &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("Deck '{}' exported successfully!", deck.name);
            Ok(())
        }
        Commands::Import { path } => import_deck(&mut store, &path),
    }
}

fn list_decks(store: &SqliteStore, clock: &dyn Clock, json: bool) -> Result<()> {
    let now = clock.now();
    let overviews = deck_overviews(store, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&overviews)?);
        return Ok(());
    }

    println!("{}", format!("Decks ({})", overviews.len()).bold());
    for overview in &overviews {
        let status = overview.status(now);
        let status = if overview.metrics.has_due() {
            status.red()
        } else {
            status.normal()
        };
        println!(
            "{:>4}. {} ({} cards, {} reviewed) - {}",
            overview.deck.id,
            overview.deck.name,
            overview.metrics.total(),
            overview.cards_reviewed(),
            status
        );
    }
    Ok(())
}

fn list_cards(store: &SqliteStore, deck_id: DeckId, clock: &dyn Clock) -> Result<()> {
    let now = clock.now();
    let deck = store.get_deck(deck_id)?;
    let cards = store.cards_in_deck(deck_id)?;

    println!("{}", format!("{} ({} cards)", deck.name, cards.len()).bold());
    if let Some(remaining) = time_to_next_review(&cards, now) {
        println!("Soonest review: {}", format_time_remaining(remaining));
    }
    for card in review_order(&cards, now) {
        let last = card
            .last_review_at
            .map(format_timestamp)
            .unwrap_or_else(|| "never".to_string());
        let next = if card.is_due(now) {
            "due".red()
        } else {
            format_time_remaining(card.next_review_at.due_at(now).saturating_sub(now)).normal()
        };
        println!("{:>4}. {} | last review: {} | {}", card.id, card.front, last, next);
    }
    Ok(())
}

fn study(
    store: &mut SqliteStore,
    config: &Config,
    deck_id: DeckId,
    mode: StudyMode,
    clock: &dyn Clock,
) -> Result<()> {
    let deck = store.get_deck(deck_id)?;
    let cards = store.cards_in_deck(deck_id)?;
    let mut session = ReviewSession::for_mode(deck_id, &cards, mode, clock.now());

    if session.is_completed() {
        println!("No cards in '{}' to review in this mode.", deck.name);
        return Ok(());
    }

    println!("{}", format!("Learning: {}", deck.name).bold());
    let mut lines = io::stdin().lock().lines();

    while let Some(card) = session.current_card() {
        let front = card.front.clone();
        let back = card.back.clone();

        println!();
        println!("{}", session.phase_message().cyan());
        println!(
            "Progress: {} / {} learned ({} remaining)",
            session.learned_count(),
            session.total_count(),
            session.remaining_count()
        );
        println!("{} {}", "Front:".bold(), front);
        if prompt(&mut lines, "Press Enter to show the back")?.is_none() {
            break;
        }
        session.toggle_back();
        println!("{} {}", "Back:".bold(), back);

        let was_correct = loop {
            match prompt(&mut lines, "Did you know it? [y/n/q]")?.as_deref() {
                Some("y") => break Some(true),
                Some("n") => break Some(false),
                Some("q") | None => break None,
                Some(_) => continue,
            }
        };
        let Some(was_correct) = was_correct else {
            break;
        };

        session.answer(store, &config.scheduling, was_correct, clock.now())?;
    }

    if session.is_completed() {
        println!("{}", "Congratulations! Every card was answered correctly.".green());
    }
    Ok(())
}

/// Prints a prompt and reads one trimmed, lowercased line. `None` on end of input.
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Result<Option<String>> {
    print!("{message} ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_lowercase())),
        None => Ok(None),
    }
}

fn import_deck(store: &mut SqliteStore, path: &Path) -> Result<()> {
    let deck = import_json(path).with_context(|| {
        format!(
            "Import failed for {}. Expected structure:\n{{\n  \"name\": \"Deck Name\",\n  \"cards\": [...]\n}}",
            path.display()
        )
    })?;

    let deck_id = deck.import_into(store)?;
    println!(
        "Deck '{}' imported successfully with {} cards (id {}).",
        deck.name,
        deck.cards.len(),
        deck_id
    );
    Ok(())
}
