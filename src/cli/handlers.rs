use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::content::{questions_endpoint, QuestionCollection};
use crate::models::question::{choice_letter, parse_choice};
use crate::models::{Difficulty, Question};
use crate::progress::{recompute_streak, AnswerOutcome, ProgressTracker};
use crate::utils::date::{format_date_key, parse_date_key, today_in_offset};
use crate::utils::format::{format_accuracy, format_days, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TEAL: &str = "\x1b[38;2;86;182;194m";

// ─── Init ────────────────────────────────────────────────────────────────────

pub fn handle_init(config: &AppConfig) -> Result<()> {
    let config_path = AppConfig::config_path()?;
    if config_path.exists() {
        println_colored!(DIM, "  Config already exists at {}", config_path.display());
    } else {
        config.save()?;
        println_colored!(GREEN, "  ✓ Wrote {}", config_path.display());
    }

    AppConfig::ensure_data_dir()?;
    let questions = config.questions_dir()?;
    std::fs::create_dir_all(&questions)
        .with_context(|| format!("Creating {:?}", questions))?;
    println_colored!(GREEN, "  ✓ Questions go in {}", questions.display());
    Ok(())
}

// ─── Today ───────────────────────────────────────────────────────────────────

pub fn handle_today(
    tracker: &ProgressTracker,
    config: &AppConfig,
    date: Option<&str>,
) -> Result<()> {
    let date = resolve_date(date, config)?;
    let collection = load_collection(config)?;

    let Some(question) = collection.daily_question(date) else {
        println_colored!(AMBER, "  No question available for {}", format_date_key(date));
        return Ok(());
    };

    println!();
    println_colored!(TEAL, "  Daily Question · {}", format_date_key(date));
    print_question(question);

    let records = tracker.daily_records();
    match records.get(&format_date_key(date)).filter(|r| r.answered) {
        Some(rec) if rec.correct => {
            println_colored!(
                GREEN,
                "  ✓ Answered {}, correct",
                choice_letter(rec.selected_answer)
            );
        }
        Some(rec) => {
            println_colored!(
                RED,
                "  ✗ Answered {}, incorrect",
                choice_letter(rec.selected_answer)
            );
        }
        None => {
            println_colored!(DIM, "  Answer with `dailyq answer <A-D>`");
        }
    }
    println!();
    Ok(())
}

fn print_question(question: &Question) {
    let meta = &question.meta;
    println!();
    println_colored!(BOLD, "  {}", meta.title);
    println_colored!(
        DIM,
        "  {}  ·  {}",
        meta.difficulty,
        if meta.tags.is_empty() { "-".to_string() } else { meta.tags.join(", ") }
    );
    println!();
    println!("  {}", meta.question);
    println!();
    for (i, choice) in meta.choices.iter().enumerate() {
        println!("    {}. {}", choice_letter(i as u8), choice);
    }
    println!();
}

// ─── Answer ──────────────────────────────────────────────────────────────────

pub fn handle_answer(
    tracker: &mut ProgressTracker,
    config: &AppConfig,
    choice: &str,
    date: Option<&str>,
) -> Result<()> {
    let selected = parse_choice(choice)
        .ok_or_else(|| anyhow!("Unknown choice '{}'. Use A-D or 0-3", choice))?;
    let date = resolve_date(date, config)?;
    let collection = load_collection(config)?;
    let question = collection
        .daily_question(date)
        .ok_or_else(|| anyhow!("No question available for {}", format_date_key(date)))?;

    let correct = question.is_correct(selected);
    let outcome = tracker.save_answer(
        date,
        correct,
        selected,
        question.meta.difficulty,
        Some(question.meta.title.clone()),
    );

    println!();
    if correct {
        println_colored!(GREEN, "  ✓ {} is correct!", choice_letter(selected));
    } else {
        println_colored!(
            RED,
            "  ✗ {} is wrong, the answer is {}",
            choice_letter(selected),
            question.correct_letter()
        );
    }
    if !question.body.is_empty() {
        println!();
        for line in question.body.lines() {
            println_colored!(DIM, "  {}", line);
        }
    }
    println!();
    println_colored!(AMBER, "  {}", streak_message(&outcome));
    if !tracker.store().is_available() {
        println_colored!(DIM, "  (storage disabled, this answer was not saved)");
    }
    println!();
    Ok(())
}

/// One-line summary of how an answer moved the streak.
pub fn streak_message(outcome: &AnswerOutcome) -> String {
    let current = outcome.streak.current;
    if outcome.extended() && outcome.prev_streak > 0 {
        format!(
            "Streak extended: {} → {}",
            format_days(outcome.prev_streak),
            format_days(current)
        )
    } else if outcome.extended() {
        format!("Streak started: {}", format_days(current))
    } else if outcome.broken() {
        format!(
            "Streak reset after {} (best: {})",
            format_days(outcome.prev_streak),
            format_days(outcome.streak.best)
        )
    } else {
        format!("Streak: {}", format_days(current))
    }
}

// ─── Streak ──────────────────────────────────────────────────────────────────

pub fn handle_streak(tracker: &ProgressTracker) -> Result<()> {
    let streak = tracker.streak();

    println!();
    println_colored!(TEAL, "  Streak");
    println!();
    println_colored!(
        BOLD,
        "  {}  {} current  |  {} best",
        progress_bar(streak.current, 30, 12),
        format_days(streak.current),
        format_days(streak.best)
    );
    if let Some(last) = &streak.last_date {
        println_colored!(DIM, "  Run started on {}", last);
    }
    // The stored value is only refreshed on answer, so a missed day shows up here
    let live = recompute_streak(&tracker.daily_records());
    if live.current < streak.current {
        println_colored!(AMBER, "  Run lapsed: answer today to start a new one");
    }
    println!();
    if streak.achievements.is_empty() {
        println_colored!(DIM, "  No badges yet");
    } else {
        println_colored!(GREEN, "  Badges: {}", streak.achievements.join("  "));
    }
    if let Some((badge, left)) = streak.next_badge() {
        println_colored!(DIM, "  {} more for {}", format_days(left), badge);
    }
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(tracker: &ProgressTracker) -> Result<()> {
    let stats = tracker.stats();

    println!();
    println_colored!(TEAL, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Answered:  {}  |  Correct: {}  |  Accuracy: {}",
        stats.total_answered,
        stats.total_correct,
        format_accuracy(stats.accuracy)
    );
    println!();
    for difficulty in Difficulty::all() {
        let d = stats.by_difficulty.get(difficulty);
        println!(
            "  {:<8}  {}  {}/{}",
            difficulty.display_name(),
            progress_bar(d.correct, d.answered, 10),
            d.correct,
            d.answered
        );
    }
    println!();
    Ok(())
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_history(tracker: &ProgressTracker, limit: usize) -> Result<()> {
    let records = tracker.daily_records();

    println!();
    if records.is_empty() {
        println_colored!(DIM, "  No answers yet");
        println!();
        return Ok(());
    }
    println_colored!(TEAL, "  History ({} days answered)", records.len());
    println!();
    for (date, rec) in records.iter().rev().filter(|(_, r)| r.answered).take(limit) {
        let (mark, color) = if rec.correct { ("✓", GREEN) } else { ("✗", RED) };
        println!(
            "  {}{}\x1b[0m  {}  {}  {:<6}  {}",
            color,
            mark,
            date,
            choice_letter(rec.selected_answer),
            rec.difficulty.as_str(),
            rec.title.as_deref().unwrap_or("")
        );
    }
    println!();
    Ok(())
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(tracker: &ProgressTracker, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    if tracker.is_answered(date) {
        println_colored!(GREEN, "  ✓ {} answered", format_date_key(date));
    } else {
        println_colored!(DIM, "  ○ {} not answered", format_date_key(date));
    }
    Ok(())
}

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn handle_dates(config: &AppConfig) -> Result<()> {
    let collection = load_collection(config)?;
    let dates = collection.available_dates();
    println!();
    if dates.is_empty() {
        println_colored!(DIM, "  No questions found in {}", config.questions_dir()?.display());
    } else {
        println_colored!(TEAL, "  {} questions", dates.len());
        println!();
        for date in dates {
            println!("  {}", format_date_key(date));
        }
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(config: &AppConfig, out: Option<PathBuf>) -> Result<()> {
    let dir = config.questions_dir()?;
    let response = questions_endpoint(&dir, config.content.include_drafts);
    log::debug!(
        "Questions export: status {}, {}, {} bytes",
        response.status,
        response.content_type,
        response.body.len()
    );

    match out {
        Some(path) => {
            std::fs::write(&path, &response.body)
                .with_context(|| format!("Writing {:?}", path))?;
            log::info!("Wrote questions export to {:?}", path);
        }
        None => println!("{}", response.body),
    }

    if !response.is_success() {
        return Err(anyhow!(
            "Export failed with status {} (see log for details)",
            response.status
        ));
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_date_key(s.trim()).ok_or_else(|| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", s))
}

/// The given date, or today's date in the content time zone.
fn resolve_date(date: Option<&str>, config: &AppConfig) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(today_in_offset(config.content.timezone_offset)),
    }
}

pub fn load_collection(config: &AppConfig) -> Result<QuestionCollection> {
    let dir = config.questions_dir()?;
    let collection = QuestionCollection::load_dir(&dir, config.content.include_drafts)
        .with_context(|| format!("Loading questions from {:?}", dir))?;
    if collection.is_empty() {
        log::warn!("No questions found in {:?}", dir);
    }
    Ok(collection)
}
