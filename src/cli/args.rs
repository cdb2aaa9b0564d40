use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dailyq", version, author, about = "A terminal companion for the daily question")]
pub struct Cli {
    /// Run without persistent storage: nothing is read or saved
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default config and create the data directories
    Init,
    /// Show the question of the day
    Today {
        /// Show the question for this date (YYYY-MM-DD) instead
        #[arg(long)]
        date: Option<String>,
    },
    /// Answer the question of the day
    Answer {
        /// Choice letter (A-D) or index (0-3)
        choice: String,
        /// Answer the question for this date (YYYY-MM-DD) instead
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the current and best streak and unlocked badges
    Streak,
    /// Show answer totals and accuracy by difficulty
    Stats,
    /// List answered days, newest first
    History {
        /// Show at most this many days
        #[arg(long, default_value = "14")]
        limit: usize,
    },
    /// Check whether a date has been answered
    Status {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// List the dates that have a question
    Dates,
    /// Export all questions as JSON with rendered explanations
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
