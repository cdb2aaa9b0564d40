pub mod engine;
pub mod stats;
pub mod tracker;

pub use engine::{recompute_streak, recompute_streak_at};
pub use stats::aggregate_stats;
pub use tracker::{AnswerOutcome, ProgressTracker};
