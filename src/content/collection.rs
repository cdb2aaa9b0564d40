use chrono::NaiveDate;
use log::debug;
use std::path::Path;

use crate::content::parser::parse_question_file;
use crate::content::ContentError;
use crate::models::Question;

/// The daily-question collection loaded from a directory of `.md` files.
#[derive(Debug, Clone, Default)]
pub struct QuestionCollection {
    questions: Vec<Question>,
}

impl QuestionCollection {
    #[cfg(test)]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Load every `.md` file in `dir`. Any invalid file fails the whole load.
    /// Drafts are left out unless `include_drafts` is set.
    pub fn load_dir(dir: &Path, include_drafts: bool) -> Result<Self, ContentError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| ContentError::from(e).in_file(dir))? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut questions = Vec::with_capacity(paths.len());
        for path in &paths {
            let q = parse_question_file(path)?;
            if q.meta.draft && !include_drafts {
                debug!("Skipping draft {}", path.display());
                continue;
            }
            questions.push(q);
        }
        debug!("Loaded {} questions from {}", questions.len(), dir.display());
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question dated `date`, or else the most recent one dated before it.
    pub fn daily_question(&self, date: NaiveDate) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| q.meta.date == date)
            .or_else(|| {
                self.questions
                    .iter()
                    .filter(|q| q.meta.date <= date)
                    .max_by_key(|q| q.meta.date)
            })
    }

    /// All question dates, most recent first
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.questions.iter().map(|q| q.meta.date).collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates
    }
}
