//! Question file parser
//!
//! A question file is markdown with YAML frontmatter:
//! ```markdown
//! ---
//! title: Moves and copies
//! question: Which of these types is `Copy`?
//! date: 2024-01-03
//! choices: ["String", "Vec<u8>", "u32", "Box<u32>"]
//! correct: 2
//! difficulty: easy
//! tags: [ownership]
//! ---
//!
//! Integers are plain bits, so they are `Copy`.
//! ```
//! The body is the answer explanation.

use std::path::Path;

use crate::content::ContentError;
use crate::models::question::{QuestionMeta, CHOICE_LETTERS};
use crate::models::Question;

/// Parse a question file from a path. The file stem becomes the id and slug.
pub fn parse_question_file(path: &Path) -> Result<Question, ContentError> {
    let content = std::fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    parse_question_content(&stem, &content).map_err(|e| e.in_file(path))
}

/// Parse question content from a string
pub fn parse_question_content(id: &str, content: &str) -> Result<Question, ContentError> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let meta: QuestionMeta = serde_yaml::from_str(&frontmatter)?;
    validate(&meta)?;

    Ok(Question {
        id: id.to_string(),
        slug: slugify(id),
        meta,
        body: body.trim().to_string(),
    })
}

fn validate(meta: &QuestionMeta) -> Result<(), ContentError> {
    if meta.choices.len() != CHOICE_LETTERS.len() {
        return Err(ContentError::Invalid(format!(
            "expected {} choices, found {}",
            CHOICE_LETTERS.len(),
            meta.choices.len()
        )));
    }
    if meta.correct as usize >= CHOICE_LETTERS.len() {
        return Err(ContentError::Invalid(format!(
            "correct must be between 0 and 3, found {}",
            meta.correct
        )));
    }
    Ok(())
}

fn slugify(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Split content into YAML frontmatter and Markdown body
fn split_frontmatter(content: &str) -> Result<(String, String), ContentError> {
    let content = content.trim_start_matches('\u{feff}').trim();

    if !content.starts_with("---") {
        return Err(ContentError::Format(
            "question file must start with YAML frontmatter (---)".to_string(),
        ));
    }

    let after_first = &content[3..];
    match after_first.find("\n---") {
        Some(pos) => {
            let frontmatter = after_first[..pos].trim().to_string();
            let body = after_first[pos + 4..].to_string();
            Ok((frontmatter, body))
        }
        None => Err(ContentError::Format(
            "missing closing --- for YAML frontmatter".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    const SAMPLE: &str = r#"---
title: Moves and copies
question: Which of these types is `Copy`?
date: 2024-01-03
choices: ["String", "Vec<u8>", "u32", "Box<u32>"]
correct: 2
---

Integers are plain bits, so they are **Copy**.
"#;

    #[test]
    fn test_parse_sample_with_defaults() {
        let q = parse_question_content("Moves And Copies", SAMPLE).unwrap();
        assert_eq!(q.id, "Moves And Copies");
        assert_eq!(q.slug, "moves-and-copies");
        assert_eq!(q.meta.title, "Moves and copies");
        assert_eq!(q.meta.date.to_string(), "2024-01-03");
        assert_eq!(q.meta.correct, 2);
        assert_eq!(q.meta.difficulty, Difficulty::Medium);
        assert!(q.meta.tags.is_empty());
        assert!(!q.meta.draft);
        assert_eq!(q.body, "Integers are plain bits, so they are **Copy**.");
        assert!(q.is_correct(2));
        assert_eq!(q.correct_letter(), 'C');
    }

    #[test]
    fn test_empty_title_accepted() {
        let content = SAMPLE.replace("title: Moves and copies", "title: \"\"");
        let q = parse_question_content("q", &content).unwrap();
        assert_eq!(q.meta.title, "");
    }

    #[test]
    fn test_three_choices_rejected() {
        let content = SAMPLE.replace(r#", "Box<u32>""#, "");
        let err = parse_question_content("q", &content).unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)), "{err}");
    }

    #[test]
    fn test_correct_out_of_range_rejected() {
        let content = SAMPLE.replace("correct: 2", "correct: 4");
        assert!(matches!(
            parse_question_content("q", &content),
            Err(ContentError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let content = SAMPLE.replace("correct: 2", "correct: 2\ndifficulty: brutal");
        assert!(matches!(
            parse_question_content("q", &content),
            Err(ContentError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_frontmatter() {
        assert!(matches!(
            parse_question_content("q", "# just markdown"),
            Err(ContentError::Format(_))
        ));
        assert!(matches!(
            parse_question_content("q", "---\ntitle: x\n"),
            Err(ContentError::Format(_))
        ));
    }

    #[test]
    fn test_parse_file_names_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.md");
        std::fs::write(&path, SAMPLE.replace("correct: 2", "correct: 9")).unwrap();
        let err = parse_question_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.md"), "{err}");
    }
}
