use log::error;
use pulldown_cmark::{html, Event, Options, Parser};
use serde::Serialize;
use std::path::Path;

use crate::content::{ContentError, QuestionCollection};
use crate::models::Difficulty;
use crate::utils::date::format_date_key;

const EXPORT_ERROR_BODY: &str = r#"{"error":"Failed to generate questions data"}"#;
const CACHE_ONE_HOUR: &str = "public, max-age=3600";

/// One entry of the questions export. `content` is the explanation as HTML.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedQuestion {
    pub id: String,
    pub slug: String,
    pub date: String,
    pub title: String,
    pub question: String,
    pub choices: Vec<String>,
    pub correct: u8,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
    pub body: String,
}

impl EndpointResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Render an explanation body to HTML. Raw HTML in the source is emitted as
/// escaped text, never as markup.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Serialize the collection as a pretty JSON array, newest question first.
pub fn export_questions(collection: &QuestionCollection) -> Result<String, ContentError> {
    let mut entries: Vec<ExportedQuestion> = collection
        .questions()
        .iter()
        .map(|q| ExportedQuestion {
            id: q.id.clone(),
            slug: q.slug.clone(),
            date: format_date_key(q.meta.date),
            title: q.meta.title.clone(),
            question: q.meta.question.clone(),
            choices: q.meta.choices.clone(),
            correct: q.meta.correct,
            difficulty: q.meta.difficulty,
            tags: q.meta.tags.clone(),
            content: render_markdown(&q.body),
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Build the questions export the way it is served: JSON with a one hour
/// cache on success, a fixed error body with status 500 on any failure.
pub fn questions_endpoint(dir: &Path, include_drafts: bool) -> EndpointResponse {
    let result = QuestionCollection::load_dir(dir, include_drafts)
        .and_then(|collection| export_questions(&collection));
    match result {
        Ok(body) => EndpointResponse {
            status: 200,
            content_type: "application/json",
            cache_control: Some(CACHE_ONE_HOUR),
            body,
        },
        Err(e) => {
            error!("Error generating questions JSON: {}", e);
            EndpointResponse {
                status: 500,
                content_type: "application/json",
                cache_control: None,
                body: EXPORT_ERROR_BODY.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn question_file(date: &str, title: &str, body: &str) -> String {
        format!(
            "---\ntitle: {title}\nquestion: Pick one\ndate: {date}\nchoices: [a, b, c, d]\ncorrect: 0\ntags: [rust, traits]\n---\n\n{body}\n"
        )
    }

    #[test]
    fn test_render_markdown() {
        assert_eq!(render_markdown("**bold**"), "<p><strong>bold</strong></p>\n");
        assert!(render_markdown("| a |\n|---|\n| 1 |").contains("<table>"));
        assert_eq!(render_markdown(""), "");
    }

    #[test]
    fn test_render_markdown_escapes_raw_html() {
        let source = "Hi <script>alert(1)</script>\n\n<div onclick=\"x()\">a</div>";
        let out = render_markdown(source);
        assert!(out.contains("&lt;script&gt;alert(1)&lt;/script&gt;"), "{out}");
        assert!(out.contains("&lt;div onclick="), "{out}");
        assert!(!out.contains("<script>"), "{out}");
        assert!(!out.contains("<div"), "{out}");
    }

    #[test]
    fn test_endpoint_success_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("older.md"),
            question_file("2024-01-01", "Older", "Use `impl Trait`."),
        )
        .unwrap();
        fs::write(
            dir.path().join("newer.md"),
            question_file("2024-02-01", "Newer", "# Why\n\nBecause."),
        )
        .unwrap();

        let resp = questions_endpoint(dir.path(), false);
        assert!(resp.is_success());
        assert_eq!(resp.content_type, "application/json");
        assert_eq!(resp.cache_control, Some("public, max-age=3600"));

        let json: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Newer");
        assert_eq!(items[0]["slug"], "newer");
        assert_eq!(items[0]["difficulty"], "medium");
        assert_eq!(items[0]["content"], "<h1>Why</h1>\n<p>Because.</p>\n");
        assert_eq!(items[1]["date"], "2024-01-01");
        assert_eq!(items[1]["tags"][1], "traits");
        assert_eq!(items[1]["content"], "<p>Use <code>impl Trait</code>.</p>\n");
    }

    #[test]
    fn test_endpoint_failure_body() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.md"), "---\ntitle: x\n---\n").unwrap();
        let resp = questions_endpoint(dir.path(), false);
        assert_eq!(resp.status, 500);
        assert_eq!(resp.content_type, "application/json");
        assert_eq!(resp.cache_control, None);
        assert_eq!(resp.body, r#"{"error":"Failed to generate questions data"}"#);
    }

    #[test]
    fn test_empty_collection_exports_empty_array() {
        let body = export_questions(&QuestionCollection::default()).unwrap();
        assert_eq!(body, "[]");
    }
}
