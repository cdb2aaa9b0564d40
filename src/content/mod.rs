pub mod collection;
pub mod export;
pub mod parser;

pub use collection::QuestionCollection;
pub use export::questions_endpoint;

use std::path::{Path, PathBuf};

/// Error type for loading the question collection
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read questions: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid question file format: {0}")]
    Format(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Question does not match the schema: {0}")]
    Invalid(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ContentError>,
    },
}

impl ContentError {
    pub fn in_file(self, path: &Path) -> Self {
        ContentError::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}
