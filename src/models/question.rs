//! Question data structures
//!
//! Questions are loaded once at startup, either from the bundled
//! `questions.json` or from a file given on the command line, and are
//! never mutated for the life of the process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Bundled question set
const BUNDLED_QUESTIONS: &str = include_str!("../questions.json");

/// A single quiz card
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub category: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("Failed to read questions from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid question data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Question set is empty")]
    Empty,
    #[error("Duplicate question id {0}")]
    DuplicateId(u32),
}

/// Ordered, immutable sequence of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set, rejecting empty sets and duplicate ids
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::Empty);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(QuestionError::DuplicateId(q.id));
            }
        }
        Ok(Self { questions })
    }

    /// Parse a JSON array of `{id, category, text}` records
    pub fn from_json(content: &str) -> Result<Self, QuestionError> {
        let questions: Vec<Question> = serde_json::from_str(content)?;
        Self::new(questions)
    }

    /// The question set compiled into the binary
    pub fn bundled() -> Result<Self, QuestionError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    /// Load questions from a JSON file
    pub fn load(path: &Path) -> Result<Self, QuestionError> {
        let content = std::fs::read_to_string(path).map_err(|source| QuestionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
