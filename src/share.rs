//! Sharing the match result.
//!
//! The terminal has no share sheet, so the default sink saves the share
//! text to the user's data directory. Failures are reported back to the
//! caller as a message and never touch the quiz session.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::CityMatch;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("No data directory available")]
    NoDataDir,
    #[error("Unable to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Destination for the share text
pub trait ShareSink {
    /// Deliver the text, returning a message for the user on success
    fn share(&self, text: &str) -> Result<String, ShareError>;
}

/// Writes the share text to a file
pub struct FileShare {
    path: Option<PathBuf>,
}

impl FileShare {
    #[cfg(test)]
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// `<data dir>/where-to-move/match.txt`
    pub fn in_data_dir() -> Self {
        Self {
            path: dirs::data_local_dir().map(|dir| dir.join("where-to-move").join("match.txt")),
        }
    }
}

impl ShareSink for FileShare {
    fn share(&self, text: &str) -> Result<String, ShareError> {
        let path = self.path.as_ref().ok_or(ShareError::NoDataDir)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ShareError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| ShareError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(format!("Result saved to {}", path.display()))
    }
}

/// Share a match and turn the outcome into a status line
pub fn share_match(sink: &dyn ShareSink, city_match: &CityMatch) -> String {
    match sink.share(&city_match.share_text()) {
        Ok(message) => {
            tracing::info!(city = %city_match.city, "match shared");
            message
        }
        Err(err) => {
            tracing::warn!(%err, "share failed");
            format!("Unable to share result: {}", err)
        }
    }
}
