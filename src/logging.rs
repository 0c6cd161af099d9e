//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs go to a file under the cache
//! directory. Filtering follows `WHERE_TO_MOVE_LOG` (default `info`).

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WHERE_TO_MOVE_LOG";

/// `<cache dir>/where-to-move/where-to-move.log`
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("where-to-move").join("where-to-move.log"))
}

/// Install the file subscriber. Returns the log path, or `None` if logging
/// could not be set up; the app runs either way.
pub fn init_logging() -> Option<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
