use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures from the setup paths: settings, terminal and logging.
///
/// Gameplay itself is total and never produces one of these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read settings from {}: {source}", path.display())]
    SettingsRead { path: PathBuf, source: io::Error },

    #[error("failed to parse settings from {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to set up logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
