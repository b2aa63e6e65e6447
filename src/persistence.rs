//! High-score persistence.
//!
//! The file holds nothing but the decimal score, e.g. `42`.

use std::io;
use std::path::{Path, PathBuf};

/// File name used under `$HOME` when no explicit path is configured.
pub const DEFAULT_FILE_NAME: &str = ".catch_the_object_score";

/// Default location: `$HOME/.catch_the_object_score`, or the working
/// directory when `HOME` is unset.
pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DEFAULT_FILE_NAME)
}

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score.  A missing or unparsable file counts as 0.
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => match s.trim().parse() {
                Ok(score) => {
                    log::info!("Loaded high score {} from {}", score, self.path.display());
                    score
                }
                Err(_) => {
                    log::warn!(
                        "High score file {} is corrupt, starting from 0",
                        self.path.display()
                    );
                    0
                }
            },
            Err(_) => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                0
            }
        }
    }

    /// Overwrite the file with `score`.
    pub fn save(&self, score: u32) -> io::Result<()> {
        std::fs::write(&self.path, score.to_string())?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}
