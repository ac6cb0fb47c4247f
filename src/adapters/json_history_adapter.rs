//! JSON file history adapter.
//!
//! The history file is a plain JSON array of draw records, the same shape the
//! scraper-side ingestor emits. A missing file is an empty history; a file
//! that exists but does not parse is an error.

use crate::domain::draw::DrawRecord;
use crate::domain::error::FourdError;
use crate::ports::history_port::HistoryPort;
use std::fs;
use std::path::{Path, PathBuf};

pub struct JsonHistoryAdapter {
    path: PathBuf,
}

impl JsonHistoryAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read a draw batch from an arbitrary JSON file. Unlike history loading,
/// a missing incoming file is an error: there is nothing to ingest.
pub fn read_draws(path: &Path) -> Result<Vec<DrawRecord>, FourdError> {
    let content = fs::read_to_string(path).map_err(|e| FourdError::Store {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    serde_json::from_str(&content).map_err(|e| FourdError::Store {
        reason: format!("invalid draw JSON in {}: {}", path.display(), e),
    })
}

impl HistoryPort for JsonHistoryAdapter {
    fn load(&self) -> Result<Vec<DrawRecord>, FourdError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_draws(&self.path)
    }

    fn save(&self, history: &[DrawRecord]) -> Result<(), FourdError> {
        let json = serde_json::to_string_pretty(history).map_err(|e| FourdError::Store {
            reason: format!("failed to encode history: {}", e),
        })?;
        fs::write(&self.path, json).map_err(|e| FourdError::Store {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}
