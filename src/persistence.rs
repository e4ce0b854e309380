//! Save/resume persistence.
//!
//! One JSON file per grid shape, named `{rows}_{cols}.json`, inside a caller
//! supplied directory. The record keeps parallel index-aligned arrays for the
//! spawned card order, so reload reproduces the exact grid layout.
//!
//! Missing or unreadable files are treated identically to "no save exists";
//! only writing can fail loudly (storage unavailable, permissions).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SaveError;
use crate::types::CardId;

/// Serialized snapshot of a round, keyed by grid shape.
///
/// Field names are part of the on-disk format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub rows: u32,
    pub cols: u32,
    pub turns: u32,
    pub matches: u32,
    pub streak: u32,
    pub score: u32,
    #[serde(rename = "gameTimer")]
    pub game_timer: f32,
    #[serde(rename = "cardID")]
    pub card_id: Vec<CardId>,
    #[serde(rename = "cardMatched")]
    pub card_matched: Vec<bool>,
    #[serde(rename = "isFlipped")]
    pub is_flipped: Vec<bool>,
}

impl SaveRecord {
    /// Index-aligned arrays must all cover the full grid. Grid dimensions
    /// come straight from disk, so the product must not be trusted either.
    pub fn is_consistent(&self) -> bool {
        let Some(cells) = self.rows.checked_mul(self.cols) else {
            return false;
        };
        let cells = cells as usize;
        self.card_id.len() == cells
            && self.card_matched.len() == cells
            && self.is_flipped.len() == cells
    }
}

/// File-backed store with at most one record per grid shape.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the save files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, rows: u32, cols: u32) -> PathBuf {
        self.dir.join(format!("{}_{}.json", rows, cols))
    }

    /// Persist the record, replacing any existing save for the same shape.
    pub fn save(&self, record: &SaveRecord) -> Result<(), SaveError> {
        let json = serde_json::to_string(record)?;
        let path = self.path_for(record.rows, record.cols);
        write_atomic(&path, &json)?;
        debug!(path = %path.display(), "save record written");
        Ok(())
    }

    /// Load the record for a grid shape, if a readable one exists.
    pub fn load(&self, rows: u32, cols: u32) -> Option<SaveRecord> {
        let path = self.path_for(rows, cols);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<SaveRecord>(&raw) {
            Ok(record) if record.is_consistent() => Some(record),
            Ok(_) => {
                debug!(path = %path.display(), "save record arrays inconsistent, ignoring");
                None
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "unreadable save record, ignoring");
                None
            }
        }
    }

    pub fn exists(&self, rows: u32, cols: u32) -> bool {
        self.load(rows, cols).is_some()
    }

    /// Delete the save for a grid shape. Removing a non-existent save is fine.
    pub fn clear(&self, rows: u32, cols: u32) {
        let _ = fs::remove_file(self.path_for(rows, cols));
    }
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)
}
