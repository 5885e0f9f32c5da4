//! High score persistence
//!
//! A single `{"high_score": n}` record. Storage failures never reach
//! gameplay: reads fall back to zero and writes are skipped, both logged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The persisted record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Load/save interface for the high score
pub trait HighScoreStore {
    fn load(&self) -> Result<u64>;
    fn save(&mut self, high_score: u64) -> Result<()>;
}

/// Read the stored high score, treating any failure as zero
pub fn load_or_default(store: &dyn HighScoreStore) -> u64 {
    match store.load() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Could not load high score, starting from 0: {:#}", e);
            0
        }
    }
}

/// Persist a high score, logging instead of failing
pub fn save_best_effort(store: &mut dyn HighScoreStore, high_score: u64) -> bool {
    match store.save(high_score) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not save high score {}: {:#}", high_score, e);
            false
        }
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u64> {
        if !self.path.exists() {
            log::info!("No high score file at {}, starting fresh", self.path.display());
            return Ok(0);
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        log::info!("Loaded high score {}", record.high_score);
        Ok(record.high_score)
    }

    fn save(&mut self, high_score: u64) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string(&HighScoreRecord { high_score })?;
        // Write beside the target, then swap in
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        log::info!("High score {} saved", high_score);
        Ok(())
    }
}

/// In-memory store for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub high_score: u64,
    /// Number of successful saves
    pub saves: u32,
    /// Simulate an unwritable backend
    pub fail_writes: bool,
}

impl MemoryHighScoreStore {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u64> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u64) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("store is read-only");
        }
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}
