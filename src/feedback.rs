use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{FeedbackEntry, FeedbackKind, FeedbackLog, ThreadRecord};

/// How the last `load` obtained its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// File existed and parsed
    Loaded,
    /// No file yet
    Missing,
    /// File unreadable or malformed; treated as empty
    Corrupted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackStats {
    pub liked: usize,
    pub disliked: usize,
}

/// JSON file holding approved and rejected threads.
///
/// Single-process, single-operator: every mutation reads the whole file and
/// rewrites it, with no locking. Concurrent writers can lose updates.
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log, degrading to empty on any fault
    pub fn load(&self) -> FeedbackLog {
        let (log, status) = self.load_with_status();
        if let LoadStatus::Corrupted(reason) = status {
            tracing::warn!(
                "Feedback file {} is unusable ({}); treating it as empty",
                self.path.display(),
                reason
            );
        }
        log
    }

    pub fn load_with_status(&self) -> (FeedbackLog, LoadStatus) {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return (FeedbackLog::default(), LoadStatus::Missing);
            }
            Err(e) => {
                return (FeedbackLog::default(), LoadStatus::Corrupted(e.to_string()));
            }
        };

        match serde_json::from_str::<FeedbackLog>(&contents) {
            Ok(log) => (log, LoadStatus::Loaded),
            Err(e) => (FeedbackLog::default(), LoadStatus::Corrupted(e.to_string())),
        }
    }

    /// Overwrite the file with `log`, pretty-printed with non-ASCII kept as is.
    ///
    /// Writes a sibling temp file first and renames it over the target, so a
    /// crash mid-write leaves the previous file intact.
    pub fn save(&self, log: &FeedbackLog) -> Result<()> {
        let json = serde_json::to_string_pretty(log)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(
            "Saved feedback to {} ({} liked, {} disliked)",
            self.path.display(),
            log.liked.len(),
            log.disliked.len()
        );
        Ok(())
    }

    /// Append one thread to the liked or disliked list
    pub fn record(&self, kind: FeedbackKind, thread: ThreadRecord) -> Result<FeedbackEntry> {
        let mut log = self.load();
        let entry = FeedbackEntry::now(thread);
        log.push(kind, entry.clone());
        self.save(&log)?;
        tracing::info!("Recorded {} thread '{}'", kind, entry.thread.title);
        Ok(entry)
    }

    /// Drop all feedback
    pub fn reset(&self) -> Result<()> {
        tracing::info!("Resetting feedback at {}", self.path.display());
        self.save(&FeedbackLog::default())
    }

    pub fn stats(&self) -> FeedbackStats {
        let log = self.load();
        FeedbackStats {
            liked: log.liked.len(),
            disliked: log.disliked.len(),
        }
    }

    /// The full log as the same pretty JSON the file holds
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.load())?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
