use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, info};
use tokio::fs;

use crate::core::normalizer;
use crate::error::watch::{Result, WatchError};
use crate::model::absence_entry::{EntrySet, StoredEntry};

/// Flat JSON file of entries that were already reported.
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EntryStore { path: path.into() }
    }

    /// Reads the stored history.
    ///
    /// A missing file means nothing has been reported yet. Anything else that
    /// keeps the file from being read as a list of entries is fatal.
    pub async fn load_past(&self) -> Result<EntrySet> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No store at {}, starting with an empty history",
                    self.path.display()
                );
                return Ok(EntrySet::new());
            }
            Err(e) => return Err(WatchError::persistence(&self.path, e)),
        };

        let stored: Vec<StoredEntry> = serde_json::from_str(&content)
            .map_err(|e| WatchError::persistence(&self.path, e))?;

        let mut past = EntrySet::with_capacity(stored.len());
        for (index, record) in stored.into_iter().enumerate() {
            let entry = match record {
                StoredEntry::Row(row) => normalizer::normalize(row.as_slice())
                    .map_err(|e| WatchError::persistence(&self.path, format!("entry {}: {}", index, e)))?,
                StoredEntry::Record(entry) => entry,
            };
            past.insert(entry);
        }

        debug!("Loaded {} past entries from {}", past.len(), self.path.display());
        Ok(past)
    }

    /// Replaces the stored history with `entries`.
    ///
    /// Rows are written sorted so the file diffs cleanly between runs. The
    /// new content goes to a sibling file first and is renamed into place.
    pub async fn save(&self, entries: &EntrySet) -> Result<()> {
        let mut rows: Vec<[String; 3]> = entries.iter().map(|e| e.to_row()).collect();
        rows.sort();
        let json = serde_json::to_string_pretty(&rows)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| WatchError::persistence(parent, e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| WatchError::persistence(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| WatchError::persistence(&self.path, e))?;

        info!("Saved {} entries to {}", rows.len(), self.path.display());
        Ok(())
    }
}
