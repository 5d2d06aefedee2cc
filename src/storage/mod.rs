use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::chart::SongChart;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    pub body: String,
    /// Any other keys on the record (capo, tags, ...), kept across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SongEntry {
    #[allow(dead_code)]
    pub fn new(title: &str, artist: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            body: body.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    /// Identity check: title and artist, ignoring case.
    pub fn same_song(&self, title: &str, artist: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
            && self.artist.to_lowercase() == artist.to_lowercase()
    }
}

impl From<SongChart> for SongEntry {
    fn from(chart: SongChart) -> Self {
        Self {
            title: chart.title,
            artist: chart.artist,
            body: chart.body,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Overwrote,
    Appended,
}

/// Ordered song entries, unique by case-insensitive (title, artist).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongCollection {
    entries: Vec<SongEntry>,
}

impl SongCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the collection from disk. A missing, unreadable or malformed
    /// file yields an empty collection.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no store at {}, starting empty", path.display());
                return Self::new();
            }
            Err(e) => {
                tracing::warn!("cannot read {}: {e}; starting empty", path.display());
                return Self::new();
            }
        };

        match serde_json::from_str::<Self>(&raw) {
            Ok(songs) => {
                tracing::debug!("loaded {} entries from {}", songs.len(), path.display());
                songs
            }
            Err(e) => {
                tracing::warn!("cannot parse {}: {e}; starting empty", path.display());
                Self::new()
            }
        }
    }

    /// Rewrite the whole file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("serialize songs")?;
        fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
        tracing::debug!("saved {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Replace the matching entry in place, or append a new one.
    pub fn merge(&mut self, entry: SongEntry) -> MergeOutcome {
        match self.position(&entry.title, &entry.artist) {
            Some(i) => {
                self.entries[i] = entry;
                MergeOutcome::Overwrote
            }
            None => {
                self.entries.push(entry);
                MergeOutcome::Appended
            }
        }
    }

    #[allow(dead_code)]
    pub fn find(&self, title: &str, artist: &str) -> Option<&SongEntry> {
        self.position(title, artist).map(|i| &self.entries[i])
    }

    fn position(&self, title: &str, artist: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.same_song(title, artist))
    }

    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
