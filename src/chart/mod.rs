//! Chord chart extraction from a raw page.
//!
//! This module provides:
//! - title/artist parsing from the `<title>` tag
//! - chord/lyric body cleanup
//! - HTML entity decoding shared by both

pub mod body;
pub mod entities;
pub mod text;
pub mod title;

use crate::config::FormatConfig;
use crate::error::GrabError;

pub use body::extract_body;
pub use title::extract_title_artist;

/// Markers written around chord names in the cleaned body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emphasis {
    pub open: String,
    pub close: String,
}

impl Emphasis {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

impl From<&FormatConfig> for Emphasis {
    fn from(cfg: &FormatConfig) -> Self {
        Self::new(&cfg.emphasis_open, &cfg.emphasis_close)
    }
}

/// A fully extracted chart, title and artist already title-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongChart {
    pub title: String,
    pub artist: String,
    pub body: String,
}

impl SongChart {
    pub fn from_page(page: &str, emphasis: &Emphasis) -> Result<Self, GrabError> {
        let found = extract_title_artist(page);
        let (Some(song), Some(artist)) = (found.song, found.artist) else {
            return Err(GrabError::MissingTitle);
        };
        let title = text::title_case(&song);
        let artist = text::title_case(&artist);
        tracing::debug!(%title, %artist, "parsed page title");

        let body = extract_body(page, emphasis).ok_or(GrabError::MissingBody)?;
        tracing::debug!(lines = body.lines().count(), "extracted chart body");

        Ok(Self {
            title,
            artist,
            body,
        })
    }
}
