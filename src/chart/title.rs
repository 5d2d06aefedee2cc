//! Song/artist extraction from the page `<title>`.
//!
//! Chord sites title their pages like
//! `Hey Jude Chords by The Beatles @ Some Site`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::entities;

static TITLE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<title>(.*?)</title>").expect("title tag regex"));
static SITE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*@.*$").expect("site suffix regex"));
static CHORDS_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bchords\b").expect("chords word regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+by\s+").expect("by regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleArtist {
    pub song: Option<String>,
    pub artist: Option<String>,
}

pub fn extract_title_artist(page: &str) -> TitleArtist {
    let Some(caps) = TITLE_TAG_RE.captures(page) else {
        return TitleArtist::default();
    };

    let cleaned = clean_title(&entities::unescape(&caps[1]));
    let mut parts = BY_RE.splitn(&cleaned, 2).map(str::trim);

    TitleArtist {
        song: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
        artist: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
    }
}

/// Drop the `@ site` suffix and the word "chords", then squeeze whitespace.
fn clean_title(raw: &str) -> String {
    let s = SITE_SUFFIX_RE.replace(raw, "");
    let s = CHORDS_WORD_RE.replace_all(&s, "");
    WHITESPACE_RE.replace_all(&s, " ").trim().to_string()
}
