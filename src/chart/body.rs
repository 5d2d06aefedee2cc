//! Chord/lyric body extraction.
//!
//! The sheet sits inside an HTML-escaped JSON blob: it opens at the first
//! `[ch]` chord marker and runs until the next `&quot` (the escaped closing
//! quote of the JSON string).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Emphasis, entities};

pub const START_MARKER: &str = "[ch]";
pub const END_MARKER: &str = "&quot";

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

pub fn extract_body(page: &str, emphasis: &Emphasis) -> Option<String> {
    let start = page.find(START_MARKER)?;
    let end = page[start..]
        .find(END_MARKER)
        .map_or(page.len(), |rel| start + rel);

    let section = entities::unescape(&page[start..end]);
    let section = section.replace("\\r\\n", "\n").replace("\r\n", "\n");
    let section = section
        .replace("[tab]", "")
        .replace("[/tab]", "")
        .replace("[ch]", &emphasis.open)
        .replace("[/ch]", &emphasis.close);

    let lines = drop_blanks_after_headers(section.lines().map(str::trim_end));
    let joined = lines.join("\n");
    let cleaned = BLANK_RUN_RE.replace_all(&joined, "\n\n").into_owned();

    if cleaned.trim().is_empty() {
        tracing::debug!("body section was empty after cleanup");
        return None;
    }
    Some(cleaned)
}

/// Section headers like `[Verse]` come with a spurious blank line (or
/// several) after them. Blank lines right after a line ending in `]` go.
fn drop_blanks_after_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut kept = Vec::new();
    let mut after_header = false;

    for line in lines {
        if after_header && line.is_empty() {
            continue;
        }
        after_header = line.ends_with(']');
        kept.push(line);
    }

    kept
}
