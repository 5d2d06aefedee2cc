//! HTML character reference decoding.
//!
//! Browser rules: the full HTML5 named table, legacy names without a
//! trailing `;`, and numeric references in 0x80..=0x9F read as Windows-1252.

pub fn unescape(s: &str) -> String {
    htmlize::unescape(s).into_owned()
}
