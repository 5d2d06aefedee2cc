//! Casing helpers for stored titles and artists.

/// Capitalise the first letter of every whitespace-separated word and
/// lower-case the rest of it. Whitespace is kept as-is.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}
