use super::Config;

pub const STORE_FILE: &str = "songs.json";
pub const EMPHASIS_OPEN: &str = "<strong>";
pub const EMPHASIS_CLOSE: &str = "</strong>";

pub fn user_agent() -> String {
    format!("chordgrab/{}", env!("CARGO_PKG_VERSION"))
}

pub fn defaults() -> Config {
    Config::default()
}
