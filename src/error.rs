use thiserror::Error;

/// Reasons a grab stops before the store is touched.
///
/// The `Display` text is what gets printed to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrabError {
    #[error("Failed to fetch URL content.")]
    Fetch { url: String, reason: String },

    #[error("Missing title or artist in HTML content.")]
    MissingTitle,

    #[error("Failed to extract tab section from content.")]
    MissingBody,
}

impl GrabError {
    pub fn fetch(url: &str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
