//! fetch → extract → merge → save, once per run.

use std::fmt;
use std::path::Path;

use crate::chart::{Emphasis, SongChart};
use crate::config::Config;
use crate::error::GrabError;
use crate::fetch::PageClient;
use crate::storage::{MergeOutcome, SongCollection, SongEntry};

/// What happened to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub artist: String,
    pub outcome: MergeOutcome,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            MergeOutcome::Overwrote => write!(
                f,
                "Overwrote existing entry for '{}' by '{}'.",
                self.title, self.artist
            ),
            MergeOutcome::Appended => write!(
                f,
                "Appended new entry for '{}' by '{}'.",
                self.title, self.artist
            ),
        }
    }
}

/// Run the whole pipeline for one URL.
///
/// The outer `Result` carries I/O failures (client setup, store write); the
/// inner one a stage that found nothing to store.
pub async fn run(url: &str, cfg: &Config) -> anyhow::Result<Result<Report, GrabError>> {
    let client = PageClient::new(&cfg.fetch)?;
    let page = match client.fetch_page(url).await {
        Ok(page) => page,
        Err(e) => {
            if let GrabError::Fetch { url, reason } = &e {
                tracing::warn!("fetch {url} failed: {reason}");
            }
            return Ok(Err(e));
        }
    };
    record(&page, cfg)
}

/// Extract a chart from `page` and merge it into the configured store.
/// The store file is left alone unless extraction succeeds.
pub fn record(page: &str, cfg: &Config) -> anyhow::Result<Result<Report, GrabError>> {
    let emphasis = Emphasis::from(&cfg.format);
    let chart = match SongChart::from_page(page, &emphasis) {
        Ok(chart) => chart,
        Err(e) => return Ok(Err(e)),
    };
    let report = store_chart(chart, &cfg.store.path)?;
    Ok(Ok(report))
}

fn store_chart(chart: SongChart, path: &Path) -> anyhow::Result<Report> {
    let mut songs = SongCollection::load(path);
    let entry = SongEntry::from(chart);
    let (title, artist) = (entry.title.clone(), entry.artist.clone());

    let outcome = songs.merge(entry);
    songs.save(path)?;
    tracing::info!(?outcome, total = songs.len(), "store updated");

    Ok(Report {
        title,
        artist,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page(title: &str, body: &str) -> String {
        format!("<html><title>{title} @ Chord Site</title><div data=\"{body}&quot;}}\"></div></html>")
    }

    fn config_in(dir: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.store.path = dir.join("songs.json");
        cfg
    }

    #[test]
    fn test_append_then_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());

        let first = record(&page("hey jude chords by the beatles", "[ch]F[/ch] v1"), &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(first.outcome, MergeOutcome::Appended);
        assert_eq!(first.to_string(), "Appended new entry for 'Hey Jude' by 'The Beatles'.");

        record(&page("Let It Be Chords by The Beatles", "[ch]C[/ch]"), &cfg)
            .unwrap()
            .unwrap();

        let again = record(&page("HEY JUDE Chords by THE BEATLES", "[ch]F[/ch] v2"), &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(
            again.to_string(),
            "Overwrote existing entry for 'Hey Jude' by 'The Beatles'."
        );

        let songs = SongCollection::load(&cfg.store.path);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs.entries()[0].body, "<strong>F</strong> v2");
        assert_eq!(songs.entries()[1].title, "Let It Be");
    }

    #[test]
    fn test_failures_leave_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        fs::write(&cfg.store.path, "[]").unwrap();

        let no_body = record(&page("Song Chords by Band", "no chords"), &cfg).unwrap();
        assert_eq!(no_body, Err(GrabError::MissingBody));

        let no_artist = record(&page("Song Chords", "[ch]G[/ch]"), &cfg).unwrap();
        assert_eq!(no_artist, Err(GrabError::MissingTitle));

        assert_eq!(fs::read_to_string(&cfg.store.path).unwrap(), "[]");
    }

    #[test]
    fn test_failure_does_not_create_store() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());

        let res = record("<p>nothing</p>", &cfg).unwrap();
        assert_eq!(res, Err(GrabError::MissingTitle));
        assert!(!cfg.store.path.exists());
    }

    #[test]
    fn test_corrupt_store_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        fs::write(&cfg.store.path, "garbage").unwrap();

        let report = record(&page("Song Chords by Band", "[ch]G[/ch]"), &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(report.outcome, MergeOutcome::Appended);
        assert_eq!(SongCollection::load(&cfg.store.path).len(), 1);
    }

    #[tokio::test]
    async fn test_run_unreachable_url() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());

        let res = run("http://127.0.0.1:1/nothing", &cfg).await.unwrap();
        assert!(matches!(res, Err(GrabError::Fetch { .. })));
        assert!(!cfg.store.path.exists());
    }
}
