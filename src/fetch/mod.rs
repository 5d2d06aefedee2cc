//! Page fetcher.
//!
//! One GET per run, no retries. The body is decoded as UTF-8 from the raw
//! bytes whatever the server claims the charset is.

use anyhow::Context;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::GrabError;

#[derive(Debug, Clone)]
pub struct PageClient {
    http: reqwest::Client,
}

impl PageClient {
    pub fn new(cfg: &FetchConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&cfg.user_agent);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("build reqwest client")?;
        Ok(Self { http })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String, GrabError> {
        tracing::info!("fetching {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GrabError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GrabError::fetch(url, format!("http status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GrabError::fetch(url, format!("read body: {e}")))?;
        if bytes.is_empty() {
            return Err(GrabError::fetch(url, "empty response body"));
        }

        tracing::debug!(bytes = bytes.len(), "fetched page");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
