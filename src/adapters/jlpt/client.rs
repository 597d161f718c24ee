//! JLPT vocabulary HTTP client

use super::models::{LevelPayload, VocabEntry};
use crate::config::VocabConfig;
use crate::domain::{JlptLevel, KuraError, Result, VocabError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Per-level vocabulary lookups
#[async_trait]
pub trait VocabService: Send + Sync {
    /// All entries for one level, in service order
    async fn fetch_level(&self, level: JlptLevel) -> Result<Vec<VocabEntry>>;

    /// Base URL used in log lines
    fn base_url(&self) -> &str;
}

/// HTTP implementation of [`VocabService`]
///
/// Issues `GET <base_url>/api/words/all?level=<n>` once per level.
pub struct JlptVocabClient {
    client: Client,
    config: VocabConfig,
}

impl JlptVocabClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: VocabConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                KuraError::Configuration(format!("Failed to build vocabulary HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn level_url(&self) -> String {
        format!("{}/api/words/all", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl VocabService for JlptVocabClient {
    async fn fetch_level(&self, level: JlptLevel) -> Result<Vec<VocabEntry>> {
        let url = self.level_url();

        tracing::debug!(url = %url, level = %level, "Fetching vocabulary level");

        let resp = self
            .client
            .get(&url)
            .query(&[("level", level.number())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VocabError::Timeout(format!("{level}: {e}"))
                } else {
                    VocabError::ConnectionFailed(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(VocabError::HttpStatus {
                status: status.as_u16(),
                message: format!("{level}: {body}"),
            }
            .into());
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| VocabError::InvalidResponse(format!("{level}: {e}")))?;

        let payload = LevelPayload::decode(level, body, &self.config.words_key)?;
        let entries = payload.into_entries();

        tracing::debug!(level = %level, count = entries.len(), "Fetched vocabulary level");

        Ok(entries)
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
