//! Three-tier dataset ingestion: remote fetch, embedded table, backup list.

use std::env;

use async_trait::async_trait;
use reqwest::Client;

use pairs_core::model::WordPairRecord;
use pairs_core::parse::parse_rows;

use crate::data;
use crate::error::SourceError;

/// Where the remote tier fetches its delimited text from.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub url: String,
}

impl RemoteConfig {
    /// Read the dataset URL from `NASAL_PAIRS_DATA_URL`. `None` disables the
    /// remote tier.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let url = env::var("NASAL_PAIRS_DATA_URL").ok()?;
        if url.trim().is_empty() {
            return None;
        }
        Some(Self { url })
    }
}

/// A source of raw delimited dataset text.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `SourceError` on transport failure or a non-success status.
    async fn fetch(&self) -> Result<String, SourceError>;
}

/// HTTP-backed dataset source.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url,
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }
        Ok(response.text().await?)
    }
}

/// Orchestrates the fallback chain. Each tier is accepted only when it parses
/// to at least one record, so [`DatasetLoader::load`] never returns an empty
/// sequence.
pub struct DatasetLoader {
    source: Option<Box<dyn DatasetSource>>,
    embedded: &'static str,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(source: Option<Box<dyn DatasetSource>>) -> Self {
        Self {
            source,
            embedded: data::EMBEDDED_CSV,
        }
    }

    /// Build a loader whose remote tier comes from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let source = RemoteConfig::from_env()
            .map(|config| Box::new(HttpSource::new(config)) as Box<dyn DatasetSource>);
        Self::new(source)
    }

    /// Run the tiers in strict order and return the first non-empty parse.
    pub async fn load(&self) -> Vec<WordPairRecord> {
        if let Some(source) = &self.source {
            match source.fetch().await {
                Ok(text) => {
                    let records = parse_rows(&text);
                    if !records.is_empty() {
                        tracing::debug!(count = records.len(), "loaded remote dataset");
                        return records;
                    }
                    tracing::debug!("remote dataset parsed to zero records, falling back");
                }
                Err(err) => {
                    tracing::debug!(%err, "remote dataset fetch failed, falling back");
                }
            }
        }

        let records = parse_rows(self.embedded);
        if !records.is_empty() {
            tracing::debug!(count = records.len(), "loaded embedded dataset");
            return records;
        }

        tracing::debug!("embedded dataset parsed to zero records, using backup");
        data::backup_records()
    }
}
