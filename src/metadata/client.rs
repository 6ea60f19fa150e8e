use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{MovieRecord, OmdbResponse};
use crate::config::MetadataConfig;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Metadata API returned {0}")]
    Status(u16),
    #[error("Metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub type MetadataResult<T> = Result<T, MetadataError>;

/// Lookup-by-title movie database.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Returns `Ok(None)` when the database has no match for `title`.
    async fn lookup(&self, title: &str) -> MetadataResult<Option<MovieRecord>>;
}

pub struct OmdbClient {
    http: Client,
    config: MetadataConfig,
}

impl OmdbClient {
    pub fn new(http: Client, config: MetadataConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl MetadataService for OmdbClient {
    async fn lookup(&self, title: &str) -> MetadataResult<Option<MovieRecord>> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let response = self
            .http
            .get(&self.config.api_url)
            .query(&[("apikey", api_key), ("t", title), ("type", "movie")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::Status(response.status().as_u16()));
        }

        let info: OmdbResponse = response.json().await?;
        if !info.is_match() {
            debug!(
                "No metadata match for \"{}\": {}",
                title,
                info.error.as_deref().unwrap_or("no error given")
            );
        }
        Ok(info.into_record())
    }
}
