use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::SearchError;
use super::types::SearchResponse;
use crate::completion::{parse_recommendation, CompletionService, PromptContext};
use crate::metadata::{clean_title, MetadataService, MovieRecord};

pub const DEFAULT_MAX_LOOKUPS: usize = 10;

/// Runs a search: asks the completion service for candidate titles, then
/// resolves the first `max_lookups` of them against the metadata service.
pub struct MovieFinder {
    completion: Arc<dyn CompletionService>,
    metadata: Arc<dyn MetadataService>,
    max_lookups: usize,
}

impl MovieFinder {
    pub fn new(completion: Arc<dyn CompletionService>, metadata: Arc<dyn MetadataService>) -> Self {
        Self {
            completion,
            metadata,
            max_lookups: DEFAULT_MAX_LOOKUPS,
        }
    }

    /// Lowers the lookup limit; values above `DEFAULT_MAX_LOOKUPS` are capped.
    pub fn with_max_lookups(mut self, max_lookups: usize) -> Self {
        self.max_lookups = max_lookups.min(DEFAULT_MAX_LOOKUPS);
        self
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        self.search_with_context(query, &PromptContext::now()).await
    }

    pub async fn search_with_context(
        &self,
        query: &str,
        ctx: &PromptContext,
    ) -> Result<SearchResponse, SearchError> {
        if query.is_empty() {
            return Err(SearchError::InvalidInput);
        }

        info!("Searching movies for query: {}", query);

        let raw = self.completion.complete(&ctx.system_prompt(), query).await?;
        let recommendation = parse_recommendation(&raw);

        debug!(
            "Completion suggested {} titles, resolving at most {}",
            recommendation.movies.len(),
            self.max_lookups
        );

        let movies = self.enrich(&recommendation.movies).await;

        info!(
            "Resolved {} of {} candidate titles",
            movies.len(),
            recommendation.movies.len().min(self.max_lookups)
        );

        Ok(SearchResponse {
            analysis: recommendation.analysis,
            movies,
            query: query.to_string(),
        })
    }

    // Lookups run one at a time in candidate order; misses and failures are skipped.
    async fn enrich(&self, titles: &[String]) -> Vec<MovieRecord> {
        let mut movies = Vec::new();

        for title in titles.iter().take(self.max_lookups) {
            let key = clean_title(title);
            match self.metadata.lookup(&key).await {
                Ok(Some(record)) => movies.push(record),
                Ok(None) => debug!("No metadata for \"{}\"", key),
                Err(e) => warn!("Metadata lookup for \"{}\" failed: {}", key, e),
            }
        }

        movies
    }
}
