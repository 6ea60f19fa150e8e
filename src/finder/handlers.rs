use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, warn};

use super::error::SearchError;
use super::types::*;
use crate::server::AppState;

pub async fn search_movies(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, SearchError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            warn!("Rejected search request body: {}", e);
            return Err(SearchError::InvalidInput);
        }
    };

    let query = request.query.unwrap_or_default();

    match state.finder.search(&query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            if !matches!(e, SearchError::InvalidInput) {
                error!("Search for \"{}\" failed: {:?}", query, e);
            }
            Err(e)
        }
    }
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        message: "Movie Finder API is running".to_string(),
    })
}
