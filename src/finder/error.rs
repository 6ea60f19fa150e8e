use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::ErrorResponse;
use crate::completion::CompletionError;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Query is required")]
    InvalidInput,
    #[error("Completion API error")]
    Upstream { details: String },
    #[error("{0}")]
    Unhandled(String),
}

impl From<CompletionError> for SearchError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Status { body, .. } => SearchError::Upstream { details: body },
            other => SearchError::Unhandled(other.to_string()),
        }
    }
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidInput => StatusCode::BAD_REQUEST,
            SearchError::Upstream { .. } | SearchError::Unhandled(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.to_string();
        let details = match self {
            SearchError::Upstream { details } => Some(details),
            _ => None,
        };
        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
