//! In-process stand-ins for the upstream services, recording every call.

use async_trait::async_trait;
use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::completion::{CompletionError, CompletionResult, CompletionService};
use crate::metadata::{MetadataError, MetadataResult, MetadataService, MovieRecord};

pub fn record(title: &str) -> MovieRecord {
    MovieRecord {
        title: Some(title.to_string()),
        year: Some("1995".to_string()),
        rated: Some("R".to_string()),
        runtime: Some("120 min".to_string()),
        genre: Some("Drama".to_string()),
        director: Some("Someone".to_string()),
        actors: Some("Some Actors".to_string()),
        plot: Some("Things happen.".to_string()),
        poster: Some("N/A".to_string()),
        imdb_rating: Some("7.0".to_string()),
        imdb_id: Some(format!("tt-{}", title)),
    }
}

enum Reply {
    Text(String),
    Status(u16, String),
}

pub struct FakeCompletion {
    reply: Reply,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Status(status, body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(String, String)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, system: &str, user: &str) -> CompletionResult<String> {
        self.requests
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status, body) => Err(CompletionError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

pub struct FakeMetadata {
    known: Option<HashSet<String>>,
    failing: HashSet<String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn matching_all() -> Self {
        Self {
            known: None,
            failing: HashSet::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn matching(titles: &[&str]) -> Self {
        Self {
            known: Some(titles.iter().map(|t| t.to_string()).collect()),
            failing: HashSet::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, title: &str) -> Self {
        self.failing.insert(title.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataService for FakeMetadata {
    async fn lookup(&self, title: &str) -> MetadataResult<Option<MovieRecord>> {
        self.lookups.lock().unwrap().push(title.to_string());

        if self.failing.contains(title) {
            return Err(MetadataError::Status(503));
        }
        let matched = match &self.known {
            Some(known) => known.contains(title),
            None => true,
        };
        Ok(matched.then(|| record(title)))
    }
}

/// Serves `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// OMDb stand-in recording each query string. Titles in `known` match,
/// "Broken" answers 200 with an HTML page, "Down" answers 500, anything
/// else is a regular miss.
pub fn omdb_stub(known: &'static [&'static str], seen: SeenQueries) -> Router {
    Router::new().route(
        "/",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let seen = seen.clone();
            async move {
                let title = params.get("t").cloned().unwrap_or_default();
                seen.lock().unwrap().push(params);
                match title.as_str() {
                    "Broken" => (
                        [(header::CONTENT_TYPE, "text/html")],
                        "<html><body>Service Unavailable</body></html>",
                    )
                        .into_response(),
                    "Down" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                    t if known.contains(&t) => Json(serde_json::json!({
                        "Title": t,
                        "Year": "2024",
                        "imdbID": format!("tt-{}", t),
                        "Response": "True"
                    }))
                    .into_response(),
                    _ => Json(serde_json::json!({
                        "Response": "False",
                        "Error": "Movie not found!"
                    }))
                    .into_response(),
                }
            }
        }),
    )
}
