use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::finder::MovieFinder;

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<MovieFinder>,
}

impl AppState {
    pub fn new(finder: MovieFinder) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/search", post(crate::finder::search_movies))
        .route("/api/health", get(crate::finder::health_check));

    Router::new()
        .merge(api_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // CORS preflight for unknown paths
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::fakes::{FakeCompletion, FakeMetadata};
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    fn router(completion: Arc<FakeCompletion>, metadata: Arc<FakeMetadata>) -> Router {
        let finder = MovieFinder::new(completion, metadata);
        build_router(AppState::new(finder))
    }

    fn search_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(
            Arc::new(FakeCompletion::failing(500, "down")),
            Arc::new(FakeMetadata::matching_all()),
        );

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["message"], "Movie Finder API is running");
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        for payload in [r#"{"query": ""}"#, "{}", "not json"] {
            let completion = Arc::new(FakeCompletion::replying("{}"));
            let metadata = Arc::new(FakeMetadata::matching_all());
            let app = router(completion.clone(), metadata.clone());

            let response = app.oneshot(search_request(payload)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
            let body = json_body(response).await;
            assert_eq!(body["error"], "Query is required");
            assert_eq!(completion.calls(), 0);
            assert!(metadata.lookups().is_empty());
        }
    }

    #[tokio::test]
    async fn test_search_success() {
        let reply = "```json\n{\"analysis\": \"Tense crime dramas.\", \"movies\": [\"Heat (1995)\", \"Unknown Film (2020)\", \"Ronin (1998)\"]}\n```";
        let completion = Arc::new(FakeCompletion::replying(reply));
        let metadata = Arc::new(FakeMetadata::matching(&["Heat", "Ronin"]));
        let app = router(completion, metadata);

        let response = app
            .oneshot(search_request(r#"{"query": "90s heist movies"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["analysis"], "Tense crime dramas.");
        assert_eq!(body["query"], "90s heist movies");
        let movies = body["movies"].as_array().unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0]["title"], "Heat");
        assert_eq!(movies[1]["title"], "Ronin");
        assert_eq!(movies[1]["imdbID"], "tt-Ronin");
    }

    #[tokio::test]
    async fn test_search_upstream_error() {
        let completion = Arc::new(FakeCompletion::failing(429, "rate limit exceeded"));
        let metadata = Arc::new(FakeMetadata::matching_all());
        let app = router(completion, metadata.clone());

        let response = app
            .oneshot(search_request(r#"{"query": "comedies"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Completion API error");
        assert_eq!(body["details"], "rate limit exceeded");
        assert!(metadata.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_search_unstructured_reply() {
        let reply = "Try some Wes Anderson films.";
        let app = router(
            Arc::new(FakeCompletion::replying(reply)),
            Arc::new(FakeMetadata::matching_all()),
        );

        let response = app
            .oneshot(search_request(r#"{"query": "quirky"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["analysis"], reply);
        assert_eq!(body["movies"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = router(
            Arc::new(FakeCompletion::replying("{}")),
            Arc::new(FakeMetadata::matching_all()),
        );

        let request = Request::builder()
            .uri("/api/nothing")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
