pub mod completion;
pub mod config;
pub mod finder;
pub mod metadata;
pub mod middleware;
pub mod server;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::completion::ChatCompletionClient;
use crate::finder::MovieFinder;
use crate::metadata::OmdbClient;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(String),
}

/// Builds the search pipeline from `config`, with both upstream clients
/// sharing one connection pool.
pub fn build_finder(config: &config::Config) -> Result<MovieFinder, ServerError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.upstream.timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder.build()?;

    let completion = Arc::new(ChatCompletionClient::new(
        http.clone(),
        config.completion.clone(),
    ));
    let metadata = Arc::new(OmdbClient::new(http, config.metadata.clone()));

    Ok(MovieFinder::new(completion, metadata).with_max_lookups(config.search.max_lookups))
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let config = config::Config::load(config_path)?;

    info!("Completion model: {}", config.completion.model);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let finder = build_finder(&config)?;

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = config.listen.tlscert.clone().zip(config.listen.tlskey.clone());

    let state = server::AppState::new(finder);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
