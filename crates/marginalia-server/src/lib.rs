//! Marginalia Server
//!
//! The action boundary over HTTP: AI assist routes and note CRUD routes, each
//! answering with an [`OperationOutcome`](outcome::OperationOutcome) envelope.

#![warn(missing_docs)]

pub mod actions;
pub mod config;
pub mod handlers;
pub mod outcome;

use actions::new_shared_store;
use config::ServerConfig;
use handlers::{create_router, AppState};
use marginalia_assist::Assistant;
use marginalia_llm::{LlmError, OpenAiProvider};
use marginalia_store::StoreError;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Inference provider could not be configured
    #[error("Inference setup failed: {0}")]
    Inference(#[from] LlmError),

    /// Note store could not be opened
    #[error("Store setup failed: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Builds the OpenAI provider from the environment plus config overrides,
/// opens the note store and serves until the process stops.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Marginalia server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);

    let openai = config.openai_config()?;
    info!("Inference endpoint: {}", openai.base_url);
    let provider = OpenAiProvider::new(openai)?;

    let state = AppState {
        assistant: Assistant::new(provider, config.assist.clone()),
        store: new_shared_store(&config.database_path)?,
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
