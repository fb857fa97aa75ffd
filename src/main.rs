use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotphrase::{
    config::{GameConfig, ServerConfig},
    phrases::PhraseBook,
    state::AppState,
    ws,
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotphrase=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HotPhrase...");

    let game_config = GameConfig::from_env();
    let server_config = ServerConfig::from_env();

    let book = match &server_config.phrases_file {
        Some(path) => match PhraseBook::from_file(path) {
            Ok(book) => {
                tracing::info!("Loaded phrases from {}", path.display());
                book
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load phrases from {}: {}. Using built-in lists.",
                    path.display(),
                    e
                );
                PhraseBook::builtin()
            }
        },
        None => PhraseBook::builtin(),
    };

    for category in hotphrase::types::Category::ALL {
        if book.phrases(category).is_empty() {
            tracing::warn!("Category {} has no phrases and cannot be played", category);
        }
    }

    let state = match AppState::from_config(game_config, book) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Could not set up the match: {}", e);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .fallback_service(ServeDir::new(&server_config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Could not bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
