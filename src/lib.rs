pub mod cache;
pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
mod middleware;
pub use middleware::cors_layer;
pub mod models;
pub mod pubsub;
pub mod realtime;
pub mod state;
pub mod ws;
pub mod http;
pub use http::http_router;
pub use ws::ws_router;

use axum::Router;
use state::AppState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;

/// Start the quiz engine's HTTP + WebSocket server.
pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("failed to load configuration");
    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    tracing::info!("PostgreSQL and Redis connection pools established");

    let app = Router::new()
        .merge(http_router())
        .merge(ws_router())
        .layer(cors_layer())
        .fallback(|| async { "404 Not Found" })
        .with_state(state.clone());

    let port = state.config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind address");

    tracing::info!("Server listening on port {}", port);

    let shutdown_drain = state.config.shutdown_drain;
    let quiz_manager = state.quiz_manager.clone();

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(quiz_manager, shutdown_drain));

    if let Err(e) = server.await {
        tracing::error!("server error: {}", e);
    }
}

/// Handle graceful shutdown on SIGTERM or Ctrl+C: cancel the active
/// game, then let in-flight broadcasts drain for up to `shutdown_drain`
/// before axum closes sockets.
async fn shutdown_signal(quiz_manager: std::sync::Arc<engine::quiz_manager::QuizManager>, shutdown_drain: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, shutting down");
        },
        _ = terminate => {
            tracing::info!("SIGTERM received, shutting down");
        },
    }

    quiz_manager.shutdown().await;
    tokio::time::sleep(shutdown_drain).await;
}
