//! HTTP surface: router assembly, health check and server loop

pub mod extract;
pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::features;
use crate::middleware::{self, AuthState};
use crate::store::SharedStore;
use response::ErrorResponse;

/// Build the full application router
///
/// `/health` is always open; everything under `/api/v1` goes through the
/// bearer token gate.
pub fn create_router(store: SharedStore, config: &Config) -> Router {
    let auth = AuthState::new(config.auth.api_token.as_deref());

    let api_v1 = features::router(store.clone()).layer(axum::middleware::from_fn_with_state(
        auth,
        middleware::require_bearer,
    ));

    Router::new()
        .route("/health", get(health_check))
        .with_state(store)
        .nest("/api/v1", api_v1)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check(State(store): State<SharedStore>) -> Response {
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "storage": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Store health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("UNAVAILABLE", "Storage is unreachable")),
            )
                .into_response()
        },
    }
}

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn serve(store: SharedStore, config: &Config) -> anyhow::Result<()> {
    let app = create_router(store, config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    let drain = Duration::from_secs(config.server.shutdown_timeout_secs);
    serve_until(listener, app, shutdown_signal(), drain).await
}

/// Serve until `signal` resolves, then drain open connections for at most
/// `drain` before returning
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stop = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let stop = Arc::clone(&stop);
            async move { stop.notified().await }
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return Ok(result?),
        () = signal => {},
    }

    stop.notify_one();
    tracing::info!("Waiting up to {} seconds for connections to close", drain.as_secs());

    match tokio::time::timeout(drain, server).await {
        Ok(result) => {
            result?;
            tracing::info!("Server shut down gracefully");
        },
        Err(_) => {
            tracing::warn!("Shutdown timeout elapsed with connections still open");
        },
    }
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_shutdown_without_connections_returns_promptly() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let app = Router::new().route("/", get(|| async { "ok" }));

        let finished = tokio::time::timeout(
            Duration::from_secs(5),
            serve_until(listener, app, async {}, Duration::from_secs(30)),
        )
        .await;

        assert!(finished.expect("no drain wait without connections").is_ok());
    }

    #[tokio::test]
    async fn test_shutdown_timeout_bounds_slow_requests() {
        let entered = Arc::new(Notify::new());
        let app = Router::new().route(
            "/slow",
            get({
                let entered = Arc::clone(&entered);
                move || {
                    let entered = Arc::clone(&entered);
                    async move {
                        entered.notify_one();
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        "done"
                    }
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Shut down as soon as the slow request is in flight
        let signal = {
            let entered = Arc::clone(&entered);
            async move { entered.notified().await }
        };
        let server = tokio::spawn(serve_until(
            listener,
            app,
            signal,
            Duration::from_millis(100),
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();

        let finished = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("drain should stop at the shutdown timeout");
        assert!(finished.unwrap().is_ok());
        drop(stream);
    }
}
