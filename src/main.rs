//! Demo entry point: a small REST service wired through the bootstrap
//! layer, with signal-driven graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use axum::Json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rest_server::http::response::check_error;
use rest_server::{HttpServer, RouteDescriptor, ServerConfig, Shutdown};

/// How long in-flight requests may drain on shutdown.
const DRAIN_DEADLINE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rest_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let routes = vec![
        RouteDescriptor::path("/health", "GET", health),
        RouteDescriptor::path("/double", "POST", double),
    ];

    let config = ServerConfig {
        cors: true,
        debug: true,
        ..ServerConfig::default()
    };

    let server = Arc::new(HttpServer::new(routes, config)?);

    let shutdown = Shutdown::new();
    let mut requests = shutdown.subscribe();
    {
        let server = Arc::clone(&server);
        tokio::spawn(async move {
            if let Ok(deadline) = requests.recv().await {
                if let Err(err) = server.shutdown(deadline).await {
                    tracing::error!(error = %err, "shutdown failed");
                }
            }
        });
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            shutdown.trigger(DRAIN_DEADLINE);
        }
    });

    server.start().await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Doubles the integer in the request body; malformed input gets a 400.
async fn double(body: String) -> Result<String, Response> {
    let n: i64 = check_error(body.trim().parse())?;
    Ok((n * 2).to_string())
}
