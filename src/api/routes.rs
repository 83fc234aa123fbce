//! Router assembly and server start-up.

use super::tasks::{self, SharedService};
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::{
    Json, Router,
    extract::State,
    http::{
        Method,
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
    },
    routing::get,
};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router around a lifecycle service.
#[must_use]
pub fn router<R, C>(service: TaskLifecycleService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let state: SharedService<R, C> = Arc::new(service);
    Router::new()
        .route("/health", get(health_check::<R, C>))
        .merge(tasks::routes::<R, C>())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `listen_address` and serves the API until the process exits.
///
/// # Errors
///
/// Returns an I/O error when the address cannot be bound or the server
/// stops abnormally.
pub async fn serve<R, C>(
    listen_address: &str,
    service: TaskLifecycleService<R, C>,
) -> std::io::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(listen_address).await?;
    tracing::info!(%listen_address, "task board listening");
    axum::serve(listener, router(service)).await
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([ACCEPT, CONTENT_TYPE, ORIGIN])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
}

/// GET /health
async fn health_check<R, C>(State(service): State<SharedService<R, C>>) -> Json<Value>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(json!({
        "status": "OK",
        "server_time": service.clock().utc(),
    }))
}
