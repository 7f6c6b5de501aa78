//! HTTP surface of the generation proxy.

use crate::core::proxy::GenerationProxy;
use crate::domain::catalog::MODULES;
use crate::domain::model::{GenerationRequest, GenerationResponse, Module};
use crate::domain::ports::AgentBackend;
use crate::utils::error::{Result, StudioError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

impl IntoResponse for StudioError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(
                "Request failed: {} (category: {:?}); {}",
                self,
                self.category(),
                self.recovery_suggestion()
            );
        } else {
            tracing::info!("Request rejected: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router<B>(proxy: GenerationProxy<B>) -> Router
where
    B: AgentBackend + 'static,
{
    Router::new()
        .route("/api/generate", post(generate::<B>))
        .route("/api/modules", get(list_modules))
        .route("/health", get(health))
        .with_state(Arc::new(proxy))
}

async fn generate<B>(
    State(proxy): State<Arc<GenerationProxy<B>>>,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>>
where
    B: AgentBackend + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        StudioError::validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let response = proxy.handle(request).await?;
    tracing::info!(
        "Generation {} finished with {} modules",
        response.execution_id,
        response.modules.len()
    );
    Ok(Json(response))
}

async fn list_modules() -> Json<Vec<Module>> {
    Json(MODULES.to_vec())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
