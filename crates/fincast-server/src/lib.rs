//! Fincast Web Server
//!
//! Axum-based REST API for the Fincast spending forecaster.
//!
//! - Input validation and sanitization happen here, before core types are
//!   built; the forecast core assumes validated inputs.
//! - Restrictive CORS policy and security headers by default.
//! - Sanitized error responses (internal errors are logged, not leaked).

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use fincast_core::db::Database;

mod handlers;

/// Maximum accepted length for free-text fields (description)
pub const MAX_TEXT_LENGTH: usize = 500;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// Server start time, for the health endpoint's uptime report
    pub started_at: Instant,
}

/// Strip characters that have no business in free-text finance fields
///
/// Removes HTML/script metacharacters and control characters, collapses the
/// result with a trim. Rejection of empty results is the caller's decision.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '`' | ';' | '\\') && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize a category name: sanitized, lowercased, trimmed
pub fn normalize_category(input: &str) -> String {
    sanitize_text(input).to_lowercase()
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        started_at: Instant::now(),
    });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::get_health))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            delete(handlers::delete_transaction),
        )
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route("/budgets/:id", delete(handlers::delete_budget))
        // Forecasting
        .route("/forecast", get(handlers::get_forecast))
        .route("/forecast/trends", get(handlers::get_trends))
        .route("/forecast/accuracy", get(handlers::get_accuracy))
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        .route(
            "/recommendations/surplus",
            get(handlers::get_surplus_recommendation),
        );

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(db, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
