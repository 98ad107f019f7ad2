//! Tally Web Server
//!
//! Axum-based REST API for the Tally expense tracker.
//!
//! - Bearer-token (HS256 JWT) authentication, on by default; `--no-auth`
//!   supplies a fixed local identity for development
//! - Restrictive CORS policy
//! - Request validation at the handler boundary (missing fields, negative
//!   amounts) with sanitized error responses; full errors go to the log

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

use tally_core::classify::CategoryRules;
use tally_core::db::Database;

mod handlers;


/// Fallback identity when authentication is disabled
const LOCAL_DEV_USER: &str = "local-dev";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Shared secret for HS256 bearer token validation
    pub jwt_secret: Option<String>,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            jwt_secret: None,
            allowed_origins: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Category rule table, built once at startup and shared read-only
    pub rules: CategoryRules,
}

/// The authenticated caller, inserted into request extensions by the auth
/// middleware. Partitions every store operation.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

#[derive(serde::Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// Authentication middleware - validates the bearer token and attaches the
/// caller's identity to the request.
///
/// Tokens are HS256 JWTs whose `sub` claim carries the user id. When auth is
/// disabled (local development), every request runs as a fixed local user.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        request
            .extensions_mut()
            .insert(AuthUser(LOCAL_DEV_USER.to_string()));
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "));

    if let Some(token) = token {
        match validate_token(token, state.config.jwt_secret.as_deref()) {
            Ok(user_id) => {
                tracing::debug!(user = %user_id, path = %request.uri().path(), "Authenticated");
                request.extensions_mut().insert(AuthUser(user_id));
                return next.run(request).await;
            }
            Err(e) => {
                warn!(error = %e, path = %request.uri().path(), "Invalid bearer token");
            }
        }
    } else {
        warn!(path = %request.uri().path(), "Unauthorized request - no bearer token");
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate a bearer token and extract the user id from its `sub` claim.
fn validate_token(token: &str, secret: Option<&str>) -> Result<String, String> {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    let secret = secret.ok_or("JWT secret not configured")?;

    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| format!("Token validation failed: {}", e))?;

    Ok(token_data.claims.sub)
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
        config: config.clone(),
        rules: CategoryRules::builtin(),
    });

    let api_routes = Router::new()
        // Income partition
        .route(
            "/income",
            get(handlers::list_income).post(handlers::add_income),
        )
        .route("/income/:id", axum::routing::delete(handlers::delete_income))
        // Expense partition
        .route(
            "/expense",
            get(handlers::list_expense).post(handlers::add_expense),
        )
        .route(
            "/expense/:id",
            axum::routing::delete(handlers::delete_expense),
        )
        // Classification preview (nothing is stored)
        .route("/categorize", axum::routing::post(handlers::categorize))
        // Analytics
        .route("/dashboard", get(handlers::get_dashboard));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: same-origin only
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server at http://{}", addr);

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
            // Return a generic message to the client
            message: "An internal error occurred".to_string(),
            // Keep the full error for logging
            internal: Some(err),
        }
    }
}
