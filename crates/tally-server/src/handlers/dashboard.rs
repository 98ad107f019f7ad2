//! Dashboard handler

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};

use crate::{AppError, AppState, AuthUser};
use tally_core::insights::{compute_insights, Dashboard};

/// GET /api/dashboard - Full analytics payload for the caller
///
/// The reference date is resolved here, at the boundary; the aggregator
/// itself never reads a clock.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Dashboard>, AppError> {
    let now = chrono::Local::now().date_naive();
    let dashboard = compute_insights(&state.db, &user.0, now)?;
    Ok(Json(dashboard))
}
