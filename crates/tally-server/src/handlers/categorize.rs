//! Classification preview handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};

/// Request body for a classification preview
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub merchant: String,
    /// Fuzzy fallback toggle, on unless disabled
    #[serde(default = "default_fuzzy")]
    pub fuzzy: bool,
}

fn default_fuzzy() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    pub suggested_category: String,
}

/// POST /api/categorize - Suggest a category without storing anything
pub async fn categorize(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategorizeRequest>,
) -> Result<Json<CategorizeResponse>, AppError> {
    let suggested_category =
        state
            .rules
            .suggest(&payload.description, &payload.merchant, payload.fuzzy);
    Ok(Json(CategorizeResponse { suggested_category }))
}
