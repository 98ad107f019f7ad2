//! Income/expense transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState, AuthUser, SuccessResponse};
use tally_core::models::{NewTransaction, Transaction, TransactionKind};

/// Request body for adding a transaction to either partition
#[derive(Debug, Deserialize)]
pub struct AddTransactionRequest {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub merchant: String,
    /// Final category; when blank the classifier suggestion is used
    pub category: Option<String>,
    pub icon: Option<String>,
}

/// Shared add path: validate, classify, insert.
fn add_transaction(
    state: &AppState,
    user: &AuthUser,
    kind: TransactionKind,
    payload: AddTransactionRequest,
) -> Result<Json<Transaction>, AppError> {
    let (amount, date) = match (payload.amount, payload.date) {
        (Some(amount), Some(date)) => (amount, date),
        _ => return Err(AppError::bad_request("amount and date are required")),
    };
    if amount < 0.0 {
        return Err(AppError::bad_request("amount must be non-negative"));
    }

    // Always classify, even when the caller names a category: the suggestion
    // is kept on the record either way
    let suggested_category =
        state
            .rules
            .suggest(&payload.description, &payload.merchant, true);
    let category = match payload.category {
        Some(c) if !c.is_empty() => c,
        _ => suggested_category.clone(),
    };

    let stored = state.db.insert_transaction(
        kind,
        &NewTransaction {
            user_id: user.0.clone(),
            date,
            description: payload.description,
            merchant: payload.merchant,
            amount,
            category,
            suggested_category,
            icon: payload.icon,
        },
    )?;

    Ok(Json(stored))
}

/// POST /api/income - Record an income transaction
pub async fn add_income(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    add_transaction(&state, &user, TransactionKind::Income, payload)
}

/// POST /api/expense - Record an expense transaction
pub async fn add_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    add_transaction(&state, &user, TransactionKind::Expense, payload)
}

/// GET /api/income - List the caller's income, newest first
pub async fn list_income(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.db.list_transactions(&user.0, TransactionKind::Income)?;
    Ok(Json(transactions))
}

/// GET /api/expense - List the caller's expenses, newest first
pub async fn list_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state
        .db
        .list_transactions(&user.0, TransactionKind::Expense)?;
    Ok(Json(transactions))
}

fn delete_transaction(
    state: &AppState,
    user: &AuthUser,
    kind: TransactionKind,
    id: i64,
) -> Result<Json<SuccessResponse>, AppError> {
    if state.db.delete_transaction(&user.0, kind, id)? {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::not_found(&format!("{} transaction {}", kind, id)))
    }
}

/// DELETE /api/income/:id
pub async fn delete_income(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    delete_transaction(&state, &user, TransactionKind::Income, id)
}

/// DELETE /api/expense/:id
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    delete_transaction(&state, &user, TransactionKind::Expense, id)
}
