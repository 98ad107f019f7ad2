//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Rule-based category classification for transaction text
//! - SQLite-backed transaction store (income/expense partitions)
//! - Insights aggregation (totals, rolling windows, trends, comparisons)

pub mod classify;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod store;

pub use classify::{CategoryRules, FALLBACK_CATEGORY};
pub use db::Database;
pub use error::{Error, Result};
pub use insights::{compute_insights, Dashboard};
pub use models::{CategoryTotal, NewTransaction, Transaction, TransactionKind};
pub use store::{DateRange, TransactionStore};
