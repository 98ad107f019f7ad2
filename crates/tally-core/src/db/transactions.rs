//! Per-partition transaction operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionKind};

impl Database {
    /// Insert a transaction into its partition, returning the stored row.
    ///
    /// The store owns `id` and `created_at`. Negative amounts are rejected
    /// before they reach the CHECK constraint so callers get a typed error.
    pub fn insert_transaction(
        &self,
        kind: TransactionKind,
        tx: &NewTransaction,
    ) -> Result<Transaction> {
        if tx.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "amount must be non-negative, got {}",
                tx.amount
            )));
        }

        let conn = self.conn()?;
        let sql = format!(
            r#"
            INSERT INTO {} (user_id, date, description, merchant, amount, category, suggested_category, icon)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            kind.table()
        );
        conn.execute(
            &sql,
            params![
                tx.user_id,
                tx.date.to_string(),
                tx.description,
                tx.merchant,
                tx.amount,
                tx.category,
                tx.suggested_category,
                tx.icon,
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.get_transaction(kind, id)?
            .ok_or_else(|| Error::NotFound(format!("{} transaction {}", kind, id)))
    }

    /// Fetch a single transaction by id.
    pub fn get_transaction(
        &self,
        kind: TransactionKind,
        id: i64,
    ) -> Result<Option<Transaction>> {
        use rusqlite::OptionalExtension;

        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            Self::TRANSACTION_COLUMNS,
            kind.table()
        );
        let tx = conn
            .query_row(&sql, params![id], Self::row_to_transaction)
            .optional()?;
        Ok(tx)
    }

    /// List a user's transactions in one partition, newest first.
    pub fn list_transactions(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {} FROM {}
            WHERE user_id = ?
            ORDER BY date DESC, id DESC
            "#,
            Self::TRANSACTION_COLUMNS,
            kind.table()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user_id], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Delete a transaction scoped to its owner. Returns false when no row
    /// matched (missing id or someone else's record).
    pub fn delete_transaction(
        &self,
        user_id: &str,
        kind: TransactionKind,
        id: i64,
    ) -> Result<bool> {
        let conn = self.conn()?;
        let sql = format!("DELETE FROM {} WHERE id = ? AND user_id = ?", kind.table());
        let deleted = conn.execute(&sql, params![id, user_id])?;
        Ok(deleted > 0)
    }

    /// Row count for one user's partition.
    pub fn count_transactions(&self, user_id: &str, kind: TransactionKind) -> Result<i64> {
        let conn = self.conn()?;
        let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?", kind.table());
        let count: i64 = conn.query_row(&sql, params![user_id], |row| row.get(0))?;
        Ok(count)
    }

    pub(crate) const TRANSACTION_COLUMNS: &'static str =
        "id, user_id, date, description, merchant, amount, category, suggested_category, icon, created_at";

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(2)?;
        let created_at_str: String = row.get(9)?;
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            description: row.get(3)?,
            merchant: row.get(4)?,
            amount: row.get(5)?,
            category: row.get(6)?,
            suggested_category: row.get(7)?,
            icon: row.get(8)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
