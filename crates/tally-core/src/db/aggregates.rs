//! Filtered sums and groupings - the `TransactionStore` implementation

use rusqlite::OptionalExtension;

use super::Database;
use crate::error::Result;
use crate::models::{CategoryTotal, Transaction, TransactionKind};
use crate::store::{DateRange, TransactionStore};

/// Build the `user_id`/date-range WHERE clause and its parameters.
/// `start` is inclusive, `end` exclusive, matching [`DateRange`].
fn range_filter(
    user_id: &str,
    range: Option<DateRange>,
) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut conditions = vec!["user_id = ?".to_string()];
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

    if let Some(range) = range {
        if let Some(start) = range.start {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(start.to_string()));
        }
        if let Some(end) = range.end {
            conditions.push("date < ?".to_string());
            params.push(Box::new(end.to_string()));
        }
    }

    (format!("WHERE {}", conditions.join(" AND ")), params)
}

impl TransactionStore for Database {
    fn sum_where(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<f64> {
        let conn = self.conn()?;
        let (where_clause, params) = range_filter(user_id, range);

        let sql = format!(
            "SELECT COALESCE(SUM(amount), 0) FROM {} {}",
            kind.table(),
            where_clause
        );
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let total: f64 = conn.query_row(&sql, param_refs.as_slice(), |row| row.get(0))?;
        Ok(total)
    }

    fn find_where(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: Option<DateRange>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let (where_clause, mut params) = range_filter(user_id, range);

        let limit_clause = if limit.is_some() { "LIMIT ?" } else { "" };
        if let Some(n) = limit {
            params.push(Box::new(n as i64));
        }

        let sql = format!(
            r#"
            SELECT {} FROM {}
            {}
            ORDER BY date DESC, id DESC
            {}
            "#,
            Self::TRANSACTION_COLUMNS,
            kind.table(),
            where_clause,
            limit_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt
            .query_map(param_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn find_top_by_amount(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {} FROM {}
            WHERE user_id = ?
            ORDER BY amount DESC
            LIMIT 1
            "#,
            Self::TRANSACTION_COLUMNS,
            kind.table()
        );
        let tx = conn
            .query_row(&sql, rusqlite::params![user_id], Self::row_to_transaction)
            .optional()?;
        Ok(tx)
    }

    fn group_sum_by_category(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let (where_clause, params) = range_filter(user_id, range);

        // HAVING keeps zero-aggregate categories out of breakdowns
        let sql = format!(
            r#"
            SELECT category, SUM(amount) as total
            FROM {}
            {}
            GROUP BY category
            HAVING SUM(amount) > 0
            ORDER BY total DESC
            "#,
            kind.table(),
            where_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
