//! Per-request insights computation
//!
//! Everything takes the reference date as an explicit parameter - no clock
//! reads - so results are deterministic and testable. Each aggregate is an
//! independent read against the store; a store failure aborts the whole
//! computation rather than leaving fields silently zeroed.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::error::Result;
use crate::models::TransactionKind;
use crate::store::{DateRange, TransactionStore};

use super::types::{
    Dashboard, RecentTransaction, SpendingInsights, TransactionHighlight, WindowSummary,
    NO_TOP_CATEGORY,
};

/// How many of each kind feed the merged recent-activity list.
const RECENT_PER_KIND: u32 = 5;

/// Shift a calendar month by `offset`, carrying the year through the wrap.
/// `month` is 1-based.
fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + offset;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

fn month_start(year: i32, month: u32) -> NaiveDate {
    // month is always 1-12 here
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// `[first of month, first of next month)` with correct year rollover.
fn month_range(year: i32, month: u32) -> DateRange {
    let (next_year, next_month) = shift_month(year, month, 1);
    DateRange::between(month_start(year, month), month_start(next_year, next_month))
}

/// Compute the full dashboard for one user at reference date `now`.
pub fn compute_insights<S: TransactionStore>(
    store: &S,
    user_id: &str,
    now: NaiveDate,
) -> Result<Dashboard> {
    // Lifetime totals
    let total_income = store.sum_where(user_id, TransactionKind::Income, None)?;
    let total_expense = store.sum_where(user_id, TransactionKind::Expense, None)?;

    // Rolling windows
    let income_window = store.find_where(
        user_id,
        TransactionKind::Income,
        Some(DateRange::since(now - Duration::days(60))),
        None,
    )?;
    let income_window_total: f64 = income_window.iter().map(|t| t.amount).sum();

    let expense_window = store.find_where(
        user_id,
        TransactionKind::Expense,
        Some(DateRange::since(now - Duration::days(30))),
        None,
    )?;
    let expense_window_total: f64 = expense_window.iter().map(|t| t.amount).sum();

    // Recent activity: newest five of each kind, merged. The sort is stable,
    // so same-date entries keep merge order (income before expense).
    let mut recent: Vec<RecentTransaction> = store
        .find_where(user_id, TransactionKind::Income, None, Some(RECENT_PER_KIND))?
        .into_iter()
        .map(|transaction| RecentTransaction {
            kind: TransactionKind::Income,
            transaction,
        })
        .chain(
            store
                .find_where(
                    user_id,
                    TransactionKind::Expense,
                    None,
                    Some(RECENT_PER_KIND),
                )?
                .into_iter()
                .map(|transaction| RecentTransaction {
                    kind: TransactionKind::Expense,
                    transaction,
                }),
        )
        .collect();
    recent.sort_by(|a, b| b.transaction.date.cmp(&a.transaction.date));

    // Calendar-month breakdowns
    let per_category = store.group_sum_by_category(
        user_id,
        TransactionKind::Expense,
        Some(month_range(now.year(), now.month())),
    )?;

    let (last_year, last_month_num) = shift_month(now.year(), now.month(), -1);
    let last_month = store.sum_where(
        user_id,
        TransactionKind::Expense,
        Some(month_range(last_year, last_month_num)),
    )?;

    // The rolling 30-day total stands in for "this month" in the comparison
    let this_month = expense_window_total;
    let change_percent = if last_month > 0.0 {
        Some((this_month - last_month) / last_month * 100.0)
    } else {
        None
    };

    let (top_category, top_category_amount) = match per_category.first() {
        Some(entry) => (entry.category.clone(), entry.total),
        None => (NO_TOP_CATEGORY.to_string(), 0.0),
    };

    let largest_expense = store
        .find_top_by_amount(user_id, TransactionKind::Expense)?
        .map(|t| TransactionHighlight {
            amount: t.amount,
            category: t.category,
        });
    let largest_income = store
        .find_top_by_amount(user_id, TransactionKind::Income)?
        .map(|t| TransactionHighlight {
            amount: t.amount,
            category: t.category,
        });

    let income_per_category =
        store.group_sum_by_category(user_id, TransactionKind::Income, None)?;

    // Three calendar months ending at `now`, oldest first, 0 for empty
    // months. The year travels with the month offset, so a January reference
    // date reaches back into the prior year.
    let mut trend_3_months = Vec::with_capacity(3);
    for offset in [-2i32, -1, 0] {
        let (year, month) = shift_month(now.year(), now.month(), offset);
        let total = store.sum_where(
            user_id,
            TransactionKind::Expense,
            Some(month_range(year, month)),
        )?;
        trend_3_months.push(total);
    }

    let summary = format!(
        "In {}, your top spending was {} (${:.2}).{}",
        now.format("%B"),
        top_category,
        top_category_amount,
        if last_month > 0.0 {
            ""
        } else {
            " No data last month."
        }
    );

    debug!(
        user_id,
        %now,
        total_income,
        total_expense,
        top_category = %top_category,
        "computed dashboard insights"
    );

    Ok(Dashboard {
        total_balance: total_income - total_expense,
        total_income,
        total_expense,
        last_60_days_income: WindowSummary {
            total: income_window_total,
            transactions: income_window,
        },
        last_30_days_expense: WindowSummary {
            total: expense_window_total,
            transactions: expense_window,
        },
        recent_transactions: recent,
        insights: SpendingInsights {
            per_category,
            this_month,
            last_month,
            top_category,
            top_category_amount,
            change_percent,
            summary,
            largest_expense,
            largest_income,
            income_per_category,
            trend_3_months,
        },
    })
}
