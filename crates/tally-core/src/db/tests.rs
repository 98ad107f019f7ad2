//! Database tests

use chrono::NaiveDate;

use super::*;
use crate::models::{NewTransaction, TransactionKind};
use crate::store::{DateRange, TransactionStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_tx(user: &str, d: NaiveDate, amount: f64, category: &str) -> NewTransaction {
    NewTransaction {
        user_id: user.to_string(),
        date: d,
        description: format!("{} purchase", category),
        merchant: String::new(),
        amount,
        category: category.to_string(),
        suggested_category: category.to_string(),
        icon: None,
    }
}

#[test]
fn test_insert_and_get() {
    let db = Database::in_memory().unwrap();

    let stored = db
        .insert_transaction(
            TransactionKind::Expense,
            &new_tx("u1", date(2025, 3, 10), 12.5, "Food & Drinks"),
        )
        .unwrap();
    assert!(stored.id > 0);
    assert_eq!(stored.amount, 12.5);
    assert_eq!(stored.category, "Food & Drinks");

    let fetched = db
        .get_transaction(TransactionKind::Expense, stored.id)
        .unwrap()
        .unwrap();
    assert_eq!(fetched.date, date(2025, 3, 10));
    assert_eq!(fetched.user_id, "u1");
}

#[test]
fn test_negative_amount_rejected() {
    let db = Database::in_memory().unwrap();
    let err = db
        .insert_transaction(
            TransactionKind::Income,
            &new_tx("u1", date(2025, 3, 1), -5.0, "Salary"),
        )
        .unwrap_err();
    assert!(matches!(err, crate::error::Error::InvalidData(_)));
}

#[test]
fn test_partitions_are_separate() {
    let db = Database::in_memory().unwrap();

    db.insert_transaction(
        TransactionKind::Income,
        &new_tx("u1", date(2025, 3, 1), 1000.0, "Salary"),
    )
    .unwrap();
    db.insert_transaction(
        TransactionKind::Expense,
        &new_tx("u1", date(2025, 3, 2), 40.0, "Transport"),
    )
    .unwrap();

    assert_eq!(db.count_transactions("u1", TransactionKind::Income).unwrap(), 1);
    assert_eq!(db.count_transactions("u1", TransactionKind::Expense).unwrap(), 1);
    assert!(db
        .list_transactions("u1", TransactionKind::Income)
        .unwrap()
        .iter()
        .all(|t| t.category == "Salary"));
}

#[test]
fn test_list_is_newest_first() {
    let db = Database::in_memory().unwrap();

    for (d, amount) in [
        (date(2025, 1, 5), 10.0),
        (date(2025, 3, 5), 30.0),
        (date(2025, 2, 5), 20.0),
    ] {
        db.insert_transaction(
            TransactionKind::Expense,
            &new_tx("u1", d, amount, "Shopping"),
        )
        .unwrap();
    }

    let listed = db.list_transactions("u1", TransactionKind::Expense).unwrap();
    let dates: Vec<NaiveDate> = listed.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 3, 5), date(2025, 2, 5), date(2025, 1, 5)]
    );
}

#[test]
fn test_delete_scoped_to_owner() {
    let db = Database::in_memory().unwrap();

    let tx = db
        .insert_transaction(
            TransactionKind::Expense,
            &new_tx("u1", date(2025, 3, 1), 15.0, "Food & Drinks"),
        )
        .unwrap();

    // Someone else can't delete it
    assert!(!db
        .delete_transaction("u2", TransactionKind::Expense, tx.id)
        .unwrap());
    // The owner can
    assert!(db
        .delete_transaction("u1", TransactionKind::Expense, tx.id)
        .unwrap());
    // And it's gone
    assert!(!db
        .delete_transaction("u1", TransactionKind::Expense, tx.id)
        .unwrap());
}

#[test]
fn test_sum_where_with_range() {
    let db = Database::in_memory().unwrap();

    for (d, amount) in [
        (date(2025, 2, 28), 10.0),
        (date(2025, 3, 1), 20.0),
        (date(2025, 3, 15), 30.0),
        (date(2025, 4, 1), 40.0),
    ] {
        db.insert_transaction(
            TransactionKind::Expense,
            &new_tx("u1", d, amount, "Shopping"),
        )
        .unwrap();
    }

    // Unbounded
    assert_eq!(db.sum_where("u1", TransactionKind::Expense, None).unwrap(), 100.0);
    // [Mar 1, Apr 1): end is exclusive
    let march = DateRange::between(date(2025, 3, 1), date(2025, 4, 1));
    assert_eq!(
        db.sum_where("u1", TransactionKind::Expense, Some(march))
            .unwrap(),
        50.0
    );
    // Open-ended start
    let since = DateRange::since(date(2025, 3, 15));
    assert_eq!(
        db.sum_where("u1", TransactionKind::Expense, Some(since))
            .unwrap(),
        70.0
    );
    // Other users see nothing
    assert_eq!(db.sum_where("u2", TransactionKind::Expense, None).unwrap(), 0.0);
}

#[test]
fn test_find_where_limit() {
    let db = Database::in_memory().unwrap();

    for day in 1..=8 {
        db.insert_transaction(
            TransactionKind::Income,
            &new_tx("u1", date(2025, 3, day), 100.0, "Salary"),
        )
        .unwrap();
    }

    let recent = db
        .find_where("u1", TransactionKind::Income, None, Some(5))
        .unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].date, date(2025, 3, 8));
    assert_eq!(recent[4].date, date(2025, 3, 4));
}

#[test]
fn test_find_top_by_amount() {
    let db = Database::in_memory().unwrap();

    assert!(db
        .find_top_by_amount("u1", TransactionKind::Expense)
        .unwrap()
        .is_none());

    for (d, amount) in [
        (date(2025, 3, 1), 12.0),
        (date(2025, 3, 2), 250.0),
        (date(2025, 3, 3), 99.0),
    ] {
        db.insert_transaction(
            TransactionKind::Expense,
            &new_tx("u1", d, amount, "Shopping"),
        )
        .unwrap();
    }

    let top = db
        .find_top_by_amount("u1", TransactionKind::Expense)
        .unwrap()
        .unwrap();
    assert_eq!(top.amount, 250.0);
}

#[test]
fn test_group_sum_by_category() {
    let db = Database::in_memory().unwrap();

    for (amount, category) in [
        (60.0, "Food & Drinks"),
        (40.0, "Food & Drinks"),
        (50.0, "Transport"),
        (0.0, "Shopping"),
    ] {
        db.insert_transaction(
            TransactionKind::Expense,
            &new_tx("u1", date(2025, 3, 10), amount, category),
        )
        .unwrap();
    }

    let groups = db
        .group_sum_by_category("u1", TransactionKind::Expense, None)
        .unwrap();

    // Descending by sum, zero-aggregate category excluded
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, "Food & Drinks");
    assert_eq!(groups[0].total, 100.0);
    assert_eq!(groups[1].category, "Transport");
    assert_eq!(groups[1].total, 50.0);
}
