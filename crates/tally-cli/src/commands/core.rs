//! Init, status, and suggest commands

use std::path::Path;

use anyhow::Result;

use tally_core::classify::CategoryRules;
use tally_core::models::TransactionKind;

use super::open_db;

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    println!("Initialized database at {}", db.path());
    if no_encrypt {
        println!("⚠️  Encryption DISABLED (--no-encrypt)");
    }
    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool, user: &str) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;

    let income = db.count_transactions(user, TransactionKind::Income)?;
    let expense = db.count_transactions(user, TransactionKind::Expense)?;

    println!("Database: {}", db.path());
    println!("User:     {}", user);
    println!("  income transactions:  {}", income);
    println!("  expense transactions: {}", expense);
    Ok(())
}

pub fn cmd_suggest(description: &str, merchant: &str, fuzzy: bool) -> Result<()> {
    let rules = CategoryRules::builtin();
    println!("{}", rules.suggest(description, merchant, fuzzy));
    Ok(())
}
