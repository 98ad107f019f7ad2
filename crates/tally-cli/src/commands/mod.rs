//! Command implementations

mod core;
mod serve;

pub use self::core::{cmd_init, cmd_status, cmd_suggest};
pub use self::serve::cmd_serve;

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::Database;

/// Open the database, creating parent directories as needed.
pub(crate) fn open_db(path: &Path, no_encrypt: bool) -> Result<Database> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let path_str = path.to_string_lossy();
    let db = if no_encrypt {
        Database::new_unencrypted(&path_str)?
    } else {
        Database::new(&path_str)?
    };
    Ok(db)
}
