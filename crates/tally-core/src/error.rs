//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Store unavailable: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Store unavailable: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// True when the underlying data access layer failed (as opposed to a
    /// problem with the request itself). These propagate to callers unchanged;
    /// retry policy belongs to the store, not to the aggregator.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Pool(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failures_are_store_unavailable() {
        let err = Error::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.is_store_unavailable());
        assert!(err.to_string().starts_with("Store unavailable"));

        let err = Error::InvalidData("bad amount".to_string());
        assert!(!err.is_store_unavailable());
    }
}
