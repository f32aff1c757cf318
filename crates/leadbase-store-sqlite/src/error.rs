//! Error type for `leadbase-store-sqlite`.

use leadbase_core::company::CompanyId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored column value failed to decode into its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("company not found: {0}")]
  NotFound(CompanyId),

  #[error("registry number already in use: {0}")]
  DuplicateRegistry(String),
}

/// Lossy mapping into the core taxonomy, used by the API boundary to pick
/// status codes. Database and decode failures collapse into `Storage`.
impl From<Error> for leadbase_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NotFound(id) => leadbase_core::Error::NotFound(id),
      Error::DuplicateRegistry(r) => {
        leadbase_core::Error::DuplicateRegistry(r)
      }
      other => leadbase_core::Error::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
