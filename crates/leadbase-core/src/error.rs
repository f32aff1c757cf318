//! Error types for `leadbase-core`.

use thiserror::Error;

use crate::company::CompanyId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("company not found: {0}")]
  NotFound(CompanyId),

  #[error("invalid company payload: {0}")]
  Validation(String),

  #[error("registry number already in use: {0}")]
  DuplicateRegistry(String),

  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
