//! SQLite backend for the Leadbase lead store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. The single connection also gives
//! the single-writer semantics the domain assumes: every statement runs
//! serialised on the connection's worker thread.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
