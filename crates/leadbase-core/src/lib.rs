//! Core types and trait definitions for the Leadbase lead store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod company;
pub mod error;
pub mod filter;
pub mod score;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
