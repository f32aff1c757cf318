//! JSON REST API for Leadbase.
//!
//! Exposes an axum [`Router`] backed by any
//! [`leadbase_core::store::CompanyStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", leadbase_api::api_router(store.clone()))
//! ```

pub mod companies;
pub mod error;
pub mod export;
pub mod stats;

use std::sync::Arc;

use axum::{Router, routing::get};
use leadbase_core::store::CompanyStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CompanyStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Companies
    .route(
      "/companies",
      get(companies::list::<S>).post(companies::create::<S>),
    )
    .route(
      "/companies/{id}",
      get(companies::get_one::<S>)
        .put(companies::update_one::<S>)
        .delete(companies::delete_one::<S>),
    )
    // Aggregation
    .route("/filters", get(stats::options::<S>))
    .route("/stats", get(stats::summary::<S>))
    // Export
    .route("/export", get(export::download::<S>))
    .with_state(store)
}
