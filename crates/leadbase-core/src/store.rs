//! The `CompanyStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `leadbase-store-sqlite`). Higher layers (`leadbase-api`,
//! `leadbase-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  company::{Company, CompanyId, CompanyPatch, NewCompany},
  filter::CompanyFilter,
};

/// Abstraction over a Leadbase storage backend.
///
/// The store owns score derivation: every insert and update recomputes the
/// lead score from the written record's attributes, so a caller-supplied
/// score can never be persisted.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). Backend errors
/// must convert into [`crate::Error`] so the API boundary can translate
/// not-found and duplicate-key conditions into distinct status signals.
pub trait CompanyStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Persist a new company: assign an id and timestamps, derive the lead
  /// score, and store the record.
  ///
  /// Fails with a duplicate-registry error if the payload's registry number
  /// is already taken. The payload is assumed to have passed
  /// [`NewCompany::validate`] at the boundary.
  fn insert(
    &self,
    input: NewCompany,
  ) -> impl Future<Output = Result<Company, Self::Error>> + Send + '_;

  /// Retrieve a company by id. Returns `None` if not found.
  fn get(
    &self,
    id: CompanyId,
  ) -> impl Future<Output = Result<Option<Company>, Self::Error>> + Send + '_;

  /// List all companies in insertion order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Company>, Self::Error>> + Send + '_;

  /// Return the companies matching `filter` in display order (score
  /// descending, name ascending, id ascending).
  fn search<'a>(
    &'a self,
    filter: &'a CompanyFilter,
  ) -> impl Future<Output = Result<Vec<Company>, Self::Error>> + Send + 'a;

  /// Merge `patch` into the stored record, re-derive the lead score,
  /// refresh `updated_at`, and persist — atomically, so readers never
  /// observe a partially-applied update.
  ///
  /// Fails with a not-found error if `id` is absent, and with a
  /// duplicate-registry error if the patched registry number belongs to a
  /// different record.
  fn update(
    &self,
    id: CompanyId,
    patch: CompanyPatch,
  ) -> impl Future<Output = Result<Company, Self::Error>> + Send + '_;

  /// Delete a company. Fails with a not-found error if `id` is absent —
  /// never a silent no-op.
  fn delete(
    &self,
    id: CompanyId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
