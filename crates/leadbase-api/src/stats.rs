//! Handlers for `/stats` and `/filters` — the aggregation surface.

use std::sync::Arc;

use axum::{Json, extract::State};
use leadbase_core::{
  stats::{self, FilterOptions, StatsSummary},
  store::CompanyStore,
};

use crate::error::ApiError;

/// `GET /stats` — summary statistics over the full collection.
pub async fn summary<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<StatsSummary>, ApiError>
where
  S: CompanyStore,
{
  let companies = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(stats::summarize(&companies)))
}

/// `GET /filters` — the distinct sector/province/city values present plus
/// the fixed size and status enumerations, for populating selection
/// controls.
pub async fn options<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<FilterOptions>, ApiError>
where
  S: CompanyStore,
{
  let companies = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(stats::filter_options(&companies)))
}
