//! Handlers for `/companies` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/companies` | Query params = filter spec; sorted result |
//! | `POST`   | `/companies` | Body: [`NewCompany`]; 201 + stored record |
//! | `GET`    | `/companies/:id` | 404 if not found |
//! | `PUT`    | `/companies/:id` | Body: [`CompanyPatch`]; 404/409 |
//! | `DELETE` | `/companies/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use leadbase_core::{
  company::{Company, CompanyId, CompanyPatch, NewCompany},
  filter::CompanyFilter,
  store::CompanyStore,
};
use serde_json::json;

use crate::error::ApiError;

// ─── List / search ───────────────────────────────────────────────────────────

/// `GET /companies[?q=...][&sector=...][&minScore=...][&isGovernment=true]...`
///
/// Returns the matching records sorted by lead score descending, name
/// ascending.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(filter): Query<CompanyFilter>,
) -> Result<Json<Vec<Company>>, ApiError>
where
  S: CompanyStore,
{
  let companies = store
    .search(&filter)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(companies))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /companies` — body: [`NewCompany`].
///
/// Required fields are checked here, before anything touches the store; the
/// lead score is derived server-side regardless of the payload.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(input): Json<NewCompany>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CompanyStore,
{
  input.validate().map_err(ApiError::from_store)?;

  let company = store.insert(input).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(company)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /companies/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<CompanyId>,
) -> Result<Json<Company>, ApiError>
where
  S: CompanyStore,
{
  let company = store
    .get(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("company {id} not found")))?;
  Ok(Json(company))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /companies/:id` — body: [`CompanyPatch`].
///
/// Fields absent from the body keep their stored values; the lead score and
/// `updated_at` are re-derived after the merge.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<CompanyId>,
  Json(patch): Json<CompanyPatch>,
) -> Result<Json<Company>, ApiError>
where
  S: CompanyStore,
{
  let company = store
    .update(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(company))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /companies/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<CompanyId>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CompanyStore,
{
  store.delete(id).await.map_err(ApiError::from_store)?;
  Ok(Json(json!({ "success": true })))
}
