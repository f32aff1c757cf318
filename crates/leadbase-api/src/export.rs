//! Handler for `GET /export` — CSV download of the filtered company list.
//!
//! Accepts the same query parameters as `GET /companies` and emits a header
//! row plus one row per matching record, in display order. Text fields are
//! quoted by the csv writer as needed.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use chrono::Utc;
use leadbase_core::{
  company::Company, filter::CompanyFilter, store::CompanyStore,
};

use crate::error::ApiError;

const CSV_HEADER: [&str; 16] = [
  "ID",
  "Name",
  "Registry",
  "Sector",
  "Size",
  "Employees",
  "City",
  "Province",
  "Website",
  "Email",
  "Phone",
  "Lead Score",
  "Status",
  "Government",
  "Enterprise",
  "Tech",
];

fn yes_no(flag: bool) -> &'static str {
  if flag { "Yes" } else { "No" }
}

fn write_rows(companies: &[Company]) -> Result<Vec<u8>, csv::Error> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  writer.write_record(CSV_HEADER)?;

  for c in companies {
    writer.write_record([
      c.id.to_string(),
      c.name.clone(),
      c.registry_number.clone().unwrap_or_default(),
      c.sector.clone(),
      c.size.as_str().to_owned(),
      c.employee_count.map(|n| n.to_string()).unwrap_or_default(),
      c.city.clone(),
      c.province.clone(),
      c.website.clone().unwrap_or_default(),
      c.email.clone().unwrap_or_default(),
      c.phone.clone().unwrap_or_default(),
      c.lead_score.to_string(),
      c.status.as_str().to_owned(),
      yes_no(c.is_government).to_owned(),
      yes_no(c.is_enterprise).to_owned(),
      yes_no(c.is_tech).to_owned(),
    ])?;
  }

  writer
    .into_inner()
    .map_err(|e| csv::Error::from(e.into_error()))
}

/// `GET /export[?q=...][&sector=...]...` — same filter spec as the list
/// endpoint.
pub async fn download<S>(
  State(store): State<Arc<S>>,
  Query(filter): Query<CompanyFilter>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CompanyStore,
{
  let companies = store
    .search(&filter)
    .await
    .map_err(ApiError::from_store)?;

  let body = write_rows(&companies)
    .map_err(|e| ApiError::Internal(format!("csv export failed: {e}")))?;

  let disposition = format!(
    "attachment; filename=\"leads-export-{}.csv\"",
    Utc::now().format("%Y-%m-%d")
  );

  Ok((
    [
      (header::CONTENT_TYPE, "text/csv".to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    body,
  ))
}
