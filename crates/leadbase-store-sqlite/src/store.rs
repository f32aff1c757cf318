//! [`SqliteStore`] — the SQLite implementation of [`CompanyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use leadbase_core::{
  company::{Company, CompanyId, CompanyPatch, NewCompany, apply_patch},
  filter::{self, CompanyFilter},
  score,
  store::CompanyStore,
};

use crate::{
  Error, Result,
  encode::{RawCompany, encode_dt, encode_size, encode_status},
  schema::SCHEMA,
};

/// The full column list of the `companies` table, in the order
/// [`RawCompany::from_row`] reads it.
const COLUMNS: &str = "id, name, registry_number, sector, subsector, size, \
   employee_count, revenue_estimate, city, province, address, postal_code, \
   website, email, phone, description, is_government, is_enterprise, \
   is_tech, lead_score, status, notes, created_at, updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Leadbase store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All SQL
/// runs serialised on the connection's worker thread, which is what makes
/// the merge-then-recompute update appear atomic to readers.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Find the id of the record currently holding `registry`, if any.
  ///
  /// Insert and update both pre-check through this; the `UNIQUE` constraint
  /// on the column remains as a backstop.
  async fn registry_owner(&self, registry: String) -> Result<Option<CompanyId>> {
    let owner: Option<CompanyId> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id FROM companies WHERE registry_number = ?1",
              rusqlite::params![registry],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(owner)
  }
}

// ─── CompanyStore impl ───────────────────────────────────────────────────────

impl CompanyStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, input: NewCompany) -> Result<Company> {
    if let Some(registry) = &input.registry_number
      && self.registry_owner(registry.clone()).await?.is_some()
    {
      return Err(Error::DuplicateRegistry(registry.clone()));
    }

    // Score and timestamps are derived here; the row id comes back from
    // SQLite once the insert lands.
    let company = input.into_company(0, Utc::now());

    let company = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO companies (
             name, registry_number, sector, subsector, size,
             employee_count, revenue_estimate, city, province, address,
             postal_code, website, email, phone, description,
             is_government, is_enterprise, is_tech, lead_score, status,
             notes, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
          rusqlite::params![
            company.name,
            company.registry_number,
            company.sector,
            company.subsector,
            encode_size(company.size),
            company.employee_count,
            company.revenue_estimate,
            company.city,
            company.province,
            company.address,
            company.postal_code,
            company.website,
            company.email,
            company.phone,
            company.description,
            company.is_government,
            company.is_enterprise,
            company.is_tech,
            company.lead_score,
            encode_status(company.status),
            company.notes,
            encode_dt(company.created_at),
            encode_dt(company.updated_at),
          ],
        )?;

        let mut company = company;
        company.id = conn.last_insert_rowid();
        Ok(company)
      })
      .await?;

    tracing::debug!(
      id = company.id,
      score = company.lead_score,
      "inserted company"
    );
    Ok(company)
  }

  async fn get(&self, id: CompanyId) -> Result<Option<Company>> {
    let raw: Option<RawCompany> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM companies WHERE id = ?1"),
              rusqlite::params![id],
              RawCompany::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCompany::into_company).transpose()
  }

  async fn list(&self) -> Result<Vec<Company>> {
    let raws: Vec<RawCompany> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {COLUMNS} FROM companies ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawCompany::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompany::into_company).collect()
  }

  async fn search(&self, company_filter: &CompanyFilter) -> Result<Vec<Company>> {
    // The predicate and ordering live in the core engine; at the intended
    // data volumes a full scan is fine (see the schema indexes otherwise).
    let companies = self.list().await?;
    Ok(filter::search(companies, company_filter))
  }

  async fn update(&self, id: CompanyId, patch: CompanyPatch) -> Result<Company> {
    let existing = self.get(id).await?.ok_or(Error::NotFound(id))?;

    if let Some(registry) = &patch.registry_number
      && let Some(owner) = self.registry_owner(registry.clone()).await?
      && owner != id
    {
      return Err(Error::DuplicateRegistry(registry.clone()));
    }

    let mut merged = apply_patch(&existing, patch);
    merged.lead_score = score::lead_score(&merged);
    merged.updated_at = Utc::now();

    let (changed, merged) = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE companies SET
             name = ?1, registry_number = ?2, sector = ?3, subsector = ?4,
             size = ?5, employee_count = ?6, revenue_estimate = ?7,
             city = ?8, province = ?9, address = ?10, postal_code = ?11,
             website = ?12, email = ?13, phone = ?14, description = ?15,
             is_government = ?16, is_enterprise = ?17, is_tech = ?18,
             lead_score = ?19, status = ?20, notes = ?21, updated_at = ?22
           WHERE id = ?23",
          rusqlite::params![
            merged.name,
            merged.registry_number,
            merged.sector,
            merged.subsector,
            encode_size(merged.size),
            merged.employee_count,
            merged.revenue_estimate,
            merged.city,
            merged.province,
            merged.address,
            merged.postal_code,
            merged.website,
            merged.email,
            merged.phone,
            merged.description,
            merged.is_government,
            merged.is_enterprise,
            merged.is_tech,
            merged.lead_score,
            encode_status(merged.status),
            merged.notes,
            encode_dt(merged.updated_at),
            merged.id,
          ],
        )?;
        Ok((changed, merged))
      })
      .await?;

    // The row can vanish between the read above and this write; a zero
    // count must surface as not-found, never as a phantom success.
    if changed == 0 {
      return Err(Error::NotFound(id));
    }

    tracing::debug!(id = merged.id, score = merged.lead_score, "updated company");
    Ok(merged)
  }

  async fn delete(&self, id: CompanyId) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM companies WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotFound(id));
    }

    tracing::debug!(id, "deleted company");
    Ok(())
  }
}
