//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Size classes and statuses are
//! stored as their lowercase names; booleans as SQLite integers (handled by
//! rusqlite directly).

use chrono::{DateTime, Utc};
use leadbase_core::company::{Company, LeadStatus, SizeClass};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── SizeClass ───────────────────────────────────────────────────────────────

pub fn encode_size(size: SizeClass) -> &'static str { size.as_str() }

pub fn decode_size(s: &str) -> Result<SizeClass> {
  match s {
    "micro" => Ok(SizeClass::Micro),
    "small" => Ok(SizeClass::Small),
    "medium" => Ok(SizeClass::Medium),
    "large" => Ok(SizeClass::Large),
    "enterprise" => Ok(SizeClass::Enterprise),
    other => Err(Error::Decode(format!("unknown size class: {other:?}"))),
  }
}

// ─── LeadStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(status: LeadStatus) -> &'static str { status.as_str() }

pub fn decode_status(s: &str) -> Result<LeadStatus> {
  match s {
    "new" => Ok(LeadStatus::New),
    "contacted" => Ok(LeadStatus::Contacted),
    "qualified" => Ok(LeadStatus::Qualified),
    "proposal" => Ok(LeadStatus::Proposal),
    "negotiation" => Ok(LeadStatus::Negotiation),
    "won" => Ok(LeadStatus::Won),
    "lost" => Ok(LeadStatus::Lost),
    other => Err(Error::Decode(format!("unknown lead status: {other:?}"))),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `companies` row.
pub struct RawCompany {
  pub id:               i64,
  pub name:             String,
  pub registry_number:  Option<String>,
  pub sector:           String,
  pub subsector:        Option<String>,
  pub size:             String,
  pub employee_count:   Option<u32>,
  pub revenue_estimate: Option<String>,
  pub city:             String,
  pub province:         String,
  pub address:          Option<String>,
  pub postal_code:      Option<String>,
  pub website:          Option<String>,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub description:      Option<String>,
  pub is_government:    bool,
  pub is_enterprise:    bool,
  pub is_tech:          bool,
  pub lead_score:       u8,
  pub status:           String,
  pub notes:            Option<String>,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawCompany {
  /// Read all columns of the standard `SELECT` list in declaration order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawCompany {
      id:               row.get(0)?,
      name:             row.get(1)?,
      registry_number:  row.get(2)?,
      sector:           row.get(3)?,
      subsector:        row.get(4)?,
      size:             row.get(5)?,
      employee_count:   row.get(6)?,
      revenue_estimate: row.get(7)?,
      city:             row.get(8)?,
      province:         row.get(9)?,
      address:          row.get(10)?,
      postal_code:      row.get(11)?,
      website:          row.get(12)?,
      email:            row.get(13)?,
      phone:            row.get(14)?,
      description:      row.get(15)?,
      is_government:    row.get(16)?,
      is_enterprise:    row.get(17)?,
      is_tech:          row.get(18)?,
      lead_score:       row.get(19)?,
      status:           row.get(20)?,
      notes:            row.get(21)?,
      created_at:       row.get(22)?,
      updated_at:       row.get(23)?,
    })
  }

  pub fn into_company(self) -> Result<Company> {
    Ok(Company {
      id:               self.id,
      name:             self.name,
      registry_number:  self.registry_number,
      sector:           self.sector,
      subsector:        self.subsector,
      size:             decode_size(&self.size)?,
      employee_count:   self.employee_count,
      revenue_estimate: self.revenue_estimate,
      city:             self.city,
      province:         self.province,
      address:          self.address,
      postal_code:      self.postal_code,
      website:          self.website,
      email:            self.email,
      phone:            self.phone,
      description:      self.description,
      is_government:    self.is_government,
      is_enterprise:    self.is_enterprise,
      is_tech:          self.is_tech,
      lead_score:       self.lead_score,
      status:           decode_status(&self.status)?,
      notes:            self.notes,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}
