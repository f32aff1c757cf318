//! Company — the sole entity of the lead store.
//!
//! A company carries classification attributes (sector, size class, three
//! boolean flags) from which a deterministic lead score is derived on every
//! write. The score is never accepted from a caller; see [`crate::score`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Row identifier, assigned by the store on insert and immutable afterwards.
pub type CompanyId = i64;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Coarse employee-count-derived size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
  Micro,
  Small,
  Medium,
  Large,
  Enterprise,
}

impl SizeClass {
  /// All size classes, smallest first. Used to populate selection controls.
  pub const ALL: [SizeClass; 5] = [
    SizeClass::Micro,
    SizeClass::Small,
    SizeClass::Medium,
    SizeClass::Large,
    SizeClass::Enterprise,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      SizeClass::Micro => "micro",
      SizeClass::Small => "small",
      SizeClass::Medium => "medium",
      SizeClass::Large => "large",
      SizeClass::Enterprise => "enterprise",
    }
  }
}

/// Position of a lead in the sales pipeline. `Ord` follows pipeline order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
  #[default]
  New,
  Contacted,
  Qualified,
  Proposal,
  Negotiation,
  Won,
  Lost,
}

impl LeadStatus {
  /// All statuses, pipeline order. Used to populate selection controls.
  pub const ALL: [LeadStatus; 7] = [
    LeadStatus::New,
    LeadStatus::Contacted,
    LeadStatus::Qualified,
    LeadStatus::Proposal,
    LeadStatus::Negotiation,
    LeadStatus::Won,
    LeadStatus::Lost,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      LeadStatus::New => "new",
      LeadStatus::Contacted => "contacted",
      LeadStatus::Qualified => "qualified",
      LeadStatus::Proposal => "proposal",
      LeadStatus::Negotiation => "negotiation",
      LeadStatus::Won => "won",
      LeadStatus::Lost => "lost",
    }
  }
}

// ─── Company ─────────────────────────────────────────────────────────────────

/// A stored company record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
  pub id:               CompanyId,
  pub name:             String,
  /// National registry number (KVK). Unique across records when present.
  pub registry_number:  Option<String>,
  pub sector:           String,
  pub subsector:        Option<String>,
  pub size:             SizeClass,
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
  /// Derived, 0–100. Always the output of [`crate::score::lead_score`]
  /// applied to the record's current attributes.
  pub lead_score:       u8,
  pub status:           LeadStatus,
  pub notes:            Option<String>,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

// ─── Insert payload ──────────────────────────────────────────────────────────

/// Payload for creating a company. No id, score, or timestamps — those are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
  pub name:             String,
  pub registry_number:  Option<String>,
  pub sector:           String,
  pub subsector:        Option<String>,
  pub size:             SizeClass,
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
  #[serde(default)]
  pub is_government:    bool,
  #[serde(default)]
  pub is_enterprise:    bool,
  #[serde(default)]
  pub is_tech:          bool,
  #[serde(default)]
  pub status:           LeadStatus,
  pub notes:            Option<String>,
}

impl NewCompany {
  /// Check required-field presence. Malformed numerics and unknown enum
  /// values never reach this point — they fail deserialisation.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("name", &self.name),
      ("sector", &self.sector),
      ("city", &self.city),
      ("province", &self.province),
    ] {
      if value.trim().is_empty() {
        return Err(Error::Validation(format!(
          "required field {field:?} is missing or empty"
        )));
      }
    }
    Ok(())
  }

  /// Build the stored record: assign identity and timestamps, then derive
  /// the lead score from the classification attributes.
  pub fn into_company(self, id: CompanyId, now: DateTime<Utc>) -> Company {
    let mut company = Company {
      id,
      name: self.name,
      registry_number: self.registry_number,
      sector: self.sector,
      subsector: self.subsector,
      size: self.size,
      employee_count: self.employee_count,
      revenue_estimate: self.revenue_estimate,
      city: self.city,
      province: self.province,
      address: self.address,
      postal_code: self.postal_code,
      website: self.website,
      email: self.email,
      phone: self.phone,
      description: self.description,
      is_government: self.is_government,
      is_enterprise: self.is_enterprise,
      is_tech: self.is_tech,
      lead_score: 0,
      status: self.status,
      notes: self.notes,
      created_at: now,
      updated_at: now,
    };
    company.lead_score = crate::score::lead_score(&company);
    company
  }
}

// ─── Partial update ──────────────────────────────────────────────────────────

/// Partial update for a company. A field absent from the patch keeps its
/// stored value; a present field replaces it. A lead score in the payload is
/// ignored — the score is always re-derived after the merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyPatch {
  pub name:             Option<String>,
  pub registry_number:  Option<String>,
  pub sector:           Option<String>,
  pub subsector:        Option<String>,
  pub size:             Option<SizeClass>,
  pub employee_count:   Option<u32>,
  pub revenue_estimate: Option<String>,
  pub city:             Option<String>,
  pub province:         Option<String>,
  pub address:          Option<String>,
  pub postal_code:      Option<String>,
  pub website:          Option<String>,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub description:      Option<String>,
  pub is_government:    Option<bool>,
  pub is_enterprise:    Option<bool>,
  pub is_tech:          Option<bool>,
  pub status:           Option<LeadStatus>,
  pub notes:            Option<String>,
}

/// Merge `patch` into `existing`, returning the new record value.
///
/// Pure: identity and `created_at` are untouched, and no score or
/// `updated_at` derivation happens here. The caller re-derives the score
/// (via [`crate::score::lead_score`]) and refreshes `updated_at` after the
/// merge, so mutation order can never produce a stale score.
pub fn apply_patch(existing: &Company, patch: CompanyPatch) -> Company {
  let mut merged = existing.clone();

  if let Some(v) = patch.name {
    merged.name = v;
  }
  if let Some(v) = patch.registry_number {
    merged.registry_number = Some(v);
  }
  if let Some(v) = patch.sector {
    merged.sector = v;
  }
  if let Some(v) = patch.subsector {
    merged.subsector = Some(v);
  }
  if let Some(v) = patch.size {
    merged.size = v;
  }
  if let Some(v) = patch.employee_count {
    merged.employee_count = Some(v);
  }
  if let Some(v) = patch.revenue_estimate {
    merged.revenue_estimate = Some(v);
  }
  if let Some(v) = patch.city {
    merged.city = v;
  }
  if let Some(v) = patch.province {
    merged.province = v;
  }
  if let Some(v) = patch.address {
    merged.address = Some(v);
  }
  if let Some(v) = patch.postal_code {
    merged.postal_code = Some(v);
  }
  if let Some(v) = patch.website {
    merged.website = Some(v);
  }
  if let Some(v) = patch.email {
    merged.email = Some(v);
  }
  if let Some(v) = patch.phone {
    merged.phone = Some(v);
  }
  if let Some(v) = patch.description {
    merged.description = Some(v);
  }
  if let Some(v) = patch.is_government {
    merged.is_government = v;
  }
  if let Some(v) = patch.is_enterprise {
    merged.is_enterprise = v;
  }
  if let Some(v) = patch.is_tech {
    merged.is_tech = v;
  }
  if let Some(v) = patch.status {
    merged.status = v;
  }
  if let Some(v) = patch.notes {
    merged.notes = Some(v);
  }

  merged
}
