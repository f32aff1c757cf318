//! The scoring engine — a pure function from a company's classification
//! attributes to a lead score in `[0, 100]`.
//!
//! Additive point system: size-class base points, flat bonuses for the three
//! classification flags, a fixed sector bonus table with an explicit default
//! for sectors outside it, and a non-cumulative employee-count bonus. The sum
//! is clamped to 100. All terms are non-negative, so no lower clamp exists.
//!
//! The stored score is overwritten with this function's output on every
//! insert and update; a score arriving in a write payload is never trusted.

use crate::company::{Company, SizeClass};

/// Records scoring at or above this threshold count as high-value leads.
pub const HIGH_VALUE_THRESHOLD: u8 = 70;

/// Sector bonus table. Sector names are exact-match; anything outside the
/// table falls back to [`DEFAULT_SECTOR_BONUS`].
const SECTOR_BONUS: &[(&str, u16)] = &[
  ("Overheid", 25),
  ("Financiële dienstverlening", 20),
  ("Gezondheidszorg", 20),
  ("ICT & Technologie", 20),
  ("Energie & Utilities", 15),
  ("Industrie & Productie", 15),
  ("Transport & Logistiek", 12),
  ("Zakelijke dienstverlening", 10),
  ("Bouw & Vastgoed", 10),
  ("Onderwijs", 10),
  ("Retail & E-commerce", 8),
  ("Horeca & Recreatie", 5),
];

/// Bonus for any sector not in [`SECTOR_BONUS`].
const DEFAULT_SECTOR_BONUS: u16 = 5;

fn size_points(size: SizeClass) -> u16 {
  match size {
    SizeClass::Enterprise => 30,
    SizeClass::Large => 25,
    SizeClass::Medium => 15,
    SizeClass::Small => 5,
    SizeClass::Micro => 0,
  }
}

fn sector_bonus(sector: &str) -> u16 {
  SECTOR_BONUS
    .iter()
    .find(|(name, _)| *name == sector)
    .map(|(_, bonus)| *bonus)
    .unwrap_or(DEFAULT_SECTOR_BONUS)
}

/// Independent of the size-class base points; a missing count contributes 0.
fn employee_bonus(employee_count: Option<u32>) -> u16 {
  match employee_count {
    Some(n) if n >= 1000 => 10,
    Some(n) if n >= 500 => 7,
    Some(n) if n >= 100 => 4,
    _ => 0,
  }
}

/// Compute the lead score for `company`.
///
/// Pure and deterministic: depends only on the record's own fields, never on
/// stored state.
pub fn lead_score(company: &Company) -> u8 {
  let mut score = size_points(company.size);

  if company.is_government {
    score += 25;
  }
  if company.is_enterprise {
    score += 20;
  }
  if company.is_tech {
    score += 15;
  }

  score += sector_bonus(&company.sector);
  score += employee_bonus(company.employee_count);

  score.min(100) as u8
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::company::{Company, LeadStatus, SizeClass};

  fn company(size: SizeClass, sector: &str) -> Company {
    let now = Utc::now();
    Company {
      id:               1,
      name:             "Testbedrijf".into(),
      registry_number:  None,
      sector:           sector.into(),
      subsector:        None,
      size,
      employee_count:   None,
      revenue_estimate: None,
      city:             "Utrecht".into(),
      province:         "Utrecht".into(),
      address:          None,
      postal_code:      None,
      website:          None,
      email:            None,
      phone:            None,
      description:      None,
      is_government:    false,
      is_enterprise:    false,
      is_tech:          false,
      lead_score:       0,
      status:           LeadStatus::New,
      notes:            None,
      created_at:       now,
      updated_at:       now,
    }
  }

  #[test]
  fn maxed_out_company_clamps_to_100() {
    let mut c = company(SizeClass::Enterprise, "Overheid");
    c.is_government = true;
    c.is_enterprise = true;
    c.is_tech = true;
    c.employee_count = Some(1500);

    // 30 + 25 + 20 + 15 + 25 + 10 = 125, clamped.
    assert_eq!(lead_score(&c), 100);
  }

  #[test]
  fn micro_unknown_sector_scores_default_bonus_only() {
    let c = company(SizeClass::Micro, "Ruimtevaart");
    assert_eq!(lead_score(&c), 5);
  }

  #[test]
  fn size_base_points() {
    // Neutralise the sector term by holding it at the default bonus.
    let base = |size| lead_score(&company(size, "Ruimtevaart")) - 5;
    assert_eq!(base(SizeClass::Micro), 0);
    assert_eq!(base(SizeClass::Small), 5);
    assert_eq!(base(SizeClass::Medium), 15);
    assert_eq!(base(SizeClass::Large), 25);
    assert_eq!(base(SizeClass::Enterprise), 30);
  }

  #[test]
  fn flag_bonuses_are_additive() {
    let mut c = company(SizeClass::Micro, "Ruimtevaart");
    let base = lead_score(&c);

    c.is_government = true;
    assert_eq!(lead_score(&c), base + 25);

    c.is_enterprise = true;
    assert_eq!(lead_score(&c), base + 25 + 20);

    c.is_tech = true;
    assert_eq!(lead_score(&c), base + 25 + 20 + 15);
  }

  #[test]
  fn sector_table_lookup_and_fallback() {
    assert_eq!(lead_score(&company(SizeClass::Micro, "Overheid")), 25);
    assert_eq!(
      lead_score(&company(SizeClass::Micro, "Horeca & Recreatie")),
      5
    );
    // Case-sensitive exact match: a near miss takes the default branch.
    assert_eq!(lead_score(&company(SizeClass::Micro, "overheid")), 5);
  }

  #[test]
  fn employee_bonus_thresholds() {
    let scored = |count| {
      let mut c = company(SizeClass::Micro, "Ruimtevaart");
      c.employee_count = count;
      lead_score(&c) - 5
    };
    assert_eq!(scored(None), 0);
    assert_eq!(scored(Some(0)), 0);
    assert_eq!(scored(Some(99)), 0);
    assert_eq!(scored(Some(100)), 4);
    assert_eq!(scored(Some(499)), 4);
    assert_eq!(scored(Some(500)), 7);
    assert_eq!(scored(Some(999)), 7);
    assert_eq!(scored(Some(1000)), 10);
  }

  #[test]
  fn score_is_monotone_in_each_factor() {
    let sizes = SizeClass::ALL;
    for window in sizes.windows(2) {
      let lo = lead_score(&company(window[0], "Overheid"));
      let hi = lead_score(&company(window[1], "Overheid"));
      assert!(hi >= lo, "{:?} -> {:?} decreased the score", window[0], window[1]);
    }

    let mut c = company(SizeClass::Large, "Gezondheidszorg");
    let unflagged = lead_score(&c);
    c.is_government = true;
    c.is_enterprise = true;
    c.is_tech = true;
    assert!(lead_score(&c) >= unflagged);
  }
}
