//! The aggregation engine — summary statistics and filter-option discovery
//! over the full collection.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
  company::{Company, LeadStatus, SizeClass},
  score::HIGH_VALUE_THRESHOLD,
};

/// Count of records in one pipeline status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
  pub status: LeadStatus,
  pub count:  usize,
}

/// Count of records in one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorCount {
  pub sector: String,
  pub count:  usize,
}

/// Summary statistics over the whole collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
  pub total:            usize,
  /// Mean lead score, rounded to the nearest integer; 0 for an empty
  /// collection.
  pub avg_score:        u8,
  /// Records with a lead score of at least
  /// [`HIGH_VALUE_THRESHOLD`](crate::score::HIGH_VALUE_THRESHOLD).
  pub high_value_count: usize,
  /// One entry per status actually present; no zero-count entries.
  pub by_status:        Vec<StatusCount>,
  /// Sorted by count descending; ties break by sector name ascending.
  pub by_sector:        Vec<SectorCount>,
}

/// The distinct values present in the collection plus the fixed
/// enumerations, for populating selection controls.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
  pub sectors:   Vec<String>,
  pub provinces: Vec<String>,
  pub cities:    Vec<String>,
  pub sizes:     Vec<SizeClass>,
  pub statuses:  Vec<LeadStatus>,
}

/// Compute summary statistics for `companies`.
pub fn summarize(companies: &[Company]) -> StatsSummary {
  let total = companies.len();

  let avg_score = if total == 0 {
    0
  } else {
    let sum: u32 = companies.iter().map(|c| u32::from(c.lead_score)).sum();
    (f64::from(sum) / total as f64).round() as u8
  };

  let high_value_count = companies
    .iter()
    .filter(|c| c.lead_score >= HIGH_VALUE_THRESHOLD)
    .count();

  let mut status_counts: BTreeMap<LeadStatus, usize> = BTreeMap::new();
  for company in companies {
    *status_counts.entry(company.status).or_default() += 1;
  }
  let by_status = status_counts
    .into_iter()
    .map(|(status, count)| StatusCount { status, count })
    .collect();

  let mut sector_counts: BTreeMap<&str, usize> = BTreeMap::new();
  for company in companies {
    *sector_counts.entry(&company.sector).or_default() += 1;
  }
  let mut by_sector: Vec<SectorCount> = sector_counts
    .into_iter()
    .map(|(sector, count)| SectorCount { sector: sector.to_owned(), count })
    .collect();
  by_sector.sort_by(|a, b| {
    b.count.cmp(&a.count).then_with(|| a.sector.cmp(&b.sector))
  });

  StatsSummary { total, avg_score, high_value_count, by_status, by_sector }
}

/// Discover the filter options for `companies`. Distinct sectors, provinces,
/// and cities sort ascending; sizes and statuses are the fixed enumerations.
pub fn filter_options(companies: &[Company]) -> FilterOptions {
  fn distinct_sorted<'a>(
    values: impl Iterator<Item = &'a str>,
  ) -> Vec<String> {
    values
      .collect::<BTreeSet<_>>()
      .into_iter()
      .map(str::to_owned)
      .collect()
  }

  FilterOptions {
    sectors:   distinct_sorted(companies.iter().map(|c| c.sector.as_str())),
    provinces: distinct_sorted(companies.iter().map(|c| c.province.as_str())),
    cities:    distinct_sorted(companies.iter().map(|c| c.city.as_str())),
    sizes:     SizeClass::ALL.to_vec(),
    statuses:  LeadStatus::ALL.to_vec(),
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::company::{Company, LeadStatus, SizeClass};

  fn company(name: &str, sector: &str, score: u8, status: LeadStatus) -> Company {
    let now = Utc::now();
    Company {
      id: 0,
      name: name.into(),
      registry_number: None,
      sector: sector.into(),
      subsector: None,
      size: SizeClass::Small,
      employee_count: None,
      revenue_estimate: None,
      city: "Den Haag".into(),
      province: "Zuid-Holland".into(),
      address: None,
      postal_code: None,
      website: None,
      email: None,
      phone: None,
      description: None,
      is_government: false,
      is_enterprise: false,
      is_tech: false,
      lead_score: score,
      status,
      notes: None,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn empty_collection_yields_zeroes() {
    let summary = summarize(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.avg_score, 0);
    assert_eq!(summary.high_value_count, 0);
    assert!(summary.by_status.is_empty());
    assert!(summary.by_sector.is_empty());
  }

  #[test]
  fn average_rounds_to_nearest() {
    let companies = vec![
      company("A", "Overheid", 70, LeadStatus::New),
      company("B", "Overheid", 71, LeadStatus::New),
    ];
    // 70.5 rounds to 71 (round half away from zero).
    assert_eq!(summarize(&companies).avg_score, 71);
  }

  #[test]
  fn high_value_threshold_is_inclusive() {
    let companies = vec![
      company("A", "Overheid", 69, LeadStatus::New),
      company("B", "Overheid", 70, LeadStatus::New),
      company("C", "Overheid", 100, LeadStatus::New),
    ];
    assert_eq!(summarize(&companies).high_value_count, 2);
  }

  #[test]
  fn by_status_skips_absent_statuses() {
    let companies = vec![
      company("A", "Overheid", 10, LeadStatus::Won),
      company("B", "Overheid", 10, LeadStatus::New),
      company("C", "Overheid", 10, LeadStatus::Won),
    ];

    let by_status = summarize(&companies).by_status;
    assert_eq!(by_status.len(), 2);
    // Pipeline order: new before won.
    assert_eq!(by_status[0], StatusCount { status: LeadStatus::New, count: 1 });
    assert_eq!(by_status[1], StatusCount { status: LeadStatus::Won, count: 2 });
  }

  #[test]
  fn by_sector_sorts_count_desc_then_name() {
    let companies = vec![
      company("A", "Onderwijs", 10, LeadStatus::New),
      company("B", "Overheid", 10, LeadStatus::New),
      company("C", "Overheid", 10, LeadStatus::New),
      company("D", "Gezondheidszorg", 10, LeadStatus::New),
    ];

    let by_sector = summarize(&companies).by_sector;
    let order: Vec<(&str, usize)> =
      by_sector.iter().map(|s| (s.sector.as_str(), s.count)).collect();
    assert_eq!(
      order,
      vec![("Overheid", 2), ("Gezondheidszorg", 1), ("Onderwijs", 1)]
    );
  }

  #[test]
  fn filter_options_distinct_and_sorted() {
    let mut a = company("A", "Overheid", 10, LeadStatus::New);
    a.city = "Utrecht".into();
    let mut b = company("B", "Onderwijs", 10, LeadStatus::New);
    b.city = "Amsterdam".into();
    let c = company("C", "Overheid", 10, LeadStatus::New);

    let options = filter_options(&[a, b, c]);
    assert_eq!(options.sectors, vec!["Onderwijs", "Overheid"]);
    assert_eq!(options.cities, vec!["Amsterdam", "Den Haag", "Utrecht"]);
    assert_eq!(options.sizes.len(), 5);
    assert_eq!(options.statuses.len(), 7);
    assert_eq!(options.statuses[0], LeadStatus::New);
  }
}
