//! The filter/query engine — narrows a company collection and imposes the
//! display ordering.
//!
//! All filter fields are optional and combine with logical AND. The result
//! order is total: lead score descending, then name ascending, then id
//! ascending, so ties can never land in arbitrary order.

use serde::{
  Deserialize,
  de::{self, DeserializeOwned, Deserializer, IntoDeserializer},
};

use crate::company::{Company, LeadStatus, SizeClass};

/// Parameters for [`search`]. Field renames match the HTTP query-string
/// parameter names, so the API layer deserialises this directly.
///
/// HTML forms submit empty selects and inputs as `?field=`; every field
/// treats a blank value as "no constraint" rather than as a filter for the
/// empty string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyFilter {
  /// Free text, matched case-insensitively as a substring of name,
  /// description, or city. A hit on any one of the three suffices.
  #[serde(rename = "q", default, deserialize_with = "blank_as_none")]
  pub query:         Option<String>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub sector:        Option<String>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub size:          Option<SizeClass>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub province:      Option<String>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub city:          Option<String>,
  /// Inclusive lower bound on the lead score.
  #[serde(rename = "minScore", default, deserialize_with = "blank_score_as_none")]
  pub min_score:     Option<u8>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub status:        Option<LeadStatus>,
  /// `true` requires the flag to be set. `false`, blank, or absent means
  /// "no constraint", never "must be unset".
  #[serde(rename = "isGovernment", default, deserialize_with = "blank_flag_as_unset")]
  pub is_government: bool,
  #[serde(rename = "isEnterprise", default, deserialize_with = "blank_flag_as_unset")]
  pub is_enterprise: bool,
  #[serde(rename = "isTech", default, deserialize_with = "blank_flag_as_unset")]
  pub is_tech:       bool,
}

// ─── Blank-parameter handling ────────────────────────────────────────────────

/// Deserialise a string-backed value, mapping a blank input to `None`.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = Option::<String>::deserialize(deserializer)?;
  match value.as_deref() {
    None | Some("") => Ok(None),
    Some(s) => T::deserialize(s.into_deserializer()).map(Some),
  }
}

/// Like [`blank_as_none`], but parses the non-blank value as a number.
fn blank_score_as_none<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  match value.as_deref() {
    None | Some("") => Ok(None),
    Some(s) => s.parse().map(Some).map_err(de::Error::custom),
  }
}

/// Flag parameter: blank or absent means "no constraint" (`false`).
fn blank_flag_as_unset<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  match value.as_deref() {
    None | Some("") => Ok(false),
    Some(s) => s.parse().map_err(de::Error::custom),
  }
}

impl CompanyFilter {
  /// Whether `company` satisfies every supplied predicate.
  pub fn matches(&self, company: &Company) -> bool {
    if let Some(q) = &self.query {
      let needle = q.to_lowercase();
      let hit = company.name.to_lowercase().contains(&needle)
        || company
          .description
          .as_ref()
          .is_some_and(|d| d.to_lowercase().contains(&needle))
        || company.city.to_lowercase().contains(&needle);
      if !hit {
        return false;
      }
    }

    if let Some(sector) = &self.sector
      && company.sector != *sector
    {
      return false;
    }
    if let Some(size) = self.size
      && company.size != size
    {
      return false;
    }
    if let Some(province) = &self.province
      && company.province != *province
    {
      return false;
    }
    if let Some(city) = &self.city
      && company.city != *city
    {
      return false;
    }
    if let Some(min) = self.min_score
      && company.lead_score < min
    {
      return false;
    }
    if let Some(status) = self.status
      && company.status != status
    {
      return false;
    }

    if self.is_government && !company.is_government {
      return false;
    }
    if self.is_enterprise && !company.is_enterprise {
      return false;
    }
    if self.is_tech && !company.is_tech {
      return false;
    }

    true
  }
}

/// Filter `companies` by `filter` and sort the survivors: lead score
/// descending, name ascending, id ascending.
///
/// A read view — never mutates the underlying collection.
pub fn search(mut companies: Vec<Company>, filter: &CompanyFilter) -> Vec<Company> {
  companies.retain(|c| filter.matches(c));
  companies.sort_by(|a, b| {
    b.lead_score
      .cmp(&a.lead_score)
      .then_with(|| a.name.cmp(&b.name))
      .then_with(|| a.id.cmp(&b.id))
  });
  companies
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::company::{Company, LeadStatus, SizeClass};

  fn company(id: i64, name: &str, score: u8) -> Company {
    let now = Utc::now();
    Company {
      id,
      name: name.into(),
      registry_number: None,
      sector: "ICT & Technologie".into(),
      subsector: None,
      size: SizeClass::Medium,
      employee_count: None,
      revenue_estimate: None,
      city: "Amsterdam".into(),
      province: "Noord-Holland".into(),
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
      status: LeadStatus::New,
      notes: None,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn empty_filter_returns_all_in_display_order() {
    let companies = vec![
      company(1, "Bravo", 40),
      company(2, "Alpha", 80),
      company(3, "Charlie", 40),
      company(4, "Alpha", 40),
    ];

    let result = search(companies, &CompanyFilter::default());
    let order: Vec<i64> = result.iter().map(|c| c.id).collect();
    // 80 first; among the 40s: Alpha, Bravo, Charlie.
    assert_eq!(order, vec![2, 4, 1, 3]);
  }

  #[test]
  fn identical_score_and_name_fall_back_to_id_order() {
    let companies = vec![
      company(9, "Alpha", 40),
      company(3, "Alpha", 40),
      company(6, "Alpha", 40),
    ];

    let result = search(companies, &CompanyFilter::default());
    let order: Vec<i64> = result.iter().map(|c| c.id).collect();
    assert_eq!(order, vec![3, 6, 9]);
  }

  #[test]
  fn min_score_is_inclusive_and_order_preserving() {
    let companies = vec![
      company(1, "Low", 69),
      company(2, "Edge", 70),
      company(3, "High", 95),
    ];

    let filter = CompanyFilter { min_score: Some(70), ..Default::default() };
    let result = search(companies, &filter);
    let order: Vec<i64> = result.iter().map(|c| c.id).collect();
    assert_eq!(order, vec![3, 2]);
  }

  #[test]
  fn free_text_matches_name_description_or_city() {
    let mut a = company(1, "Gemeente Utrecht", 10);
    a.city = "Utrecht".into();
    let mut b = company(2, "DataWorks", 10);
    b.description = Some("Consultancy in Utrecht region".into());
    let c = company(3, "Elders BV", 10);

    let filter =
      CompanyFilter { query: Some("utrecht".into()), ..Default::default() };
    let result = search(vec![a, b, c], &filter);
    let ids: Vec<i64> = result.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&1) && ids.contains(&2));
  }

  #[test]
  fn flag_and_sector_filters_combine_with_and() {
    let mut gov_ict = company(1, "RijksICT", 50);
    gov_ict.is_government = true;
    gov_ict.sector = "Overheid".into();

    let mut gov_other = company(2, "Provincie", 50);
    gov_other.is_government = true;
    gov_other.sector = "Onderwijs".into();

    let mut civilian = company(3, "Bedrijf", 50);
    civilian.sector = "Overheid".into();

    let filter = CompanyFilter {
      is_government: true,
      sector: Some("Overheid".into()),
      ..Default::default()
    };
    let result = search(vec![gov_ict, gov_other, civilian], &filter);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
  }

  #[test]
  fn unset_flag_filter_does_not_require_flag_absence() {
    let mut flagged = company(1, "Flagged", 10);
    flagged.is_tech = true;
    let plain = company(2, "Plain", 10);

    let result = search(vec![flagged, plain], &CompanyFilter::default());
    assert_eq!(result.len(), 2);
  }

  #[test]
  fn exact_match_filters() {
    let mut a = company(1, "A", 10);
    a.status = LeadStatus::Won;
    a.size = SizeClass::Large;
    let b = company(2, "B", 10);

    let by_status = CompanyFilter {
      status: Some(LeadStatus::Won),
      ..Default::default()
    };
    assert_eq!(search(vec![a.clone(), b.clone()], &by_status).len(), 1);

    let by_size =
      CompanyFilter { size: Some(SizeClass::Large), ..Default::default() };
    assert_eq!(search(vec![a, b], &by_size).len(), 1);
  }
}
