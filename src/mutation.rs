//! Adding companies at runtime.
//!
//! Only the name is required. Added companies get no side-table rows, so they
//! show placeholder metrics and pass every numeric filter.

use serde::Deserialize;

use crate::error::TrackerError;
use crate::store::RecordStore;
use crate::types::{CompanyRecord, NOT_APPLICABLE};

const DEFAULT_WEBSITE: &str = "#";
const DEFAULT_SUMMARY: &str = "No description provided.";

/// Fields from the add-company form. Blank optional fields take defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCompanyForm {
    pub name: String,
    pub website: Option<String>,
    pub sector: Option<String>,
    pub subsector: Option<String>,
    pub category: Option<String>,
    pub revenue_range: Option<String>,
    pub offerings_summary: Option<String>,
}

impl NewCompanyForm {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

pub fn validate_form(form: &NewCompanyForm) -> Result<(), TrackerError> {
    if form.name.trim().is_empty() {
        return Err(TrackerError::validation("name", "Company name is required"));
    }
    Ok(())
}

/// Map a validated form to a record with the given id.
pub fn build_company(form: &NewCompanyForm, id: String) -> Result<CompanyRecord, TrackerError> {
    validate_form(form)?;

    fn or_default(value: &Option<String>, default: &str) -> String {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    Ok(CompanyRecord {
        id,
        name: form.name.trim().to_string(),
        website: or_default(&form.website, DEFAULT_WEBSITE),
        sector: or_default(&form.sector, NOT_APPLICABLE),
        subsector: or_default(&form.subsector, NOT_APPLICABLE),
        category: or_default(&form.category, NOT_APPLICABLE),
        revenue_range: or_default(&form.revenue_range, NOT_APPLICABLE),
        offerings_summary: or_default(&form.offerings_summary, DEFAULT_SUMMARY),
    })
}

/// A fresh id of the form `c{unix_millis}-{8 hex}` not yet used in the store.
pub fn generate_company_id(store: &RecordStore) -> String {
    loop {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let id = format!("c{}-{}", chrono::Utc::now().timestamp_millis(), &suffix[..8]);
        if !store.contains_id(&id) {
            return id;
        }
    }
}

/// Validate the form, create the record and append it to the live sequence.
pub fn add_company(
    store: &mut RecordStore,
    form: &NewCompanyForm,
) -> Result<CompanyRecord, TrackerError> {
    let record = build_company(form, generate_company_id(store))?;
    store.append(record.clone());
    log::info!("Added company '{}' ({})", record.name, record.id);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::three_company_seed;

    #[test]
    fn test_name_only_uses_defaults() {
        let record = build_company(&NewCompanyForm::named("  Acme  "), "c1".into()).unwrap();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.website, "#");
        assert_eq!(record.sector, "N/A");
        assert_eq!(record.subsector, "N/A");
        assert_eq!(record.category, "N/A");
        assert_eq!(record.revenue_range, "N/A");
        assert_eq!(record.offerings_summary, "No description provided.");
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = build_company(&NewCompanyForm::named("   "), "c1".into()).unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.to_string(), "Company name is required");
    }

    #[test]
    fn test_supplied_fields_kept_and_blank_fields_defaulted() {
        let form = NewCompanyForm {
            name: "Acme".into(),
            website: Some("https://acme.test".into()),
            sector: Some("SaaS".into()),
            offerings_summary: Some("   ".into()),
            ..Default::default()
        };
        let record = build_company(&form, "c9".into()).unwrap();
        assert_eq!(record.website, "https://acme.test");
        assert_eq!(record.sector, "SaaS");
        assert_eq!(record.offerings_summary, "No description provided.");
    }

    #[test]
    fn test_form_deserializes_from_partial_json() {
        let form: NewCompanyForm = serde_json::from_str(r#"{"name":"Acme","revenueRange":"< $1M"}"#).unwrap();
        assert_eq!(form.name, "Acme");
        assert_eq!(form.revenue_range.as_deref(), Some("< $1M"));
        assert!(form.website.is_none());
    }

    #[test]
    fn test_add_company_appends_with_unique_ids() {
        let mut store = RecordStore::from_seed(three_company_seed()).unwrap();
        let first = add_company(&mut store, &NewCompanyForm::named("Acme")).unwrap();
        let second = add_company(&mut store, &NewCompanyForm::named("Acme")).unwrap();
        assert_ne!(first.id, second.id);
        assert!(first.id.starts_with('c'));
        assert_eq!(store.len(), 5);
        assert_eq!(store.seed().len(), 3);
        assert_eq!(store.resolve_original_index(&first.id), None);
    }

    #[test]
    fn test_add_company_leaves_prior_records_and_side_tables_unchanged() {
        use crate::types::{FinancialDimension, GrowthPeriod, MetricDimension};

        let mut store = RecordStore::from_seed(three_company_seed()).unwrap();
        let lookups = |store: &RecordStore| {
            (0..3)
                .map(|row| {
                    (
                        store.monthly_value("Apr 2025", row, MetricDimension::WebTraffic),
                        store.growth_value(GrowthPeriod::MoM, row, MetricDimension::LinkedinJobs),
                        store.annual_value("FY25", row, FinancialDimension::GrossProfit),
                        store.annual_growth("FY25", row, FinancialDimension::Revenue),
                        store.quarterly_notes("Q4 FY25", row),
                        store.interaction(row).cloned(),
                    )
                })
                .collect::<Vec<_>>()
        };
        let records_before = store.records().to_vec();
        let seed_before = store.seed().to_vec();
        let lookups_before = lookups(&store);

        add_company(&mut store, &NewCompanyForm::named("Acme")).unwrap();

        assert_eq!(&store.records()[..records_before.len()], records_before.as_slice());
        assert_eq!(store.seed(), seed_before.as_slice());
        assert_eq!(lookups(&store), lookups_before);
        for record in &records_before {
            assert_eq!(
                store.resolve_original_index(&record.id),
                seed_before.iter().position(|r| r.id == record.id)
            );
        }
    }

    #[test]
    fn test_failed_add_leaves_store_unchanged() {
        let mut store = RecordStore::from_seed(three_company_seed()).unwrap();
        assert!(add_company(&mut store, &NewCompanyForm::default()).is_err());
        assert_eq!(store.len(), 3);
    }
}
