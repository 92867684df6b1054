use chrono::NaiveDate;

use crate::fda::AdverseEventReport;

pub const REACTIONS_SHOWN: usize = 5;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineInfo {
    pub product_name: String,
    pub reactions: Vec<String>,
    pub serious: bool,
    /// Compact `YYYYMMDD` form, as reported.
    pub report_date: String,
    pub manufacturer: String,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub source_country: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReactionSummary<'a> {
    pub shown: &'a [String],
    pub remaining: usize,
}

impl MedicineInfo {
    pub fn from_report(query: &str, report: &AdverseEventReport) -> Self {
        let drug = report.first_drug();
        let openfda = drug.and_then(|drug| drug.openfda.as_ref());

        let product_name = drug
            .and_then(|drug| drug.medicinalproduct.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| query.to_owned());

        let reactions = report
            .patient
            .iter()
            .flat_map(|patient| patient.reaction.iter())
            .filter_map(|reaction| reaction.reactionmeddrapt.clone())
            .collect();

        Self {
            product_name,
            reactions,
            serious: report.is_serious(),
            report_date: report.receivedate.clone().unwrap_or_default(),
            manufacturer: openfda
                .and_then(|fields| fields.manufacturer_name.first().cloned())
                .unwrap_or_else(|| UNKNOWN.to_owned()),
            brand_name: openfda.and_then(|fields| fields.brand_name.first().cloned()),
            generic_name: openfda.and_then(|fields| fields.generic_name.first().cloned()),
            source_country: report
                .primarysourcecountry
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_owned()),
        }
    }

    pub fn display_report_date(&self) -> String {
        format_report_date(&self.report_date)
    }

    /// Brand name worth showing next to the product name, if it adds anything.
    pub fn distinct_brand_name(&self) -> Option<&str> {
        self.brand_name
            .as_deref()
            .filter(|brand| *brand != self.product_name)
    }

    pub fn reaction_summary(&self) -> ReactionSummary<'_> {
        let shown = &self.reactions[..self.reactions.len().min(REACTIONS_SHOWN)];
        ReactionSummary {
            shown,
            remaining: self.reactions.len() - shown.len(),
        }
    }
}

/// Turns `YYYYMMDD` into `MM/DD/YYYY`. Anything else is returned as is,
/// including eight digits that are not a calendar date such as `20231341`;
/// those are never sliced into a bogus `13/41/2023`.
pub fn format_report_date(compact: &str) -> String {
    match NaiveDate::parse_from_str(compact, "%Y%m%d") {
        Ok(date) if compact.len() == 8 => date.format("%m/%d/%Y").to_string(),
        _ => compact.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> AdverseEventReport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_all_fields() {
        let report = report(
            r#"{
                "serious": "1",
                "receivedate": "20240315",
                "primarysourcecountry": "GB",
                "patient": {
                    "drug": [{
                        "medicinalproduct": "PARACETAMOL",
                        "openfda": {
                            "manufacturer_name": ["Acme Pharma", "Other"],
                            "brand_name": ["TYLENOL"],
                            "generic_name": ["ACETAMINOPHEN"]
                        }
                    }],
                    "reaction": [{"reactionmeddrapt": "Nausea"}, {"reactionmeddrapt": "Rash"}]
                }
            }"#,
        );

        let info = MedicineInfo::from_report("paracetamol", &report);

        assert_eq!(
            info,
            MedicineInfo {
                product_name: "PARACETAMOL".to_string(),
                reactions: vec!["Nausea".to_string(), "Rash".to_string()],
                serious: true,
                report_date: "20240315".to_string(),
                manufacturer: "Acme Pharma".to_string(),
                brand_name: Some("TYLENOL".to_string()),
                generic_name: Some("ACETAMINOPHEN".to_string()),
                source_country: "GB".to_string(),
            }
        );
        assert_eq!(info.display_report_date(), "03/15/2024");
    }

    #[test]
    fn missing_fields_fall_back() {
        let info = MedicineInfo::from_report("Aspirin", &report(r#"{"serious": "2"}"#));

        assert_eq!(info.product_name, "Aspirin");
        assert!(info.reactions.is_empty());
        assert!(!info.serious);
        assert_eq!(info.manufacturer, "Unknown");
        assert_eq!(info.source_country, "Unknown");
        assert!(info.brand_name.is_none());
        assert!(info.generic_name.is_none());
    }

    #[test]
    fn brand_equal_to_product_is_not_distinct() {
        let mut info = MedicineInfo::from_report("Aspirin", &report("{}"));
        info.brand_name = Some("Aspirin".to_string());
        assert_eq!(info.distinct_brand_name(), None);

        info.brand_name = Some("BAYER".to_string());
        assert_eq!(info.distinct_brand_name(), Some("BAYER"));
    }

    #[test]
    fn reaction_summary_caps_at_five() {
        let mut info = MedicineInfo::from_report("Aspirin", &report("{}"));
        info.reactions = (1..=8).map(|i| format!("Reaction {i}")).collect();

        let summary = info.reaction_summary();

        assert_eq!(summary.shown.len(), REACTIONS_SHOWN);
        assert_eq!(summary.remaining, 3);
    }

    #[test]
    fn reaction_summary_with_few_reactions() {
        let mut info = MedicineInfo::from_report("Aspirin", &report("{}"));
        info.reactions = vec!["Headache".to_string()];

        assert_eq!(
            info.reaction_summary(),
            ReactionSummary {
                shown: &["Headache".to_string()],
                remaining: 0
            }
        );
    }

    #[test]
    fn report_date_formatting() {
        assert_eq!(format_report_date("20231201"), "12/01/2023");
        assert_eq!(format_report_date("2023-12-01"), "2023-12-01");
        assert_eq!(format_report_date(""), "");
        assert_eq!(format_report_date("2023120"), "2023120");
        assert_eq!(format_report_date("20231341"), "20231341");
        assert_eq!(format_report_date("2023x201"), "2023x201");
    }
}
