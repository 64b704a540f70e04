//! Typed shapes for everything extracted from a provider profile page.
//!
//! Every field has a defined empty representation (empty string, empty list)
//! so a partially populated profile still produces a complete record.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A display name split into its parts after credentials and suffixes have
/// been removed. All-empty when the name could not be split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl ParsedName {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.middle.is_empty() && self.last.is_empty()
    }
}

/// A postal address split from `"street, city, ST 12345"` form. Components
/// missing from the source are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub street: String,
    pub city: String,
    pub state_code: String,
    pub zip_code: String,
}

/// Insurance plans a provider accepts, keyed by plan label in the order the
/// labels first appear on the page.
///
/// A label with no detail entries is kept with an empty list rather than
/// dropped. Serializes as a JSON-style map that preserves label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsuranceAcceptance {
    plans: Vec<(String, Vec<String>)>,
}

impl InsuranceAcceptance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a detail string under `label`, creating the label if needed.
    pub fn push_detail(&mut self, label: &str, detail: String) {
        self.entry(label).push(detail);
    }

    /// Records `label` with no details. An existing label is reset to empty.
    pub fn insert_label_only(&mut self, label: &str) {
        self.entry(label).clear();
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.plans
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, details)| details.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.plans
            .iter()
            .map(|(label, details)| (label.as_str(), details.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    fn entry(&mut self, label: &str) -> &mut Vec<String> {
        let idx = match self.plans.iter().position(|(l, _)| l == label) {
            Some(idx) => idx,
            None => {
                self.plans.push((label.to_string(), Vec::new()));
                self.plans.len() - 1
            }
        };
        &mut self.plans[idx].1
    }
}

impl Serialize for InsuranceAcceptance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.plans.len()))?;
        for (label, details) in &self.plans {
            map.serialize_entry(label, details)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InsuranceAcceptance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlansVisitor;

        impl<'de> Visitor<'de> for PlansVisitor {
            type Value = InsuranceAcceptance;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of insurance label to detail strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut acceptance = InsuranceAcceptance::new();
                while let Some((label, details)) = access.next_entry::<String, Vec<String>>()? {
                    acceptance.insert_label_only(&label);
                    for detail in details {
                        acceptance.push_detail(&label, detail);
                    }
                }
                Ok(acceptance)
            }
        }

        deserializer.deserialize_map(PlansVisitor)
    }
}

/// Everything extracted from one provider profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// The display name exactly as shown on the page, line breaks removed.
    pub full_name_raw: String,
    pub name: ParsedName,
    pub addresses: Vec<ParsedAddress>,
    pub specialties: Vec<String>,
    /// Phone numbers with the `tel:` scheme prefix removed.
    pub phone_numbers: Vec<String>,
    pub insurances: InsuranceAcceptance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_only_plan_is_kept_with_no_details() {
        let mut acceptance = InsuranceAcceptance::new();
        acceptance.insert_label_only("Medicaid");
        assert_eq!(acceptance.len(), 1);
        assert_eq!(acceptance.get("Medicaid"), Some(&[][..]));
    }

    #[test]
    fn details_append_in_order_under_one_label() {
        let mut acceptance = InsuranceAcceptance::new();
        acceptance.push_detail("Aetna", "PPO".into());
        acceptance.push_detail("Cigna", "Dental 1500".into());
        acceptance.push_detail("Aetna", "HMO".into());

        let labels: Vec<&str> = acceptance.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Aetna", "Cigna"]);
        assert_eq!(
            acceptance.get("Aetna").unwrap(),
            &["PPO".to_string(), "HMO".to_string()]
        );
    }

    #[test]
    fn label_only_resets_existing_details() {
        let mut acceptance = InsuranceAcceptance::new();
        acceptance.push_detail("Aetna", "PPO".into());
        acceptance.insert_label_only("Aetna");
        assert_eq!(acceptance.get("Aetna"), Some(&[][..]));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut acceptance = InsuranceAcceptance::new();
        acceptance.push_detail("Zeta Dental", "Basic".into());
        acceptance.insert_label_only("Aetna");

        let json = serde_json::to_string(&acceptance).unwrap();
        assert_eq!(json, r#"{"Zeta Dental":["Basic"],"Aetna":[]}"#);

        let back: InsuranceAcceptance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, acceptance);
    }

    #[test]
    fn default_record_has_empty_fields_not_missing_keys() {
        let json = serde_json::to_value(ProviderRecord::default()).unwrap();
        assert_eq!(json["full_name_raw"], "");
        assert_eq!(json["name"]["middle"], "");
        assert!(json["addresses"].as_array().unwrap().is_empty());
        assert!(json["insurances"].as_object().unwrap().is_empty());
    }

    #[test]
    fn parsed_name_is_empty() {
        assert!(ParsedName::default().is_empty());
        let name = ParsedName {
            first: "Ana".into(),
            ..ParsedName::default()
        };
        assert!(!name.is_empty());
    }
}
