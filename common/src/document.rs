//! Bibliographic document records.
//!
//! A [`Document`] is a loose map from field name to [`FieldValue`]. The
//! library index export is produced from a spreadsheet, so the same field can
//! arrive as text in one file and as a number in another; accessors normalise
//! this instead of the deserializer rejecting records.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Field names referenced by the library configuration.
pub mod fields {
    pub const TITLE: &str = "Title";
    pub const ID: &str = "ID";
    pub const AUTHORS: &str = "Authors";
    pub const YEAR: &str = "Year";
    pub const JOURNAL_OR_PUBLISHER: &str = "JournalOrPublisher";
    pub const ABSTRACT_DESCRIPTION: &str = "Abstract_Description";
    pub const ACCESS_RIGHTS: &str = "Access_Rights";
    pub const HABITAT_TYPE: &str = "Habitat_type";
    pub const CATEGORY: &str = "Category";
    pub const URL: &str = "URL";
    pub const ICON: &str = "icon";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer view of the value. Text holding a number and integral floats
    /// both count, since spreadsheet exports are not consistent about it.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            FieldValue::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| f as i64)
                })
            }
            _ => None,
        }
    }

    /// Display form of a single value. Lists are joined with ", ".
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// Option keys this value contributes to a facet. A list contributes one
    /// key per non-empty item.
    pub fn facet_keys(&self) -> Vec<String> {
        match self {
            FieldValue::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(|item| item.to_string())
                .collect(),
            other => {
                let text = other.to_text();
                let text = text.trim();
                if text.is_empty() { vec![] } else { vec![text.to_string()] }
            }
        }
    }

    /// Text fragments fed to the full-text index.
    pub fn search_texts(&self) -> Vec<String> {
        match self {
            FieldValue::List(items) => items.clone(),
            other => vec![other.to_text()],
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(|s| s.to_string()).collect())
    }
}

/// One bibliographic record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

// null cells in the export mean "no value", so they are dropped on load
impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<FieldValue>>::deserialize(deserializer)?;
        Ok(Document {
            fields: raw
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value)))
                .collect(),
        })
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.text(fields::TITLE)
    }

    /// The record ID. Numeric IDs are rendered as text.
    pub fn id(&self) -> Option<String> {
        self.get(fields::ID).map(FieldValue::to_text)
    }

    pub fn authors(&self) -> Option<&str> {
        self.text(fields::AUTHORS)
    }

    pub fn year(&self) -> Option<i64> {
        self.get(fields::YEAR).and_then(FieldValue::as_int)
    }

    pub fn journal_or_publisher(&self) -> Option<&str> {
        self.text(fields::JOURNAL_OR_PUBLISHER)
    }

    pub fn abstract_description(&self) -> Option<&str> {
        self.text(fields::ABSTRACT_DESCRIPTION)
    }

    pub fn access_rights(&self) -> Option<&str> {
        self.text(fields::ACCESS_RIGHTS)
    }

    pub fn habitat_types(&self) -> Vec<String> {
        self.get(fields::HABITAT_TYPE).map(FieldValue::facet_keys).unwrap_or_default()
    }

    pub fn category(&self) -> Option<&str> {
        self.text(fields::CATEGORY)
    }

    pub fn url(&self) -> Option<&str> {
        self.text(fields::URL)
    }

    pub fn icon(&self) -> Option<&str> {
        self.text(fields::ICON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_are_dropped() {
        let doc: Document = serde_json::from_str(
            r#"{"Title": "Seagrass survey", "Authors": null, "Year": 2019}"#,
        )
        .unwrap();
        assert_eq!(doc.title(), Some("Seagrass survey"));
        assert!(doc.get(fields::AUTHORS).is_none());
        assert_eq!(doc.year(), Some(2019));
    }

    #[test]
    fn year_accepts_text_and_integral_float() {
        let text = Document::new().with(fields::YEAR, " 2004 ");
        assert_eq!(text.year(), Some(2004));

        let float: Document = serde_json::from_str(r#"{"Year": 2011.0}"#).unwrap();
        assert_eq!(float.year(), Some(2011));
        assert_eq!(float.get(fields::YEAR).unwrap().to_text(), "2011");

        let junk = Document::new().with(fields::YEAR, "unknown");
        assert_eq!(junk.year(), None);
    }

    #[test]
    fn list_values_yield_one_facet_key_per_item() {
        let doc: Document =
            serde_json::from_str(r#"{"Habitat_type": ["Mangroves", " Saltmarsh ", ""]}"#).unwrap();
        assert_eq!(doc.habitat_types(), vec!["Mangroves".to_string(), "Saltmarsh".to_string()]);
    }

    #[test]
    fn blank_text_has_no_facet_key() {
        assert!(FieldValue::from("   ").facet_keys().is_empty());
        assert_eq!(FieldValue::from(1998).facet_keys(), vec!["1998".to_string()]);
    }

    #[test]
    fn numeric_id_renders_as_text() {
        let doc: Document = serde_json::from_str(r#"{"ID": 42}"#).unwrap();
        assert_eq!(doc.id().as_deref(), Some("42"));
    }
}
