//! Declaration data model
//!
//! Field names serialize in camelCase so form-state payloads deserialize
//! directly. Exhibit labels and paragraph numbers are derived state: they are
//! private, have no setters, and are recomputed by [`crate::labels`] whenever
//! the owning sequence changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of sworn statement being assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[serde(alias = "AFFIDAVIT")]
    Affidavit,
    #[serde(alias = "CERTIFICATION")]
    Certification,
    #[serde(alias = "VERIFICATION")]
    Verification,
}

impl DocumentType {
    /// Upper-case display name, used in titles
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Affidavit => "AFFIDAVIT",
            DocumentType::Certification => "CERTIFICATION",
            DocumentType::Verification => "VERIFICATION",
        }
    }

    /// Lower-case slug, used in filenames
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::Affidavit => "affidavit",
            DocumentType::Certification => "certification",
            DocumentType::Verification => "verification",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Court system whose rules govern the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "federal", alias = "FEDERAL")]
    Federal,
    #[serde(rename = "nj", alias = "new_jersey", alias = "NEW_JERSEY")]
    NewJersey,
}

impl Jurisdiction {
    /// Full jurisdiction name
    pub fn name(&self) -> &'static str {
        match self {
            Jurisdiction::Federal => "Federal",
            Jurisdiction::NewJersey => "New Jersey",
        }
    }

    /// Court heading used when the case info leaves the court blank
    pub fn default_court(&self) -> &'static str {
        match self {
            Jurisdiction::Federal => "UNITED STATES DISTRICT COURT",
            Jurisdiction::NewJersey => "SUPERIOR COURT OF NEW JERSEY",
        }
    }

    /// Parse from code or name (case-insensitive)
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FEDERAL" | "US" | "FED" => Some(Jurisdiction::Federal),
            "NJ" | "NEW_JERSEY" | "NEW JERSEY" => Some(Jurisdiction::NewJersey),
            _ => None,
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Final,
    Filed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseInfo {
    /// Party caption, conventionally "Plaintiff v. Defendant"
    pub caption: String,
    pub case_number: String,
    pub court: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
}

/// The person making the sworn statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Declarant {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Declarant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A numbered paragraph of the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentParagraph {
    #[serde(default = "new_id")]
    pub id: String,
    /// 1-based position; recomputed on load and after every mutation
    #[serde(default)]
    pub(crate) number: u32,
    #[serde(default)]
    pub content: String,
    /// Exhibit ids cited by this paragraph, ordered, no duplicates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) exhibit_references: Vec<String>,
}

impl DocumentParagraph {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            number: 0,
            content: content.into(),
            exhibit_references: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add references in order, skipping any already present
    pub fn with_references<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for r in refs {
            self.add_reference(r);
        }
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn exhibit_references(&self) -> &[String] {
        &self.exhibit_references
    }

    /// Append a reference; returns false if it was already present
    pub fn add_reference(&mut self, exhibit_id: impl Into<String>) -> bool {
        let exhibit_id = exhibit_id.into();
        if self.exhibit_references.contains(&exhibit_id) {
            return false;
        }
        self.exhibit_references.push(exhibit_id);
        true
    }

    /// Remove a reference; returns false if it was not present
    pub fn remove_reference(&mut self, exhibit_id: &str) -> bool {
        let before = self.exhibit_references.len();
        self.exhibit_references.retain(|r| r != exhibit_id);
        before != self.exhibit_references.len()
    }

    pub(crate) fn dedup_references(&mut self) {
        let mut seen = Vec::with_capacity(self.exhibit_references.len());
        self.exhibit_references.retain(|r| {
            if seen.contains(r) {
                false
            } else {
                seen.push(r.clone());
                true
            }
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhibitKind {
    #[default]
    Document,
    Image,
    Video,
    Other,
}

/// A labeled attachment referenced by the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibit {
    #[serde(default = "new_id")]
    pub id: String,
    /// Derived from position: A..Z, AA..ZZ, then "Exhibit N"
    #[serde(default)]
    pub(crate) label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ExhibitKind,
    #[serde(default)]
    pub is_confidential: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_path: Option<String>,
}

impl Exhibit {
    pub fn new(description: impl Into<String>, kind: ExhibitKind) -> Self {
        Self {
            id: new_id(),
            label: String::new(),
            description: description.into(),
            kind,
            is_confidential: false,
            attachment_path: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn confidential(mut self) -> Self {
        self.is_confidential = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttorneyInfo {
    pub name: String,
    pub bar_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureBlock {
    /// Name on the signature line; may be a representative of the declarant
    pub declarant_name: String,
    #[serde(
        with = "serde_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Only honored for New Jersey affidavits
    pub notary_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attorney_info: Option<AttorneyInfo>,
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Trimmed, non-empty view of an optional string field
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Signature dates arrive either as plain dates or as full ISO timestamps
/// from browser form state.
mod serde_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()) else {
            return Ok(None);
        };

        if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_accepts_both_spellings() {
        let lower: DocumentType = serde_json::from_str("\"affidavit\"").unwrap();
        let upper: DocumentType = serde_json::from_str("\"AFFIDAVIT\"").unwrap();
        assert_eq!(lower, DocumentType::Affidavit);
        assert_eq!(upper, DocumentType::Affidavit);
    }

    #[test]
    fn test_jurisdiction_codes() {
        let nj: Jurisdiction = serde_json::from_str("\"nj\"").unwrap();
        let nj_long: Jurisdiction = serde_json::from_str("\"NEW_JERSEY\"").unwrap();
        assert_eq!(nj, Jurisdiction::NewJersey);
        assert_eq!(nj_long, Jurisdiction::NewJersey);
        assert_eq!(serde_json::to_string(&nj).unwrap(), "\"nj\"");
        assert_eq!(Jurisdiction::parse_code("federal"), Some(Jurisdiction::Federal));
        assert_eq!(Jurisdiction::parse_code("ca"), None);
    }

    #[test]
    fn test_paragraph_references_are_an_ordered_set() {
        let mut para = DocumentParagraph::new("text").with_references(["b", "a", "b"]);
        assert_eq!(para.exhibit_references(), ["b", "a"]);
        assert!(!para.add_reference("a"));
        assert!(para.remove_reference("b"));
        assert_eq!(para.exhibit_references(), ["a"]);
    }

    #[test]
    fn test_signature_date_accepts_iso_timestamp() {
        let sig: SignatureBlock = serde_json::from_str(
            r#"{"declarantName": "Jane Doe", "date": "2025-03-14T15:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(sig.date, NaiveDate::from_ymd_opt(2025, 3, 14));

        let plain: SignatureBlock = serde_json::from_str(r#"{"date": "2025-03-14"}"#).unwrap();
        assert_eq!(plain.date, sig.date);

        let empty: SignatureBlock = serde_json::from_str(r#"{"date": ""}"#).unwrap();
        assert_eq!(empty.date, None);
    }

    #[test]
    fn test_exhibit_type_field_name() {
        let exhibit: Exhibit =
            serde_json::from_str(r#"{"id": "e1", "description": "Photo", "type": "image"}"#)
                .unwrap();
        assert_eq!(exhibit.kind, ExhibitKind::Image);
        assert!(!exhibit.is_confidential);
        assert_eq!(exhibit.label(), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ")), Some("x"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
