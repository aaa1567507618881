//! Finalization completeness check
//!
//! Separate from assembly: drafts always assemble, but a document only
//! finalizes once every rule below passes. All violations are collected so
//! the caller can show the complete list at once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use declaration_types::LegalDocument;

lazy_static! {
    /// Letters, digits, dashes and colons, e.g. "2:24-cv-01234"
    static ref CASE_NUMBER_PATTERN: Regex = Regex::new(r"(?i)^[A-Z0-9\-:]+$").unwrap();

    /// Letters, whitespace, periods, hyphens and apostrophes
    static ref PERSON_NAME_PATTERN: Regex = Regex::new(r"^[a-zA-Z\s\.\-']+$").unwrap();

    static ref DIGIT_PATTERN: Regex = Regex::new(r"\d").unwrap();
}

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Payload path of the offending field, e.g. "caseInfo.caption"
    pub field: String,
    /// Human-readable field name, e.g. "Case Caption"
    pub label: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.message)
    }
}

/// Every rule a document failed at finalization time
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Document is not ready to finalize ({} problem(s)): {}", .violations.len(), summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Flat "Label: message" list, as shown to form users
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(Violation::to_string).collect()
    }
}

/// Constraints on a single text field
#[derive(Clone, Copy)]
struct FieldRules {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&'static Regex>,
    custom: Option<fn(&str) -> Option<&'static str>>,
}

const NO_RULES: FieldRules = FieldRules {
    required: false,
    min_length: None,
    max_length: None,
    pattern: None,
    custom: None,
};

fn caption_rules() -> FieldRules {
    FieldRules {
        required: true,
        min_length: Some(5),
        max_length: Some(500),
        custom: Some(|value| {
            if value.contains("v.") || value.contains("vs.") {
                None
            } else {
                Some("Case caption should include \"v.\" or \"vs.\" to separate parties")
            }
        }),
        ..NO_RULES
    }
}

fn case_number_rules() -> FieldRules {
    FieldRules {
        required: true,
        min_length: Some(3),
        max_length: Some(50),
        pattern: Some(&CASE_NUMBER_PATTERN),
        custom: Some(|value| {
            if DIGIT_PATTERN.is_match(value) {
                None
            } else {
                Some("Case number should contain at least one number")
            }
        }),
    }
}

fn court_rules() -> FieldRules {
    FieldRules {
        required: true,
        max_length: Some(200),
        ..NO_RULES
    }
}

fn person_name_rules() -> FieldRules {
    FieldRules {
        required: true,
        min_length: Some(2),
        max_length: Some(100),
        pattern: Some(&PERSON_NAME_PATTERN),
        ..NO_RULES
    }
}

fn paragraph_rules() -> FieldRules {
    FieldRules {
        required: true,
        min_length: Some(10),
        max_length: Some(2000),
        ..NO_RULES
    }
}

fn location_rules() -> FieldRules {
    FieldRules {
        required: true,
        min_length: Some(2),
        max_length: Some(100),
        ..NO_RULES
    }
}

/// Check one field, returning every failed rule message
///
/// An empty field only fails the `required` rule; the remaining rules apply
/// to non-empty values.
fn check_field(value: Option<&str>, rules: FieldRules) -> Vec<String> {
    let value = value.unwrap_or("");
    if value.trim().is_empty() {
        return if rules.required {
            vec!["This field is required".to_string()]
        } else {
            Vec::new()
        };
    }

    let mut errors = Vec::new();
    let length = value.chars().count();

    if let Some(min) = rules.min_length {
        if length < min {
            errors.push(format!("Must be at least {} characters long", min));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            errors.push(format!("Must be no more than {} characters long", max));
        }
    }
    if let Some(pattern) = rules.pattern {
        if !pattern.is_match(value) {
            errors.push("Invalid format".to_string());
        }
    }
    if let Some(custom) = rules.custom {
        if let Some(message) = custom(value) {
            errors.push(message.to_string());
        }
    }

    errors
}

fn push_field(
    violations: &mut Vec<Violation>,
    field: &str,
    label: &str,
    value: Option<&str>,
    rules: FieldRules,
) {
    violations.extend(check_field(value, rules).into_iter().map(|message| Violation {
        field: field.to_string(),
        label: label.to_string(),
        message,
    }));
}

/// Run every finalization rule and return all violations (empty when valid)
pub fn collect_violations(document: &LegalDocument) -> Vec<Violation> {
    let mut violations = Vec::new();
    let case = &document.case_info;

    // Basics
    push_field(
        &mut violations,
        "caseInfo.caption",
        "Case Caption",
        Some(case.caption.as_str()),
        caption_rules(),
    );
    push_field(
        &mut violations,
        "caseInfo.caseNumber",
        "Case Number",
        Some(case.case_number.as_str()),
        case_number_rules(),
    );
    push_field(
        &mut violations,
        "caseInfo.court",
        "Court",
        Some(case.court.as_str()),
        court_rules(),
    );
    push_field(
        &mut violations,
        "declarant.name",
        "Declarant Name",
        Some(document.declarant.name.as_str()),
        person_name_rules(),
    );

    // Content
    if document.paragraphs().is_empty() {
        violations.push(Violation {
            field: "paragraphs".to_string(),
            label: "Paragraphs".to_string(),
            message: "At least one paragraph is required".to_string(),
        });
    }
    for (index, paragraph) in document.paragraphs().iter().enumerate() {
        push_field(
            &mut violations,
            &format!("paragraphs[{}].content", index),
            &format!("Paragraph {}", paragraph.number()),
            Some(paragraph.content.as_str()),
            paragraph_rules(),
        );
    }

    // Signature
    let signature = &document.signature_block;
    push_field(
        &mut violations,
        "signatureBlock.location",
        "Signature Location",
        signature.location.as_deref(),
        location_rules(),
    );
    push_field(
        &mut violations,
        "signatureBlock.declarantName",
        "Signature Name",
        Some(signature.declarant_name.as_str()),
        person_name_rules(),
    );

    violations
}

/// Completeness check required before finalization
pub fn validate_for_finalization(document: &LegalDocument) -> Result<(), ValidationError> {
    let violations = collect_violations(document);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declaration_types::{
        CaseInfo, Declarant, DocumentParagraph, DocumentType, Jurisdiction, SignatureBlock,
    };

    fn valid_document() -> LegalDocument {
        let mut doc = LegalDocument::new(DocumentType::Certification, Jurisdiction::NewJersey)
            .with_case_info(CaseInfo {
                caption: "Smith v. Jones".to_string(),
                case_number: "MID-L-001234-24".to_string(),
                court: "SUPERIOR COURT OF NEW JERSEY".to_string(),
                judge: None,
                division: Some("LAW DIVISION".to_string()),
            })
            .with_declarant(Declarant::new("Mary O'Brien"))
            .with_signature_block(SignatureBlock {
                declarant_name: "Mary O'Brien".to_string(),
                location: Some("Trenton, New Jersey".to_string()),
                ..Default::default()
            });
        doc.add_paragraph(DocumentParagraph::new(
            "I am the plaintiff in this matter and have personal knowledge of the facts.",
        ))
        .unwrap();
        doc
    }

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_document_passes() {
        assert_eq!(collect_violations(&valid_document()), vec![]);
        assert!(validate_for_finalization(&valid_document()).is_ok());
    }

    #[test]
    fn test_empty_document_reports_everything_at_once() {
        let doc = LegalDocument::new(DocumentType::Affidavit, Jurisdiction::Federal);
        let err = validate_for_finalization(&doc).unwrap_err();
        assert_eq!(
            fields(&err.violations),
            vec![
                "caseInfo.caption",
                "caseInfo.caseNumber",
                "caseInfo.court",
                "declarant.name",
                "paragraphs",
                "signatureBlock.location",
                "signatureBlock.declarantName",
            ]
        );
        assert!(err
            .messages()
            .contains(&"Case Caption: This field is required".to_string()));
    }

    #[test]
    fn test_caption_requires_party_separator() {
        let mut doc = valid_document();
        doc.case_info.caption = "Smith against Jones".to_string();
        let violations = collect_violations(&doc);
        assert_eq!(fields(&violations), vec!["caseInfo.caption"]);
        assert!(violations[0].message.contains("\"v.\""));
    }

    #[test]
    fn test_case_number_needs_a_digit_and_valid_characters() {
        let mut doc = valid_document();
        doc.case_info.case_number = "ABC-DEF".to_string();
        let violations = collect_violations(&doc);
        assert_eq!(
            violations[0].message,
            "Case number should contain at least one number"
        );

        doc.case_info.case_number = "12 / 34".to_string();
        let violations = collect_violations(&doc);
        assert_eq!(violations[0].message, "Invalid format");
    }

    #[test]
    fn test_declarant_name_pattern() {
        let mut doc = valid_document();
        doc.declarant.name = "R2-D2".to_string();
        let violations = collect_violations(&doc);
        assert_eq!(fields(&violations), vec!["declarant.name"]);
    }

    #[test]
    fn test_paragraph_length_bounds() {
        let mut doc = valid_document();
        doc.add_paragraph(DocumentParagraph::new("Too short")).unwrap();
        doc.add_paragraph(DocumentParagraph::new("x".repeat(2001))).unwrap();
        let violations = collect_violations(&doc);
        assert_eq!(
            violations.iter().map(Violation::to_string).collect::<Vec<_>>(),
            vec![
                "Paragraph 2: Must be at least 10 characters long".to_string(),
                "Paragraph 3: Must be no more than 2000 characters long".to_string(),
            ]
        );
    }

    #[test]
    fn test_error_display_lists_problems() {
        let mut doc = valid_document();
        doc.signature_block.location = None;
        let err = validate_for_finalization(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Document is not ready to finalize (1 problem(s)): \
             Signature Location: This field is required"
        );
    }
}
