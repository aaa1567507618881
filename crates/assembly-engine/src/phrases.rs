//! Jurisdiction x document-type boilerplate
//!
//! One table per clause, consulted first-match-wins by preview and final
//! assembly alike:
//! - Opening (personal knowledge) statement
//! - Closing certification / perjury clause
//! - Notary acknowledgment gating and text
//!
//! Federal affidavits open with the 28 U.S.C. § 1746 declaration rather than
//! "being duly sworn, depose and say"; a sworn form can still be supplied
//! through the document's personal knowledge statement override.

use declaration_types::{DocumentType, Jurisdiction};

/// Federal unsworn declaration closing (28 U.S.C. § 1746)
pub const FEDERAL_PERJURY_CLAUSE: &str = "I declare under penalty of perjury under the laws of \
     the United States that the foregoing is true and correct.";

/// New Jersey certification in lieu of oath (R. 1:4-4(b))
pub const NJ_CERTIFICATION_CLAUSE: &str = "I certify that the foregoing statements made by me \
     are true. I am aware that if any of the foregoing statements made by me are willfully \
     false, I am subject to punishment.";

/// Jurat framing for verifications sworn before a notary
pub const VERIFICATION_JURAT: &str =
    "Sworn to and subscribed before me this _____ day of _________, 20__.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpeningForm {
    /// "I, {name}, hereby declare under penalty of perjury pursuant to 28 U.S.C. § 1746 ..."
    PerjuryDeclaration,
    /// "I, {name}, of full age, hereby certify that:"
    FullAgeCertification,
    /// "{name}{, title}{ of org}, being duly sworn, deposes and says:"
    SwornVerification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClosingForm {
    NotaryJurat,
    FederalPerjury,
    StateCertification,
}

/// A table row; `None` matches any value
struct Rule<T> {
    doc_type: Option<DocumentType>,
    jurisdiction: Option<Jurisdiction>,
    form: T,
}

const OPENING_RULES: &[Rule<OpeningForm>] = &[
    Rule {
        doc_type: Some(DocumentType::Verification),
        jurisdiction: None,
        form: OpeningForm::SwornVerification,
    },
    Rule {
        doc_type: None,
        jurisdiction: Some(Jurisdiction::NewJersey),
        form: OpeningForm::FullAgeCertification,
    },
    Rule {
        doc_type: None,
        jurisdiction: Some(Jurisdiction::Federal),
        form: OpeningForm::PerjuryDeclaration,
    },
];

const CLOSING_RULES: &[Rule<ClosingForm>] = &[
    Rule {
        doc_type: Some(DocumentType::Verification),
        jurisdiction: None,
        form: ClosingForm::NotaryJurat,
    },
    Rule {
        doc_type: None,
        jurisdiction: Some(Jurisdiction::Federal),
        form: ClosingForm::FederalPerjury,
    },
    Rule {
        doc_type: None,
        jurisdiction: Some(Jurisdiction::NewJersey),
        form: ClosingForm::StateCertification,
    },
];

fn lookup<T: Copy>(
    rules: &[Rule<T>],
    doc_type: DocumentType,
    jurisdiction: Jurisdiction,
    fallback: T,
) -> T {
    rules
        .iter()
        .find(|rule| {
            rule.doc_type.map_or(true, |t| t == doc_type)
                && rule.jurisdiction.map_or(true, |j| j == jurisdiction)
        })
        .map(|rule| rule.form)
        .unwrap_or(fallback)
}

/// Default opening statement for a document
///
/// Only consulted when the document carries no personal knowledge
/// statement override.
pub fn resolve_opening_statement(
    doc_type: DocumentType,
    jurisdiction: Jurisdiction,
    declarant_name: &str,
    declarant_title: Option<&str>,
    declarant_organization: Option<&str>,
) -> String {
    match lookup(
        OPENING_RULES,
        doc_type,
        jurisdiction,
        OpeningForm::PerjuryDeclaration,
    ) {
        OpeningForm::PerjuryDeclaration => format!(
            "I, {}, hereby declare under penalty of perjury pursuant to 28 U.S.C. § 1746 \
             that the following is true and correct:",
            declarant_name
        ),
        OpeningForm::FullAgeCertification => {
            format!("I, {}, of full age, hereby certify that:", declarant_name)
        }
        OpeningForm::SwornVerification => {
            let mut statement = declarant_name.to_string();
            if let Some(title) = declarant_title {
                statement.push_str(", ");
                statement.push_str(title);
            }
            if let Some(organization) = declarant_organization {
                statement.push_str(" of ");
                statement.push_str(organization);
            }
            statement.push_str(", being duly sworn, deposes and says:");
            statement
        }
    }
}

/// Closing certification clause for a document
pub fn resolve_closing_certification(
    doc_type: DocumentType,
    jurisdiction: Jurisdiction,
) -> &'static str {
    match closing_form(doc_type, jurisdiction) {
        ClosingForm::NotaryJurat => VERIFICATION_JURAT,
        ClosingForm::FederalPerjury => FEDERAL_PERJURY_CLAUSE,
        ClosingForm::StateCertification => NJ_CERTIFICATION_CLAUSE,
    }
}

/// "Executed on {date} at {location}." line that accompanies the federal
/// perjury clause; `None` for every other closing form.
pub fn resolve_execution_line(
    doc_type: DocumentType,
    jurisdiction: Jurisdiction,
    date: &str,
    location: &str,
) -> Option<String> {
    match closing_form(doc_type, jurisdiction) {
        ClosingForm::FederalPerjury => Some(format!("Executed on {} at {}.", date, location)),
        ClosingForm::NotaryJurat | ClosingForm::StateCertification => None,
    }
}

fn closing_form(doc_type: DocumentType, jurisdiction: Jurisdiction) -> ClosingForm {
    lookup(
        CLOSING_RULES,
        doc_type,
        jurisdiction,
        ClosingForm::FederalPerjury,
    )
}

/// Whether a notary acknowledgment block is rendered
///
/// Only New Jersey affidavits that elect notarization get one; federal
/// documents never do, whatever the flag says.
pub fn needs_notary_block(
    doc_type: DocumentType,
    jurisdiction: Jurisdiction,
    notary_required: bool,
) -> bool {
    notary_required
        && doc_type == DocumentType::Affidavit
        && jurisdiction == Jurisdiction::NewJersey
}

/// Fixed wording of the notary acknowledgment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotaryText {
    pub heading: &'static str,
    pub venue: Vec<&'static str>,
    pub jurat: &'static str,
    pub signature_caption: &'static str,
    pub commission_caption: &'static str,
}

pub fn notary_acknowledgment(jurisdiction: Jurisdiction) -> NotaryText {
    let state = match jurisdiction {
        Jurisdiction::NewJersey => "State of New Jersey",
        Jurisdiction::Federal => "State of __________",
    };
    NotaryText {
        heading: "NOTARY ACKNOWLEDGMENT",
        venue: vec![state, "County of __________"],
        jurat: "Sworn to and subscribed before me this _____ day of __________, 20__.",
        signature_caption: "Notary Public",
        commission_caption: "My Commission Expires:",
    }
}

/// Document title: "AFFIDAVIT OF JANE DOE", "CERTIFICATION OF ...", or
/// plain "VERIFICATION"
pub fn resolve_title(doc_type: DocumentType, declarant_name: &str) -> String {
    match doc_type {
        DocumentType::Verification => doc_type.title().to_string(),
        DocumentType::Affidavit | DocumentType::Certification => {
            format!("{} OF {}", doc_type.title(), declarant_name.to_uppercase())
        }
    }
}
