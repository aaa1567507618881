//! Document assembly
//!
//! Composes case, declarant and signature data with the phrase table, the
//! label allocator and the reference resolver into an ordered
//! [`DocumentTree`]. Assembly is pure: no I/O, no errors, and the same
//! document always yields the same tree.

use chrono::NaiveDate;
use declaration_types::{non_empty, AttorneyInfo, DocumentType, LegalDocument};

use crate::phrases;
use crate::references::resolve_references_detailed;
use crate::tree::{Block, DocumentTree, ExhibitListItem};

/// Label printed before the case number in the caption
const CASE_NUMBER_LABEL: &str = "Civil Action No.";

const EXHIBIT_LIST_HEADING: &str = "EXHIBITS:";

/// Whether missing fields are shown as bracketed prompts or left blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyMode {
    /// Live preview of an in-progress draft
    #[default]
    Preview,
    /// Finalized output; completeness has already been validated
    Final,
}

/// Stand-in text for absent fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    pub declarant_name: &'static str,
    pub case_caption: &'static str,
    pub case_number: &'static str,
    pub date: &'static str,
    pub location: &'static str,
}

pub const PREVIEW_PLACEHOLDERS: Placeholders = Placeholders {
    declarant_name: "[Declarant Name]",
    case_caption: "[Case Caption]",
    case_number: "[Case Number]",
    date: "[Date]",
    location: "[City, State]",
};

/// Blank lines left for handwriting on finalized output
pub const FINAL_BLANKS: Placeholders = Placeholders {
    declarant_name: "____________________",
    case_caption: "____________________",
    case_number: "__________",
    date: "____________________",
    location: "____________________",
};

impl AssemblyMode {
    pub fn placeholders(&self) -> &'static Placeholders {
        match self {
            AssemblyMode::Preview => &PREVIEW_PLACEHOLDERS,
            AssemblyMode::Final => &FINAL_BLANKS,
        }
    }
}

/// Assemble a draft for preview, substituting placeholders for gaps
pub fn assemble(document: &LegalDocument) -> DocumentTree {
    assemble_with(document, AssemblyMode::Preview)
}

/// Assemble a document in the given mode
pub fn assemble_with(document: &LegalDocument, mode: AssemblyMode) -> DocumentTree {
    let fill = mode.placeholders();
    let case = &document.case_info;
    let declarant = &document.declarant;
    let signature = &document.signature_block;

    let declarant_name = non_empty(Some(declarant.name.as_str())).unwrap_or(fill.declarant_name);
    let declarant_title = non_empty(declarant.title.as_deref());
    let declarant_organization = non_empty(declarant.organization.as_deref());
    let caption = non_empty(Some(case.caption.as_str())).unwrap_or(fill.case_caption);
    let case_number = non_empty(Some(case.case_number.as_str())).unwrap_or(fill.case_number);

    let mut blocks = Vec::with_capacity(document.paragraphs().len() + 10);

    blocks.push(Block::CourtHeader {
        court: non_empty(Some(case.court.as_str()))
            .unwrap_or(document.jurisdiction.default_court())
            .to_string(),
        division: non_empty(case.division.as_deref()).map(str::to_string),
    });

    blocks.push(Block::CaseCaption {
        caption: caption.to_string(),
        number_label: CASE_NUMBER_LABEL.to_string(),
        case_number: case_number.to_string(),
        judge: non_empty(case.judge.as_deref()).map(str::to_string),
    });

    blocks.push(Block::Title {
        text: phrases::resolve_title(document.doc_type, declarant_name),
    });

    let opening = match non_empty(document.personal_knowledge_statement.as_deref()) {
        Some(statement) => statement.to_string(),
        None => phrases::resolve_opening_statement(
            document.doc_type,
            document.jurisdiction,
            declarant_name,
            declarant_title,
            declarant_organization,
        ),
    };
    blocks.push(Block::OpeningStatement { text: opening });

    for paragraph in document.paragraphs() {
        let resolved = resolve_references_detailed(
            &paragraph.content,
            paragraph.exhibit_references(),
            document.exhibits(),
        );
        if !resolved.dangling.is_empty() {
            tracing::warn!(
                paragraph = paragraph.number(),
                dangling = ?resolved.dangling,
                "Paragraph cites exhibits that no longer exist"
            );
        }
        blocks.push(Block::Paragraph {
            number: paragraph.number(),
            text: resolved.text,
        });
    }

    if !document.exhibits().is_empty() {
        blocks.push(Block::ExhibitList {
            heading: EXHIBIT_LIST_HEADING.to_string(),
            items: document
                .exhibits()
                .iter()
                .map(|e| ExhibitListItem::new(e.label(), &e.description, e.is_confidential))
                .collect(),
        });
    }

    let date = signature.date.map(format_date);
    let location = non_empty(signature.location.as_deref());
    blocks.push(Block::ClosingCertification {
        statement: phrases::resolve_closing_certification(document.doc_type, document.jurisdiction)
            .to_string(),
        execution: phrases::resolve_execution_line(
            document.doc_type,
            document.jurisdiction,
            date.as_deref().unwrap_or(fill.date),
            location.unwrap_or(fill.location),
        ),
    });

    let signer = non_empty(Some(signature.declarant_name.as_str())).unwrap_or(declarant_name);
    blocks.push(Block::SignatureLine {
        name: signer.to_string(),
        title: declarant_title.map(str::to_string),
        organization: declarant_organization.map(str::to_string),
    });

    if date.is_some() || location.is_some() {
        blocks.push(Block::DateLocation {
            date,
            location: location.map(str::to_string),
        });
    }

    if let Some(attorney) = signature.attorney_info.as_ref() {
        if let Some(block) = attorney_block(attorney, document.doc_type) {
            blocks.push(block);
        }
    }

    if phrases::needs_notary_block(
        document.doc_type,
        document.jurisdiction,
        signature.notary_required,
    ) {
        let notary = phrases::notary_acknowledgment(document.jurisdiction);
        blocks.push(Block::NotaryBlock {
            heading: notary.heading.to_string(),
            venue: notary.venue.iter().map(|s| s.to_string()).collect(),
            jurat: notary.jurat.to_string(),
            signature_caption: notary.signature_caption.to_string(),
            commission_caption: notary.commission_caption.to_string(),
        });
    }

    tracing::debug!(
        document_id = %document.id,
        blocks = blocks.len(),
        ?mode,
        "Assembled document tree"
    );

    DocumentTree {
        document_type: document.doc_type,
        jurisdiction: document.jurisdiction,
        case_number: case.case_number.trim().to_string(),
        running_header: format!("{} - {}", single_line(caption), case_number),
        blocks,
    }
}

/// Attorney block, present only when the attorney has a name
fn attorney_block(attorney: &AttorneyInfo, doc_type: DocumentType) -> Option<Block> {
    let name = non_empty(Some(attorney.name.as_str()))?;

    let mut lines = vec![format!("{}, Esq.", name)];
    if let Some(firm) = non_empty(attorney.firm.as_deref()) {
        lines.push(firm.to_string());
    }
    if let Some(address) = non_empty(attorney.address.as_deref()) {
        lines.extend(
            address
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    if let Some(phone) = non_empty(attorney.phone.as_deref()) {
        lines.push(format!("Tel: {}", phone));
    }
    if let Some(email) = non_empty(attorney.email.as_deref()) {
        lines.push(format!("Email: {}", email));
    }
    if let Some(bar) = non_empty(Some(attorney.bar_number.as_str())) {
        lines.push(format!("Attorney ID: {}", bar));
    }

    let party = match doc_type {
        DocumentType::Verification => "Plaintiff",
        DocumentType::Affidavit | DocumentType::Certification => "Declarant",
    };

    Some(Block::AttorneyBlock {
        lines,
        representation: format!("Attorney for {}", party),
    })
}

/// "March 5, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Collapse a multi-line caption for the running header
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
