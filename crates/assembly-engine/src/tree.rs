//! Format-agnostic document tree
//!
//! The assembler's only output. Renderers walk `blocks` in order and must not
//! alter any text; all legal wording is settled before a tree exists.

use declaration_types::{DocumentType, Jurisdiction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub document_type: DocumentType,
    pub jurisdiction: Jurisdiction,
    /// Case number as entered (may be empty in drafts); used for filenames
    pub case_number: String,
    /// "{caption} - {case number}" line repeated on every printed page
    pub running_header: String,
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    /// Text of the title block, if any
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Title { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = (u32, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph { number, text } => Some((*number, text.as_str())),
            _ => None,
        })
    }

    pub fn has_block(&self, kind: BlockKind) -> bool {
        self.blocks.iter().any(|b| b.kind() == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    CourtHeader {
        court: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        division: Option<String>,
    },
    CaseCaption {
        caption: String,
        number_label: String,
        case_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        judge: Option<String>,
    },
    Title {
        text: String,
    },
    OpeningStatement {
        text: String,
    },
    Paragraph {
        number: u32,
        text: String,
    },
    ExhibitList {
        heading: String,
        items: Vec<ExhibitListItem>,
    },
    ClosingCertification {
        statement: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        execution: Option<String>,
    },
    SignatureLine {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        organization: Option<String>,
    },
    DateLocation {
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    AttorneyBlock {
        lines: Vec<String>,
        representation: String,
    },
    NotaryBlock {
        heading: String,
        venue: Vec<String>,
        jurat: String,
        signature_caption: String,
        commission_caption: String,
    },
}

/// Discriminant of [`Block`], for presence checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    CourtHeader,
    CaseCaption,
    Title,
    OpeningStatement,
    Paragraph,
    ExhibitList,
    ClosingCertification,
    SignatureLine,
    DateLocation,
    AttorneyBlock,
    NotaryBlock,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::CourtHeader { .. } => BlockKind::CourtHeader,
            Block::CaseCaption { .. } => BlockKind::CaseCaption,
            Block::Title { .. } => BlockKind::Title,
            Block::OpeningStatement { .. } => BlockKind::OpeningStatement,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::ExhibitList { .. } => BlockKind::ExhibitList,
            Block::ClosingCertification { .. } => BlockKind::ClosingCertification,
            Block::SignatureLine { .. } => BlockKind::SignatureLine,
            Block::DateLocation { .. } => BlockKind::DateLocation,
            Block::AttorneyBlock { .. } => BlockKind::AttorneyBlock,
            Block::NotaryBlock { .. } => BlockKind::NotaryBlock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitListItem {
    pub label: String,
    pub description: String,
    pub confidential: bool,
    /// "Exhibit {label} - {description}{ (CONFIDENTIAL)}"
    pub text: String,
}

impl ExhibitListItem {
    pub fn new(label: &str, description: &str, confidential: bool) -> Self {
        let mut text = format!("Exhibit {} - {}", label, description);
        if confidential {
            text.push_str(" (CONFIDENTIAL)");
        }
        Self {
            label: label.to_string(),
            description: description.to_string(),
            confidential,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let block = Block::Paragraph {
            number: 3,
            text: "Hello".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "paragraph");
        assert_eq!(json["number"], 3);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let block = Block::CourtHeader {
            court: "SUPERIOR COURT OF NEW JERSEY".to_string(),
            division: None,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("division").is_none());
    }

    #[test]
    fn test_exhibit_list_item_text() {
        assert_eq!(
            ExhibitListItem::new("A", "Lease agreement", false).text,
            "Exhibit A - Lease agreement"
        );
        assert_eq!(
            ExhibitListItem::new("AB", "Medical records", true).text,
            "Exhibit AB - Medical records (CONFIDENTIAL)"
        );
    }
}
