//! LegalDocument aggregate
//!
//! Paragraphs and exhibits are owned children kept behind accessors. Every
//! structural mutation goes through a method here that re-runs the label
//! allocator over the full sequence, and deserialization recomputes labels and
//! numbers from array order, so persisted values are never trusted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::labels::{relabel_in_place, renumber_in_place};
use crate::types::{
    new_id, CaseInfo, Declarant, DocumentParagraph, DocumentStatus, DocumentType, Exhibit,
    Jurisdiction, SignatureBlock,
};

/// Errors raised by document mutations and status transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Paragraph not found: {0}")]
    ParagraphNotFound(String),

    #[error("Exhibit not found: {0}")]
    ExhibitNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Document is {0:?} and can no longer be edited")]
    NotEditable(DocumentStatus),

    #[error("Illegal status transition from {from:?} to {to:?}")]
    IllegalTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },
}

/// Direction for single-step reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// A declaration, affidavit or verification under assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DocumentPayload")]
pub struct LegalDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub jurisdiction: Jurisdiction,
    pub case_info: CaseInfo,
    pub declarant: Declarant,
    /// Overrides the resolved opening statement when non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_knowledge_statement: Option<String>,
    paragraphs: Vec<DocumentParagraph>,
    exhibits: Vec<Exhibit>,
    pub signature_block: SignatureBlock,
    status: DocumentStatus,
}

/// Wire shape of a LegalDocument before derived state is recomputed
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentPayload {
    #[serde(default = "new_id")]
    id: String,
    #[serde(rename = "type")]
    doc_type: DocumentType,
    jurisdiction: Jurisdiction,
    #[serde(default)]
    case_info: CaseInfo,
    #[serde(default)]
    declarant: Declarant,
    #[serde(default)]
    personal_knowledge_statement: Option<String>,
    #[serde(default)]
    paragraphs: Vec<DocumentParagraph>,
    #[serde(default)]
    exhibits: Vec<Exhibit>,
    #[serde(default)]
    signature_block: SignatureBlock,
    #[serde(default)]
    status: DocumentStatus,
}

impl TryFrom<DocumentPayload> for LegalDocument {
    type Error = DocumentError;

    /// Ids must be unique within each sequence, as `insert_*` enforces
    fn try_from(payload: DocumentPayload) -> Result<Self, Self::Error> {
        ensure_unique_ids(payload.paragraphs.iter().map(|p| p.id.as_str()))?;
        ensure_unique_ids(payload.exhibits.iter().map(|e| e.id.as_str()))?;

        let mut doc = LegalDocument {
            id: payload.id,
            doc_type: payload.doc_type,
            jurisdiction: payload.jurisdiction,
            case_info: payload.case_info,
            declarant: payload.declarant,
            personal_knowledge_statement: payload.personal_knowledge_statement,
            paragraphs: payload.paragraphs,
            exhibits: payload.exhibits,
            signature_block: payload.signature_block,
            status: payload.status,
        };
        for paragraph in &mut doc.paragraphs {
            paragraph.dedup_references();
        }
        doc.resequence();
        Ok(doc)
    }
}

fn ensure_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), DocumentError> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DocumentError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

impl LegalDocument {
    /// Create an empty draft
    pub fn new(doc_type: DocumentType, jurisdiction: Jurisdiction) -> Self {
        Self {
            id: new_id(),
            doc_type,
            jurisdiction,
            case_info: CaseInfo::default(),
            declarant: Declarant::default(),
            personal_knowledge_statement: None,
            paragraphs: Vec::new(),
            exhibits: Vec::new(),
            signature_block: SignatureBlock::default(),
            status: DocumentStatus::Draft,
        }
    }

    pub fn with_case_info(mut self, case_info: CaseInfo) -> Self {
        self.case_info = case_info;
        self
    }

    pub fn with_declarant(mut self, declarant: Declarant) -> Self {
        self.declarant = declarant;
        self
    }

    pub fn with_signature_block(mut self, signature_block: SignatureBlock) -> Self {
        self.signature_block = signature_block;
        self
    }

    pub fn with_personal_knowledge_statement(mut self, statement: impl Into<String>) -> Self {
        self.personal_knowledge_statement = Some(statement.into());
        self
    }

    pub fn paragraphs(&self) -> &[DocumentParagraph] {
        &self.paragraphs
    }

    pub fn exhibits(&self) -> &[Exhibit] {
        &self.exhibits
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn paragraph(&self, id: &str) -> Option<&DocumentParagraph> {
        self.paragraphs.iter().find(|p| p.id == id)
    }

    pub fn exhibit(&self, id: &str) -> Option<&Exhibit> {
        self.exhibits.iter().find(|e| e.id == id)
    }

    // ------------------------------------------------------------------
    // Paragraphs
    // ------------------------------------------------------------------

    /// Append a paragraph; returns its assigned number
    pub fn add_paragraph(&mut self, paragraph: DocumentParagraph) -> Result<u32, DocumentError> {
        let index = self.paragraphs.len();
        self.insert_paragraph(index, paragraph)
    }

    /// Insert a paragraph at `index`; returns its assigned number
    pub fn insert_paragraph(
        &mut self,
        index: usize,
        mut paragraph: DocumentParagraph,
    ) -> Result<u32, DocumentError> {
        self.ensure_editable()?;
        check_insert_index(index, self.paragraphs.len())?;
        if self.paragraph(&paragraph.id).is_some() {
            return Err(DocumentError::DuplicateId(paragraph.id));
        }
        paragraph.dedup_references();
        self.paragraphs.insert(index, paragraph);
        renumber_in_place(&mut self.paragraphs);
        Ok(index as u32 + 1)
    }

    pub fn update_paragraph(
        &mut self,
        id: &str,
        content: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.ensure_editable()?;
        let paragraph = self.paragraph_mut(id)?;
        paragraph.content = content.into();
        Ok(())
    }

    pub fn remove_paragraph(&mut self, id: &str) -> Result<DocumentParagraph, DocumentError> {
        self.ensure_editable()?;
        let index = self.paragraph_index(id)?;
        let removed = self.paragraphs.remove(index);
        renumber_in_place(&mut self.paragraphs);
        Ok(removed)
    }

    /// Swap a paragraph with its neighbour; a no-op at either end
    pub fn move_paragraph(
        &mut self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<(), DocumentError> {
        self.ensure_editable()?;
        let index = self.paragraph_index(id)?;
        if let Some(target) = step(index, direction, self.paragraphs.len()) {
            self.paragraphs.swap(index, target);
        }
        renumber_in_place(&mut self.paragraphs);
        Ok(())
    }

    /// Move a paragraph so that it ends up at `index`
    pub fn move_paragraph_to(&mut self, id: &str, index: usize) -> Result<(), DocumentError> {
        self.ensure_editable()?;
        let from = self.paragraph_index(id)?;
        check_move_index(index, self.paragraphs.len())?;
        let paragraph = self.paragraphs.remove(from);
        self.paragraphs.insert(index, paragraph);
        renumber_in_place(&mut self.paragraphs);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Exhibits
    // ------------------------------------------------------------------

    /// Append an exhibit; returns its assigned label
    pub fn add_exhibit(&mut self, exhibit: Exhibit) -> Result<String, DocumentError> {
        let index = self.exhibits.len();
        self.insert_exhibit(index, exhibit)
    }

    /// Insert an exhibit at `index`; later exhibits shift one label down
    pub fn insert_exhibit(
        &mut self,
        index: usize,
        exhibit: Exhibit,
    ) -> Result<String, DocumentError> {
        self.ensure_editable()?;
        check_insert_index(index, self.exhibits.len())?;
        if self.exhibit(&exhibit.id).is_some() {
            return Err(DocumentError::DuplicateId(exhibit.id));
        }
        self.exhibits.insert(index, exhibit);
        relabel_in_place(&mut self.exhibits);
        Ok(self.exhibits[index].label.clone())
    }

    /// Remove an exhibit and relabel the rest
    ///
    /// Paragraph references to the removed exhibit are left in place and
    /// render as their literal bracket token.
    pub fn remove_exhibit(&mut self, id: &str) -> Result<Exhibit, DocumentError> {
        self.ensure_editable()?;
        let index = self.exhibit_index(id)?;
        let removed = self.exhibits.remove(index);
        relabel_in_place(&mut self.exhibits);
        Ok(removed)
    }

    pub fn move_exhibit(
        &mut self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<(), DocumentError> {
        self.ensure_editable()?;
        let index = self.exhibit_index(id)?;
        if let Some(target) = step(index, direction, self.exhibits.len()) {
            self.exhibits.swap(index, target);
        }
        relabel_in_place(&mut self.exhibits);
        Ok(())
    }

    /// Cite an existing exhibit from a paragraph; false if already cited
    pub fn add_exhibit_reference(
        &mut self,
        paragraph_id: &str,
        exhibit_id: &str,
    ) -> Result<bool, DocumentError> {
        self.ensure_editable()?;
        if self.exhibit(exhibit_id).is_none() {
            return Err(DocumentError::ExhibitNotFound(exhibit_id.to_string()));
        }
        Ok(self.paragraph_mut(paragraph_id)?.add_reference(exhibit_id))
    }

    pub fn remove_exhibit_reference(
        &mut self,
        paragraph_id: &str,
        exhibit_id: &str,
    ) -> Result<bool, DocumentError> {
        self.ensure_editable()?;
        Ok(self.paragraph_mut(paragraph_id)?.remove_reference(exhibit_id))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Move to another lifecycle status
    ///
    /// Legal moves: final -> filed and final -> draft. Draft -> final only
    /// happens through [`LegalDocument::finalize_with`].
    pub fn transition(&mut self, to: DocumentStatus) -> Result<(), DocumentError> {
        let from = self.status;
        let allowed = matches!(
            (from, to),
            (DocumentStatus::Final, DocumentStatus::Filed)
                | (DocumentStatus::Final, DocumentStatus::Draft)
        );
        if !allowed {
            return Err(DocumentError::IllegalTransition { from, to });
        }
        self.status = to;
        Ok(())
    }

    /// draft -> final, gated by a completeness check on the draft
    pub fn finalize_with<E, F>(&mut self, check: F) -> Result<(), E>
    where
        F: FnOnce(&LegalDocument) -> Result<(), E>,
        E: From<DocumentError>,
    {
        if self.status != DocumentStatus::Draft {
            return Err(DocumentError::IllegalTransition {
                from: self.status,
                to: DocumentStatus::Final,
            }
            .into());
        }
        check(self)?;
        self.status = DocumentStatus::Final;
        Ok(())
    }

    /// Recompute every label and number from array order
    pub fn resequence(&mut self) {
        renumber_in_place(&mut self.paragraphs);
        relabel_in_place(&mut self.exhibits);
    }

    fn ensure_editable(&self) -> Result<(), DocumentError> {
        match self.status {
            DocumentStatus::Draft => Ok(()),
            other => Err(DocumentError::NotEditable(other)),
        }
    }

    fn paragraph_index(&self, id: &str) -> Result<usize, DocumentError> {
        self.paragraphs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DocumentError::ParagraphNotFound(id.to_string()))
    }

    fn paragraph_mut(&mut self, id: &str) -> Result<&mut DocumentParagraph, DocumentError> {
        self.paragraphs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DocumentError::ParagraphNotFound(id.to_string()))
    }

    fn exhibit_index(&self, id: &str) -> Result<usize, DocumentError> {
        self.exhibits
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DocumentError::ExhibitNotFound(id.to_string()))
    }
}

fn step(index: usize, direction: MoveDirection, len: usize) -> Option<usize> {
    match direction {
        MoveDirection::Up if index > 0 => Some(index - 1),
        MoveDirection::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}

fn check_insert_index(index: usize, len: usize) -> Result<(), DocumentError> {
    if index > len {
        return Err(DocumentError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

fn check_move_index(index: usize, len: usize) -> Result<(), DocumentError> {
    if index >= len {
        return Err(DocumentError::IndexOutOfBounds { index, len });
    }
    Ok(())
}
