pub mod assembler;
pub mod phrases;
pub mod references;
pub mod templates;
pub mod tree;
pub mod validation;

pub use assembler::{assemble, assemble_with, format_date, AssemblyMode, Placeholders};
pub use templates::{DocumentTemplate, TemplateContent};
pub use tree::{Block, BlockKind, DocumentTree, ExhibitListItem};
pub use validation::{collect_violations, validate_for_finalization, ValidationError, Violation};

use declaration_types::{DocumentError, DocumentStatus, LegalDocument};
use thiserror::Error;
use tracing::info;

/// Failure of a lifecycle operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// AssemblyEngine entry point
pub struct AssemblyEngine;

impl AssemblyEngine {
    pub fn new() -> Self {
        Self
    }

    /// Live preview tree; never fails, gaps become placeholders
    pub fn preview(&self, document: &LegalDocument) -> DocumentTree {
        assemble(document)
    }

    /// Finalization completeness check without changing status
    pub fn validate(&self, document: &LegalDocument) -> Result<(), ValidationError> {
        validate_for_finalization(document)
    }

    /// Validate, move draft -> final, and assemble the final tree
    ///
    /// On a validation failure the document stays a draft.
    pub fn finalize(&self, document: &mut LegalDocument) -> Result<DocumentTree, EngineError> {
        document.finalize_with(|draft| {
            validate_for_finalization(draft).map_err(EngineError::from)
        })?;
        info!(document_id = %document.id, "Document finalized");
        Ok(assemble_with(document, AssemblyMode::Final))
    }

    /// Assemble a document already in the final or filed state
    ///
    /// The status may come from an untrusted payload, so completeness is
    /// checked again before the final copy is produced.
    pub fn final_tree(&self, document: &LegalDocument) -> Result<DocumentTree, EngineError> {
        if document.status() == DocumentStatus::Draft {
            return Err(DocumentError::IllegalTransition {
                from: DocumentStatus::Draft,
                to: DocumentStatus::Final,
            }
            .into());
        }
        validate_for_finalization(document)?;
        Ok(assemble_with(document, AssemblyMode::Final))
    }

    /// final -> filed; filed is terminal
    pub fn mark_filed(&self, document: &mut LegalDocument) -> Result<(), EngineError> {
        if document.status() == DocumentStatus::Final {
            validate_for_finalization(document)?;
        }
        document.transition(DocumentStatus::Filed)?;
        info!(document_id = %document.id, "Document marked filed");
        Ok(())
    }

    /// final -> draft, making the document editable again
    pub fn reopen(&self, document: &mut LegalDocument) -> Result<(), EngineError> {
        document.transition(DocumentStatus::Draft)?;
        info!(document_id = %document.id, "Document reopened");
        Ok(())
    }
}

impl Default for AssemblyEngine {
    fn default() -> Self {
        Self::new()
    }
}
