pub mod document;
pub mod labels;
pub mod types;

pub use document::{DocumentError, LegalDocument, MoveDirection};
pub use labels::{exhibit_label, relabel_exhibits, renumber_paragraphs};
pub use types::{
    non_empty, AttorneyInfo, CaseInfo, Declarant, DocumentParagraph, DocumentStatus, DocumentType,
    Exhibit, ExhibitKind, Jurisdiction, SignatureBlock,
};
