//! Request/response models for the Declaration API

use assembly_engine::{DocumentTemplate, DocumentTree, Violation};
use declaration_types::{CaseInfo, Declarant, LegalDocument};
use render_engine::RenderFormat;
use serde::{Deserialize, Serialize};

/// Query string of the raw render endpoint
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    /// Render the final copy (validates drafts) instead of the live preview
    #[serde(default, rename = "final")]
    pub final_copy: bool,
}

/// Body of the JSON render endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub document: LegalDocument,
    #[serde(default)]
    pub format: RenderFormat,
    #[serde(default, rename = "final")]
    pub final_copy: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<Violation>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub document: LegalDocument,
    pub tree: DocumentTree,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantiateRequest {
    pub template: DocumentTemplate,
    #[serde(default)]
    pub case_info: CaseInfo,
    #[serde(default)]
    pub declarant: Declarant,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    pub format: RenderFormat,
    pub mime_type: String,
    pub extension: String,
}

impl From<RenderFormat> for FormatInfo {
    fn from(format: RenderFormat) -> Self {
        Self {
            format,
            mime_type: format.mime_type().to_string(),
            extension: format.extension().to_string(),
        }
    }
}
