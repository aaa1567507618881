//! Subcommand implementations

use anyhow::{Context, Result};
use assembly_engine::{collect_violations, AssemblyEngine, DocumentTemplate, DocumentTree};
use declaration_types::{CaseInfo, Declarant, DocumentStatus, LegalDocument};
use render_engine::{render_document, RenderFormat, RenderedDocument};
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::path::Path;

/// Path meaning stdin or stdout
const STDIO: &str = "-";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path.as_os_str() == STDIO {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn read_document(path: &Path) -> Result<LegalDocument> {
    read_json(path)
}

pub fn read_template(path: &Path) -> Result<DocumentTemplate> {
    read_json(path)
}

/// Preview tree, or the final tree when `final_copy` is set
pub fn assemble(mut document: LegalDocument, final_copy: bool) -> Result<DocumentTree> {
    let engine = AssemblyEngine::new();
    if !final_copy {
        return Ok(engine.preview(&document));
    }
    let tree = match document.status() {
        DocumentStatus::Draft => engine.finalize(&mut document)?,
        _ => engine.final_tree(&document)?,
    };
    Ok(tree)
}

pub struct ValidationReport {
    pub valid: bool,
    pub text: String,
}

pub fn validate(document: &LegalDocument) -> ValidationReport {
    let violations = collect_violations(document);
    if violations.is_empty() {
        return ValidationReport {
            valid: true,
            text: "Document is ready to finalize".to_string(),
        };
    }
    let mut text = format!("{} problem(s):", violations.len());
    for violation in &violations {
        text.push_str(&format!("\n  - {}", violation));
    }
    ValidationReport { valid: false, text }
}

pub async fn render(
    document: LegalDocument,
    format: RenderFormat,
    timeout_ms: u64,
    final_copy: bool,
) -> Result<RenderedDocument> {
    let tree = assemble(document, final_copy)?;
    Ok(render_document(&tree, format, timeout_ms).await?)
}

pub fn instantiate(
    template: &DocumentTemplate,
    declarant: String,
    caption: String,
    case_number: String,
    court: String,
) -> Result<LegalDocument> {
    let case_info = CaseInfo {
        caption,
        case_number,
        court,
        ..Default::default()
    };
    Ok(template.instantiate(case_info, Declarant::new(declarant))?)
}

pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if path.as_os_str() == STDIO {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assembly_engine::BlockKind;
    use declaration_types::{DocumentParagraph, DocumentType, Jurisdiction, SignatureBlock};
    use pretty_assertions::assert_eq;

    fn draft() -> LegalDocument {
        let mut doc = LegalDocument::new(DocumentType::Verification, Jurisdiction::NewJersey)
            .with_case_info(CaseInfo {
                caption: "Doe v. Roe".to_string(),
                case_number: "MID-L-42-24".to_string(),
                court: "SUPERIOR COURT OF NEW JERSEY".to_string(),
                ..Default::default()
            })
            .with_declarant(Declarant::new("Jane Doe"))
            .with_signature_block(SignatureBlock {
                declarant_name: "Jane Doe".to_string(),
                location: Some("Trenton, NJ".to_string()),
                ..Default::default()
            });
        doc.add_paragraph(DocumentParagraph::new("The allegations of the complaint are true."))
            .unwrap();
        doc
    }

    #[test]
    fn test_assemble_preview_and_final() {
        let preview = assemble(draft(), false).unwrap();
        assert!(preview.has_block(BlockKind::Title));

        let final_tree = assemble(draft(), true).unwrap();
        assert_eq!(final_tree.paragraphs().count(), 1);
    }

    #[test]
    fn test_final_assembly_rejects_incomplete_draft() {
        let doc = LegalDocument::new(DocumentType::Affidavit, Jurisdiction::Federal);
        assert!(assemble(doc, true).is_err());
    }

    #[test]
    fn test_final_status_in_file_is_revalidated() {
        let doc: LegalDocument = serde_json::from_value(serde_json::json!({
            "type": "affidavit",
            "jurisdiction": "federal",
            "status": "final"
        }))
        .unwrap();
        assert!(assemble(doc, true).is_err());
    }

    #[test]
    fn test_validation_report() {
        assert!(validate(&draft()).valid);

        let report = validate(&LegalDocument::new(
            DocumentType::Affidavit,
            Jurisdiction::NewJersey,
        ));
        assert!(!report.valid);
        assert!(report.text.starts_with("7 problem(s):"));
    }

    #[test]
    fn test_instantiate_uses_default_court() {
        let template: DocumentTemplate = serde_json::from_value(serde_json::json!({
            "id": "t",
            "name": "Basic",
            "type": "certification",
            "jurisdiction": "federal",
            "content": { "paragraphs": ["I, [NAME], am over eighteen."] }
        }))
        .unwrap();
        let doc = instantiate(
            &template,
            "Ann Lee".to_string(),
            String::new(),
            String::new(),
            String::new(),
        )
        .unwrap();
        assert_eq!(doc.case_info.court, "UNITED STATES DISTRICT COURT");
        assert_eq!(doc.paragraphs()[0].content, "I, Ann Lee, am over eighteen.");
    }

    #[tokio::test]
    async fn test_render_text() {
        let rendered = render(draft(), RenderFormat::Text, 1_000, true).await.unwrap();
        assert_eq!(rendered.filename, "MID_L_42_24_verification.txt");
        let text = String::from_utf8(rendered.bytes).unwrap();
        assert!(text.contains("VERIFICATION"));
    }
}
