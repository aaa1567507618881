//! Starter templates
//!
//! A template carries boilerplate paragraphs for a common filing. The `[NAME]`
//! token is filled with the declarant's name on instantiation; any other
//! bracketed prompts (`[PARTY]`, `[DATE]`) are left for the author to edit.

use serde::{Deserialize, Serialize};

use declaration_types::{
    non_empty, CaseInfo, Declarant, DocumentError, DocumentParagraph, DocumentType,
    Jurisdiction, LegalDocument, SignatureBlock,
};

/// Token replaced with the declarant's name
pub const NAME_TOKEN: &str = "[NAME]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub jurisdiction: Jurisdiction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub content: TemplateContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_knowledge_statement: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl DocumentTemplate {
    /// Build a fresh draft from this template
    ///
    /// The court falls back to the jurisdiction default when the case info
    /// leaves it blank.
    pub fn instantiate(
        &self,
        case_info: CaseInfo,
        declarant: Declarant,
    ) -> Result<LegalDocument, DocumentError> {
        let mut case_info = case_info;
        if case_info.court.trim().is_empty() {
            case_info.court = self.jurisdiction.default_court().to_string();
        }

        let name = declarant.name.clone();
        let mut document = LegalDocument::new(self.doc_type, self.jurisdiction)
            .with_case_info(case_info)
            .with_declarant(declarant)
            .with_signature_block(SignatureBlock {
                declarant_name: name.clone(),
                ..Default::default()
            });

        if let Some(statement) = non_empty(self.content.personal_knowledge_statement.as_deref()) {
            document = document.with_personal_knowledge_statement(fill_name(statement, &name));
        }

        for text in &self.content.paragraphs {
            document.add_paragraph(DocumentParagraph::new(fill_name(text, &name)))?;
        }

        Ok(document)
    }
}

fn fill_name(text: &str, name: &str) -> String {
    match non_empty(Some(name)) {
        Some(name) => text.replace(NAME_TOKEN, name),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declaration_types::DocumentStatus;
    use pretty_assertions::assert_eq;

    fn template() -> DocumentTemplate {
        serde_json::from_value(serde_json::json!({
            "id": "tpl-1",
            "name": "Summary Judgment Opposition",
            "type": "certification",
            "jurisdiction": "nj",
            "category": "Motion Practice",
            "content": {
                "personalKnowledgeStatement": "I, [NAME], hereby certify as follows:",
                "paragraphs": [
                    "I am the [TITLE] in this matter.",
                    "I, [NAME], have personal knowledge of the facts set forth herein."
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_instantiate_fills_name_and_numbers_paragraphs() {
        let doc = template()
            .instantiate(CaseInfo::default(), Declarant::new("Jane Doe"))
            .unwrap();

        assert_eq!(doc.status(), DocumentStatus::Draft);
        assert_eq!(
            doc.personal_knowledge_statement.as_deref(),
            Some("I, Jane Doe, hereby certify as follows:")
        );
        let paragraphs: Vec<(u32, &str)> = doc
            .paragraphs()
            .iter()
            .map(|p| (p.number(), p.content.as_str()))
            .collect();
        assert_eq!(
            paragraphs,
            vec![
                (1, "I am the [TITLE] in this matter."),
                (2, "I, Jane Doe, have personal knowledge of the facts set forth herein."),
            ]
        );
        assert_eq!(doc.signature_block.declarant_name, "Jane Doe");
    }

    #[test]
    fn test_blank_name_keeps_token() {
        let doc = template()
            .instantiate(CaseInfo::default(), Declarant::default())
            .unwrap();
        assert_eq!(
            doc.personal_knowledge_statement.as_deref(),
            Some("I, [NAME], hereby certify as follows:")
        );
    }

    #[test]
    fn test_court_defaults_from_jurisdiction() {
        let doc = template()
            .instantiate(CaseInfo::default(), Declarant::new("Jane Doe"))
            .unwrap();
        assert_eq!(doc.case_info.court, "SUPERIOR COURT OF NEW JERSEY");

        let case_info = CaseInfo {
            court: "SUPERIOR COURT OF NEW JERSEY, CHANCERY DIVISION".to_string(),
            ..Default::default()
        };
        let doc = template()
            .instantiate(case_info, Declarant::new("Jane Doe"))
            .unwrap();
        assert_eq!(
            doc.case_info.court,
            "SUPERIOR COURT OF NEW JERSEY, CHANCERY DIVISION"
        );
    }
}
