//! Word (.docx) rendering
//!
//! One Word paragraph per line of the tree, in block order. Layout follows
//! the print path: US letter, 1in margins, the running header on every page.
//! Word paginates when the file is opened.

use std::io::Cursor;

use assembly_engine::{Block, DocumentTree};
use docx_rs::{AlignmentType, BreakType, Docx, Header, PageMargin, Paragraph, Run, RunFonts};

use super::{RenderedDocument, Renderer};
use crate::compiler::{RenderError, RenderFormat};

/// Twentieths of a point
const LETTER_WIDTH: u32 = 12_240;
const LETTER_HEIGHT: u32 = 15_840;
const ONE_INCH: i32 = 1_440;

/// Half-points
const BODY_SIZE: usize = 24;
const TITLE_SIZE: usize = 28;
const HEADER_SIZE: usize = 20;

const BODY_FONT: &str = "Times New Roman";
const SIGNATURE_RULE: &str = "______________________________";

pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Word document model for a tree
    pub fn to_docx(&self, tree: &DocumentTree) -> Docx {
        let header = Header::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(&tree.running_header).size(HEADER_SIZE))
                .align(AlignmentType::Center),
        );

        let mut docx = Docx::new()
            .page_size(LETTER_WIDTH, LETTER_HEIGHT)
            .page_margin(
                PageMargin::new()
                    .top(ONE_INCH)
                    .bottom(ONE_INCH)
                    .left(ONE_INCH)
                    .right(ONE_INCH),
            )
            .default_fonts(RunFonts::new().ascii(BODY_FONT).hi_ansi(BODY_FONT))
            .default_size(BODY_SIZE)
            .header(header);

        for paragraph in tree.blocks.iter().flat_map(block_paragraphs) {
            docx = docx.add_paragraph(paragraph);
        }
        docx
    }

    /// Packed .docx bytes
    pub fn to_bytes(&self, tree: &DocumentTree) -> Result<Vec<u8>, RenderError> {
        let mut buf = Cursor::new(Vec::new());
        self.to_docx(tree)
            .build()
            .pack(&mut buf)
            .map_err(|e| RenderError::RenderingFailed(format!("DOCX packing failed: {}", e)))?;
        Ok(buf.into_inner())
    }
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DocxRenderer {
    fn format(&self) -> RenderFormat {
        RenderFormat::Docx
    }

    fn render(&self, tree: &DocumentTree) -> Result<RenderedDocument, RenderError> {
        Ok(RenderedDocument::new(
            self.to_bytes(tree)?,
            tree,
            RenderFormat::Docx,
            1,
        ))
    }
}

fn block_paragraphs(block: &Block) -> Vec<Paragraph> {
    match block {
        Block::CourtHeader { court, division } => {
            let mut out = vec![Paragraph::new()
                .add_run(Run::new().add_text(court).bold())
                .align(AlignmentType::Center)];
            if let Some(division) = division {
                out.push(text(division, AlignmentType::Center));
            }
            out
        }
        Block::CaseCaption {
            caption,
            number_label,
            case_number,
            judge,
        } => {
            let mut out = vec![
                text(caption, AlignmentType::Left),
                text(number_label, AlignmentType::Right),
                text(case_number, AlignmentType::Right),
            ];
            if let Some(judge) = judge {
                out.push(text(&format!("Judge: {}", judge), AlignmentType::Right));
            }
            out
        }
        Block::Title { text: title } => vec![Paragraph::new()
            .add_run(Run::new().add_text(title).bold().size(TITLE_SIZE))
            .align(AlignmentType::Center)],
        Block::OpeningStatement { text: body } => vec![text(body, AlignmentType::Both)],
        Block::Paragraph { number, text: body } => {
            let number = Run::new().add_text(format!("{}. ", number)).bold();
            vec![with_lines(Paragraph::new().add_run(number), body).align(AlignmentType::Both)]
        }
        Block::ExhibitList { heading, items } => {
            let mut out = vec![Paragraph::new().add_run(Run::new().add_text(heading).bold())];
            out.extend(items.iter().map(|item| text(&item.text, AlignmentType::Left)));
            out
        }
        Block::ClosingCertification {
            statement,
            execution,
        } => {
            let mut out = vec![text(statement, AlignmentType::Both)];
            if let Some(execution) = execution {
                out.push(text(execution, AlignmentType::Left));
            }
            out
        }
        Block::SignatureLine {
            name,
            title,
            organization,
        } => [
            Some(SIGNATURE_RULE),
            Some(name.as_str()),
            title.as_deref(),
            organization.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(|l| text(l, AlignmentType::Right))
        .collect(),
        Block::DateLocation { date, location } => {
            let mut out = Vec::new();
            if let Some(date) = date {
                out.push(text(&format!("Dated: {}", date), AlignmentType::Left));
            }
            if let Some(location) = location {
                out.push(text(&format!("Location: {}", location), AlignmentType::Left));
            }
            out
        }
        Block::AttorneyBlock {
            lines,
            representation,
        } => lines
            .iter()
            .chain(std::iter::once(representation))
            .map(|l| text(l, AlignmentType::Left))
            .collect(),
        Block::NotaryBlock {
            heading,
            venue,
            jurat,
            signature_caption,
            commission_caption,
        } => {
            let mut out = vec![Paragraph::new()
                .add_run(Run::new().add_text(heading).bold())
                .align(AlignmentType::Center)];
            out.extend(venue.iter().map(|l| text(l, AlignmentType::Left)));
            out.push(text(jurat, AlignmentType::Both));
            out.push(text(SIGNATURE_RULE, AlignmentType::Left));
            out.push(text(signature_caption, AlignmentType::Left));
            out.push(text(commission_caption, AlignmentType::Left));
            out.push(text(SIGNATURE_RULE, AlignmentType::Left));
            out
        }
    }
}

/// Paragraph holding `body`, with authored line breaks kept as Word breaks
fn text(body: &str, align: AlignmentType) -> Paragraph {
    with_lines(Paragraph::new(), body).align(align)
}

fn with_lines(paragraph: Paragraph, body: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    paragraph.add_run(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use declaration_types::{
        CaseInfo, Declarant, DocumentParagraph, DocumentType, Jurisdiction, LegalDocument,
    };
    use std::io::Read;

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    fn tree() -> DocumentTree {
        let mut doc = LegalDocument::new(DocumentType::Certification, Jurisdiction::NewJersey)
            .with_case_info(CaseInfo {
                caption: "Smith v. Jones".to_string(),
                case_number: "MID-L-1-24".to_string(),
                ..Default::default()
            })
            .with_declarant(Declarant::new("Jane Doe"));
        doc.add_paragraph(DocumentParagraph::new("Alpha statement of fact"))
            .unwrap();
        doc.add_paragraph(DocumentParagraph::new("Bravo statement of fact"))
            .unwrap();
        assembly_engine::assemble(&doc)
    }

    #[test]
    fn test_document_xml_keeps_block_order() {
        let rendered = DocxRenderer::new().render(&tree()).unwrap();
        assert!(rendered.bytes.starts_with(b"PK"));

        let xml = document_xml(&rendered.bytes);
        let court = xml.find("SUPERIOR COURT OF NEW JERSEY").unwrap();
        let title = xml.find("CERTIFICATION OF JANE DOE").unwrap();
        let first = xml.find("Alpha statement of fact").unwrap();
        let second = xml.find("Bravo statement of fact").unwrap();
        let closing = xml.find("I certify that the foregoing").unwrap();
        assert!(court < title && title < first && first < second && second < closing);
    }

    #[test]
    fn test_render_metadata() {
        let rendered = DocxRenderer::new().render(&tree()).unwrap();
        assert_eq!(
            rendered.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(rendered.filename, "MID_L_1_24_certification.docx");
    }
}
