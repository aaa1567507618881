//! Self-contained HTML rendering
//!
//! Produces one HTML file with inline print CSS. Each block maps to a
//! semantic element; text is escaped and otherwise emitted verbatim.

use assembly_engine::{Block, DocumentTree};

use super::{RenderedDocument, Renderer};
use crate::compiler::{RenderError, RenderFormat};

pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Full HTML document as a string
    pub fn to_html(&self, tree: &DocumentTree) -> String {
        let mut html = String::with_capacity(8192);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(&format!(
            "<title>{}</title>\n",
            escape_html(tree.title().unwrap_or(&tree.running_header))
        ));
        html.push_str("<style>\n");
        html.push_str(INLINE_CSS);
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!(
            "<div class=\"running-header\">{}</div>\n",
            escape_html(&tree.running_header)
        ));
        html.push_str("<main class=\"document-container\">\n");
        for block in &tree.blocks {
            push_block(&mut html, block);
        }
        html.push_str("</main>\n</body>\n</html>\n");

        html
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> RenderFormat {
        RenderFormat::Html
    }

    fn render(&self, tree: &DocumentTree) -> Result<RenderedDocument, RenderError> {
        // Flowing layout; the browser paginates when printing
        Ok(RenderedDocument::new(
            self.to_html(tree).into_bytes(),
            tree,
            RenderFormat::Html,
            1,
        ))
    }
}

fn push_block(html: &mut String, block: &Block) {
    match block {
        Block::CourtHeader { court, division } => {
            html.push_str("<header class=\"court-header\">\n");
            html.push_str(&format!(
                "<div class=\"court-name\">{}</div>\n",
                escape_html(court)
            ));
            if let Some(division) = division {
                html.push_str(&format!("<div>{}</div>\n", escape_html(division)));
            }
            html.push_str("</header>\n");
        }
        Block::CaseCaption {
            caption,
            number_label,
            case_number,
            judge,
        } => {
            html.push_str("<div class=\"case-caption\">\n");
            html.push_str(&format!(
                "<div class=\"case-caption-left\">{}</div>\n",
                escape_multiline(caption)
            ));
            html.push_str("<div class=\"case-caption-right\">\n");
            html.push_str(&format!("<div>{}</div>\n", escape_html(number_label)));
            html.push_str(&format!(
                "<div class=\"case-number\">{}</div>\n",
                escape_html(case_number)
            ));
            if let Some(judge) = judge {
                html.push_str(&format!(
                    "<div class=\"judge\">Judge: {}</div>\n",
                    escape_html(judge)
                ));
            }
            html.push_str("</div>\n</div>\n");
        }
        Block::Title { text } => {
            html.push_str(&format!(
                "<h1 class=\"document-title\">{}</h1>\n",
                escape_html(text)
            ));
        }
        Block::OpeningStatement { text } => {
            html.push_str(&format!(
                "<p class=\"personal-knowledge\">{}</p>\n",
                escape_html(text)
            ));
        }
        Block::Paragraph { number, text } => {
            html.push_str(&format!(
                "<p class=\"paragraph\"><span class=\"paragraph-number\">{}.</span> {}</p>\n",
                number,
                escape_html(text)
            ));
        }
        Block::ExhibitList { heading, items } => {
            html.push_str("<section class=\"exhibit-list\">\n");
            html.push_str(&format!("<h2>{}</h2>\n<ul>\n", escape_html(heading)));
            for item in items {
                let class = if item.confidential {
                    "exhibit-item confidential"
                } else {
                    "exhibit-item"
                };
                html.push_str(&format!(
                    "<li class=\"{}\">{}</li>\n",
                    class,
                    escape_html(&item.text)
                ));
            }
            html.push_str("</ul>\n</section>\n");
        }
        Block::ClosingCertification {
            statement,
            execution,
        } => {
            html.push_str("<div class=\"certification\">\n");
            html.push_str(&format!("<p>{}</p>\n", escape_html(statement)));
            if let Some(execution) = execution {
                html.push_str(&format!(
                    "<p class=\"execution\">{}</p>\n",
                    escape_html(execution)
                ));
            }
            html.push_str("</div>\n");
        }
        Block::SignatureLine {
            name,
            title,
            organization,
        } => {
            html.push_str("<div class=\"signature-block\">\n");
            html.push_str("<div class=\"signature-line\"></div>\n");
            html.push_str(&format!(
                "<div class=\"signature-name\">{}</div>\n",
                escape_html(name)
            ));
            for line in [title, organization].into_iter().flatten() {
                html.push_str(&format!("<div>{}</div>\n", escape_html(line)));
            }
            html.push_str("</div>\n");
        }
        Block::DateLocation { date, location } => {
            html.push_str("<div class=\"date-location\">\n");
            if let Some(date) = date {
                html.push_str(&format!("<div>Dated: {}</div>\n", escape_html(date)));
            }
            if let Some(location) = location {
                html.push_str(&format!(
                    "<div>Location: {}</div>\n",
                    escape_html(location)
                ));
            }
            html.push_str("</div>\n");
        }
        Block::AttorneyBlock {
            lines,
            representation,
        } => {
            html.push_str("<address class=\"attorney-block\">\n");
            for line in lines {
                html.push_str(&format!("<div>{}</div>\n", escape_html(line)));
            }
            html.push_str(&format!(
                "<div class=\"representation\">{}</div>\n",
                escape_html(representation)
            ));
            html.push_str("</address>\n");
        }
        Block::NotaryBlock {
            heading,
            venue,
            jurat,
            signature_caption,
            commission_caption,
        } => {
            html.push_str("<section class=\"notary-block\">\n");
            html.push_str(&format!("<h2>{}</h2>\n", escape_html(heading)));
            html.push_str(&format!(
                "<div class=\"venue\">{}</div>\n",
                venue
                    .iter()
                    .map(|l| escape_html(l))
                    .collect::<Vec<_>>()
                    .join("<br>")
            ));
            html.push_str(&format!("<p>{}</p>\n", escape_html(jurat)));
            html.push_str("<div class=\"notary-signatures\">\n");
            html.push_str(&format!(
                "<div><div class=\"signature-line\"></div>{}</div>\n",
                escape_html(signature_caption)
            ));
            html.push_str(&format!(
                "<div>{}<div class=\"signature-line\"></div></div>\n",
                escape_html(commission_caption)
            ));
            html.push_str("</div>\n</section>\n");
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape, keeping line breaks of multi-line captions
fn escape_multiline(s: &str) -> String {
    s.lines().map(escape_html).collect::<Vec<_>>().join("<br>")
}

const INLINE_CSS: &str = r#"
@page { size: letter; margin: 1in; }
body { font-family: 'Times New Roman', Times, serif; font-size: 12pt; line-height: 2; margin: 0; }
.document-container { max-width: 8.5in; margin: 0 auto; background: white; }
.running-header { display: none; }
.court-header { text-align: center; margin-bottom: 2em; }
.court-name { font-weight: bold; }
.case-caption { display: table; width: 100%; margin-bottom: 1em; }
.case-caption-left, .case-caption-right { display: table-cell; vertical-align: top; padding: 0.5em 0; }
.case-caption-left { width: 70%; }
.case-caption-right { width: 30%; text-align: right; padding-left: 2em; }
.case-number { margin-top: 0.5em; }
.judge { margin-top: 1em; }
.document-title { text-align: center; font-size: 14pt; margin: 1.5em 0; }
.personal-knowledge, .paragraph { text-align: justify; text-indent: 0.5in; margin: 0 0 1em; }
.paragraph-number { display: inline-block; width: 2em; }
.exhibit-list { margin: 1em 0; padding-left: 0.5in; }
.exhibit-list h2 { font-size: 12pt; margin: 0 0 0.5em; }
.exhibit-list ul { list-style: none; padding: 0; margin: 0; }
.certification { margin: 2em 0; }
.signature-block { margin-top: 3em; text-align: right; page-break-inside: avoid; }
.signature-line { margin: 3em 0 0.25em auto; border-bottom: 1px solid black; width: 300px; }
.date-location { margin-top: 1em; }
.attorney-block { margin-top: 2em; font-style: normal; }
.representation { margin-top: 0.5em; }
.notary-block { margin-top: 2em; border: 1px solid black; padding: 1em; page-break-inside: avoid; }
.notary-block h2 { text-align: center; font-size: 12pt; }
.notary-signatures { display: flex; justify-content: space-between; text-align: center; }
.notary-signatures .signature-line { margin: 3em auto 0.25em; width: 200px; }
@media print {
  .running-header { display: block; position: fixed; top: -0.5in; left: 0; right: 0; text-align: center; font-size: 10pt; line-height: 1.2; }
}
"#;
