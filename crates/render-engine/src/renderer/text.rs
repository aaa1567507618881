//! Plain-text print layout
//!
//! Fixed-pitch pages with the running header on top and "Page X of Y" at the
//! bottom, separated by form feeds. Signature and notary blocks are kept on
//! one page when they fit.

use assembly_engine::{Block, DocumentTree};

use super::{RenderedDocument, Renderer};
use crate::compiler::{RenderError, RenderFormat};

const DEFAULT_WIDTH: usize = 72;
const DEFAULT_BODY_LINES: usize = 54;
const INDENT: &str = "     ";
const SIGNATURE_RULE: &str = "______________________________";
const PAGE_SEPARATOR: char = '\u{000C}';

pub struct TextRenderer {
    width: usize,
    body_lines: usize,
}

/// Lines of one block and whether they may be split across pages
struct Chunk {
    lines: Vec<String>,
    keep_together: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            body_lines: DEFAULT_BODY_LINES,
        }
    }

    /// Columns per line and body lines per page; clamped to a usable minimum
    pub fn with_page_size(width: usize, body_lines: usize) -> Self {
        Self {
            width: width.max(20),
            body_lines: body_lines.max(5),
        }
    }

    /// Body pages before headers and footers are added
    pub fn paginate(&self, tree: &DocumentTree) -> Vec<Vec<String>> {
        let mut pages: Vec<Vec<String>> = vec![Vec::new()];

        for chunk in tree.blocks.iter().map(|b| self.layout_block(b)) {
            let remaining = self.body_lines - pages.last().map_or(0, Vec::len);
            if chunk.keep_together
                && chunk.lines.len() > remaining
                && chunk.lines.len() <= self.body_lines
            {
                pages.push(Vec::new());
            }

            for line in chunk.lines {
                let full = pages.last().map_or(false, |p| p.len() >= self.body_lines);
                if full {
                    pages.push(Vec::new());
                }
                if let Some(page) = pages.last_mut() {
                    // No blank lines at the top of a page
                    if !(page.is_empty() && line.is_empty()) {
                        page.push(line);
                    }
                }
            }
        }

        if pages.len() > 1 && pages.last().map_or(false, Vec::is_empty) {
            pages.pop();
        }
        pages
    }

    /// Complete print layout as a string
    pub fn to_text(&self, tree: &DocumentTree) -> (String, usize) {
        let pages = self.paginate(tree);
        let total = pages.len();
        let header = self.center(&truncate(&tree.running_header, self.width));

        let mut out = String::new();
        for (index, body) in pages.iter().enumerate() {
            if index > 0 {
                out.push(PAGE_SEPARATOR);
            }
            out.push_str(&header);
            out.push_str("\n\n");
            for line in body {
                out.push_str(line);
                out.push('\n');
            }
            for _ in body.len()..self.body_lines {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&self.center(&format!("Page {} of {}", index + 1, total)));
            out.push('\n');
        }
        (out, total)
    }

    fn layout_block(&self, block: &Block) -> Chunk {
        let mut lines = Vec::new();
        let mut keep_together = false;

        match block {
            Block::CourtHeader { court, division } => {
                lines.extend(self.centered(court));
                if let Some(division) = division {
                    lines.extend(self.centered(division));
                }
            }
            Block::CaseCaption {
                caption,
                number_label,
                case_number,
                judge,
            } => {
                let right_width = self.width * 3 / 10;
                let left_width = self.width - right_width - 2;
                let left: Vec<String> = caption
                    .lines()
                    .flat_map(|l| wrap(l, left_width))
                    .collect();
                let mut right = vec![number_label.clone()];
                right.extend(wrap(case_number, right_width));
                if let Some(judge) = judge {
                    right.extend(wrap(&format!("Judge: {}", judge), right_width));
                }
                for i in 0..left.len().max(right.len()) {
                    let l = left.get(i).map(String::as_str).unwrap_or("");
                    let r = right.get(i).map(String::as_str).unwrap_or("");
                    let line = format!(
                        "{:<lw$}  {:>rw$}",
                        l,
                        r,
                        lw = left_width,
                        rw = right_width
                    );
                    lines.push(line.trim_end().to_string());
                }
            }
            Block::Title { text } => {
                lines.push(String::new());
                lines.extend(self.centered(text));
            }
            Block::OpeningStatement { text } => {
                lines.extend(self.indented(text));
            }
            Block::Paragraph { number, text } => {
                lines.extend(self.indented(&format!("{}. {}", number, text)));
            }
            Block::ExhibitList { heading, items } => {
                lines.push(format!("{}{}", INDENT, heading));
                for item in items {
                    lines.extend(
                        wrap(&item.text, self.width - INDENT.len())
                            .into_iter()
                            .map(|l| format!("{}{}", INDENT, l)),
                    );
                }
            }
            Block::ClosingCertification {
                statement,
                execution,
            } => {
                lines.extend(wrap(statement, self.width));
                if let Some(execution) = execution {
                    lines.extend(wrap(execution, self.width));
                }
            }
            Block::SignatureLine {
                name,
                title,
                organization,
            } => {
                keep_together = true;
                lines.push(String::new());
                lines.push(self.right(SIGNATURE_RULE));
                for line in [Some(name), title.as_ref(), organization.as_ref()]
                    .into_iter()
                    .flatten()
                {
                    lines.push(self.right(line));
                }
            }
            Block::DateLocation { date, location } => {
                if let Some(date) = date {
                    lines.push(format!("Dated: {}", date));
                }
                if let Some(location) = location {
                    lines.extend(wrap(&format!("Location: {}", location), self.width));
                }
            }
            Block::AttorneyBlock {
                lines: attorney,
                representation,
            } => {
                keep_together = true;
                for line in attorney {
                    lines.extend(wrap(line, self.width));
                }
                lines.push(representation.clone());
            }
            Block::NotaryBlock {
                heading,
                venue,
                jurat,
                signature_caption,
                commission_caption,
            } => {
                keep_together = true;
                lines.extend(self.centered(heading));
                lines.push(String::new());
                lines.extend(venue.iter().cloned());
                lines.push(String::new());
                lines.extend(wrap(jurat, self.width));
                lines.push(String::new());
                lines.push(String::new());
                let half = self.width / 2;
                lines.push(format!("{:<half$}{}", SIGNATURE_RULE, commission_caption));
                lines.push(format!("{:<half$}{}", signature_caption, SIGNATURE_RULE));
            }
        }

        lines.push(String::new());
        Chunk {
            lines,
            keep_together,
        }
    }

    fn centered(&self, text: &str) -> Vec<String> {
        wrap(text, self.width)
            .into_iter()
            .map(|l| self.center(&l))
            .collect()
    }

    fn center(&self, text: &str) -> String {
        let len = text.chars().count();
        let pad = self.width.saturating_sub(len) / 2;
        format!("{}{}", " ".repeat(pad), text)
    }

    fn right(&self, text: &str) -> String {
        format!("{:>width$}", text, width = self.width)
    }

    /// Wrapped with a first-line indent
    fn indented(&self, text: &str) -> Vec<String> {
        wrap(&format!("{}{}", INDENT, text), self.width)
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn format(&self) -> RenderFormat {
        RenderFormat::Text
    }

    fn render(&self, tree: &DocumentTree) -> Result<RenderedDocument, RenderError> {
        let (text, pages) = self.to_text(tree);
        Ok(RenderedDocument::new(
            text.into_bytes(),
            tree,
            RenderFormat::Text,
            pages,
        ))
    }
}

/// Greedy word wrap; words wider than a line are split
///
/// Authored line breaks start a new line and the spacing between words is
/// kept as written. Leading spaces of a line are kept on its first row.
fn wrap(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_line(line.trim_end_matches('\r'), width))
        .collect()
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for (gap, word) in words_with_gaps(line) {
        let mut gap = gap;
        let mut word: Vec<char> = word.chars().collect();
        loop {
            // Spacing is dropped where a row breaks
            let lead = if current.is_empty() && !lines.is_empty() {
                ""
            } else {
                gap
            };
            let used = current.chars().count() + lead.chars().count();
            if used + word.len() <= width {
                current.push_str(lead);
                current.extend(word.iter());
                break;
            }
            if !current.trim().is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // Word alone is too wide for the line
            current.push_str(lead);
            let room = width.saturating_sub(current.chars().count()).max(1);
            let rest = word.split_off(room.min(word.len()));
            current.extend(word.iter());
            lines.push(std::mem::take(&mut current));
            if rest.is_empty() {
                break;
            }
            word = rest;
            gap = "";
        }
    }

    if !current.trim().is_empty() || lines.is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Words of one line, each with the whitespace run before it
fn words_with_gaps(line: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = line;
    loop {
        let start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(start);
        if tail.is_empty() {
            break;
        }
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, after) = tail.split_at(end);
        out.push((gap, word));
        rest = after;
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declaration_types::{
        CaseInfo, Declarant, DocumentParagraph, DocumentType, Jurisdiction, LegalDocument,
        SignatureBlock,
    };
    use pretty_assertions::assert_eq;

    fn document(paragraphs: usize) -> LegalDocument {
        let mut doc = LegalDocument::new(DocumentType::Affidavit, Jurisdiction::NewJersey)
            .with_case_info(CaseInfo {
                caption: "Smith v. Jones".to_string(),
                case_number: "MID-L-1-24".to_string(),
                ..Default::default()
            })
            .with_declarant(Declarant::new("Jane Doe"))
            .with_signature_block(SignatureBlock {
                declarant_name: "Jane Doe".to_string(),
                notary_required: true,
                ..Default::default()
            });
        for i in 0..paragraphs {
            doc.add_paragraph(DocumentParagraph::new(format!(
                "Statement {} about the events at issue, which I observed personally \
                 and recorded in my notes at the time they occurred.",
                i + 1
            )))
            .unwrap();
        }
        doc
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("     lead in", 12), vec!["     lead in"]);
    }

    #[test]
    fn test_wrap_keeps_authored_spacing() {
        assert_eq!(wrap("first line\nsecond line", 40), vec!["first line", "second line"]);
        assert_eq!(wrap("a\n\nb", 40), vec!["a", "", "b"]);
        assert_eq!(wrap("Total:   $1,200", 40), vec!["Total:   $1,200"]);
        // Spacing at a row break is not carried to the next row
        assert_eq!(wrap("aaaa    bbbb", 6), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_paragraph_line_breaks_survive() {
        let mut doc = document(0);
        doc.add_paragraph(DocumentParagraph::new(
            "The ledger reads:\nJanuary  paid\nFebruary  unpaid",
        ))
        .unwrap();
        let tree = assembly_engine::assemble(&doc);
        let (text, _) = TextRenderer::new().to_text(&tree);
        let lines: Vec<&str> = text.lines().collect();
        let at = lines
            .iter()
            .position(|l| l.ends_with("1. The ledger reads:"))
            .unwrap();
        assert_eq!(lines[at + 1], "January  paid");
        assert_eq!(lines[at + 2], "February  unpaid");
    }

    #[test]
    fn test_single_page_header_and_footer() {
        let tree = assembly_engine::assemble(&document(1));
        let (text, pages) = TextRenderer::new().to_text(&tree);
        assert_eq!(pages, 1);
        assert_eq!(text.lines().next().unwrap().trim(), "Smith v. Jones - MID-L-1-24");
        assert_eq!(text.lines().last().unwrap().trim(), "Page 1 of 1");
        assert!(!text.contains(PAGE_SEPARATOR));
    }

    #[test]
    fn test_long_document_paginates() {
        let tree = assembly_engine::assemble(&document(40));
        let (text, pages) = TextRenderer::new().to_text(&tree);
        assert!(pages > 1);
        assert_eq!(text.matches(PAGE_SEPARATOR).count(), pages - 1);
        for (i, page) in text.split(PAGE_SEPARATOR).enumerate() {
            let header = TextRenderer::new().center("Smith v. Jones - MID-L-1-24");
            assert!(page.starts_with(&header));
            let footer = format!("Page {} of {}", i + 1, pages);
            assert_eq!(page.lines().last().unwrap().trim(), footer);
        }
    }

    #[test]
    fn test_paragraph_order_preserved() {
        let tree = assembly_engine::assemble(&document(12));
        let (text, _) = TextRenderer::new().to_text(&tree);
        let mut last = 0;
        for n in 1..=12 {
            let pos = text.find(&format!("{}. Statement {} ", n, n)).unwrap();
            assert!(pos > last);
            last = pos;
        }
    }

    #[test]
    fn test_notary_block_not_split() {
        let renderer = TextRenderer::with_page_size(72, 30);
        for count in 0..12 {
            let tree = assembly_engine::assemble(&document(count));
            let pages = renderer.paginate(&tree);
            let page = pages
                .iter()
                .find(|p| p.iter().any(|l| l.contains("NOTARY ACKNOWLEDGMENT")))
                .unwrap();
            assert!(page.iter().any(|l| l.contains("My Commission Expires:")));
        }
    }
}
