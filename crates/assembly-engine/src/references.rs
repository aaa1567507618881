//! Inline exhibit citation rewriting
//!
//! Paragraph text cites exhibits with `[<exhibit id>]` tokens. Each id in the
//! paragraph's reference list is resolved in list order and every occurrence
//! of its token becomes `(Ex. {label})`. Ids with no matching exhibit keep
//! their literal token so drafts with dangling citations still render.

use declaration_types::Exhibit;

/// Outcome of resolving one paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedText {
    pub text: String,
    /// Reference ids with no matching exhibit, in list order
    pub dangling: Vec<String>,
}

/// Token an editor inserts to cite an exhibit
pub fn reference_token(exhibit_id: &str) -> String {
    format!("[{}]", exhibit_id)
}

/// Formatted citation for a label, e.g. "(Ex. B)"
pub fn citation(label: &str) -> String {
    format!("(Ex. {})", label)
}

/// Replace resolvable tokens with citations; dangling tokens are kept
///
/// Idempotent: resolved text contains no tokens for existing exhibits, so a
/// second pass changes nothing.
pub fn resolve_references(text: &str, reference_ids: &[String], exhibits: &[Exhibit]) -> String {
    resolve_references_detailed(text, reference_ids, exhibits).text
}

/// As [`resolve_references`], also reporting which ids dangled
pub fn resolve_references_detailed(
    text: &str,
    reference_ids: &[String],
    exhibits: &[Exhibit],
) -> ResolvedText {
    let mut resolved = text.to_string();
    let mut dangling = Vec::new();

    for id in reference_ids.iter().filter(|id| !id.is_empty()) {
        match exhibits.iter().find(|e| &e.id == id) {
            Some(exhibit) => {
                resolved = resolved.replace(&reference_token(id), &citation(exhibit.label()));
            }
            None => dangling.push(id.clone()),
        }
    }

    ResolvedText {
        text: resolved,
        dangling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declaration_types::{DocumentType, ExhibitKind, Jurisdiction, LegalDocument};

    fn exhibits(ids: &[&str]) -> Vec<Exhibit> {
        let mut doc = LegalDocument::new(DocumentType::Affidavit, Jurisdiction::Federal);
        for id in ids {
            let exhibit =
                Exhibit::new(format!("exhibit {}", id), ExhibitKind::Document).with_id(*id);
            doc.add_exhibit(exhibit).unwrap();
        }
        doc.exhibits().to_vec()
    }

    fn refs(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let ex = exhibits(&["x1", "x2"]);
        let text = "See [x2]. As shown in [x1] and again [x2].";
        let out = resolve_references(text, &refs(&["x1", "x2"]), &ex);
        assert_eq!(out, "See (Ex. B). As shown in (Ex. A) and again (Ex. B).");
    }

    #[test]
    fn test_dangling_reference_left_intact() {
        let ex = exhibits(&["x1"]);
        let text = "Per [x1] and [gone].";
        let resolved = resolve_references_detailed(text, &refs(&["gone", "x1"]), &ex);
        assert_eq!(resolved.text, "Per (Ex. A) and [gone].");
        assert_eq!(resolved.dangling, vec!["gone".to_string()]);
    }

    #[test]
    fn test_unlisted_token_not_touched() {
        let ex = exhibits(&["x1", "x2"]);
        let text = "Per [x1] and [x2].";
        let out = resolve_references(text, &refs(&["x1"]), &ex);
        assert_eq!(out, "Per (Ex. A) and [x2].");
    }

    #[test]
    fn test_idempotent() {
        let ex = exhibits(&["a", "b"]);
        let reference_ids = refs(&["a", "b", "missing"]);
        let text = "[a] [b] [missing] [a]";
        let once = resolve_references(text, &reference_ids, &ex);
        let twice = resolve_references(&once, &reference_ids, &ex);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_id_ignored() {
        let ex = exhibits(&["a"]);
        let out = resolve_references("keep [] here", &refs(&[""]), &ex);
        assert_eq!(out, "keep [] here");
    }
}
