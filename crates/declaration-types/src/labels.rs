//! Exhibit label and paragraph number allocation
//!
//! Labels and numbers are projections of sequence order. They are recomputed
//! for the whole sequence after any insert, delete or move so that the
//! alphabet stays contiguous.

use crate::types::{DocumentParagraph, Exhibit};

/// Number of single-letter labels (A..Z)
const SINGLE_LETTER_LIMIT: usize = 26;

/// Index at which two-letter labels run out (after ZZ)
const DOUBLE_LETTER_LIMIT: usize = SINGLE_LETTER_LIMIT + 26 * 26;

/// Label for the exhibit at `index` (0-based)
///
/// - 0..=25 map to "A".."Z"
/// - 26..=701 map to "AA".."ZZ"
/// - anything later falls back to "Exhibit {index + 1}"
pub fn exhibit_label(index: usize) -> String {
    if index < SINGLE_LETTER_LIMIT {
        letter(index).to_string()
    } else if index < DOUBLE_LETTER_LIMIT {
        let offset = index - SINGLE_LETTER_LIMIT;
        let mut label = String::with_capacity(2);
        label.push(letter(offset / 26));
        label.push(letter(offset % 26));
        label
    } else {
        format!("Exhibit {}", index + 1)
    }
}

fn letter(n: usize) -> char {
    (b'A' + n as u8) as char
}

/// Reassign every exhibit label from its position
pub fn relabel_exhibits(mut exhibits: Vec<Exhibit>) -> Vec<Exhibit> {
    relabel_in_place(&mut exhibits);
    exhibits
}

/// Reassign every paragraph number from its position (1-based)
pub fn renumber_paragraphs(mut paragraphs: Vec<DocumentParagraph>) -> Vec<DocumentParagraph> {
    renumber_in_place(&mut paragraphs);
    paragraphs
}

pub(crate) fn relabel_in_place(exhibits: &mut [Exhibit]) {
    for (index, exhibit) in exhibits.iter_mut().enumerate() {
        exhibit.label = exhibit_label(index);
    }
}

pub(crate) fn renumber_in_place(paragraphs: &mut [DocumentParagraph]) {
    for (index, paragraph) in paragraphs.iter_mut().enumerate() {
        paragraph.number = index as u32 + 1;
    }
}
