//! Source patching.
//!
//! Lowering never re-prints the tree. It records byte-range replacements
//! against the original text, and [`apply_edits`] splices them in.

use serde::Serialize;

use crate::error::LoweringError;

/// Replace `source[start..end]` with `text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl Edit {
    pub fn new(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Apply `edits` to `source`. Edits may come in any order but must not
/// overlap; empty ranges are insertions.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> Result<String, LoweringError> {
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let extra: usize = edits.iter().map(|edit| edit.text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut cursor = 0u32;

    for edit in &edits {
        let (start, end) = (edit.start as usize, edit.end as usize);
        if edit.start > edit.end || end > source.len() {
            return Err(LoweringError::InvalidEdit {
                start: edit.start,
                end: edit.end,
                source_len: source.len(),
            });
        }
        if edit.start < cursor {
            return Err(LoweringError::OverlappingEdits {
                start: edit.start,
                previous_end: cursor,
            });
        }
        for offset in [edit.start, edit.end] {
            if !source.is_char_boundary(offset as usize) {
                return Err(LoweringError::NotCharBoundary { offset });
            }
        }

        out.push_str(&source[cursor as usize..start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }

    out.push_str(&source[cursor as usize..]);
    Ok(out)
}
