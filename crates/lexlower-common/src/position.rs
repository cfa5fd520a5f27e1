//! Line lookup for byte offsets.
//!
//! Nodes carry `[pos, end)` byte offsets into the original source. Diagnostics
//! and statistics report 1-based line numbers, computed here on demand.

/// Maps byte offsets to line numbers.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, ch) in source.char_indices() {
            let next = i + ch.len_utf8();
            match ch {
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(next as u32),
                // Lone \r (old Mac); \r\n is counted at the \n
                '\r' if bytes.get(next) != Some(&b'\n') => line_starts.push(next as u32),
                _ => {}
            }
        }

        LineMap { line_starts }
    }

    /// 1-based line containing `offset`.
    pub fn line_number(&self, offset: u32) -> u32 {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        line as u32 + 1
    }

    /// 1-based line and 0-based byte column of `offset`.
    pub fn line_and_column(&self, offset: u32) -> (u32, u32) {
        let line = self.line_number(offset);
        let line_start = self
            .line_starts
            .get(line as usize - 1)
            .copied()
            .unwrap_or(0);
        (line, offset.saturating_sub(line_start))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
