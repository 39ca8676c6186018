//! Offset to (line, column) conversion.
//!
//! A [`LineIndex`] is built once per buffer and reused for every offset of a
//! scan pass, so each lookup is a binary search over line starts instead of a
//! rescan of the text.

/// Zero-based line/column position within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    /// Column in Unicode scalar values from the start of the line.
    pub character: usize,
}

/// Pre-computed line start offsets for one buffer.
#[derive(Debug)]
pub struct LineIndex<'a> {
    content: &'a str,
    /// Byte offset where each line starts. Line 0 starts at offset 0.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            content,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset to a zero-based position.
    ///
    /// An offset pointing at a `\n` belongs to the line that newline ends;
    /// the offset right after it is column 0 of the next line. Offsets past
    /// the end clamp to the final position, and offsets inside a multi-byte
    /// character round down to its start.
    pub fn position(&self, offset: usize) -> Position {
        let offset = self.floor_char_boundary(offset.min(self.content.len()));

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let character = self.content[line_start..offset].chars().count();

        Position { line, character }
    }

    /// Text of a zero-based line without its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.content.len());
        let text = &self.content[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    fn floor_char_boundary(&self, mut offset: usize) -> usize {
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
