//! Text buffer with line/character addressing.
//!
//! Positions count Unicode scalar values within a line. Positions past the
//! end of a line or of the document are clamped, never rejected.

use crate::types::{Position, Range};

/// An open document: full text, language id, and a line index.
#[derive(Debug, Clone)]
pub struct TextDocument {
    text: String,
    language_id: String,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
}

impl TextDocument {
    pub fn new(text: impl Into<String>, language_id: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            text,
            language_id: language_id.into(),
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Byte bounds of a line, excluding its line break.
    fn line_bounds(&self, line: u32) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line as usize)?;
        let end = match self.line_starts.get(line as usize + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        let end = if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };
        Some((start, end))
    }

    /// Text of a line without its line break; empty past the last line.
    pub fn line_text(&self, line: u32) -> &str {
        match self.line_bounds(line) {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    /// Byte offset of a position, clamped to the document.
    pub fn byte_offset(&self, position: Position) -> usize {
        let Some((start, end)) = self.line_bounds(position.line) else {
            return self.text.len();
        };
        self.text[start..end]
            .char_indices()
            .nth(position.character as usize)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    /// Absolute character offset of a position.
    pub fn offset_at(&self, position: Position) -> usize {
        self.text[..self.byte_offset(position)].chars().count()
    }

    /// Position of an absolute character offset.
    pub fn position_at(&self, offset: usize) -> Position {
        let byte = self
            .text
            .char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        self.position_at_byte(byte)
    }

    /// Position of a byte offset. The offset must fall on a char boundary.
    pub fn position_at_byte(&self, byte: usize) -> Position {
        let byte = byte.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= byte) - 1;
        let character = self.text[self.line_starts[line]..byte].chars().count();
        Position::new(line as u32, character as u32)
    }

    /// Move a position onto existing text.
    pub fn clamp(&self, position: Position) -> Position {
        self.position_at_byte(self.byte_offset(position))
    }

    /// Line text before the position.
    pub fn text_before(&self, position: Position) -> &str {
        match self.line_bounds(position.line) {
            Some((start, _)) => &self.text[start..self.byte_offset(position)],
            None => "",
        }
    }

    /// Line text after the position.
    pub fn text_after(&self, position: Position) -> &str {
        match self.line_bounds(position.line) {
            Some((_, end)) => &self.text[self.byte_offset(position)..end],
            None => "",
        }
    }

    /// All text from the start of the document to the position.
    pub fn text_until(&self, position: Position) -> &str {
        &self.text[..self.byte_offset(position)]
    }

    /// All text from the position to the end of the document.
    pub fn text_from(&self, position: Position) -> &str {
        &self.text[self.byte_offset(position)..]
    }

    pub fn text_in_range(&self, range: Range) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end).max(start);
        &self.text[start..end]
    }
}
