//! Core types for flow-intellisense

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in a document (0-based line, 0-based character within the line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range on a single line
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Self {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }

    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A tag name found while scanning backward from the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagToken {
    /// Tag name without the leading `<`
    pub text: String,
    /// Absolute character offset of the `<`
    pub offset: usize,
}

/// What the cursor is positioned on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CursorContext {
    /// Inside the quoted value of an attribute
    AttributeValue {
        /// Element the attribute belongs to
        tag: String,
        /// Attribute name
        attribute: String,
    },

    /// Inside an open tag, where an attribute name can go
    AttributeName {
        /// Nearest tag opened before the cursor
        tag: TagToken,
    },

    /// Right after `<`, optionally with part of a tag name typed
    TagStart {
        /// Partial tag name already typed
        partial: String,
    },

    /// Unknown/unsupported context
    #[default]
    Unknown,
}

// ============================================================================
// Completion Types
// ============================================================================

/// Kind of completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Element,
    Attribute,
    Method,
    Value,
}

/// A completion item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Label shown in completion list
    pub label: String,

    /// Kind of completion
    pub kind: CompletionKind,

    /// Text to insert
    pub insert_text: String,

    /// Whether insert_text is a snippet
    #[serde(default)]
    pub is_snippet: bool,

    /// Short detail text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Full documentation (markdown)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Lexicographic sort key
    pub sort_text: String,

    /// Text replaced by the insertion; the word at the cursor when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_range: Option<Range>,
}

/// Sort key prefix that pins flow suggestions above generic ones
pub const SORT_PREFIX: &str = "-000000000000";

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            sort_text: format!("{}{}", SORT_PREFIX, label),
            label,
            kind,
            is_snippet: false,
            detail: None,
            documentation: None,
            replace_range: None,
        }
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_sort_text(mut self, sort_text: impl Into<String>) -> Self {
        self.sort_text = sort_text.into();
        self
    }

    pub fn with_replace_range(mut self, range: Range) -> Self {
        self.replace_range = Some(range);
        self
    }

    pub fn as_snippet(mut self) -> Self {
        self.is_snippet = true;
        self
    }
}

/// Result of completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    #[serde(default)]
    pub is_incomplete: bool,
}

impl CompletionResult {
    pub fn new(items: Vec<CompletionItem>) -> Self {
        Self {
            items,
            is_incomplete: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            is_incomplete: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }
}

// ============================================================================
// Hover Types
// ============================================================================

/// Hover information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverInfo {
    /// Main content (markdown)
    pub content: String,

    /// Optional range this hover applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}

impl HoverInfo {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}

// ============================================================================
// Diagnostic Types
// ============================================================================

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Extra context attached to a diagnostic, in the same document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedInformation {
    pub range: Range,
    pub message: String,
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub code: String,
    pub source: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<RelatedInformation>,
}

/// Source name attached to every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "flow";

impl Diagnostic {
    pub fn error(range: Range, code: &str, message: impl Into<String>) -> Self {
        Self {
            range,
            severity: Severity::Error,
            code: code.to_string(),
            source: DIAGNOSTIC_SOURCE.to_string(),
            message: message.into(),
            related_information: Vec::new(),
        }
    }

    pub fn with_related(mut self, range: Range, message: impl Into<String>) -> Self {
        self.related_information.push(RelatedInformation {
            range,
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_item_builder() {
        let item = CompletionItem::new("size", CompletionKind::Attribute)
            .with_insert_text("size=\"$1\"$0")
            .with_detail("Flow Design Vue")
            .as_snippet();

        assert_eq!(item.label, "size");
        assert_eq!(item.sort_text, "-000000000000size");
        assert!(item.is_snippet);
        assert!(item.replace_range.is_none());
    }

    #[test]
    fn test_range_containment() {
        let outer = Range::new(Position::new(1, 0), Position::new(3, 4));
        let inner = Range::on_line(2, 2, 10);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&inner));
        assert!(!Range::on_line(0, 0, 5).overlaps(&Range::on_line(0, 5, 9)));
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }

    #[test]
    fn test_diagnostic_builder() {
        let range = Range::on_line(0, 0, 10);
        let diag = Diagnostic::error(range, "required-attribute", "label is required")
            .with_related(range, "Mandatory fields are required");

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.source, "flow");
        assert_eq!(diag.related_information.len(), 1);
    }

    #[test]
    fn test_cursor_context_serializes_with_kind() {
        let ctx = CursorContext::AttributeValue {
            tag: "f-button".to_string(),
            attribute: "size".to_string(),
        };
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["kind"], "attribute_value");
        assert_eq!(json["attribute"], "size");
    }
}
