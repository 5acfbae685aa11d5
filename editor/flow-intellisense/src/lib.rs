//! flow-intellisense - Completion, hover and diagnostics for flow elements
//!
//! Works on the raw text of HTML, Vue, MDX and templated TypeScript files
//! containing flow design system tags (`<f-button>`, `<f-div>`, ...).
//!
//! # Architecture
//!
//! ```text
//! CLI/LSP -> Engine -> resolver  -> completions / hover
//!                   -> extractor -> diagnostics
//!                   -> FlowData (element schemas)
//! ```
//!
//! # Features
//!
//! - **Tag completion**: Every known element, expanded into a snippet with
//!   its required attributes and nested subtags
//! - **Attribute completion**: Names filtered by typed prefix and `@`/`:` binding
//! - **Value completion**: Enumerated options, per slot for multi-value attributes
//! - **Hover**: Element and attribute documentation as markdown
//! - **Diagnostics**: Missing or blank required attributes
//!
//! # Example
//!
//! ```rust
//! use flow_intellisense::{Engine, Position, Settings, TextDocument};
//!
//! let engine = Engine::new().unwrap();
//! let doc = TextDocument::new("<f-button size=\"\"></f-button>", "html");
//!
//! let result = engine.complete(&doc, Position::new(0, 16), None, &Settings::default());
//! assert!(result.labels().contains(&"large"));
//!
//! let diagnostics = engine.validate(&doc);
//! assert_eq!(diagnostics[0].message, "label is required");
//! ```

pub mod completions;
pub mod diagnostics;
pub mod document;
pub mod extractor;
pub mod hover;
pub mod resolver;
pub mod settings;
pub mod types;

// Re-export main types
pub use document::TextDocument;
pub use flow_data::{FlowData, LoadError};
pub use settings::{QuoteStyle, Settings};
pub use types::{
    CompletionItem, CompletionKind, CompletionResult, CursorContext, Diagnostic, HoverInfo,
    Position, Range, RelatedInformation, Severity, TagToken,
};

use std::sync::Arc;
use tracing::debug;

/// Characters that should open the completion list
pub const TRIGGER_CHARACTERS: &[&str] = &[" ", ":", "<", "\"", "'", "/", "@", "("];

/// Main engine
///
/// Holds only the immutable element schemas; every request works on the
/// document and settings it is given.
#[derive(Debug, Clone)]
pub struct Engine {
    data: Arc<FlowData>,
}

impl Engine {
    /// Create engine with the bundled element schemas
    pub fn new() -> Result<Self, LoadError> {
        Ok(Self::with_data(FlowData::bundled()?))
    }

    /// Create engine with pre-loaded schemas
    pub fn with_data(data: FlowData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Create engine sharing schemas with another owner
    pub fn from_shared(data: Arc<FlowData>) -> Self {
        Self { data }
    }

    /// Get completions at a position
    pub fn complete(
        &self,
        doc: &TextDocument,
        position: Position,
        trigger: Option<&str>,
        settings: &Settings,
    ) -> CompletionResult {
        debug!(?trigger, language = doc.language_id(), "completion request");
        completions::get_completions(&self.data, doc, position, settings)
    }

    /// Get hover information at a position
    pub fn hover(&self, doc: &TextDocument, position: Position) -> Option<HoverInfo> {
        hover::get_hover(&self.data, doc, position)
    }

    /// Validate a whole document
    pub fn validate(&self, doc: &TextDocument) -> Vec<Diagnostic> {
        diagnostics::validate_document(&self.data, doc)
    }

    /// Classify the cursor position
    pub fn context(&self, doc: &TextDocument, position: Position) -> CursorContext {
        resolver::resolve_context(doc, position)
    }

    /// Get the element schemas
    pub fn data(&self) -> &FlowData {
        &self.data
    }
}
