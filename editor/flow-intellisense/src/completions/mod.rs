//! Completion providers

mod attributes;
mod elements;
mod snippets;
mod values;

pub use snippets::tag_skeleton;

use crate::document::TextDocument;
use crate::resolver::{in_script_block, resolve_context};
use crate::settings::Settings;
use crate::types::{CompletionResult, CursorContext, Position};
use flow_data::FlowData;
use tracing::debug;

/// Get completions at a position
pub fn get_completions(
    data: &FlowData,
    doc: &TextDocument,
    position: Position,
    settings: &Settings,
) -> CompletionResult {
    let position = doc.clamp(position);
    let ctx = resolve_context(doc, position);
    debug!(?ctx, %position, "completion context");

    let items = match &ctx {
        CursorContext::AttributeValue { tag, attribute } => {
            values::complete_values(data, doc, position, tag, attribute)
        }
        CursorContext::AttributeName { tag } => {
            attributes::complete_attributes(data, doc, position, &tag.text, settings)
        }
        CursorContext::TagStart { .. } if tags_allowed(doc, position) => {
            elements::complete_elements(data, settings)
        }
        _ => Vec::new(),
    };

    CompletionResult::new(items)
}

/// Whether the document language accepts element tags at the position.
pub fn tags_allowed(doc: &TextDocument, position: Position) -> bool {
    match doc.language_id() {
        "vue" => !in_script_block(doc, position),
        "html" | "typescript" | "mdx" => true,
        _ => false,
    }
}
