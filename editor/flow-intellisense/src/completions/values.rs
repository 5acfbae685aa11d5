//! Attribute value completions

use crate::document::TextDocument;
use crate::resolver::open_value_quote;
use crate::types::{CompletionItem, CompletionKind, Position, Range};
use flow_data::{AttributeMeta, AttributeType, FlowData};

/// Complete the value of `attribute` on `tag` at the cursor.
///
/// Multi-value attributes offer the options of the slot the cursor is in,
/// counted by the space separated tokens typed so far.
pub fn complete_values(
    data: &FlowData,
    doc: &TextDocument,
    position: Position,
    tag: &str,
    attribute: &str,
) -> Vec<CompletionItem> {
    let Some(attr) = data.get_attribute(tag, attribute) else {
        return Vec::new();
    };
    let Some((quote_at, quote)) = open_value_quote(doc, position) else {
        return Vec::new();
    };

    let value_start = quote_at + 1;
    let value_end = doc
        .text_after(position)
        .chars()
        .position(|c| c == quote)
        .map_or(position.character, |i| position.character + i as u32);
    let span = Range::on_line(position.line, value_start, value_end);

    let Some(slots) = attr.slots() else {
        return value_items(attr, Some(span));
    };

    let typed = doc.text_in_range(Range::on_line(position.line, value_start, position.character));
    let slot = typed.trim_start().split(' ').count() - 1;

    let Some((_, slot_meta)) = slots.get_index(slot) else {
        return Vec::new();
    };

    let existing = doc.text_in_range(span).trim();
    let range = existing.is_empty().then_some(span);
    value_items(slot_meta, range)
}

fn value_items(attr: &AttributeMeta, range: Option<Range>) -> Vec<CompletionItem> {
    let items: Vec<CompletionItem> = match attr.options() {
        Some(options) => options
            .iter()
            .map(|(value, meta)| {
                CompletionItem::new(value, CompletionKind::Value)
                    .with_detail(meta.description.clone().unwrap_or_default())
            })
            .collect(),
        None if attr.attr_type == AttributeType::Boolean => ["true", "false"]
            .into_iter()
            .map(|value| CompletionItem::new(value, CompletionKind::Value).with_detail(""))
            .collect(),
        None => Vec::new(),
    };

    match range {
        Some(range) => items
            .into_iter()
            .map(|item| item.with_replace_range(range))
            .collect(),
        None => items,
    }
}
