//! Element (tag name) completions

use super::snippets::tag_skeleton;
use crate::settings::Settings;
use crate::types::{CompletionItem, CompletionKind, SORT_PREFIX};
use flow_data::FlowData;

/// Complete every known element, in catalogue order
pub fn complete_elements(data: &FlowData, settings: &Settings) -> Vec<CompletionItem> {
    data.elements()
        .enumerate()
        .map(|(index, (tag, element))| {
            CompletionItem::new(tag, CompletionKind::Element)
                .with_insert_text(tag_skeleton(data, tag, settings))
                .with_sort_text(format!("{}{:04}{}", SORT_PREFIX, index, tag))
                .with_detail(&element.description)
                .with_documentation(format!("[Docs]({})", element.doc_link))
                .as_snippet()
        })
        .collect()
}
