//! Hover documentation

use crate::document::TextDocument;
use crate::resolver::{hover_target, word_range_at};
use crate::types::{HoverInfo, Position};
use flow_data::{AttributeMeta, ElementMeta, FlowData};
use tracing::debug;

/// Get hover information for a position
pub fn get_hover(data: &FlowData, doc: &TextDocument, position: Position) -> Option<HoverInfo> {
    let target = hover_target(doc, position);
    debug!(?target, %position, "hover target");

    let tag = target.tag?;
    let element = data.get_element(&tag)?;

    let content = match target
        .attribute
        .as_deref()
        .and_then(|name| element.attribute(name).map(|attr| (name, attr)))
    {
        Some((name, attr)) => attribute_markdown(name, attr),
        None => element_markdown(&tag, element),
    };

    let info = HoverInfo::new(content);
    Some(match word_range_at(doc, position) {
        Some(range) => info.with_range(range),
        None => info,
    })
}

/// Markdown for one attribute
pub fn attribute_markdown(name: &str, attr: &AttributeMeta) -> String {
    let mut content = format!("#### {} ({})", name, attr.attr_type);
    if attr.is_required {
        content.push_str(" (required)");
    }
    content.push_str("\n\n");

    if let Some(description) = attr.description.as_deref().filter(|d| !d.is_empty()) {
        content.push_str(description);
        content.push_str("\n\n");
    }

    if let Some(default) = &attr.default {
        content.push_str(&format!("**Default:** `{}`\n\n", default));
    }

    if let Some(slots) = attr.slots() {
        let syntax: Vec<String> = slots.keys().map(|slot| format!("[{}]", slot)).collect();
        content.push_str(&format!("* **Syntax** : {}\n\n---\n", syntax.join(" ")));

        for (slot, slot_meta) in slots.iter() {
            content.push_str(&format!("\n#### [{}]\n\n", slot));
            let default = slot_meta.default.as_deref().or(attr.default.as_deref());
            content.push_str(&value_list(slot_meta, default));
        }
    } else {
        content.push_str(&value_list(attr, attr.default.as_deref()));
    }

    content
}

/// Bullet list of an attribute's options.
fn value_list(attr: &AttributeMeta, default: Option<&str>) -> String {
    let Some(options) = attr.options() else {
        return String::new();
    };

    let mut list = String::new();
    for (value, meta) in options.iter() {
        list.push_str(&format!("* **{}**", value));
        if let Some(description) = &meta.description {
            list.push_str(&format!(" : {}", description));
        }
        if default == Some(value.as_str()) {
            list.push_str(" (default)");
        }
        list.push('\n');
    }
    list
}

/// Markdown for a whole element, including every attribute
pub fn element_markdown(tag: &str, element: &ElementMeta) -> String {
    let mut content = format!("### {}", tag);
    if !element.title.is_empty() {
        content.push_str(&format!(" ({})", element.title));
    }
    content.push_str("\n\n");

    if !element.description.is_empty() {
        content.push_str(&element.description);
        content.push_str("\n\n");
    }

    if !element.doc_link.is_empty() {
        content.push_str(&format!("[Documentation]({})\n\n", element.doc_link));
    }

    if !element.category.is_empty() {
        content.push_str(&format!("**Category:** {}\n\n", element.category));
    }

    for (name, attr) in element.attributes.iter() {
        content.push_str("---\n\n");
        content.push_str(&attribute_markdown(name, attr));
        content.push('\n');
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Range;

    fn hover(text: &str, character: u32) -> Option<HoverInfo> {
        let data = FlowData::bundled().unwrap();
        let doc = TextDocument::new(text, "html");
        get_hover(&data, &doc, Position::new(0, character))
    }

    #[test]
    fn test_hover_tag() {
        let info = hover("<f-button label=\"Save\"></f-button>", 4).unwrap();
        assert!(info.content.starts_with("### f-button (Button)"));
        assert!(info.content.contains("[Documentation](https://"));
        assert!(info.content.contains("**Category:** Actions"));
        assert!(info.content.contains("#### label (string) (required)"));
        assert!(info.content.contains("#### click (method)"));
        assert_eq!(info.range, Some(Range::on_line(0, 1, 9)));
    }

    #[test]
    fn test_hover_attribute() {
        let info = hover("<f-button size=\"large\"></f-button>", 12).unwrap();
        assert!(info.content.starts_with("#### size (string)\n"));
        assert!(info.content.contains("* **medium** : "));
        assert!(info.content.contains("(default)"));
        assert!(!info.content.contains("### f-button"));
    }

    #[test]
    fn test_hover_multi_value_attribute() {
        let info = hover("<f-div border=\"small solid\"></f-div>", 9).unwrap();
        assert!(info
            .content
            .contains("* **Syntax** : [width] [style] [color] [position]"));
        for slot in ["width", "style", "color", "position"] {
            assert!(info.content.contains(&format!("#### [{}]", slot)));
        }
        assert!(info.content.contains("* **dashed**"));
    }

    #[test]
    fn test_hover_unknown_attribute_falls_back_to_tag() {
        let info = hover("<f-text nope=\"x\"></f-text>", 10).unwrap();
        assert!(info.content.starts_with("### f-text"));
    }

    #[test]
    fn test_hover_unknown_tag() {
        assert!(hover("<my-widget size=\"x\"></my-widget>", 4).is_none());
        assert!(hover("no markup here", 3).is_none());
    }

    #[test]
    fn test_value_list_marks_default() {
        let attr: AttributeMeta = serde_json::from_str(
            r#"{"type": "string", "default": "row", "values": {"row": {"description": "Horizontal"}, "column": {}}}"#,
        )
        .unwrap();
        let md = attribute_markdown("direction", &attr);
        assert!(md.contains("* **row** : Horizontal (default)\n"));
        assert!(md.contains("* **column**\n"));
        assert!(md.contains("**Default:** `row`"));
    }
}
