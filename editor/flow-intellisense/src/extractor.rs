//! Whole-document scan for element occurrences.
//!
//! Finds every open tag of a known custom element and carves its
//! attributes out of the tag text, with document ranges for both. Used by
//! the diagnostics engine.

use crate::document::TextDocument;
use crate::types::Range;
use flow_data::FlowData;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Open tag of a custom element (a name with a `-`). Quoted strings and
/// brace expressions may contain `>`.
static CUSTOM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Za-z]\w*-[\w-]*)(?:[^>"'{]|"[^"]*"|'[^']*'|\{[^}]*\})*>"#).unwrap()
});

/// `name`, `name=value`, `name="..."`, `name='...'` or `name={...}`
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=<>"'/{}]+)(?:\s*=\s*("[^"]*"|'[^']*'|\{[^}]*\}|[^\s>"']+))?"#).unwrap()
});

/// One attribute inside an element occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeOccurrence {
    /// Attribute name, without a `:` / `v-bind:` binding prefix
    pub name: String,
    /// The whole `name=value` text
    pub raw_text: String,
    /// Value without its quotes or braces; `None` for a bare name
    pub value: Option<String>,
    pub range: Range,
}

impl AttributeOccurrence {
    /// Whether the value is missing or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.value
            .as_deref()
            .map_or(true, |value| value.trim().is_empty())
    }
}

/// An open tag of a known element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementOccurrence {
    pub name: String,
    /// Tag text from `<` to `>`
    pub raw_text: String,
    pub range: Range,
    /// Attributes in source order; a repeated name keeps its last occurrence
    pub attributes: Vec<AttributeOccurrence>,
}

impl ElementOccurrence {
    pub fn attribute(&self, name: &str) -> Option<&AttributeOccurrence> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// Scan a document for occurrences of known elements.
pub fn extract_occurrences(doc: &TextDocument, data: &FlowData) -> Vec<ElementOccurrence> {
    let mut occurrences = Vec::new();

    for caps in CUSTOM_TAG.captures_iter(doc.text()) {
        let (Some(tag), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if !data.is_known(name.as_str()) {
            trace!(tag = name.as_str(), "skipping unknown element");
            continue;
        }

        let body_start = name.end();
        let attributes = extract_attributes(doc, &doc.text()[body_start..tag.end()], body_start);

        occurrences.push(ElementOccurrence {
            name: name.as_str().to_string(),
            raw_text: tag.as_str().to_string(),
            range: Range::new(
                doc.position_at_byte(tag.start()),
                doc.position_at_byte(tag.end()),
            ),
            attributes,
        });
    }

    occurrences
}

/// Split the text after a tag name into attributes. `base` is the byte
/// offset of `body` in the document.
fn extract_attributes(doc: &TextDocument, body: &str, base: usize) -> Vec<AttributeOccurrence> {
    let mut attributes: Vec<AttributeOccurrence> = Vec::new();

    for caps in ATTRIBUTE.captures_iter(body) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let name = name
            .as_str()
            .trim_start_matches("v-bind:")
            .trim_start_matches(':')
            .to_string();
        if name.is_empty() {
            continue;
        }

        let value = caps.get(2).map(|value| unwrap_value(value.as_str()).to_string());

        attributes.retain(|attr| attr.name != name);
        attributes.push(AttributeOccurrence {
            name,
            raw_text: whole.as_str().to_string(),
            value,
            range: Range::new(
                doc.position_at_byte(base + whole.start()),
                doc.position_at_byte(base + whole.end()),
            ),
        });
    }

    attributes
}

/// Strip the quotes or braces around an attribute value.
fn unwrap_value(raw: &str) -> &str {
    for (open, close) in [('"', '"'), ('\'', '\''), ('{', '}')] {
        if let Some(inner) = raw
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn data() -> FlowData {
        FlowData::bundled().unwrap()
    }

    #[test]
    fn test_single_tag() {
        let doc = TextDocument::new("<f-button label=\"Save\" size=\"large\"></f-button>", "html");
        let found = extract_occurrences(&doc, &data());

        assert_eq!(found.len(), 1);
        let button = &found[0];
        assert_eq!(button.name, "f-button");
        assert_eq!(button.range, Range::on_line(0, 0, 36));
        assert_eq!(button.attributes.len(), 2);

        let label = button.attribute("label").unwrap();
        assert_eq!(label.value.as_deref(), Some("Save"));
        assert_eq!(label.raw_text, "label=\"Save\"");
        assert_eq!(label.range, Range::on_line(0, 10, 22));
    }

    #[test]
    fn test_unknown_and_plain_tags_are_skipped() {
        let doc = TextDocument::new("<div><my-widget size=\"x\"></my-widget><f-text></f-text></div>", "html");
        let found = extract_occurrences(&doc, &data());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "f-text");
    }

    #[test]
    fn test_quoted_bracket_does_not_end_tag() {
        let doc = TextDocument::new("<f-button label=\"a > b\" size=\"small\">", "html");
        let found = extract_occurrences(&doc, &data());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attribute("label").unwrap().value.as_deref(), Some("a > b"));
        assert!(found[0].attribute("size").is_some());
    }

    #[test]
    fn test_multiline_tag_ranges() {
        let text = "<f-div>\n  <f-icon\n    source=\"i-plus\"\n    size=\"small\"\n  />\n</f-div>";
        let doc = TextDocument::new(text, "vue");
        let found = extract_occurrences(&doc, &data());

        assert_eq!(found.len(), 2);
        let icon = &found[1];
        assert_eq!(icon.range.start, Position::new(1, 2));
        assert_eq!(icon.range.end, Position::new(4, 4));

        let source = icon.attribute("source").unwrap();
        assert_eq!(source.range, Range::on_line(2, 4, 19));
        assert!(icon.range.contains(&source.range));
    }

    #[test]
    fn test_sibling_tags() {
        let text = "<f-button label=\"One\"></f-button>\n<f-button label=\"Two\" loading></f-button>";
        let doc = TextDocument::new(text, "html");
        let found = extract_occurrences(&doc, &data());

        assert_eq!(found.len(), 2);
        assert!(!found[0].range.overlaps(&found[1].range));
        for occurrence in &found {
            for attr in &occurrence.attributes {
                assert!(occurrence.range.contains(&attr.range));
                assert_eq!(attr.range.start.line, occurrence.range.start.line);
            }
        }
        assert!(found[1].attribute("loading").unwrap().value.is_none());
    }

    #[test]
    fn test_binding_prefix_and_duplicates() {
        let doc = TextDocument::new(
            "<f-button :label=\"title\" size=\"a\" size='b' @click=\"go\"></f-button>",
            "vue",
        );
        let found = extract_occurrences(&doc, &data());
        let button = &found[0];

        assert_eq!(button.attribute("label").unwrap().value.as_deref(), Some("title"));
        assert_eq!(button.attribute("size").unwrap().value.as_deref(), Some("b"));
        assert!(button.attribute("@click").is_some());
        assert_eq!(button.attributes.len(), 3);
    }

    #[test]
    fn test_blank_values() {
        let doc = TextDocument::new(
            "<f-icon source=\"\" size='  ' state={} clickable></f-icon>",
            "html",
        );
        let found = extract_occurrences(&doc, &data());
        let icon = &found[0];

        assert!(icon.attribute("source").unwrap().is_blank());
        assert!(icon.attribute("size").unwrap().is_blank());
        assert!(icon.attribute("state").unwrap().is_blank());
        assert!(icon.attribute("clickable").unwrap().is_blank());
    }
}
