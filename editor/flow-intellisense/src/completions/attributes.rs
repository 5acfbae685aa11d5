//! Attribute name completions

use crate::document::TextDocument;
use crate::settings::Settings;
use crate::types::{CompletionItem, CompletionKind, Position};
use flow_data::{AttributeMeta, AttributeType, FlowData};
use regex::Regex;
use std::sync::LazyLock;

/// Detail shown on every attribute suggestion
pub const ATTRIBUTE_DETAIL: &str = "Flow Design Vue";

static QUOTED_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"['"]([^'"]*)['"]$"#).unwrap());

static TOKEN_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s|\(+").unwrap());

/// Binding sigil typed before the attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// `@click`
    Event,
    /// `:size`
    Value,
    None,
}

impl Binding {
    fn of(token: &str) -> Self {
        match token.chars().next() {
            Some('@') => Binding::Event,
            Some(':') => Binding::Value,
            _ => Binding::None,
        }
    }

    fn accepts(self, attr: &AttributeMeta) -> bool {
        match self {
            Binding::Event => attr.is_method(),
            Binding::Value => !attr.is_method(),
            Binding::None => true,
        }
    }
}

/// Complete attribute names for `tag` at the cursor
pub fn complete_attributes(
    data: &FlowData,
    doc: &TextDocument,
    position: Position,
    tag: &str,
    settings: &Settings,
) -> Vec<CompletionItem> {
    let Some(element) = data.get_element(tag) else {
        return Vec::new();
    };

    let before = QUOTED_TAIL.replace(doc.text_before(position), "");
    let token = TOKEN_SEPARATOR.split(&before).last().unwrap_or_default();
    let binding = Binding::of(token);
    let prefix = token.replacen([':', '@'], "", 1);

    if prefix.chars().next().is_some_and(|c| !is_prefix_start(c)) {
        return Vec::new();
    }

    element
        .attributes
        .iter()
        .filter(|(name, _)| matches_prefix(name, &prefix))
        .filter(|(_, attr)| binding.accepts(attr))
        .map(|(name, attr)| attribute_item(name, attr, settings))
        .collect()
}

/// First characters allowed in a typed attribute prefix.
fn is_prefix_start(c: char) -> bool {
    // `A..=z` also spans `[\]^_` and the backtick.
    matches!(c, '@' | ':' | 'A'..='z') || c.is_whitespace()
}

fn matches_prefix(name: &str, prefix: &str) -> bool {
    match (name.chars().next(), prefix.trim().chars().next()) {
        (_, None) => true,
        (Some(a), Some(b)) => a.to_lowercase().eq(b.to_lowercase()),
        (None, Some(_)) => false,
    }
}

fn attribute_item(name: &str, attr: &AttributeMeta, settings: &Settings) -> CompletionItem {
    let kind = if attr.is_method() {
        CompletionKind::Method
    } else {
        CompletionKind::Attribute
    };

    let mut documentation = attr.description.clone().unwrap_or_default();
    documentation.push_str(&format!("\ntype: {}", attr.attr_type));
    if let Some(default) = &attr.default {
        documentation.push_str(&format!("\ndefault: {}", default));
    }

    let item = CompletionItem::new(name, kind)
        .with_detail(ATTRIBUTE_DETAIL)
        .with_documentation(documentation);

    if attr.attr_type == AttributeType::Flag {
        item.with_insert_text(format!("{} ", name))
    } else {
        let q = settings.quote();
        item.with_insert_text(format!("{}={}$1{}$0", name, q, q))
            .as_snippet()
    }
}
