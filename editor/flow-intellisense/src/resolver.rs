//! Cursor context resolution.
//!
//! Decides what the cursor sits on (a tag name, an attribute name or an
//! attribute value) by scanning the raw text around it with regular
//! expressions. There is no parser behind this: partial and malformed markup
//! is the normal case while typing, and every lookup degrades to `None`
//! rather than failing.
//!
//! Callers should go through [`resolve_context`] and [`hover_target`]; the
//! individual heuristics are public for testing and for the CLI.

use crate::document::TextDocument;
use crate::types::{CursorContext, Position, Range, TagToken};
use regex::Regex;
use std::sync::LazyLock;

/// How many lines (cursor line included) the backward tag scan examines.
pub const MAX_BACKWARD_LINES: u32 = 10;

/// `<name` followed by whitespace
static TAG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([\w-]+)\s").unwrap());

/// `<name` followed by whitespace or the line break
static TAG_OPEN_OR_EOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([\w-]+)(?:\s|$)").unwrap());

/// A tag closed before the cursor, possibly followed by content
static CLOSED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[-\w]+[^<>]*>[\s\w]*<?\s*[\w-]*$").unwrap());

/// Continuation line of a tag that was closed on this line
static CONTENT_AFTER_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[^<]+\s*>[^</>]*$").unwrap());

/// Quoted value still open at the end of the text
static TRAILING_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"['"][^'"]*$"#).unwrap());

static ATTR_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:\(|\s*)([\w-]+)=['"][^'"]*"#).unwrap());

static COMPLETE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).unwrap());

static TAG_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([\w-]*)$").unwrap());

static SCRIPT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<script.*>\s*$").unwrap());

static SCRIPT_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</script\s*>").unwrap());

/// Find the nearest tag opened before the cursor.
///
/// Walks up from the cursor line, at most [`MAX_BACKWARD_LINES`] lines. On
/// the cursor line only the text before the cursor counts. Returns `None` as
/// soon as a line shows the tag was already closed, so element content does
/// not look like the inside of a tag.
pub fn find_enclosing_tag_backward(doc: &TextDocument, cursor: Position) -> Option<TagToken> {
    let cursor = doc.clamp(cursor);
    let first = cursor.line.saturating_sub(MAX_BACKWARD_LINES - 1);

    for line in (first..=cursor.line).rev() {
        let on_cursor_line = line == cursor.line;
        let text = if on_cursor_line {
            doc.text_before(cursor)
        } else {
            doc.line_text(line)
        };

        if CLOSED_TAG.is_match(text) {
            return None;
        }
        if on_cursor_line && (CONTENT_AFTER_CLOSE.is_match(text) || text.ends_with('<')) {
            return None;
        }

        // A name still being typed on the cursor line is not an open tag yet.
        let pattern = if on_cursor_line { &TAG_OPEN } else { &TAG_OPEN_OR_EOL };
        if let Some(caps) = pattern.captures_iter(text).last() {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let character = text[..whole.start()].chars().count() as u32;
            return Some(TagToken {
                text: name.as_str().to_string(),
                offset: doc.offset_at(Position::new(line, character)),
            });
        }
    }

    None
}

/// Name of the tag whose brackets surround the cursor.
///
/// Joins the text from the last `<` before the cursor with the text up to
/// the first `>` after it. With whitespace in that fragment the name runs
/// from `<` to the first whitespace; without any (`<f-text></f-text>`) it is
/// read from the closing tag.
pub fn enclosing_tag_name(doc: &TextDocument, cursor: Position) -> Option<String> {
    let cursor = doc.clamp(cursor);
    let before = doc.text_until(cursor);
    let after = doc.text_from(cursor);

    let start = before.rfind('<')?;
    let tail = match after.find('>') {
        Some(end) => &after[..=end],
        None => "",
    };
    let fragment = format!("{}{}", &before[start..], tail);

    let raw = match fragment.find([' ', '\t', '\r', '\n']) {
        Some(ws) => &fragment[1..ws],
        None => {
            let open = fragment.find("</").map_or(1, |i| i + 2);
            let close = fragment[open..]
                .find('>')
                .map_or(fragment.len(), |i| open + i);
            &fragment[open..close]
        }
    };

    let name = raw
        .trim()
        .trim_start_matches('/')
        .split(|c: char| c == '>' || c == '/' || c == '<' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    (!name.is_empty()).then(|| name.to_string())
}

/// Attribute name the cursor is on or in the value of.
///
/// The token starts after the last whitespace before the cursor and ends at
/// an `=`, either before the cursor or further along the line. Anything that
/// spans a `<` is not an attribute.
pub fn attribute_name_around_cursor(doc: &TextDocument, cursor: Position) -> Option<String> {
    let before = doc.text_before(cursor);
    let ws = before.rfind([' ', '\t'])?;

    let fragment = match before.rfind('=') {
        Some(eq) if eq > ws => before[ws..eq].to_string(),
        _ => {
            let after = doc.text_after(cursor);
            let eq = after.find('=')?;
            format!("{}{}", &before[ws..], &after[..eq])
        }
    };

    if fragment.contains('<') {
        return None;
    }

    let name = fragment.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Attribute whose quoted value is being typed at the cursor.
///
/// Handles values with several space separated tokens already typed
/// (`border="small |`), which [`attribute_name_around_cursor`] cannot.
pub fn attribute_prefix_before_cursor(doc: &TextDocument, cursor: Position) -> Option<String> {
    let before = doc.text_before(cursor);
    let stripped = match TRAILING_VALUE.find(before) {
        Some(m) => &before[..m.start()],
        None => before,
    };

    let start = stripped.rfind([' ', '\t']).map_or(0, |i| i + 1);
    let fragment = &before[start..];

    if COMPLETE_QUOTED.is_match(fragment) {
        return None;
    }

    ATTR_ASSIGN
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
}

/// Opening quote of the attribute value the cursor is in.
///
/// Returns the character index of the quote on the cursor line and the
/// quote character. Only quotes directly after `=` open a value.
pub fn open_value_quote(doc: &TextDocument, cursor: Position) -> Option<(u32, char)> {
    let mut open: Option<(u32, char)> = None;
    let mut previous = None;

    for (i, c) in doc.text_before(cursor).chars().enumerate() {
        match open {
            Some((_, quote)) if c == quote => open = None,
            Some(_) => {}
            None if (c == '"' || c == '\'') && previous == Some('=') => {
                open = Some((i as u32, c));
            }
            None => {}
        }
        if !c.is_whitespace() {
            previous = Some(c);
        }
    }

    open
}

/// Whether the cursor is inside a `<script>` block.
///
/// The nearest script tag at or above the cursor line decides.
pub fn in_script_block(doc: &TextDocument, cursor: Position) -> bool {
    let last = cursor.line.min(doc.line_count().saturating_sub(1));

    for line in (0..=last).rev() {
        let text = doc.line_text(line);
        if SCRIPT_CLOSE.is_match(text) {
            return false;
        }
        if SCRIPT_OPEN.is_match(text) {
            return true;
        }
    }

    false
}

/// Classify the cursor position for completion.
///
/// Checked in order: attribute value, attribute name, tag start.
pub fn resolve_context(doc: &TextDocument, cursor: Position) -> CursorContext {
    let cursor = doc.clamp(cursor);

    if open_value_quote(doc, cursor).is_some() {
        let tag = enclosing_tag_name(doc, cursor);
        let attribute = attribute_prefix_before_cursor(doc, cursor)
            .or_else(|| attribute_name_around_cursor(doc, cursor));

        if let (Some(tag), Some(attribute)) = (tag, attribute) {
            return CursorContext::AttributeValue { tag, attribute };
        }
    }

    if let Some(tag) = find_enclosing_tag_backward(doc, cursor) {
        return CursorContext::AttributeName { tag };
    }

    if let Some(partial) = TAG_START
        .captures(doc.text_before(cursor))
        .and_then(|caps| caps.get(1))
    {
        return CursorContext::TagStart {
            partial: partial.as_str().to_string(),
        };
    }

    CursorContext::Unknown
}

/// What a hover at the cursor refers to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTarget {
    pub tag: Option<String>,
    pub attribute: Option<String>,
}

/// Resolve tag and attribute for hover using bracket scanning only.
///
/// Binding sigils (`:size`, `@click`, `v-bind:size`) are dropped from the
/// attribute name.
pub fn hover_target(doc: &TextDocument, cursor: Position) -> HoverTarget {
    let cursor = doc.clamp(cursor);
    let attribute = attribute_name_around_cursor(doc, cursor).map(|name| {
        name.trim_start_matches("v-bind:")
            .trim_start_matches([':', '@'])
            .to_string()
    });

    HoverTarget {
        tag: enclosing_tag_name(doc, cursor),
        attribute,
    }
}

/// Range of the tag or attribute word under the cursor.
pub fn word_range_at(doc: &TextDocument, cursor: Position) -> Option<Range> {
    let cursor = doc.clamp(cursor);
    let is_word = |c: char| c.is_alphanumeric() || c == '-' || c == '_';

    let before = doc.text_before(cursor);
    let after = doc.text_after(cursor);
    let start = before.chars().rev().take_while(|c| is_word(*c)).count() as u32;
    let end = after.chars().take_while(|c| is_word(*c)).count() as u32;

    if start == 0 && end == 0 {
        return None;
    }

    Some(Range::on_line(
        cursor.line,
        cursor.character - start,
        cursor.character + end,
    ))
}
