//! Tag skeleton snippets
//!
//! A tag completion inserts the element with its required attributes as
//! tab stops and its `subtags` expanded inside it, one level of indentation
//! per nesting depth:
//!
//! ```text
//! f-div label="$1">
//!   <f-text></f-text>
//! </f-div>
//! ```
//!
//! The leading `<` is left out because the user has already typed it.

use crate::settings::Settings;
use flow_data::FlowData;

/// Build the snippet body for a tag completion.
pub fn tag_skeleton(data: &FlowData, tag: &str, settings: &Settings) -> String {
    let mut skeleton = Skeleton {
        data,
        quote: settings.quote(),
        indent: settings.indent_size,
        placeholder: 0,
        lines: Vec::new(),
        path: Vec::new(),
    };
    skeleton.push(tag, 0);

    let body = skeleton.lines.join("\n");
    match body.strip_prefix('<') {
        Some(rest) => rest.to_string(),
        None => body,
    }
}

struct Skeleton<'a> {
    data: &'a FlowData,
    quote: char,
    indent: usize,
    /// Last tab stop number handed out
    placeholder: usize,
    lines: Vec<String>,
    /// Tags being expanded, outermost first
    path: Vec<&'a str>,
}

impl<'a> Skeleton<'a> {
    fn push(&mut self, tag: &'a str, depth: usize) {
        let pad = " ".repeat(depth * self.indent);
        let element = self.data.get_element(tag);

        let mut open = format!("{}<{}", pad, tag);
        if let Some(element) = element {
            // `defaults` get no tab stop.
            for name in element.required_attributes() {
                self.placeholder += 1;
                open.push_str(&format!(
                    " {}={q}${}{q}",
                    name,
                    self.placeholder,
                    q = self.quote
                ));
            }
        }
        open.push('>');

        // An element that contains itself is not expanded a second time.
        let children: &'a [String] = match element {
            Some(element) if !self.path.contains(&tag) => &element.subtags,
            _ => &[],
        };

        if children.is_empty() {
            self.lines.push(format!("{}</{}>", open, tag));
            return;
        }

        self.lines.push(open);
        self.path.push(tag);
        for child in children {
            self.push(child, depth + 1);
        }
        self.path.pop();
        self.lines.push(format!("{}</{}>", pad, tag));
    }
}
