//! Integration tests for flow-intellisense

use flow_intellisense::{
    CompletionKind, CursorContext, Engine, FlowData, Position, QuoteStyle, Range, Settings,
    TextDocument,
};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const BINARY: &str = env!("CARGO_BIN_EXE_flow-intellisense");

/// Document from text containing a `|` cursor marker.
fn doc_at(marked: &str, language: &str) -> (TextDocument, Position) {
    let offset = marked.find('|').unwrap();
    let before = &marked[..offset];
    let line = before.matches('\n').count() as u32;
    let character = before.rsplit('\n').next().unwrap().chars().count() as u32;
    (
        TextDocument::new(marked.replacen('|', "", 1), language),
        Position::new(line, character),
    )
}

fn labels(engine: &Engine, marked: &str, language: &str) -> Vec<String> {
    let (doc, pos) = doc_at(marked, language);
    engine
        .complete(&doc, pos, None, &Settings::default())
        .items
        .into_iter()
        .map(|item| item.label)
        .collect()
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_tag_completion_in_vue_template() {
    let engine = Engine::new().unwrap();
    let text = "<template>\n  <f-div>\n    <|\n  </f-div>\n</template>\n<script>\nexport default {}\n</script>";
    let (doc, pos) = doc_at(text, "vue");

    let result = engine.complete(&doc, pos, Some("<"), &Settings::default());
    assert_eq!(result.items.len(), engine.data().len());
    assert!(result.items.iter().all(|item| item.kind == CompletionKind::Element));
}

#[test]
fn test_no_tag_completion_in_vue_script() {
    let engine = Engine::new().unwrap();
    let text = "<template>\n</template>\n<script>\nconst markup = `<|`\n</script>";
    assert!(labels(&engine, text, "vue").is_empty());
}

#[test]
fn test_tag_completion_for_mdx_and_typescript() {
    let engine = Engine::new().unwrap();
    assert!(!labels(&engine, "# Title\n\n<f-|", "mdx").is_empty());
    assert!(!labels(&engine, "const t = html`<|`", "typescript").is_empty());
}

#[test]
fn test_tag_snippet_respects_settings() {
    let data = FlowData::from_json(
        r#"{
            "f-form": {
                "title": "Form",
                "docLink": "https://example.com/form",
                "subtags": ["f-field"],
                "attributes": {"name": {"isRequired": true, "type": "string"}}
            },
            "f-field": {
                "title": "Field",
                "attributes": {"label": {"isRequired": true, "type": "string"}}
            }
        }"#,
    )
    .unwrap();
    let engine = Engine::with_data(data);
    let (doc, pos) = doc_at("<|", "html");
    let settings = Settings {
        indent_size: 4,
        quotes: QuoteStyle::Single,
    };

    let result = engine.complete(&doc, pos, None, &settings);
    let form = result.items.iter().find(|item| item.label == "f-form").unwrap();
    assert_eq!(
        form.insert_text,
        "f-form name='$1'>\n    <f-field label='$2'></f-field>\n</f-form>"
    );
    assert_eq!(form.documentation.as_deref(), Some("[Docs](https://example.com/form)"));
}

#[test]
fn test_attribute_completion_multiline_tag() {
    let engine = Engine::new().unwrap();
    let text = "<f-button\n  label=\"Save\"\n  |\n></f-button>";
    let names = labels(&engine, text, "vue");
    assert!(names.contains(&"size".to_string()));
    assert!(names.contains(&"click".to_string()));
}

#[test]
fn test_no_attribute_completion_in_content() {
    let engine = Engine::new().unwrap();
    let text = "<f-text variant=\"heading\">\n  Some title |\n</f-text>";
    assert!(labels(&engine, text, "html").is_empty());
}

#[test]
fn test_value_completion() {
    let engine = Engine::new().unwrap();
    let names = labels(&engine, "<f-div direction=\"|\"></f-div>", "html");
    assert_eq!(names, vec!["row", "column"]);
}

#[test]
fn test_multi_value_slots() {
    let engine = Engine::new().unwrap();

    let first = labels(&engine, "<f-div border=\"|\"></f-div>", "html");
    assert_eq!(first, vec!["small", "medium", "large"]);

    let second = labels(&engine, "<f-div border=\"small |\"></f-div>", "html");
    assert_eq!(second, vec!["solid", "dashed", "dotted"]);

    let third = labels(&engine, "<f-div border=\"small dashed |\"></f-div>", "html");
    assert_eq!(third, vec!["default", "secondary", "subtle"]);
}

#[test]
fn test_boolean_values() {
    let engine = Engine::new().unwrap();
    let names = labels(&engine, "<f-text ellipsis='|'></f-text>", "html");
    assert_eq!(names, vec!["true", "false"]);
}

#[test]
fn test_value_replacement_range() {
    let engine = Engine::new().unwrap();
    let (doc, pos) = doc_at("<f-icon size=\"sm|all\"></f-icon>", "html");
    let result = engine.complete(&doc, pos, Some("\""), &Settings::default());

    assert!(!result.items.is_empty());
    for item in &result.items {
        assert_eq!(item.replace_range, Some(Range::on_line(0, 14, 19)));
    }
}

// ============================================================================
// Context
// ============================================================================

#[test]
fn test_context_transitions_while_typing() {
    let engine = Engine::new().unwrap();
    let steps = [
        ("<|", "tag_start"),
        ("<f-bu|", "tag_start"),
        ("<f-button |", "attribute_name"),
        ("<f-button size=\"|\"", "attribute_value"),
        ("<f-button size=\"small\" |", "attribute_name"),
        ("<f-button size=\"small\">|", "unknown"),
    ];

    for (marked, expected) in steps {
        let (doc, pos) = doc_at(marked, "html");
        let ctx = engine.context(&doc, pos);
        let kind = serde_json::to_value(&ctx).unwrap()["kind"].clone();
        assert_eq!(kind, expected, "{}", marked);
    }

    let (doc, pos) = doc_at("<f-button size=\"|\"", "html");
    assert_eq!(
        engine.context(&doc, pos),
        CursorContext::AttributeValue {
            tag: "f-button".to_string(),
            attribute: "size".to_string()
        }
    );
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn test_hover_on_multiline_tag_attribute() {
    let engine = Engine::new().unwrap();
    let (doc, pos) = doc_at("<f-icon\n  sou|rce=\"i-plus\"\n/>", "vue");
    let info = engine.hover(&doc, pos).unwrap();

    assert!(info.content.starts_with("#### source (string) (required)"));
    assert_eq!(info.range, Some(Range::on_line(1, 2, 8)));
}

#[test]
fn test_hover_nothing_outside_markup() {
    let engine = Engine::new().unwrap();
    let (doc, pos) = doc_at("const a = |1;", "typescript");
    assert!(engine.hover(&doc, pos).is_none());
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_validate_page() {
    let engine = Engine::new().unwrap();
    let text = r#"<template>
  <f-div direction="column">
    <f-button label="Save" @click="save"></f-button>
    <f-button label=""></f-button>
    <f-icon-button size="small"></f-icon-button>
    <f-icon source="i-plus" clickable></f-icon>
  </f-div>
</template>"#;
    let doc = TextDocument::new(text, "vue");
    let diagnostics = engine.validate(&doc);

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message, "label cannot be blank");
    assert_eq!(diagnostics[0].range, Range::on_line(3, 14, 22));
    assert_eq!(diagnostics[1].message, "icon is required");
    assert_eq!(diagnostics[1].range, Range::on_line(4, 4, 32));
}

#[test]
fn test_sibling_occurrences() {
    let data = FlowData::bundled().unwrap();
    let doc = TextDocument::new(
        "<f-button label=\"a\" size=\"small\"></f-button>\n<f-icon source=\"x\" state=\"primary\"></f-icon>",
        "html",
    );
    let found = flow_intellisense::extractor::extract_occurrences(&doc, &data);

    assert_eq!(found.len(), 2);
    assert!(!found[0].range.overlaps(&found[1].range));
    for occurrence in &found {
        assert_eq!(occurrence.attributes.len(), 2);
        for attr in &occurrence.attributes {
            assert!(occurrence.range.contains(&attr.range));
        }
    }
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_validate_exit_code() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join("good.vue");
    let bad = temp.path().join("bad.vue");
    fs::write(&good, "<template><f-button label=\"Ok\"></f-button></template>").unwrap();
    fs::write(&bad, "<template><f-icon></f-icon></template>").unwrap();

    let output = Command::new(BINARY)
        .args(["validate", good.to_str().unwrap()])
        .output()
        .expect("Failed to run command");
    assert!(output.status.success());

    let output = Command::new(BINARY)
        .args(["validate", bad.to_str().unwrap()])
        .output()
        .expect("Failed to run command");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("source is required"));
}

#[test]
fn test_cli_complete_json_from_stdin() {
    let mut child = Command::new(BINARY)
        .args([
            "--format", "json", "--language", "html", "complete", "-", "--line", "1", "--column",
            "17",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"<f-text weight=\"\"></f-text>")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = json["items"].as_array().unwrap();
    let names: Vec<_> = items.iter().map(|item| item["label"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["bold", "medium", "regular"]);
}

#[test]
fn test_cli_elements() {
    let output = Command::new(BINARY)
        .args(["elements"])
        .output()
        .expect("Failed to run command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("f-button"));
    assert!(stdout.contains("Layout"));
}
