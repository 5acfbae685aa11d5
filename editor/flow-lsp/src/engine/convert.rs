//! Type conversions between engine types and LSP types
//!
//! The engine counts characters as Unicode scalar values while LSP clients
//! count UTF-16 code units, so every position crossing the boundary is
//! re-measured against its line.

use flow_intellisense::{
    CompletionItem, CompletionKind, Diagnostic, HoverInfo, Position, Range, Severity,
    TextDocument,
};
use tower_lsp::lsp_types::{
    self, CompletionItem as LspCompletionItem, CompletionItemKind as LspCompletionItemKind,
    CompletionTextEdit, Diagnostic as LspDiagnostic, DiagnosticRelatedInformation,
    DiagnosticSeverity as LspDiagnosticSeverity, Hover, HoverContents, Location, MarkupContent,
    MarkupKind, NumberOrString, Position as LspPosition, Range as LspRange, TextEdit, Url,
};

/// Convert an LSP position to an engine position
pub fn from_lsp_position(doc: &TextDocument, position: LspPosition) -> Position {
    let line = doc.line_text(position.line);
    let mut units = 0;
    let mut character = 0;

    for c in line.chars() {
        if units >= position.character {
            break;
        }
        units += c.len_utf16() as u32;
        character += 1;
    }

    Position::new(position.line, character)
}

/// Convert an engine position to an LSP position
pub fn to_lsp_position(doc: &TextDocument, position: Position) -> LspPosition {
    let character = doc
        .line_text(position.line)
        .chars()
        .take(position.character as usize)
        .map(|c| c.len_utf16() as u32)
        .sum();

    LspPosition {
        line: position.line,
        character,
    }
}

/// Convert an engine range to an LSP range
pub fn to_lsp_range(doc: &TextDocument, range: Range) -> LspRange {
    LspRange {
        start: to_lsp_position(doc, range.start),
        end: to_lsp_position(doc, range.end),
    }
}

/// Convert engine completion to LSP completion item
pub fn to_lsp_completion(doc: &TextDocument, item: &CompletionItem) -> LspCompletionItem {
    let insert_text_format = if item.is_snippet {
        lsp_types::InsertTextFormat::SNIPPET
    } else {
        lsp_types::InsertTextFormat::PLAIN_TEXT
    };

    let text_edit = item.replace_range.map(|range| {
        CompletionTextEdit::Edit(TextEdit {
            range: to_lsp_range(doc, range),
            new_text: item.insert_text.clone(),
        })
    });

    LspCompletionItem {
        label: item.label.clone(),
        kind: Some(to_lsp_completion_kind(item.kind)),
        detail: item.detail.clone(),
        documentation: item.documentation.as_ref().map(|doc| {
            lsp_types::Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: doc.clone(),
            })
        }),
        insert_text: text_edit.is_none().then(|| item.insert_text.clone()),
        insert_text_format: Some(insert_text_format),
        sort_text: Some(item.sort_text.clone()),
        text_edit,
        ..LspCompletionItem::default()
    }
}

/// Convert engine completion kind to LSP completion kind
fn to_lsp_completion_kind(kind: CompletionKind) -> LspCompletionItemKind {
    match kind {
        CompletionKind::Element => LspCompletionItemKind::CLASS,
        CompletionKind::Attribute => LspCompletionItemKind::PROPERTY,
        CompletionKind::Method => LspCompletionItemKind::METHOD,
        CompletionKind::Value => LspCompletionItemKind::VALUE,
    }
}

/// Convert engine diagnostic to LSP diagnostic
pub fn to_lsp_diagnostic(doc: &TextDocument, uri: &Url, diag: &Diagnostic) -> LspDiagnostic {
    let related: Vec<_> = diag
        .related_information
        .iter()
        .map(|info| DiagnosticRelatedInformation {
            location: Location {
                uri: uri.clone(),
                range: to_lsp_range(doc, info.range),
            },
            message: info.message.clone(),
        })
        .collect();

    LspDiagnostic {
        range: to_lsp_range(doc, diag.range),
        severity: Some(to_lsp_severity(diag.severity)),
        code: Some(NumberOrString::String(diag.code.clone())),
        source: Some(diag.source.clone()),
        message: diag.message.clone(),
        related_information: (!related.is_empty()).then_some(related),
        ..LspDiagnostic::default()
    }
}

/// Convert engine severity to LSP severity
fn to_lsp_severity(severity: Severity) -> LspDiagnosticSeverity {
    match severity {
        Severity::Error => LspDiagnosticSeverity::ERROR,
        Severity::Warning => LspDiagnosticSeverity::WARNING,
        Severity::Info => LspDiagnosticSeverity::INFORMATION,
        Severity::Hint => LspDiagnosticSeverity::HINT,
    }
}

/// Convert engine hover info to LSP hover
pub fn to_lsp_hover(doc: &TextDocument, info: &HoverInfo) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.content.clone(),
        }),
        range: info.range.map(|range| to_lsp_range(doc, range)),
    }
}
