//! Required attribute validation

use crate::document::TextDocument;
use crate::extractor::extract_occurrences;
use crate::types::Diagnostic;
use flow_data::{AttributeType, FlowData};
use tracing::debug;

/// Code of a required attribute that is missing
pub const CODE_MISSING: &str = "missing-attribute";
/// Code of a required attribute with an empty value
pub const CODE_BLANK: &str = "blank-attribute";

/// Validate every known element in a document.
///
/// The result is the complete diagnostic set for the document; publishing
/// it replaces whatever was reported before.
pub fn validate_document(data: &FlowData, doc: &TextDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for occurrence in extract_occurrences(doc, data) {
        let Some(element) = data.get_element(&occurrence.name) else {
            continue;
        };

        for name in element.required_attributes() {
            match occurrence.attribute(name) {
                Some(attr) => {
                    let is_flag = element
                        .attribute(name)
                        .is_some_and(|meta| meta.attr_type == AttributeType::Flag);
                    if is_flag && attr.value.is_none() {
                        continue;
                    }
                    if attr.is_blank() {
                        diagnostics.push(
                            Diagnostic::error(attr.range, CODE_BLANK, format!("{} cannot be blank", name))
                                .with_related(attr.range, "Blank value not allowed"),
                        );
                    }
                }
                None => diagnostics.push(
                    Diagnostic::error(occurrence.range, CODE_MISSING, format!("{} is required", name))
                        .with_related(occurrence.range, "Mandatory fields are required"),
                ),
            }
        }
    }

    debug!(count = diagnostics.len(), "validated document");
    diagnostics
}
