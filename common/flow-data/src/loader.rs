//! Load element metadata.
//!
//! Element schemas ship inside the crate as JSON files, one file per
//! element, each an object keyed by tag name:
//!
//! ```text
//! data/elements/
//! ├── f-button.json      { "f-button": { "title": ..., "attributes": { ... } } }
//! ├── f-div.json
//! └── ...
//! ```

use crate::types::{AttributeMeta, ElementMeta};
use indexmap::IndexMap;
use thiserror::Error;

/// Bundled element schemas, in catalogue order.
const BUNDLED_ELEMENTS: &[(&str, &str)] = &[
    ("f-button.json", include_str!("../data/elements/f-button.json")),
    ("f-icon-button.json", include_str!("../data/elements/f-icon-button.json")),
    ("f-icon.json", include_str!("../data/elements/f-icon.json")),
    ("f-div.json", include_str!("../data/elements/f-div.json")),
    ("f-text.json", include_str!("../data/elements/f-text.json")),
    ("f-spacer.json", include_str!("../data/elements/f-spacer.json")),
];

/// Errors that can occur when loading element metadata.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to parse a JSON source.
    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        source: serde_json::Error,
    },

    /// The same tag is defined by two sources.
    #[error("Element {0} is defined more than once")]
    DuplicateElement(String),

    /// A `defaults` entry names an attribute the element does not declare.
    #[error("Element {element} lists default attribute {attribute} which it does not declare")]
    UnknownDefault { element: String, attribute: String },

    /// A `subtags` entry names an element that is not known.
    #[error("Element {element} lists unknown subtag {subtag}")]
    UnknownSubtag { element: String, subtag: String },
}

/// Loaded element metadata.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct FlowData {
    /// Element definitions indexed by tag name, in catalogue order.
    elements: IndexMap<String, ElementMeta>,
}

impl FlowData {
    /// Load the schemas bundled with this crate.
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_sources(BUNDLED_ELEMENTS)
    }

    /// Load from a single JSON object keyed by tag name.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::from_sources(&[("<inline>", json)])
    }

    /// Load from `(file name, JSON)` pairs and check cross references.
    pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self, LoadError> {
        let mut data = FlowData::default();

        for (file, json) in sources {
            let elements: IndexMap<String, ElementMeta> =
                serde_json::from_str(json).map_err(|e| LoadError::Parse {
                    file: file.to_string(),
                    source: e,
                })?;

            for (name, element) in elements {
                if data.elements.contains_key(&name) {
                    return Err(LoadError::DuplicateElement(name));
                }
                data.elements.insert(name, element);
            }
        }

        data.check_references()?;
        Ok(data)
    }

    fn check_references(&self) -> Result<(), LoadError> {
        for (name, element) in self.elements.iter() {
            if let Some(attribute) = element
                .defaults
                .iter()
                .find(|attr| !element.attributes.contains_key(attr.as_str()))
            {
                return Err(LoadError::UnknownDefault {
                    element: name.to_string(),
                    attribute: attribute.clone(),
                });
            }

            if let Some(subtag) = element
                .subtags
                .iter()
                .find(|tag| !self.elements.contains_key(tag.as_str()))
            {
                return Err(LoadError::UnknownSubtag {
                    element: name.to_string(),
                    subtag: subtag.clone(),
                });
            }
        }
        Ok(())
    }

    /// Get element definition by tag name.
    pub fn get_element(&self, name: &str) -> Option<&ElementMeta> {
        self.elements.get(name)
    }

    /// Get attribute definition for an element.
    pub fn get_attribute(&self, element: &str, attribute: &str) -> Option<&AttributeMeta> {
        self.elements
            .get(element)
            .and_then(|e| e.attributes.get(attribute))
    }

    /// Check whether a tag is a known element.
    pub fn is_known(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// All elements in catalogue order.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &ElementMeta)> {
        self.elements
            .iter()
            .map(|(name, element)| (name.as_str(), element))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
