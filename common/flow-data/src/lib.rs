//! # flow-data
//!
//! Element metadata for flow design system components.
//!
//! Each known element (`f-button`, `f-div`, ...) carries a title, a
//! description, a documentation link, a category and an ordered set of
//! attribute schemas. Completion, hover and diagnostics all read from the
//! same immutable [`FlowData`] store.
//!
//! ## Usage
//!
//! ```rust
//! use flow_data::FlowData;
//!
//! let data = FlowData::bundled().unwrap();
//! let label = data.get_attribute("f-button", "label").unwrap();
//! assert!(label.is_required);
//! ```

mod loader;
mod types;

pub use loader::{FlowData, LoadError};
pub use types::{
    AttributeMeta, AttributeType, AttributeValues, ElementMeta, ValueMeta,
};
