//! LSP engine core
//!
//! Server, open documents, configuration and conversion to LSP types.

pub mod config;
pub mod convert;
pub mod document;
pub mod server;

pub use config::{ConfigError, EngineConfig};
pub use document::DocumentManager;
pub use server::{server_capabilities, LspServer};
