//! Flow Language Server Protocol implementation
//!
//! Serves the flow design system tooling from `flow-intellisense` to any
//! LSP client:
//!
//! - Tag, attribute and value completion
//! - Hover documentation for elements and attributes
//! - Diagnostics for missing or blank required attributes
//!
//! # Usage
//!
//! Run the language server via stdio:
//!
//! ```bash
//! flow-lsp
//! ```
//!
//! # Configuration
//!
//! Create a `.flow-lsp.yaml` in your workspace root:
//!
//! ```yaml
//! engine:
//!   name: flow-lsp
//!   log_level: info
//!   languages: [vue, html, typescript, mdx]
//!
//! flow-helper:
//!   indent-size: 2
//!   quotes: double
//! ```
//!
//! `log_level` is read from the working directory when the server starts and
//! only applies when `RUST_LOG` is unset.
//!
//! The `flow-helper` section can also be sent by the client as
//! `initializationOptions` or in `workspace/didChangeConfiguration`.

pub mod engine;

pub use engine::{ConfigError, DocumentManager, EngineConfig, LspServer};
