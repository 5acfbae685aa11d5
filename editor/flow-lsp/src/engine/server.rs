//! LSP server implementation
//!
//! Delegates completion, hover and validation to the flow engine and keeps
//! the client's diagnostics in sync with every open document.

use super::config::{EngineConfig, SETTINGS_SECTION};
use super::convert;
use super::document::DocumentManager;
use flow_intellisense::{Engine, TRIGGER_CHARACTERS};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// Flow Language Server
pub struct LspServer {
    /// LSP client for sending notifications
    client: Client,
    /// Document manager
    documents: DocumentManager,
    /// Completion, hover and validation engine
    engine: Engine,
    /// Engine configuration, replaced on initialize and configuration changes
    config: RwLock<EngineConfig>,
}

/// Capabilities announced on initialize
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: None,
                save: None,
            },
        )),

        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()),
            resolve_provider: Some(false),
            work_done_progress_options: WorkDoneProgressOptions::default(),
            all_commit_characters: None,
            completion_item: None,
        }),

        hover_provider: Some(HoverProviderCapability::Simple(true)),
        ..ServerCapabilities::default()
    }
}

impl LspServer {
    /// Create a new LSP server
    pub fn new(client: Client, engine: Engine) -> Self {
        Self::with_config(client, engine, EngineConfig::default())
    }

    /// Create with configuration
    pub fn with_config(client: Client, engine: Engine, config: EngineConfig) -> Self {
        Self {
            client,
            documents: DocumentManager::new(),
            engine,
            config: RwLock::new(config),
        }
    }

    /// Publish diagnostics for a document, replacing the previous set
    async fn publish_diagnostics(&self, uri: &Url) {
        let Some(state) = self.documents.get(uri) else {
            return;
        };
        if !self.config.read().await.validates(&state.language_id) {
            return;
        }

        let doc = state.text_document();
        let diagnostics: Vec<_> = self
            .engine
            .validate(&doc)
            .iter()
            .map(|diag| convert::to_lsp_diagnostic(&doc, uri, diag))
            .collect();

        tracing::debug!("Publishing {} diagnostic(s) for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(state.version))
            .await;
    }

    /// Apply a client settings payload, logging rather than failing on bad input
    async fn apply_client_settings(&self, payload: &serde_json::Value) {
        let mut config = self.config.write().await;
        match config.apply_client_settings(payload) {
            Ok(true) => tracing::info!("Applied {} settings: {:?}", SETTINGS_SECTION, config.settings),
            Ok(false) => {}
            Err(e) => tracing::warn!("Ignoring client settings: {}", e),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_discovery = self.config.read().await.engine.workspace_discovery;

        // Workspace config file first, then the client's initialization options
        if workspace_discovery {
            if let Some(root_path) = params.root_uri.and_then(|uri| uri.to_file_path().ok()) {
                match EngineConfig::load_default(&root_path) {
                    Ok(config) => *self.config.write().await = config,
                    Err(e) => tracing::warn!("Using default config: {}", e),
                }
            }
        }
        if let Some(options) = &params.initialization_options {
            self.apply_client_settings(options).await;
        }

        let name = self.config.read().await.engine.name.clone();
        tracing::info!("{} initializing", name);

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name,
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let name = self.config.read().await.engine.name.clone();
        tracing::info!("{} initialized with {} elements", name, self.engine.data().len());
        self.client
            .log_message(MessageType::INFO, format!("{} ready", name))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("{} shutting down", self.config.read().await.engine.name);
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;

        tracing::debug!("Document opened: {} ({})", doc.uri, doc.language_id);
        self.documents
            .open(doc.uri.clone(), doc.text, doc.version, doc.language_id);
        self.publish_diagnostics(&doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change holds the whole text.
        if let Some(change) = params.content_changes.into_iter().last() {
            if self.documents.update(&uri, change.text, version) {
                self.publish_diagnostics(&uri).await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document closed: {}", uri);
        self.documents.close(&uri);
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.apply_client_settings(&params.settings).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let Some(doc) = self.documents.snapshot(uri) else {
            return Ok(None);
        };

        let position = convert::from_lsp_position(&doc, params.text_document_position.position);
        let trigger = params
            .context
            .as_ref()
            .and_then(|ctx| ctx.trigger_character.as_deref());
        let settings = self.config.read().await.settings;

        let result = self.engine.complete(&doc, position, trigger, &settings);
        if result.is_empty() {
            return Ok(None);
        }

        let items = result
            .items
            .iter()
            .map(|item| convert::to_lsp_completion(&doc, item))
            .collect();

        Ok(Some(CompletionResponse::List(CompletionList {
            is_incomplete: result.is_incomplete,
            items,
        })))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let Some(doc) = self.documents.snapshot(uri) else {
            return Ok(None);
        };

        let position =
            convert::from_lsp_position(&doc, params.text_document_position_params.position);

        Ok(self
            .engine
            .hover(&doc, position)
            .map(|info| convert::to_lsp_hover(&doc, &info)))
    }
}
