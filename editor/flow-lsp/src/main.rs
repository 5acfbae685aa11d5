//! Flow Language Server executable
//!
//! Speaks LSP over stdio for editor integration.

use anyhow::Context;
use flow_intellisense::Engine;
use flow_lsp::{EngineConfig, LspServer};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let (config, config_error) = match EngineConfig::load_default(&cwd) {
        Ok(config) => (config, None),
        Err(e) => (EngineConfig::default(), Some(e)),
    };

    // Initialize logging; stdout belongs to the protocol
    let directive = config.log_directive(std::env::var("RUST_LOG").ok());
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Flow Language Server");
    if let Some(e) = config_error {
        tracing::warn!("Using default config: {}", e);
    }

    let engine = Engine::new().context("Failed to load element schemas")?;

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(|client| LspServer::with_config(client, engine, config));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
