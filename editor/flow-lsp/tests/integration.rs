//! Integration tests for flow-lsp
//!
//! Drives the server through its `LanguageServer` methods without a
//! transport; notifications to the unconnected client are dropped.

use flow_intellisense::Engine;
use flow_lsp::LspServer;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use tower_lsp::lsp_types::*;
use tower_lsp::{LanguageServer, LspService};

fn uri() -> Url {
    Url::parse("file:///workspace/page.vue").unwrap()
}

fn service() -> (LspService<LspServer>, tower_lsp::ClientSocket) {
    LspService::new(|client| LspServer::new(client, Engine::new().unwrap()))
}

async fn open(server: &LspServer, text: &str) {
    server
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri(),
                language_id: "vue".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

fn position_params(line: u32, character: u32) -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier { uri: uri() },
        position: Position { line, character },
    }
}

async fn complete(server: &LspServer, line: u32, character: u32) -> Vec<CompletionItem> {
    let response = server
        .completion(CompletionParams {
            text_document_position: position_params(line, character),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();

    match response {
        Some(CompletionResponse::List(list)) => list.items,
        Some(CompletionResponse::Array(items)) => items,
        None => Vec::new(),
    }
}

#[tokio::test]
async fn test_initialize_announces_capabilities() {
    let (service, _socket) = service();
    let result = service
        .inner()
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let completion = result.capabilities.completion_provider.unwrap();
    assert!(completion.trigger_characters.unwrap().contains(&":".to_string()));
    assert_eq!(result.server_info.unwrap().name, "flow-lsp");
}

#[tokio::test]
async fn test_initialize_reads_workspace_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".flow-lsp.yaml"),
        "engine:\n  name: custom-flow\nflow-helper:\n  quotes: single\n",
    )
    .unwrap();

    let (service, _socket) = service();
    let server = service.inner();
    let result = server
        .initialize(InitializeParams {
            root_uri: Some(Url::from_directory_path(temp.path()).unwrap()),
            ..InitializeParams::default()
        })
        .await
        .unwrap();
    assert_eq!(result.server_info.unwrap().name, "custom-flow");

    open(server, "<template>\n  <f-button \n</template>").await;
    let items = complete(server, 1, 12).await;
    let size = items.iter().find(|item| item.label == "size").unwrap();
    assert_eq!(size.insert_text.as_deref(), Some("size='$1'$0"));
}

#[tokio::test]
async fn test_completion_and_hover() {
    let (service, _socket) = service();
    let server = service.inner();
    server.initialize(InitializeParams::default()).await.unwrap();
    open(server, "<template>\n  <f-div direction=\"\"></f-div>\n</template>").await;

    let items = complete(server, 1, 20).await;
    let labels: Vec<_> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["row", "column"]);

    let hover = server
        .hover(HoverParams {
            text_document_position_params: position_params(1, 4),
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap()
        .unwrap();
    match hover.contents {
        HoverContents::Markup(markup) => assert!(markup.value.starts_with("### f-div")),
        other => panic!("unexpected hover: {:?}", other),
    }
}

#[tokio::test]
async fn test_configuration_change_applies_settings() {
    let (service, _socket) = service();
    let server = service.inner();
    server.initialize(InitializeParams::default()).await.unwrap();
    open(server, "<").await;

    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({"flow-helper": {"quotes": "single"}}),
        })
        .await;

    let items = complete(server, 0, 1).await;
    let button = items.iter().find(|item| item.label == "f-button").unwrap();
    assert_eq!(
        button.insert_text.as_deref(),
        Some("f-button label='$1'></f-button>")
    );
}

#[tokio::test]
async fn test_unknown_document() {
    let (service, _socket) = service();
    let server = service.inner();

    assert!(complete(server, 0, 0).await.is_empty());
}
