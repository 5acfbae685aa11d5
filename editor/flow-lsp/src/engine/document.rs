//! Document management for the LSP engine
//!
//! Manages open documents in the LSP session with thread-safe access.

use dashmap::DashMap;
use flow_intellisense::TextDocument;
use tower_lsp::lsp_types::Url;

/// Manages open documents in the LSP session
#[derive(Debug, Default)]
pub struct DocumentManager {
    /// Map of document URI to content
    documents: DashMap<Url, DocumentState>,
}

/// State of an open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Document content
    pub content: String,
    /// Document version
    pub version: i32,
    /// Language id sent by the client
    pub language_id: String,
}

impl DocumentState {
    /// Build a text document for the engine
    pub fn text_document(&self) -> TextDocument {
        TextDocument::new(self.content.clone(), self.language_id.clone())
    }
}

impl DocumentManager {
    /// Create a new document manager
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open a document
    pub fn open(&self, uri: Url, content: String, version: i32, language_id: String) {
        self.documents.insert(
            uri,
            DocumentState {
                content,
                version,
                language_id,
            },
        );
    }

    /// Update a document (full content replacement).
    ///
    /// Changes older than the stored version are dropped.
    pub fn update(&self, uri: &Url, content: String, version: i32) -> bool {
        match self.documents.get_mut(uri) {
            Some(mut doc) if version >= doc.version => {
                doc.content = content;
                doc.version = version;
                true
            }
            _ => false,
        }
    }

    /// Close a document
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get document state
    pub fn get(&self, uri: &Url) -> Option<DocumentState> {
        self.documents.get(uri).map(|doc| doc.clone())
    }

    /// Snapshot of a document for one request
    pub fn snapshot(&self, uri: &Url) -> Option<TextDocument> {
        self.documents.get(uri).map(|doc| doc.text_document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_uri(path: &str) -> Url {
        Url::parse(&format!("file://{}", path)).unwrap()
    }

    fn open(manager: &DocumentManager, uri: &Url, content: &str) {
        manager.open(uri.clone(), content.to_string(), 1, "vue".to_string());
    }

    #[test]
    fn test_document_manager_new() {
        let manager = DocumentManager::new();
        assert!(manager.get(&test_uri("/page.vue")).is_none());
    }

    #[test]
    fn test_open_document() {
        let manager = DocumentManager::new();
        let uri = test_uri("/page.vue");
        open(&manager, &uri, "content");

        let doc = manager.get(&uri).unwrap();
        assert_eq!(doc.content, "content");
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_update_document() {
        let manager = DocumentManager::new();
        let uri = test_uri("/page.vue");
        open(&manager, &uri, "old");
        assert!(manager.update(&uri, "new".to_string(), 2));

        let doc = manager.get(&uri).unwrap();
        assert_eq!(doc.content, "new");
        assert_eq!(doc.version, 2);
        assert_eq!(doc.language_id, "vue");
    }

    #[test]
    fn test_stale_update_ignored() {
        let manager = DocumentManager::new();
        let uri = test_uri("/page.vue");
        manager.open(uri.clone(), "v5".to_string(), 5, "vue".to_string());

        assert!(!manager.update(&uri, "v4".to_string(), 4));
        assert_eq!(manager.get(&uri).unwrap().content, "v5");
    }

    #[test]
    fn test_close_document() {
        let manager = DocumentManager::new();
        let uri = test_uri("/page.vue");
        open(&manager, &uri, "content");
        manager.close(&uri);

        assert!(manager.get(&uri).is_none());
        assert!(manager.snapshot(&uri).is_none());
    }

    #[test]
    fn test_update_nonexistent_document() {
        let manager = DocumentManager::new();
        let uri = test_uri("/nonexistent.vue");

        assert!(!manager.update(&uri, "content".to_string(), 1));
        assert!(manager.get(&uri).is_none());
    }

    #[test]
    fn test_snapshot() {
        let manager = DocumentManager::new();
        let uri = test_uri("/index.html");
        manager.open(uri.clone(), "<f-div>\n</f-div>".to_string(), 1, "html".to_string());

        let doc = manager.snapshot(&uri).unwrap();
        assert_eq!(doc.language_id(), "html");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_documents_are_independent() {
        let manager = DocumentManager::new();
        let first = test_uri("/a.vue");
        let second = test_uri("/b.vue");
        open(&manager, &first, "content1");
        open(&manager, &second, "content2");

        manager.close(&first);
        assert!(manager.get(&first).is_none());
        assert_eq!(manager.get(&second).unwrap().content, "content2");
    }
}
