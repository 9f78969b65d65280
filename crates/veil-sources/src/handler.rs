//! Source handler trait

use async_trait::async_trait;
use veil_core::{Document, Error, Result};

use crate::collection::GlobHandler;
use crate::file::FileHandler;
use crate::stdin::StdinHandler;
use crate::text::TextHandler;

/// Trait for handling different source types
#[async_trait]
pub trait SourceHandler: Send + Sync {
    /// Load the document(s) named by `uri`
    async fn load(&self, uri: &str) -> Result<Vec<Document>>;

    /// Check if this handler can handle the given URI
    fn can_handle(&self, uri: &str) -> bool;
}

/// Dispatches a source URI to the first handler that accepts it
pub struct SourceHandlerRegistry {
    handlers: Vec<Box<dyn SourceHandler>>,
}

impl SourceHandlerRegistry {
    pub fn new() -> Self {
        // Order matters: the file handler accepts bare paths and goes last
        Self {
            handlers: vec![
                Box::new(TextHandler),
                Box::new(StdinHandler),
                Box::new(GlobHandler),
                Box::new(FileHandler),
            ],
        }
    }

    pub async fn load(&self, uri: &str) -> Result<Vec<Document>> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.can_handle(uri))
            .ok_or_else(|| Error::InvalidSourceUri(uri.to_string()))?;

        handler.load(uri).await
    }

    /// Load exactly one document, rejecting sources that expand to several
    pub async fn load_one(&self, uri: &str) -> Result<Document> {
        let mut documents = self.load(uri).await?;
        match documents.len() {
            1 => Ok(documents.remove(0)),
            n => Err(Error::InvalidSourceUri(format!(
                "{} resolved to {} documents, expected one",
                uri, n
            ))),
        }
    }
}

impl Default for SourceHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_source() {
        let registry = SourceHandlerRegistry::new();
        let doc = registry.load_one("text:Hello, world!").await.unwrap();
        assert_eq!(doc.text, "Hello, world!");
        assert_eq!(doc.source_uri, "text:Hello, world!");
    }

    #[tokio::test]
    async fn test_file_source_bare_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.txt");
        std::fs::write(&path, "Plaintiff Jane Doe").unwrap();

        let registry = SourceHandlerRegistry::new();
        let doc = registry.load_one(&path.display().to_string()).await.unwrap();
        assert_eq!(doc.text, "Plaintiff Jane Doe");
    }

    #[tokio::test]
    async fn test_load_one_rejects_collections() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();

        let registry = SourceHandlerRegistry::new();
        let uri = format!("glob:{}/*.txt", dir.path().display());
        assert!(registry.load_one(&uri).await.is_err());
        assert_eq!(registry.load(&uri).await.unwrap().len(), 2);
    }
}
