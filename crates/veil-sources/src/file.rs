use async_trait::async_trait;
use veil_core::{Document, Error, Result};

use crate::handler::SourceHandler;

pub struct FileHandler;

impl FileHandler {
    pub async fn read(path: &str) -> Result<Document> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to read file {}: {}", path, e)))?;

        let text = String::from_utf8(content).map_err(|_| {
            Error::InvalidSourceUri(format!("{} is not valid UTF-8 text", path))
        })?;

        Ok(Document::new(format!("file:{}", path), text))
    }
}

#[async_trait]
impl SourceHandler for FileHandler {
    async fn load(&self, uri: &str) -> Result<Vec<Document>> {
        let path = uri.strip_prefix("file:").unwrap_or(uri);
        if path.is_empty() {
            return Err(Error::InvalidSourceUri(uri.to_string()));
        }

        Ok(vec![Self::read(path).await?])
    }

    fn can_handle(&self, uri: &str) -> bool {
        uri.starts_with("file:") || !uri.contains(':') || std::path::Path::new(uri).exists()
    }
}
