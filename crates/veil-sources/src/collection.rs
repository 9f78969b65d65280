//! `glob:` sources expand to one document per matching file

use async_trait::async_trait;
use tracing::debug;
use veil_core::{Document, Error, Result};

use crate::file::FileHandler;
use crate::handler::SourceHandler;

pub struct GlobHandler;

impl GlobHandler {
    /// Matching regular files, in lexicographic order
    pub fn expand(pattern: &str) -> Result<Vec<String>> {
        let entries = glob::glob(pattern)
            .map_err(|e| Error::InvalidSourceUri(format!("Invalid glob '{}': {}", pattern, e)))?;

        let mut paths: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .map(|path| path.to_string_lossy().to_string())
            .collect();

        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl SourceHandler for GlobHandler {
    async fn load(&self, uri: &str) -> Result<Vec<Document>> {
        let pattern = uri
            .strip_prefix("glob:")
            .ok_or_else(|| Error::InvalidSourceUri(uri.to_string()))?;

        let paths = Self::expand(pattern)?;
        debug!(pattern, matches = paths.len(), "expanded glob source");

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            documents.push(FileHandler::read(&path).await?);
        }
        Ok(documents)
    }

    fn can_handle(&self, uri: &str) -> bool {
        uri.starts_with("glob:")
    }
}
