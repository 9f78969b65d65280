use async_trait::async_trait;
use veil_core::{Document, Error, Result};

use crate::handler::SourceHandler;

pub struct TextHandler;

#[async_trait]
impl SourceHandler for TextHandler {
    async fn load(&self, uri: &str) -> Result<Vec<Document>> {
        let content = if let Some(text) = uri.strip_prefix("text:") {
            text.to_string()
        } else {
            return Err(Error::InvalidSourceUri(format!("Invalid text URI: {}", uri)));
        };

        Ok(vec![Document::new(uri, content)])
    }

    fn can_handle(&self, uri: &str) -> bool {
        uri.starts_with("text:")
    }
}
