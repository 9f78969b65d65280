use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use veil_core::{Document, Result};

use crate::handler::SourceHandler;

/// Reads the whole of standard input as one document (`-` or `stdin:`)
pub struct StdinHandler;

#[async_trait]
impl SourceHandler for StdinHandler {
    async fn load(&self, uri: &str) -> Result<Vec<Document>> {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        Ok(vec![Document::new(uri, content)])
    }

    fn can_handle(&self, uri: &str) -> bool {
        uri == "-" || uri == "stdin:"
    }
}
