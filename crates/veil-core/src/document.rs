//! Document domain model

use serde::{Deserialize, Serialize};

/// A loaded input document. Read once, transformed, re-emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub source_uri: String,
    pub text: String,
    pub content_hash: String,
}

impl Document {
    pub fn new(source_uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let content_hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_uri: source_uri.into(),
            text,
            content_hash,
        }
    }

    /// Seed derived from content, so the same text always pseudonymizes the same way
    pub fn content_seed(&self) -> u64 {
        let digest = blake3::hash(self.text.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}
