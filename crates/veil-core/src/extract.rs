//! Extractor trait

use async_trait::async_trait;

use crate::{Entity, Result};

/// Trait for detection backends (rule-based tagger, external model, ...)
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Detect sensitive spans in `text`.
    ///
    /// Returned entities may overlap and come in any order; callers run
    /// them through `resolve_overlaps`.
    async fn extract(&self, text: &str) -> Result<Vec<Entity>>;
}
