//! Merging several extractors

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use veil_core::{Entity, Error, Extractor, Result, resolve_overlaps};

/// Runs every inner extractor and merges their spans.
///
/// A failing extractor is logged and skipped; extraction only fails when
/// every extractor fails.
pub struct HybridExtractor {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl HybridExtractor {
    pub fn new(extractors: Vec<Arc<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

#[async_trait]
impl Extractor for HybridExtractor {
    fn name(&self) -> &str {
        "hybrid"
    }

    async fn extract(&self, text: &str) -> Result<Vec<Entity>> {
        let mut merged = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0;

        for extractor in &self.extractors {
            match extractor.extract(text).await {
                Ok(entities) => {
                    debug!(extractor = extractor.name(), entities = entities.len(), "extractor finished");
                    merged.extend(entities);
                    succeeded += 1;
                }
                Err(e) => {
                    warn!(extractor = extractor.name(), error = %e, "extractor failed, continuing without it");
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            return Err(last_error.unwrap_or_else(|| Error::Extractor("no extractors configured".to_string())));
        }

        Ok(resolve_overlaps(merged))
    }
}
