use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use veil_config::{Config, ExtractorKind, LlmConfig};
use veil_core::{Document, Entity, Extractor, RenderEngine, Transformation, normalize, resolve_overlaps};
use veil_detect::{HybridExtractor, RegexExtractor, Replacer};
use veil_llm::{LlmExtractor, ModelSettings};
use veil_sources::SourceHandlerRegistry;

/// Loader → extractor → replacer → renderer
pub struct Pipeline {
    source_registry: SourceHandlerRegistry,
    extractor: Arc<dyn Extractor>,
    render_engine: RenderEngine,
    ignore: HashSet<String>,
    seed: Option<u64>,
}

impl Pipeline {
    pub fn new(extractor: Arc<dyn Extractor>) -> Self {
        Self {
            source_registry: SourceHandlerRegistry::new(),
            extractor,
            render_engine: RenderEngine::new(),
            ignore: HashSet::new(),
            seed: None,
        }
    }

    /// Pipeline with the extractor, terms, ignore list and seed from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor = build_extractor(config)?;
        Ok(Self::new(extractor)
            .with_seed(config.seed)
            .with_ignore(&config.ignore))
    }

    /// Fixed seed for every document; `None` seeds each document from its content
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Texts dropped from every extractor's output
    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore
            .extend(ignore.into_iter().map(|s| normalize(s.as_ref()).to_lowercase()));
        self
    }

    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    /// Seed used for `document`
    pub fn seed_for(&self, document: &Document) -> u64 {
        self.seed.unwrap_or_else(|| document.content_seed())
    }

    /// Resolve a source URI into documents
    pub async fn load(&self, uri: &str) -> Result<Vec<Document>> {
        Ok(self.source_registry.load(uri).await?)
    }

    /// Sensitive spans in `text`, sorted and non-overlapping
    pub async fn detect(&self, text: &str) -> Result<Vec<Entity>> {
        let mut entities = resolve_overlaps(self.extractor.extract(text).await?);
        if !self.ignore.is_empty() {
            entities.retain(|e| !self.ignore.contains(&normalize(&e.text).to_lowercase()));
        }
        debug!(
            extractor = self.extractor.name(),
            entities = entities.len(),
            "extraction complete"
        );
        Ok(entities)
    }

    pub async fn transform(&self, document: &Document) -> Result<Transformation> {
        self.transform_seeded(document, None).await
    }

    /// Transform with a per-call seed taking precedence over the pipeline's
    pub async fn transform_seeded(&self, document: &Document, seed: Option<u64>) -> Result<Transformation> {
        let seed = seed.unwrap_or_else(|| self.seed_for(document));

        // 1. Extract
        let entities = self.detect(&document.text).await?;

        // 2. Generate substitutes
        let mut mapping = Replacer::new(seed).build(&entities)?;

        // 3. Render
        let transformation = self
            .render_engine
            .render(document, entities, &mut mapping, seed)?;

        info!(
            source = %document.source_uri,
            entities = transformation.entities.len(),
            replacements = transformation.replacements.len(),
            "document transformed"
        );
        Ok(transformation)
    }

    /// Load and transform every document behind `uri`, one at a time
    pub async fn transform_source(&self, uri: &str) -> Result<Vec<Transformation>> {
        let documents = self.load(uri).await?;
        info!(source = %uri, documents = documents.len(), "source loaded");

        let mut transformations = Vec::with_capacity(documents.len());
        for document in &documents {
            transformations.push(self.transform(document).await?);
        }
        Ok(transformations)
    }
}

/// Extractor for the configured kind
pub fn build_extractor(config: &Config) -> Result<Arc<dyn Extractor>> {
    let regex = || -> Result<RegexExtractor> {
        Ok(RegexExtractor::new()
            .with_terms(config.terms.iter().map(|t| (t.category, t.text.as_str())))?
            .with_ignore(&config.ignore))
    };

    let extractor: Arc<dyn Extractor> = match config.extractor {
        ExtractorKind::Regex => Arc::new(regex()?),
        ExtractorKind::Llm => Arc::new(LlmExtractor::new(model_settings(&config.llm))?),
        ExtractorKind::Hybrid => Arc::new(HybridExtractor::new(vec![
            Arc::new(regex()?),
            Arc::new(LlmExtractor::new(model_settings(&config.llm))?),
        ])),
    };
    debug!(extractor = %config.extractor, "extractor ready");
    Ok(extractor)
}

pub fn model_settings(llm: &LlmConfig) -> ModelSettings {
    ModelSettings {
        endpoint: llm.endpoint.clone(),
        model: llm.model.clone(),
        api_key: llm.api_key(),
        timeout: llm.timeout(),
        temperature: llm.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_config::TermConfig;
    use veil_core::Category;

    #[tokio::test]
    async fn test_build_each_extractor() {
        let mut config = Config::default();
        assert_eq!(build_extractor(&config).unwrap().name(), "regex");

        config.extractor = ExtractorKind::Llm;
        assert_eq!(build_extractor(&config).unwrap().name(), "llm");

        config.extractor = ExtractorKind::Hybrid;
        assert_eq!(build_extractor(&config).unwrap().name(), "hybrid");
    }

    #[tokio::test]
    async fn test_config_terms_and_ignore_reach_extraction() {
        let mut config = Config::default();
        config.terms.push(TermConfig {
            text: "Acme Health Trust".to_string(),
            category: Category::Organization,
        });
        config.ignore.push("Metformin".to_string());

        let pipeline = Pipeline::from_config(&config).unwrap();
        let entities = pipeline
            .detect("Acme Health Trust pays for Metformin.")
            .await
            .unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].category, Category::Organization);
    }

    #[test]
    fn test_seed_precedence() {
        let document = Document::new("text:", "hello");
        let pipeline = Pipeline::new(Arc::new(RegexExtractor::new()));
        assert_eq!(pipeline.seed_for(&document), document.content_seed());
        let pipeline = pipeline.with_seed(Some(5));
        assert_eq!(pipeline.seed_for(&document), 5);
    }

    #[test]
    fn test_model_settings_from_config() {
        let llm = LlmConfig {
            api_key_env: "VEIL_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let settings = model_settings(&llm);
        assert_eq!(settings.timeout.as_secs(), 5);
        assert!(settings.api_key.is_none());
        assert_eq!(settings.endpoint, llm.endpoint);
    }
}
