use anyhow::{Context, Result};
use veil_config::{Config, ExtractorKind, OutputFormat};
use veil_core::{Document, Entity};
use veil_engine::Pipeline;

use crate::cli::Format;

pub async fn handle(
    sources: Vec<String>,
    format: Option<Format>,
    extractor: Option<ExtractorKind>,
    mut config: Config,
) -> Result<()> {
    if let Some(extractor) = extractor {
        config.extractor = extractor;
        config.validate()?;
    }
    let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
    let pipeline = Pipeline::from_config(&config)?;

    let mut found = Vec::new();
    for source in &sources {
        let documents = pipeline
            .load(source)
            .await
            .with_context(|| format!("Failed to load {}", source))?;
        for document in documents {
            let entities = pipeline.detect(&document.text).await?;
            found.push((document, entities));
        }
    }

    match format {
        OutputFormat::Json => {
            let report: Vec<serde_json::Value> = found
                .iter()
                .map(|(document, entities)| {
                    serde_json::json!({
                        "source_uri": document.source_uri,
                        "entities": entities,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for (document, entities) in &found {
                print!("{}", describe(document, entities));
            }
        }
    }

    Ok(())
}

fn describe(document: &Document, entities: &[Entity]) -> String {
    let mut out = format!("{} ({} detections)\n", document.source_uri, entities.len());
    for entity in entities {
        let line = document.text[..entity.start].matches('\n').count() + 1;
        out.push_str(&format!(
            "  {:>4}  {:<22} {}\n",
            line,
            entity.category.as_str(),
            entity.text.split_whitespace().collect::<Vec<_>>().join(" ")
        ));
    }
    out
}
