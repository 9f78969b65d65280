use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;
use veil_config::{Config, OutputFormat};
use veil_core::{LogStyle, Transformation};
use veil_engine::Pipeline;

use crate::cli::TransformArgs;

pub async fn handle(args: TransformArgs, mut config: Config) -> Result<()> {
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(extractor) = args.extractor {
        config.extractor = extractor;
        config.validate()?;
    }
    let format = args.format.map(OutputFormat::from).unwrap_or(config.output.format);
    let style = config.output.log_style();
    let pipeline = Pipeline::from_config(&config)?;

    let mut results = Vec::new();
    for source in &args.sources {
        let transformed = pipeline
            .transform_source(source)
            .await
            .with_context(|| format!("Failed to transform {}", source))?;
        results.extend(transformed);
    }

    if results.is_empty() {
        bail!("No documents found in {}", args.sources.join(", "));
    }
    if args.log.is_some() && results.len() > 1 {
        bail!("--log needs exactly one document, got {}; use --out-dir instead", results.len());
    }
    info!(documents = results.len(), extractor = pipeline.extractor_name(), "transform complete");

    if let Some(log_path) = &args.log {
        std::fs::write(log_path, results[0].log(&style))
            .with_context(|| format!("Failed to write log {}", log_path.display()))?;
    }
    let include_log = args.log.is_none();

    if let Some(dir) = &args.out_dir {
        return write_out_dir(dir, &results, format, &style, include_log);
    }

    let rendered = render(&results, format, &style, include_log)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn render(results: &[Transformation], format: OutputFormat, style: &LogStyle, include_log: bool) -> Result<String> {
    match format {
        OutputFormat::Json if results.len() == 1 => Ok(serde_json::to_string_pretty(&results[0])? + "\n"),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)? + "\n"),
        OutputFormat::Text => Ok(results
            .iter()
            .map(|t| if include_log { t.to_text(style) } else { t.text.clone() })
            .collect()),
    }
}

fn write_out_dir(
    dir: &Path,
    results: &[Transformation],
    format: OutputFormat,
    style: &LogStyle,
    include_log: bool,
) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut used = HashSet::new();
    for (index, result) in results.iter().enumerate() {
        let base = output_name(&result.source_uri, index, format);
        let mut name = base.clone();
        let mut n = index + 1;
        while !used.insert(name.clone()) {
            name = format!("{}-{}", n, base);
            n += 1;
        }

        let path = dir.join(&name);
        let rendered = render(std::slice::from_ref(result), format, style, include_log)?;
        std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ {} -> {}", result.source_uri, path.display());
    }

    Ok(())
}

/// File name for a document written into `--out-dir`
fn output_name(source_uri: &str, index: usize, format: OutputFormat) -> String {
    let base = source_uri
        .strip_prefix("file:")
        .and_then(|path| PathBuf::from(path).file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| format!("document-{}.txt", index + 1));

    match format {
        OutputFormat::Json => format!("{}.json", base),
        OutputFormat::Text => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use veil_core::{Category, Replacement};

    fn transformation(uri: &str, text: &str) -> Transformation {
        Transformation {
            document_id: "doc".to_string(),
            source_uri: uri.to_string(),
            text: text.to_string(),
            entities: Vec::new(),
            replacements: vec![Replacement {
                category: Category::Medication,
                original: "Lisinopril".to_string(),
                substitute: "Enalapril".to_string(),
                occurrences: 1,
            }],
            seed: 1,
            generated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_output_name() {
        assert_eq!(output_name("file:records/intake.txt", 0, OutputFormat::Text), "intake.txt");
        assert_eq!(output_name("file:intake.txt", 0, OutputFormat::Json), "intake.txt.json");
        assert_eq!(output_name("text:inline", 2, OutputFormat::Text), "document-3.txt");
        assert_eq!(output_name("stdin:", 0, OutputFormat::Text), "document-1.txt");
    }

    #[test]
    fn test_render_text_with_and_without_log() {
        let results = vec![transformation("text:", "Take Enalapril.\n")];
        let style = LogStyle::default();

        let with_log = render(&results, OutputFormat::Text, &style, true).unwrap();
        assert!(with_log.starts_with("Take Enalapril.\n===== REPLACEMENT LOG =====\n"));

        let bare = render(&results, OutputFormat::Text, &style, false).unwrap();
        assert_eq!(bare, "Take Enalapril.\n");
    }

    #[test]
    fn test_render_json_single_and_many() {
        let style = LogStyle::default();
        let one = vec![transformation("text:", "a")];
        let json: serde_json::Value =
            serde_json::from_str(&render(&one, OutputFormat::Json, &style, true).unwrap()).unwrap();
        assert!(json.is_object());

        let two = vec![transformation("text:", "a"), transformation("text:", "b")];
        let json: serde_json::Value =
            serde_json::from_str(&render(&two, OutputFormat::Json, &style, true).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_out_dir_deduplicates_names() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![
            transformation("file:a/intake.txt", "one"),
            transformation("file:b/intake.txt", "two"),
        ];
        write_out_dir(dir.path(), &results, OutputFormat::Text, &LogStyle::default(), false).unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("intake.txt")).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(dir.path().join("2-intake.txt")).unwrap(), "two");
    }

    #[test]
    fn test_out_dir_never_overwrites_a_renamed_file() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![
            transformation("file:a/intake.txt", "one"),
            transformation("file:c/3-intake.txt", "two"),
            transformation("file:b/intake.txt", "three"),
            transformation("file:d/intake.txt", "four"),
        ];
        write_out_dir(dir.path(), &results, OutputFormat::Text, &LogStyle::default(), false).unwrap();

        let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("intake.txt"), "one");
        assert_eq!(read("3-intake.txt"), "two");
        assert_eq!(read("4-intake.txt"), "three");
        assert_eq!(read("5-intake.txt"), "four");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }
}
