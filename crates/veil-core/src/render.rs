//! Render engine - substitution and replacement log
//!
//! Every byte outside a substituted span is copied through unchanged.
//! Line structure is preserved because substitutes are single-line.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Category, Document, Entity, Error, ReplacementMapping, Result};

/// One line of the replacement log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub category: Category,
    pub original: String,
    pub substitute: String,
    pub occurrences: usize,
}

/// Result of transforming one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transformation {
    pub document_id: String,
    pub source_uri: String,
    pub text: String,
    pub entities: Vec<Entity>,
    pub replacements: Vec<Replacement>,
    pub seed: u64,
    #[serde(with = "time::serde::timestamp")]
    pub generated_at: OffsetDateTime,
}

/// Appearance of the human-readable log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogStyle {
    pub delimiter: String,
    pub arrow: String,
}

impl Default for LogStyle {
    fn default() -> Self {
        Self {
            delimiter: "=====".to_string(),
            arrow: "=>".to_string(),
        }
    }
}

impl Transformation {
    /// Delimited log listing original → substitute pairs per category
    pub fn log(&self, style: &LogStyle) -> String {
        let mut out = format!("{0} REPLACEMENT LOG {0}\n", style.delimiter);

        if self.replacements.is_empty() {
            out.push_str("(no replacements)\n");
        }

        let mut current: Option<Category> = None;
        for replacement in &self.replacements {
            if current != Some(replacement.category) {
                out.push_str(&format!("[{}]\n", replacement.category));
                current = Some(replacement.category);
            }
            out.push_str(&format!(
                "{} {} {} ({})\n",
                replacement.original, style.arrow, replacement.substitute, replacement.occurrences
            ));
        }

        out.push_str(&format!("{0} END LOG {0}\n", style.delimiter));
        out
    }

    /// Transformed document followed by the log
    pub fn to_text(&self, style: &LogStyle) -> String {
        let mut out = self.text.clone();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.log(style));
        out
    }
}

/// Main render engine
#[derive(Debug, Default)]
pub struct RenderEngine;

impl RenderEngine {
    pub fn new() -> Self {
        Self
    }

    /// Splice substitutes into `document`.
    ///
    /// `entities` must be sorted and non-overlapping (see `resolve_overlaps`)
    /// and every entity key must already be present in `mapping`.
    pub fn render(
        &self,
        document: &Document,
        entities: Vec<Entity>,
        mapping: &mut ReplacementMapping,
        seed: u64,
    ) -> Result<Transformation> {
        let source = document.text.as_str();
        let mut text = String::with_capacity(source.len());
        let mut cursor = 0;

        for entity in &entities {
            if entity.start < cursor || entity.end > source.len() {
                return Err(Error::Extractor(format!(
                    "entity '{}' at {}..{} is out of order or out of bounds",
                    entity.text, entity.start, entity.end
                )));
            }

            let key = entity.key();
            let substitute = mapping
                .get(&key)
                .ok_or_else(|| Error::MissingSubstitute(entity.text.clone()))?
                .to_string();

            text.push_str(&source[cursor..entity.start]);
            text.push_str(&substitute);
            cursor = entity.end;
            mapping.record_occurrence(&key);
        }
        text.push_str(&source[cursor..]);

        let replacements = mapping
            .entries()
            .into_iter()
            .filter(|e| e.occurrences > 0)
            .map(|e| Replacement {
                category: e.key.category,
                original: e.original.clone(),
                substitute: e.substitute.clone(),
                occurrences: e.occurrences,
            })
            .collect();

        Ok(Transformation {
            document_id: document.id.clone(),
            source_uri: document.source_uri.clone(),
            text,
            entities,
            replacements,
            seed,
            generated_at: OffsetDateTime::now_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(text: &str, spans: &[(Category, &str, &str)]) -> (Document, Vec<Entity>, ReplacementMapping) {
        let document = Document::new("text:test", text);
        let mut entities = Vec::new();
        let mut mapping = ReplacementMapping::new();
        for (category, original, substitute) in spans {
            for (start, _) in text.match_indices(original) {
                entities.push(Entity::new(*category, *original, start));
            }
            let key = Entity::new(*category, *original, 0).key();
            mapping.insert(key, original, substitute.to_string()).unwrap();
        }
        entities.sort_by_key(|e| e.start);
        (document, entities, mapping)
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let text = "Dr. Patricia Williams saw the patient.\nLater Dr. Patricia Williams wrote.";
        let (doc, entities, mut mapping) =
            setup(text, &[(Category::PersonName, "Dr. Patricia Williams", "Dr. Robert Chen")]);

        let result = RenderEngine::new().render(&doc, entities, &mut mapping, 7).unwrap();

        assert_eq!(
            result.text,
            "Dr. Robert Chen saw the patient.\nLater Dr. Robert Chen wrote."
        );
        assert_eq!(result.replacements.len(), 1);
        assert_eq!(result.replacements[0].occurrences, 2);
        assert_eq!(result.seed, 7);
    }

    #[test]
    fn test_render_without_entities_is_identity() {
        let text = "This Agreement is entered into on January 5, 2024.\n";
        let (doc, entities, mut mapping) = setup(text, &[]);

        let result = RenderEngine::new().render(&doc, entities, &mut mapping, 0).unwrap();

        assert_eq!(result.text, text);
        assert!(result.replacements.is_empty());
        assert!(result.log(&LogStyle::default()).contains("(no replacements)"));
    }

    #[test]
    fn test_render_missing_substitute_fails() {
        let doc = Document::new("text:", "Call 555-0100");
        let entities = vec![Entity::new(Category::PhoneNumber, "555-0100", 5)];
        let mut mapping = ReplacementMapping::new();

        let result = RenderEngine::new().render(&doc, entities, &mut mapping, 0);
        assert!(matches!(result, Err(Error::MissingSubstitute(_))));
    }

    #[test]
    fn test_log_format() {
        let text = "Take Lisinopril 20 mg for $150/month.";
        let (doc, entities, mut mapping) = setup(
            text,
            &[
                (Category::MonetaryAmount, "$150/month", "$165/month"),
                (Category::Medication, "Lisinopril", "Enalapril"),
            ],
        );
        let result = RenderEngine::new().render(&doc, entities, &mut mapping, 0).unwrap();
        let log = result.log(&LogStyle::default());

        assert_eq!(
            log,
            "===== REPLACEMENT LOG =====\n\
             [medication]\n\
             Lisinopril => Enalapril (1)\n\
             [monetary_amount]\n\
             $150/month => $165/month (1)\n\
             ===== END LOG =====\n"
        );
    }

    #[test]
    fn test_to_text_appends_log_on_new_line() {
        let (doc, entities, mut mapping) = setup("No trailing newline", &[]);
        let result = RenderEngine::new().render(&doc, entities, &mut mapping, 0).unwrap();
        let style = LogStyle {
            delimiter: "---".to_string(),
            arrow: "->".to_string(),
        };
        assert!(result.to_text(&style).starts_with("No trailing newline\n--- REPLACEMENT LOG ---\n"));
    }
}
