//! Model-backed entity extraction

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};
use veil_core::{Category, Entity, Error, Extractor, Result, normalize, resolve_overlaps};
use veil_detect::literal_pattern;

use crate::client::{ChatClient, ModelSettings};
use crate::prompt::{system_prompt, user_prompt};

#[derive(Debug, Deserialize)]
struct RawDetection {
    category: String,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReply {
    List(Vec<RawDetection>),
    Wrapped { entities: Vec<RawDetection> },
}

impl RawReply {
    fn into_detections(self) -> Vec<RawDetection> {
        match self {
            RawReply::List(list) => list,
            RawReply::Wrapped { entities } => entities,
        }
    }
}

/// Extractor that asks a chat model for sensitive spans
pub struct LlmExtractor {
    client: ChatClient,
    system: String,
}

impl LlmExtractor {
    pub fn new(settings: ModelSettings) -> Result<Self> {
        Ok(Self {
            client: ChatClient::new(settings)?,
            system: system_prompt(),
        })
    }

    pub fn settings(&self) -> &ModelSettings {
        self.client.settings()
    }
}

#[async_trait]
impl Extractor for LlmExtractor {
    fn name(&self) -> &str {
        "llm"
    }

    async fn extract(&self, text: &str) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let reply = self.client.complete(&self.system, &user_prompt(text)).await?;
        let detections = parse_response(&reply)?;
        let entities = locate(text, &detections);

        debug!(
            detections = detections.len(),
            entities = entities.len(),
            "model extraction complete"
        );
        Ok(entities)
    }
}

/// Parse the model reply into (category, text) pairs.
///
/// Tolerates markdown code fences, prose around the array, and an
/// `{"entities": [...]}` wrapper. Unknown categories are dropped.
pub fn parse_response(reply: &str) -> Result<Vec<(Category, String)>> {
    let body = strip_fences(reply);

    let parsed = serde_json::from_str::<RawReply>(body).or_else(|first| {
        match (body.find('['), body.rfind(']')) {
            (Some(start), Some(end)) if start < end => {
                serde_json::from_str::<RawReply>(&body[start..=end]).map_err(|_| first)
            }
            _ => Err(first),
        }
    });

    let raw = parsed
        .map_err(|e| Error::Model(format!("Unparseable extraction reply: {}", e)))?
        .into_detections();

    let mut detections = Vec::with_capacity(raw.len());
    for item in raw {
        let text = item.text.trim();
        if text.is_empty() {
            continue;
        }
        match item.category.parse::<Category>() {
            Ok(category) => detections.push((category, text.to_string())),
            Err(_) => warn!(category = %item.category, text = %text, "dropping detection with unknown category"),
        }
    }
    Ok(detections)
}

fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip a language tag such as ```json
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.trim_end().trim_end_matches("```").trim()
}

/// Every occurrence of every detected text, sorted and non-overlapping.
///
/// Runs of spaces inside a detection may differ in the document, but a
/// detection never spans a line break.
pub fn locate(text: &str, detections: &[(Category, String)]) -> Vec<Entity> {
    let unique: BTreeSet<(Category, String)> = detections
        .iter()
        .map(|(category, value)| (*category, normalize(value)))
        .collect();

    let mut found = Vec::new();
    for (category, value) in unique {
        let pattern = literal_pattern(&value).replace(' ', "[ \t]+");
        let Ok(regex) = Regex::new(&pattern) else {
            warn!(text = %value, "could not build search pattern for detection");
            continue;
        };

        let before = found.len();
        for m in regex.find_iter(text) {
            found.push(Entity::from_range(category, text, m.start(), m.end()));
        }
        if found.len() == before {
            warn!(category = %category, text = %value, "detection not present in document, dropping");
        }
    }

    resolve_overlaps(found)
}
