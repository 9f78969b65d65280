//! Detected sensitive spans

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::Category;

/// A sensitive span, with byte offsets into the source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub category: Category,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Identity of an entity for consistency purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub category: Category,
    pub normalized: String,
}

impl Entity {
    pub fn new(category: Category, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let end = start + text.len();
        Self {
            category,
            text,
            start,
            end,
        }
    }

    /// Build an entity from a byte range of `document`
    pub fn from_range(category: Category, document: &str, start: usize, end: usize) -> Self {
        Self {
            category,
            text: document[start..end].to_string(),
            start,
            end,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey {
            category: self.category,
            normalized: normalize(&self.text),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Collapse runs of whitespace so that line-wrapped recurrences share a key
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Order detections by position and drop overlaps.
///
/// On overlap the longer span survives; equal lengths fall back to
/// category priority.
pub fn resolve_overlaps(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.retain(|e| !e.is_empty());
    entities.sort_by_key(|e| (e.start, Reverse(e.len()), e.category));

    let mut resolved: Vec<Entity> = Vec::with_capacity(entities.len());
    for entity in entities {
        match resolved.last_mut() {
            Some(last) if last.overlaps(&entity) => {
                let wins = entity.len() > last.len()
                    || (entity.len() == last.len() && entity.category < last.category);
                if wins {
                    *last = entity;
                }
            }
            _ => resolved.push(entity),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_whitespace() {
        let a = Entity::new(Category::PersonName, "Dr. Patricia  Williams", 0);
        let b = Entity::new(Category::PersonName, "Dr. Patricia\nWilliams", 40);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_category() {
        let a = Entity::new(Category::AccountNumber, "00451287", 0);
        let b = Entity::new(Category::IdentificationNumber, "00451287", 0);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_resolve_keeps_longer_span() {
        let entities = vec![
            Entity::new(Category::PersonName, "Dr. Mary", 10),
            Entity::new(Category::PersonName, "Dr. Mary Lee", 10),
            Entity::new(Category::Dosage, "20 mg", 40),
        ];
        let resolved = resolve_overlaps(entities);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].text, "Dr. Mary Lee");
        assert_eq!(resolved[1].text, "20 mg");
    }

    #[test]
    fn test_resolve_ties_by_priority() {
        let entities = vec![
            Entity::new(Category::IdentificationNumber, "00451287", 5),
            Entity::new(Category::AccountNumber, "00451287", 5),
        ];
        let resolved = resolve_overlaps(entities);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].category, Category::AccountNumber);
    }

    #[test]
    fn test_resolve_sorts_by_start() {
        let entities = vec![
            Entity::new(Category::Dosage, "5 mg", 30),
            Entity::new(Category::Medication, "Lisinopril", 0),
        ];
        let resolved = resolve_overlaps(entities);
        assert_eq!(resolved[0].start, 0);
        assert_eq!(resolved[1].start, 30);
    }
}
