//! Per-document original → substitute correspondence

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{Category, EntityKey, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub key: EntityKey,
    /// Text of the first occurrence, as it appeared in the document
    pub original: String,
    pub substitute: String,
    pub occurrences: usize,
}

/// Consistency table for one document.
///
/// Invariants: a key maps to exactly one substitute, a substitute never
/// equals its original, no two keys of one category share a substitute,
/// and substitutes are single-line.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMapping {
    entries: Vec<MappingEntry>,
    index: HashMap<EntityKey, usize>,
    taken: HashSet<(Category, String)>,
}

impl ReplacementMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &EntityKey) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].substitute.as_str())
    }

    pub fn contains_key(&self, key: &EntityKey) -> bool {
        self.index.contains_key(key)
    }

    /// Whether `substitute` is already assigned within `category`
    pub fn is_taken(&self, category: Category, substitute: &str) -> bool {
        self.taken.contains(&(category, substitute.to_string()))
    }

    /// Record a new key. Fails if the substitute would break an invariant.
    pub fn insert(&mut self, key: EntityKey, original: &str, substitute: String) -> Result<()> {
        if self.index.contains_key(&key) {
            return Ok(());
        }

        let reject = |reason: &str| {
            Err(Error::InvalidSubstitute {
                original: original.to_string(),
                reason: reason.to_string(),
            })
        };

        if substitute.is_empty() {
            return reject("substitute is empty");
        }
        if substitute == key.normalized || substitute == original {
            return reject("substitute equals the original");
        }
        if substitute.contains(['\n', '\r']) {
            return reject("substitute spans multiple lines");
        }
        if self.is_taken(key.category, &substitute) {
            return reject("substitute already assigned to another entity");
        }

        self.taken.insert((key.category, substitute.clone()));
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(MappingEntry {
            key,
            original: original.to_string(),
            substitute,
            occurrences: 0,
        });
        Ok(())
    }

    pub fn record_occurrence(&mut self, key: &EntityKey) {
        if let Some(&i) = self.index.get(key) {
            self.entries[i].occurrences += 1;
        }
    }

    /// Entries grouped by category priority, insertion order within a category
    pub fn entries(&self) -> Vec<&MappingEntry> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.key.category);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(category: Category, text: &str) -> EntityKey {
        EntityKey {
            category,
            normalized: text.to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut mapping = ReplacementMapping::new();
        let k = key(Category::PersonName, "Dr. Patricia Williams");
        mapping
            .insert(k.clone(), "Dr. Patricia Williams", "Dr. Robert Chen".to_string())
            .unwrap();

        assert_eq!(mapping.get(&k), Some("Dr. Robert Chen"));
        assert!(mapping.is_taken(Category::PersonName, "Dr. Robert Chen"));
        assert!(!mapping.is_taken(Category::Organization, "Dr. Robert Chen"));
    }

    #[test]
    fn test_rejects_identity_substitute() {
        let mut mapping = ReplacementMapping::new();
        let result = mapping.insert(key(Category::Dosage, "20 mg"), "20 mg", "20 mg".to_string());
        assert!(matches!(result, Err(Error::InvalidSubstitute { .. })));
    }

    #[test]
    fn test_rejects_shared_substitute() {
        let mut mapping = ReplacementMapping::new();
        mapping
            .insert(key(Category::Medication, "Lisinopril"), "Lisinopril", "Enalapril".into())
            .unwrap();
        let result = mapping.insert(key(Category::Medication, "Ramipril"), "Ramipril", "Enalapril".into());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_multiline_substitute() {
        let mut mapping = ReplacementMapping::new();
        let result = mapping.insert(key(Category::StreetAddress, "1 Main St"), "1 Main St", "2 Oak\nAve".into());
        assert!(result.is_err());
    }

    #[test]
    fn test_entries_grouped_by_category() {
        let mut mapping = ReplacementMapping::new();
        mapping
            .insert(key(Category::MonetaryAmount, "$150"), "$150", "$165".into())
            .unwrap();
        mapping
            .insert(key(Category::PersonName, "Mr. Lee"), "Mr. Lee", "Mr. Park".into())
            .unwrap();
        let entries = mapping.entries();
        assert_eq!(entries[0].key.category, Category::PersonName);
        assert_eq!(entries[1].key.category, Category::MonetaryAmount);
    }
}
