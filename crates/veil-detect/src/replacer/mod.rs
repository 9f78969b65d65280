//! Substitute generation
//!
//! Every substitute is derived from `(seed, category, normalized original,
//! attempt)`, so one seed and one document always yield one mapping.
//! Names are handled token by token: a surname maps to one replacement
//! surname everywhere in the document, and likewise for given names, street
//! names and institution stems.

mod clinical;
mod draw;
mod money;
mod names;
mod numeric;

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use veil_core::{Category, Entity, EntityKey, ReplacementMapping, Result};

use draw::Draw;

use crate::pools::{GIVEN_FEMALE, GIVEN_MALE};

/// Re-rolls before an entity falls back to a placeholder
const MAX_ATTEMPTS: u32 = 24;

/// Tries before a token map falls back to a double-barrelled value
const TOKEN_ATTEMPTS: u32 = 64;

/// Builds the per-document replacement mapping
#[derive(Debug, Clone, Copy)]
pub struct Replacer {
    seed: u64,
}

impl Replacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One substitute per distinct entity key.
    ///
    /// Person names go first so that email addresses can reuse their tokens.
    pub fn build(&self, entities: &[Entity]) -> Result<ReplacementMapping> {
        let mut session = Session::new(self.seed, entities);

        let mut ordered: Vec<&Entity> = entities.iter().collect();
        ordered.sort_by_key(|e| e.category != Category::PersonName);

        for entity in ordered {
            session.assign(entity)?;
        }

        debug!(keys = session.mapping.len(), seed = self.seed, "replacement mapping built");
        Ok(session.mapping)
    }
}

/// Injective token → replacement table
#[derive(Debug, Default)]
pub(crate) struct TokenMap {
    map: HashMap<String, String>,
    used: HashSet<String>,
}

impl TokenMap {
    pub(crate) fn get(&self, token: &str) -> Option<&str> {
        self.map.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Replacement for `token`, drawn from `pool` on first sight.
    ///
    /// Never returns the token itself, a word in `avoid`, or a value already
    /// handed to another token.
    pub(crate) fn assign(
        &mut self,
        seed: u64,
        salt: &str,
        token: &str,
        pool: &[&str],
        avoid: &HashSet<String>,
    ) -> String {
        let key = token.to_lowercase();
        if let Some(existing) = self.map.get(&key) {
            return existing.clone();
        }

        let free = |candidate: &str, used: &HashSet<String>| {
            let lower = candidate.to_lowercase();
            lower != key && !used.contains(&lower) && !avoid.contains(&lower)
        };

        let mut chosen = None;
        for attempt in 0..TOKEN_ATTEMPTS {
            let candidate = *Draw::new(seed, &[salt, &key], attempt).pick(pool);
            if free(candidate, &self.used) {
                chosen = Some(candidate.to_string());
                break;
            }
        }

        let value = match chosen {
            Some(value) => value,
            None => {
                let mut n = 0u32;
                loop {
                    let mut draw = Draw::new(seed, &[salt, &key, "overflow"], n);
                    let first = *draw.pick(pool);
                    let candidate = if n < 256 {
                        format!("{}-{}", first, draw.pick(pool))
                    } else {
                        format!("{}{}", first, n)
                    };
                    if free(&candidate, &self.used) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        self.used.insert(value.to_lowercase());
        self.map.insert(key, value.clone());
        value
    }
}

/// Token-level consistency tables shared by every entity of a document
#[derive(Debug, Default)]
pub(crate) struct TokenMaps {
    pub given: TokenMap,
    pub surname: TokenMap,
    pub initials: TokenMap,
    pub stem: TokenMap,
    pub street: TokenMap,
    pub domain: TokenMap,
    /// (given, surname) pairs seen in person names, lowercase
    pub people: Vec<(String, String)>,
}

pub(crate) struct Session {
    seed: u64,
    mapping: ReplacementMapping,
    /// Every original of the document, lowercase, so no substitute can
    /// collide with a real value
    originals: HashSet<(Category, String)>,
    /// Every word of every original, lowercase
    avoid: HashSet<String>,
    tokens: TokenMaps,
    placeholders: HashMap<Category, usize>,
}

impl Session {
    fn new(seed: u64, entities: &[Entity]) -> Self {
        let mut originals = HashSet::new();
        let mut avoid = HashSet::new();
        for entity in entities {
            let key = entity.key();
            for word in key.normalized.split_whitespace() {
                let word = word
                    .trim_end_matches("'s")
                    .trim_matches(|c: char| !c.is_alphanumeric());
                if !word.is_empty() {
                    avoid.insert(word.to_lowercase());
                }
            }
            originals.insert((key.category, key.normalized.to_lowercase()));
        }

        Self {
            seed,
            mapping: ReplacementMapping::new(),
            originals,
            avoid,
            tokens: TokenMaps::default(),
            placeholders: HashMap::new(),
        }
    }

    fn assign(&mut self, entity: &Entity) -> Result<()> {
        let key = entity.key();
        if self.mapping.contains_key(&key) {
            return Ok(());
        }

        for attempt in 0..MAX_ATTEMPTS {
            let mut draw = Draw::new(self.seed, &[key.category.as_str(), &key.normalized], attempt);
            let Some(candidate) = self.generate(&key, &mut draw, attempt) else {
                continue;
            };
            if self.acceptable(&key, &entity.text, &candidate) {
                return self.mapping.insert(key, &entity.text, candidate);
            }
        }

        let placeholder = self.placeholder(key.category);
        warn!(
            category = %key.category,
            original = %key.normalized,
            "no acceptable substitute, using placeholder"
        );
        self.mapping.insert(key, &entity.text, placeholder)
    }

    fn generate(&mut self, key: &EntityKey, draw: &mut Draw, attempt: u32) -> Option<String> {
        let text = key.normalized.as_str();
        match key.category {
            Category::PersonName => self.person(text, draw, attempt),
            Category::Organization => self.institution(text, draw, attempt, false),
            Category::HealthcareFacility => self.institution(text, draw, attempt, true),
            Category::EmailAddress => self.email(text, draw, attempt),
            Category::StreetAddress => Some(self.address(text, draw)),
            Category::PhoneNumber => Some(numeric::phone(draw, text)),
            Category::AccountNumber => Some(numeric::scramble(draw, text, true)),
            Category::IdentificationNumber => Some(numeric::identifier(draw, text)),
            Category::Medication => Some(clinical::medication(self.seed, text, attempt)),
            Category::Dosage => Some(clinical::dosage(draw, text)),
            Category::MonetaryAmount => Some(money::amount(draw, text, attempt)),
        }
    }

    fn acceptable(&self, key: &EntityKey, original: &str, candidate: &str) -> bool {
        !candidate.trim().is_empty()
            && candidate != key.normalized
            && candidate != original
            && !candidate.contains(['\n', '\r'])
            && !self.mapping.is_taken(key.category, candidate)
            && !self
                .originals
                .contains(&(key.category, candidate.to_lowercase()))
    }

    fn placeholder(&mut self, category: Category) -> String {
        let counter = self.placeholders.entry(category).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("[REDACTED:{}:{}]", category.as_str().to_uppercase(), counter);
            if !self.mapping.is_taken(category, &candidate) {
                return candidate;
            }
        }
    }

    /// Given-name pool for a token, fixed per token so it stays stable
    fn given_pool(&self, token: &str) -> &'static [&'static str] {
        let mut draw = Draw::new(self.seed, &["given-pool", &token.to_lowercase()], 0);
        if draw.below(2) == 0 { GIVEN_MALE } else { GIVEN_FEMALE }
    }
}

/// Re-case `word` to follow `template`: all caps, all lower, or as stored
pub(crate) fn match_case(template: &str, word: &str) -> String {
    let letters: Vec<char> = template.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        word.to_uppercase()
    } else if !letters.is_empty() && letters.iter().all(|c| c.is_lowercase()) {
        word.to_lowercase()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegexExtractor;

    fn entity(category: Category, text: &str) -> Entity {
        Entity::new(category, text, 0)
    }

    fn build(seed: u64, entities: &[Entity]) -> ReplacementMapping {
        Replacer::new(seed).build(entities).unwrap()
    }

    fn substitute<'a>(mapping: &'a ReplacementMapping, category: Category, text: &str) -> &'a str {
        mapping
            .get(&EntityKey {
                category,
                normalized: text.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_deterministic_for_seed() {
        let text = "Dr. Patricia Williams prescribed Lisinopril 20 mg; copay $150/month. \
                    Call (217) 555-0142. Account No. ACC-00482913.";
        let entities = RegexExtractor::new().detect(text);
        let a = build(42, &entities);
        let b = build(42, &entities);
        let pairs = |m: &ReplacementMapping| {
            m.entries()
                .iter()
                .map(|e| (e.original.clone(), e.substitute.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(pairs(&a), pairs(&b));
        assert!(!a.is_empty());
        assert_ne!(pairs(&a), pairs(&build(43, &entities)));
    }

    #[test]
    fn test_surname_consistency() {
        let mapping = build(
            9,
            &[
                entity(Category::PersonName, "Dr. Patricia Williams"),
                entity(Category::PersonName, "Dr. Williams"),
                entity(Category::PersonName, "Williams"),
            ],
        );
        let full = substitute(&mapping, Category::PersonName, "Dr. Patricia Williams");
        let short = substitute(&mapping, Category::PersonName, "Dr. Williams");
        let bare = substitute(&mapping, Category::PersonName, "Williams");

        let surname = full.rsplit(' ').next().unwrap();
        assert_eq!(short, format!("Dr. {}", surname));
        assert_eq!(bare, surname);
        assert!(full.starts_with("Dr. "));
        assert!(!full.contains("Williams"));
    }

    #[test]
    fn test_substitutes_unique_within_category() {
        let entities: Vec<Entity> = ["Lisinopril", "Enalapril", "Ramipril", "Benazepril"]
            .iter()
            .map(|n| entity(Category::Medication, n))
            .collect();
        let mapping = build(3, &entities);
        let substitutes: HashSet<&str> = mapping.entries().iter().map(|e| e.substitute.as_str()).collect();
        assert_eq!(substitutes.len(), 4);
        for entry in mapping.entries() {
            assert!(!["lisinopril", "enalapril", "ramipril", "benazepril"]
                .contains(&entry.substitute.to_lowercase().as_str()));
        }
    }

    #[test]
    fn test_never_reuses_an_original() {
        let mapping = build(
            5,
            &[
                entity(Category::PersonName, "Mr. Chen"),
                entity(Category::PersonName, "Mr. Patel"),
                entity(Category::PersonName, "Mr. Garcia"),
            ],
        );
        for entry in mapping.entries() {
            for word in ["Chen", "Patel", "Garcia"] {
                assert!(!entry.substitute.contains(word), "{}", entry.substitute);
            }
        }
    }

    #[test]
    fn test_placeholder_numbering() {
        let mut session = Session::new(1, &[]);
        assert_eq!(session.placeholder(Category::MonetaryAmount), "[REDACTED:MONETARY_AMOUNT:1]");
        assert_eq!(session.placeholder(Category::MonetaryAmount), "[REDACTED:MONETARY_AMOUNT:2]");
    }

    #[test]
    fn test_token_map_is_injective() {
        let avoid = HashSet::new();
        let mut map = TokenMap::default();
        let pool = ["Alpha", "Beta"];
        let a = map.assign(1, "t", "one", &pool, &avoid);
        let b = map.assign(1, "t", "two", &pool, &avoid);
        let c = map.assign(1, "t", "three", &pool, &avoid);
        assert_ne!(a, b);
        assert!(c.contains('-'));
        assert_eq!(map.assign(1, "t", "ONE", &pool, &avoid), a);
        assert_eq!(map.get("One"), Some(a.as_str()));
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("LISINOPRIL", "Enalapril"), "ENALAPRIL");
        assert_eq!(match_case("lisinopril", "Enalapril"), "enalapril");
        assert_eq!(match_case("Lisinopril", "Enalapril"), "Enalapril");
        assert_eq!(match_case("J", "Robert"), "Robert");
    }
}
