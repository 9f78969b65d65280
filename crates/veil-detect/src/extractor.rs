//! Rule-based entity tagger

use async_trait::async_trait;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;
use veil_core::{Category, Entity, Error, Extractor, Result, normalize, resolve_overlaps};

use crate::name::NameParts;
use crate::patterns::*;
use crate::pools::{self, CALENDAR_WORDS, DESCRIPTORS, INSTITUTION_STOPWORDS, NON_NAME_WORDS};

/// Pattern and dictionary based extractor
pub struct RegexExtractor {
    terms: Vec<(Category, Regex)>,
    ignore: HashSet<String>,
}

impl RegexExtractor {
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            ignore: HashSet::new(),
        }
    }

    /// Exact texts to always flag as the given category
    pub fn with_terms<I, S>(mut self, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Category, S)>,
        S: AsRef<str>,
    {
        for (category, term) in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let pattern = Regex::new(&literal_pattern(term))
                .map_err(|e| Error::Config(format!("invalid term '{}': {}", term, e)))?;
            self.terms.push((category, pattern));
        }
        Ok(self)
    }

    /// Texts that must never be flagged, compared case-insensitively
    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore
            .extend(ignore.into_iter().map(|s| normalize(s.as_ref()).to_lowercase()));
        self
    }

    /// Detect sensitive spans, sorted and non-overlapping
    pub fn detect(&self, text: &str) -> Vec<Entity> {
        let mut found = Vec::new();

        detect_names(text, &mut found);
        detect_institutions(text, &ORGANIZATION, &ORG_SUFFIX_AT_END, Category::Organization, &mut found);
        detect_institutions(text, &FACILITY, &FACILITY_SUFFIX_AT_END, Category::HealthcareFacility, &mut found);
        push_matches(text, &ADDRESS, Category::StreetAddress, &mut found);
        push_matches(text, &PHONE, Category::PhoneNumber, &mut found);
        push_matches(text, &EMAIL, Category::EmailAddress, &mut found);
        detect_cued(text, &ACCOUNT, Category::AccountNumber, &mut found);
        detect_cued(text, &IDENTIFIER, Category::IdentificationNumber, &mut found);
        push_matches(text, &SSN, Category::IdentificationNumber, &mut found);
        push_matches(text, &MEDICATION, Category::Medication, &mut found);
        push_matches(text, &DOSAGE, Category::Dosage, &mut found);
        detect_money(text, &mut found);

        for (category, pattern) in &self.terms {
            push_matches(text, pattern, *category, &mut found);
        }

        found.retain(|e| {
            !self.ignore.contains(&normalize(&e.text).to_lowercase()) && !DATE_LIKE.is_match(&e.text)
        });

        let resolved = resolve_overlaps(found);
        debug!(entities = resolved.len(), "regex extraction complete");
        resolved
    }
}

impl Default for RegexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for RegexExtractor {
    fn name(&self) -> &str {
        "regex"
    }

    async fn extract(&self, text: &str) -> Result<Vec<Entity>> {
        Ok(self.detect(text))
    }
}

/// Whole-word pattern for a literal, with boundaries only at word characters
pub fn literal_pattern(term: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let mut pattern = String::new();
    if is_word(term.chars().next()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if is_word(term.chars().last()) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn push_matches(text: &str, pattern: &Regex, category: Category, found: &mut Vec<Entity>) {
    for m in pattern.find_iter(text) {
        found.push(Entity::from_range(category, text, m.start(), m.end()));
    }
}

fn plausible_name(words: &[&str]) -> bool {
    !words.is_empty() && words.iter().all(|w| !pools::contains_ignore_case(NON_NAME_WORDS, w))
}

fn is_calendar_word(word: &str) -> bool {
    pools::contains_ignore_case(CALENDAR_WORDS, word)
}

/// End of a name match once trailing month and weekday words are dropped.
/// "Dr. Williams Friday" ends after "Williams"; "Ms. May" keeps its only word.
fn trim_calendar_words(text: &str, start: usize, end: usize, min_words: usize) -> usize {
    let mut candidate = text[start..end].trim_end();
    if candidate.contains(',') {
        return end;
    }
    loop {
        let words = NameParts::parse(candidate).words;
        match words.last() {
            Some(last) if words.len() > min_words && is_calendar_word(last) => {
                candidate = candidate[..candidate.len() - last.len()].trim_end();
            }
            _ => return start + candidate.len(),
        }
    }
}

/// A month or weekday that is written as part of a date
fn in_date(text: &str, start: usize, end: usize) -> bool {
    DATE_AFTER.is_match(&text[end..]) || DATE_BEFORE.is_match(&text[..start])
}

fn detect_names(text: &str, found: &mut Vec<Entity>) {
    let mut names = Vec::new();

    for m in TITLED_NAME.find_iter(text) {
        let end = trim_calendar_words(text, m.start(), m.end(), 1);
        if plausible_name(&NameParts::parse(&text[m.start()..end]).words) {
            names.push(Entity::from_range(Category::PersonName, text, m.start(), end));
        }
    }

    for caps in ROLE_NAME.captures_iter(text) {
        if let Some(m) = caps.name("name") {
            let end = trim_calendar_words(text, m.start(), m.end(), 2);
            let words = NameParts::parse(&text[m.start()..end]).words;
            if words.len() >= 2 && plausible_name(&words) {
                names.push(Entity::from_range(Category::PersonName, text, m.start(), end));
            }
        }
    }

    // Later references: the bare full name and the bare surname
    let mut references = BTreeSet::new();
    for entity in &names {
        let parts = NameParts::parse(&entity.text);
        if parts.words.len() >= 2 {
            references.insert(parts.core());
        }
        if let Some(surname) = parts.surname()
            && surname.len() >= 3
        {
            references.insert(surname.to_string());
        }
    }

    for reference in references {
        let Ok(pattern) = Regex::new(&literal_pattern(&reference)) else {
            continue;
        };
        let calendar = is_calendar_word(&reference);
        for m in pattern.find_iter(text) {
            if calendar && in_date(text, m.start(), m.end()) {
                continue;
            }
            names.push(Entity::from_range(Category::PersonName, text, m.start(), m.end()));
        }
    }

    found.extend(names);
}

fn detect_institutions(
    text: &str,
    pattern: &Regex,
    suffix: &Regex,
    category: Category,
    found: &mut Vec<Entity>,
) {
    for m in pattern.find_iter(text) {
        let start = skip_stopwords(text, m.start(), m.end());
        let candidate = &text[start..m.end()];

        let Some(caps) = suffix.captures(candidate) else {
            continue;
        };
        let stem = &candidate[..caps.get(0).map_or(0, |s| s.start())];
        let distinctive = stem.split_whitespace().any(|w| {
            !pools::contains_ignore_case(DESCRIPTORS, w)
                && !pools::contains_ignore_case(INSTITUTION_STOPWORDS, w)
        });

        if distinctive {
            found.push(Entity::from_range(category, text, start, m.end()));
        }
    }
}

/// Advance `start` past leading words such as "The" or "Under"
fn skip_stopwords(text: &str, mut start: usize, end: usize) -> usize {
    loop {
        let rest = &text[start..end];
        let word_len = rest.find(' ').unwrap_or(rest.len());
        let word = &rest[..word_len];
        if word_len == rest.len() || !pools::contains_ignore_case(INSTITUTION_STOPWORDS, word) {
            return start;
        }
        let spaces = rest[word_len..].len() - rest[word_len..].trim_start_matches(' ').len();
        start += word_len + spaces;
    }
}

fn detect_cued(text: &str, pattern: &Regex, category: Category, found: &mut Vec<Entity>) {
    for caps in pattern.captures_iter(text) {
        if let Some(m) = caps.name("id")
            && looks_like_identifier(m.as_str())
        {
            found.push(Entity::from_range(category, text, m.start(), m.end()));
        }
    }
}

fn looks_like_identifier(id: &str) -> bool {
    id.len() >= 5 && id.chars().any(|c| c.is_ascii_digit()) && !DATE_LIKE.is_match(id)
}

fn detect_money(text: &str, found: &mut Vec<Entity>) {
    for caps in MONEY.captures_iter(text).chain(DOLLARS.captures_iter(text)) {
        let (Some(whole), Some(value)) = (caps.get(0), caps.name("value")) else {
            continue;
        };
        if value.as_str().chars().any(|c| ('1'..='9').contains(&c)) {
            found.push(Entity::from_range(Category::MonetaryAmount, text, whole.start(), whole.end()));
        }
    }
}
