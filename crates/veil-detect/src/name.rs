//! Splitting person names into honorific, words and professional suffix

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HONORIFIC_ONLY: Regex =
        Regex::new(&format!(r"^{}$", crate::patterns::HONORIFIC)).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts<'a> {
    pub honorific: Option<&'a str>,
    pub words: Vec<&'a str>,
    pub suffix: Option<&'a str>,
}

impl<'a> NameParts<'a> {
    pub fn parse(text: &'a str) -> Self {
        let (body, suffix) = match text.split_once(',') {
            Some((body, suffix)) => (body, Some(suffix.trim())),
            None => (text, None),
        };

        let mut words: Vec<&str> = body.split_whitespace().collect();
        let honorific = match words.first() {
            Some(first) if HONORIFIC_ONLY.is_match(first) => Some(words.remove(0)),
            _ => None,
        };

        Self {
            honorific,
            words,
            suffix: suffix.filter(|s| !s.is_empty()),
        }
    }

    pub fn gender(&self) -> Gender {
        match self.honorific.map(|h| h.trim_end_matches('.')) {
            Some("Mr") => Gender::Male,
            Some("Mrs") | Some("Ms") | Some("Miss") => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    /// Last word, when the name has one
    pub fn surname(&self) -> Option<&'a str> {
        self.words.last().copied()
    }

    /// Words without honorific or suffix, e.g. "Patricia Williams"
    pub fn core(&self) -> String {
        self.words.join(" ")
    }

    pub fn assemble(honorific: Option<&str>, words: &[String], suffix: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(h) = honorific {
            out.push_str(h);
            out.push(' ');
        }
        out.push_str(&words.join(" "));
        if let Some(s) = suffix {
            out.push_str(", ");
            out.push_str(s);
        }
        out
    }
}

/// "J." style middle initial
pub fn is_initial(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_uppercase() && bytes[1] == b'.'
}
