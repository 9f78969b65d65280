//! Addresses, phone numbers and identifiers

use lazy_static::lazy_static;
use regex::Regex;

use super::{Draw, Session, match_case};
use crate::patterns::ADDRESS;
use crate::pools::{CITIES, STREET_NAMES};

lazy_static! {
    static ref SSN_SHAPE: Regex = Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap();
}

impl Session {
    /// Same house-number width, direction, suffix, unit form and ZIP shape
    pub(super) fn address(&mut self, text: &str, draw: &mut Draw) -> String {
        let Some(caps) = ADDRESS.captures(text) else {
            return scramble(draw, text, true);
        };
        let Some(whole) = caps.get(0) else {
            return scramble(draw, text, true);
        };

        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..whole.start()]);

        if let Some(number) = caps.name("number") {
            out.push_str(&house_number(draw, number.as_str()));
            out.push(' ');
        }
        if let Some(dir) = caps.name("dir") {
            out.push_str(dir.as_str());
        }
        if let Some(street) = caps.name("street") {
            for word in street.as_str().split_whitespace() {
                out.push_str(&self.street_word(draw, word));
                out.push(' ');
            }
        }
        if let Some(suffix) = caps.name("suffix") {
            out.push_str(suffix.as_str());
        }
        if let Some(unit) = caps.name("unit") {
            out.push_str(&scramble(draw, unit.as_str(), true));
        }
        if let (Some(city), Some(state), Some(zip)) =
            (caps.name("city"), caps.name("state"), caps.name("zip"))
        {
            let (new_city, new_state) = self.city(city.as_str(), state.as_str());
            out.push_str(&format!(
                ", {}, {} {}",
                match_case(city.as_str(), new_city),
                new_state,
                scramble(draw, zip.as_str(), false)
            ));
        }

        out.push_str(&text[whole.end()..]);
        out
    }

    fn street_word(&mut self, draw: &mut Draw, word: &str) -> String {
        // Numbered streets: "5th" becomes another ordinal
        if word.starts_with(|c: char| c.is_ascii_digit()) {
            let mut n = draw.between(1, 99);
            if word.trim_end_matches(char::is_alphabetic) == n.to_string() {
                n = n % 99 + 1;
            }
            return format!("{}{}", n, ordinal_suffix(n));
        }

        let replacement = self
            .tokens
            .street
            .assign(self.seed, "street", word, STREET_NAMES, &self.avoid);
        match_case(word, &replacement)
    }

    /// City and state for an original city, the same pair every time
    fn city(&self, city: &str, state: &str) -> (&'static str, &'static str) {
        let mut draw = Draw::new(self.seed, &["city", &city.to_lowercase()], 0);
        let start = draw.below(CITIES.len());
        (0..CITIES.len())
            .map(|i| CITIES[(start + i) % CITIES.len()])
            .find(|(c, s)| !c.eq_ignore_ascii_case(city) && *s != state)
            .unwrap_or(CITIES[start])
    }
}

fn house_number(draw: &mut Draw, number: &str) -> String {
    let mut out = String::with_capacity(number.len());
    for i in 0..number.len() {
        out.push(if i == 0 { draw.digit_from(1) } else { draw.digit() });
    }
    out
}

fn ordinal_suffix(n: u64) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// New digits in the original layout.
///
/// NANP rules: the area code and exchange start with 2-9, and a leading
/// country code "1" stays in place.
pub(super) fn phone(draw: &mut Draw, text: &str) -> String {
    let digits = text.chars().filter(char::is_ascii_digit).count();
    let keep_country = digits == 11 && text.trim_start_matches('+').starts_with('1');

    let mut seen = 0;
    text.chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            let position = seen;
            seen += 1;
            if keep_country {
                if position == 0 {
                    return c;
                }
                national_digit(draw, position - 1)
            } else {
                national_digit(draw, position)
            }
        })
        .collect()
}

fn national_digit(draw: &mut Draw, position: usize) -> char {
    match position {
        0 | 3 => draw.digit_from(2),
        _ => draw.digit(),
    }
}

/// Replace digits and, past any leading alphabetic prefix, letters.
///
/// Separators, length and letter case are kept. With `keep_prefix` the
/// letters before the first digit are left alone ("ACC-" in "ACC-00482913").
pub(super) fn scramble(draw: &mut Draw, text: &str, keep_prefix: bool) -> String {
    let mut in_prefix = keep_prefix;
    text.chars()
        .map(|c| {
            if c.is_ascii_digit() {
                in_prefix = false;
                draw.digit()
            } else if c.is_ascii_alphabetic() && !in_prefix {
                draw.letter(c.is_ascii_uppercase())
            } else {
                c
            }
        })
        .collect()
}

/// SSNs get a valid fresh SSN; other identifiers keep their layout
pub(super) fn identifier(draw: &mut Draw, text: &str) -> String {
    if SSN_SHAPE.is_match(text) {
        ssn(draw)
    } else {
        scramble(draw, text, true)
    }
}

/// Area 001-899 except 666, group 01-99, serial 0001-9999
fn ssn(draw: &mut Draw) -> String {
    let mut area = draw.between(1, 898);
    if area >= 666 {
        area += 1;
    }
    format!(
        "{:03}-{:02}-{:04}",
        area,
        draw.between(1, 99),
        draw.between(1, 9999)
    )
}
