//! Medication and dosage substitutes

use super::money::format_fixed;
use super::{Draw, match_case};
use crate::formulary::{self, CLASSES};
use crate::patterns::{DOSAGE, NUMBER};

/// Commonly manufactured strengths, in ascending order
const STRENGTHS: &[f64] = &[
    0.1, 0.125, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.75, 0.8, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.25,
    7.5, 10.0, 12.5, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 75.0, 80.0, 100.0, 120.0, 125.0,
    150.0, 200.0, 250.0, 300.0, 325.0, 400.0, 500.0, 600.0, 750.0, 800.0, 1000.0, 1200.0, 1500.0,
    2000.0, 2500.0, 3000.0,
];

/// Another drug of the same class and kind, in the original's letter case.
///
/// Keyed on the lowercase name so "LISINOPRIL" and "Lisinopril" become the
/// same drug. Past the eighth attempt brands and generics are mixed to make
/// room.
pub(super) fn medication(seed: u64, text: &str, attempt: u32) -> String {
    let lower = text.to_lowercase();
    let mut draw = Draw::new(seed, &["medication", &lower], attempt);

    let (class, kind, canonical) = match formulary::lookup(text) {
        Some(found) => (found.class, Some(found.is_brand), found.canonical),
        None => (draw.pick(CLASSES), None, ""),
    };

    let mut pool: Vec<&str> = match kind {
        Some(true) if attempt < 8 => class.brands.to_vec(),
        Some(false) if attempt < 8 => class.generics.to_vec(),
        _ => class.generics.iter().chain(class.brands).copied().collect(),
    };
    pool.retain(|name| !name.eq_ignore_ascii_case(canonical));

    match_case(text, *draw.pick(&pool))
}

/// A standard strength within 0.5x-2x of the original; unit, spacing and
/// any "/kg"-style rate are kept.
///
/// Doses outside the unit list ("2 tablets", "1 puff") are handled through
/// their first number, so everything around it is kept as written.
pub(super) fn dosage(draw: &mut Draw, text: &str) -> String {
    let Some(value) = DOSAGE
        .captures(text)
        .or_else(|| NUMBER.captures(text))
        .and_then(|caps| caps.name("value"))
    else {
        return text.to_string();
    };

    let raw = value.as_str();
    let grouped = raw.contains(',');
    let original = match raw.replace(',', "").parse::<f64>() {
        Ok(original) if original.is_finite() && original > 0.0 => original,
        _ => return text.to_string(),
    };

    let choices: Vec<f64> = STRENGTHS
        .iter()
        .copied()
        .filter(|s| *s >= original * 0.5 && *s <= original * 2.0 && (*s - original).abs() > 1e-9)
        .collect();

    let formatted = if choices.is_empty() {
        let decimals = raw.split_once('.').map_or(0, |(_, fraction)| fraction.len());
        let step = 10f64.powi(-(decimals as i32));
        let mut scaled = (original * (0.6 + draw.unit()) / step).round() * step;
        if (scaled - original).abs() < step / 2.0 {
            scaled = original + step;
        }
        format_fixed(scaled, decimals, grouped)
    } else {
        strength(*draw.pick(&choices), grouped)
    };

    format!("{}{}{}", &text[..value.start()], formatted, &text[value.end()..])
}

/// Shortest decimal form of a ladder strength: 12.5, 0.125, 1,000
fn strength(value: f64, grouped: bool) -> String {
    let text = format_fixed(value, 3, grouped);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
