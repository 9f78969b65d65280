//! Monetary amounts and number formatting

use super::Draw;
use crate::patterns::{MONEY, NUMBER};

/// Lower and upper bound of a new amount, in percent of the original
const BAND: (u128, u128) = (75, 135);

/// Same symbol, grouping, decimals, magnitude word and rate; a new value
/// within the band, rounded as coarsely as the original.
///
/// Amounts written without a symbol ("150 dollars", "EUR 90") change their
/// first number the same way.
pub(super) fn amount(draw: &mut Draw, text: &str, attempt: u32) -> String {
    let Some(value) = MONEY
        .captures(text)
        .or_else(|| NUMBER.captures(text))
        .and_then(|caps| caps.name("value"))
    else {
        return text.to_string();
    };

    let raw = value.as_str();
    let grouped = raw.contains(',');
    let decimals = raw.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let formatted = match digits.parse::<u128>().ok().and_then(|scaled| pick_amount(draw, scaled, attempt)) {
        Some(picked) => format_scaled(picked, decimals, grouped),
        None => format_digits(&redraw_digits(draw, &digits), decimals, grouped),
    };
    format!("{}{}{}", &text[..value.start()], formatted, &text[value.end()..])
}

/// Pick `k * unit` inside the band, never the original.
///
/// `scaled` is the amount in its smallest written unit ("12,500.00" is
/// 1250000). The rounding unit follows the original's trailing zeros and
/// shrinks until the band holds an alternative. `None` when the band
/// bounds do not fit in a `u128`.
fn pick_amount(draw: &mut Draw, scaled: u128, attempt: u32) -> Option<u128> {
    if scaled == 0 {
        return Some(draw.between(1, 9) as u128);
    }

    let low = scaled.checked_mul(BAND.0)?;
    let high = scaled.checked_mul(BAND.1)?;

    let mut unit = 10u128.pow(trailing_zeros(scaled));
    if attempt >= 8 && unit > 1 {
        unit /= 10;
    }

    loop {
        let lo = low.div_ceil(100 * unit).max(1);
        let hi = high / (100 * unit);
        let original = (scaled % unit == 0)
            .then_some(scaled / unit)
            .filter(|k| (lo..=hi).contains(k));

        let total = if hi >= lo { hi - lo + 1 } else { 0 };
        let count = total - u128::from(original.is_some());
        if count > 0 {
            let below = usize::try_from(count).unwrap_or(usize::MAX);
            let mut k = lo + draw.below(below) as u128;
            if let Some(original) = original
                && k >= original
            {
                k += 1;
            }
            return Some(k * unit);
        }

        if unit == 1 {
            return Some(scaled + 1);
        }
        unit /= 10;
    }
}

/// Same number of digits, no leading zero, never the original digits
fn redraw_digits(draw: &mut Draw, digits: &str) -> String {
    let mut out: String = digits
        .chars()
        .enumerate()
        .map(|(i, _)| if i == 0 { draw.digit_from(1) } else { draw.digit() })
        .collect();
    if out == digits {
        let last = if out.ends_with('9') { '8' } else { '9' };
        out.pop();
        out.push(last);
    }
    out
}

fn trailing_zeros(mut n: u128) -> u32 {
    let mut zeros = 0;
    while n > 0 && n % 10 == 0 {
        n /= 10;
        zeros += 1;
    }
    zeros
}

/// Render an integer count of `10^-decimals` units
pub(super) fn format_scaled(n: u128, decimals: usize, grouped: bool) -> String {
    format_digits(&n.to_string(), decimals, grouped)
}

/// Render a digit string as a count of `10^-decimals` units
fn format_digits(digits: &str, decimals: usize, grouped: bool) -> String {
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let whole = if grouped { group_thousands(whole) } else { whole.to_string() };
    if decimals == 0 {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Render a float with a fixed number of decimals
pub(super) fn format_fixed(value: f64, decimals: usize, grouped: bool) -> String {
    let text = format!("{:.*}", decimals, value);
    if !grouped {
        return text;
    }
    match text.split_once('.') {
        Some((whole, fraction)) => format!("{}.{}", group_thousands(whole), fraction),
        None => group_thousands(&text),
    }
}

/// "1234567" -> "1,234,567"
pub(super) fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
