// Utility helpers for parsing and basic statistics.
//
// This module centralizes the locale-specific CSV handling so the rest of
// the code can assume clean, typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a Brazilian-formatted decimal such as `"3.500,50"` into `f64`.
///
/// - Trims whitespace and rejects blanks or values with letters.
/// - Strips every `.` (thousands separator), then turns `,` into `.`.
///
/// The substitution is applied unconditionally, so a value that already
/// uses `.` as its decimal point (`"3.5"`) reads as `35.0`.
pub fn parse_price(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace('.', "").replace(',', ".");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a `DD/MM/YYYY` collection date. Anything else yields `None`.
pub fn parse_date_dmy(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Trimmed text, or `None` when the cell is blank.
pub fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn average(v: &[f64]) -> f64 {
    // Arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Quantile `p` (0..=1) of an ascending slice, linearly interpolating
/// between the two closest ranks at position `p * (n - 1)`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn sort_floats(v: &mut [f64]) {
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators (e.g., `1,234,567.89`).
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let sep = Locale::en.separator();
    let mut res = String::with_capacity(s.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            res.push_str(sep);
        }
        res.push(c);
    }
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // No sign when the value rounds to zero.
    let neg = n < 0.0 && s.bytes().any(|b| (b'1'..=b'9').contains(&b));
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Used for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
