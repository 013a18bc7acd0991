// Utility helpers for parsing, calendar labels and number formatting.
//
// The loader and report builder lean on these so that the rest of the code
// only ever sees typed values.
use chrono::{Month, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Markers that mean "no measurement" in exported weather tables.
const MISSING_MARKERS: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "none",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Header key used for column matching: surrounding whitespace and a UTF-8
/// BOM are dropped, case is folded.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// A cell that holds something other than a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotANumber;

/// Parse a numeric cell, tolerating surrounding whitespace, thousands
/// separators and scientific notation. Blank cells and missing-value markers
/// (`NA`, `NaN`, `null`, ...) are `Ok(None)`; anything else that fails to
/// parse, or parses to an infinity, is `Err(NotANumber)` so the caller can
/// decide how loud to be.
pub fn parse_f64_safe(s: &str) -> Result<Option<f64>, NotANumber> {
    let s = s.trim();
    if s.is_empty() || MISSING_MARKERS.contains(&s) {
        return Ok(None);
    }
    match s.replace(',', "").parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(NotANumber),
    }
}

/// Parse a calendar date. Plain dates and ISO date-times are accepted; the
/// time component is discarded.
pub fn parse_date_safe(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Full English month name for `1..=12`.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// Three-letter month abbreviation for `1..=12`.
pub fn month_abbr(month: u32) -> &'static str {
    let name = month_name(month);
    &name[..name.len().min(3)]
}

pub fn average(v: &[f64]) -> f64 {
    // Arithmetic mean; 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Fixed-decimal rendering without grouping, as used in tables and exports.
pub fn format_fixed(n: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, n)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators, e.g.
    // `1,234.5`. Only used for console metrics.
    let s = format_fixed(n.abs(), decimals);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if n.is_sign_negative() && s.chars().any(|c| c != '0' && c != '.') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages, e.g. `2,557 rows loaded`.
    n.to_formatted_string(&Locale::en)
}

/// Drop a trailing parenthetical qualifier: `"Wet (Above Average)"` → `"Wet"`.
pub fn strip_qualifier(label: &str) -> &str {
    match label.find(" (") {
        Some(idx) if label.ends_with(')') => &label[..idx],
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_fold_case_and_whitespace() {
        assert_eq!(normalize_header("  Precipitation_MM "), "precipitation_mm");
        assert_eq!(normalize_header("\u{feff}Date"), "date");
    }

    #[test]
    fn numbers_parse_forgivingly() {
        assert_eq!(parse_f64_safe(" 12.5 "), Ok(Some(12.5)));
        assert_eq!(parse_f64_safe("1,024.0"), Ok(Some(1024.0)));
        assert_eq!(parse_f64_safe(""), Ok(None));
        assert_eq!(parse_f64_safe("   "), Ok(None));
        assert_eq!(parse_f64_safe("1e-05"), Ok(Some(1e-5)));
        assert_eq!(parse_f64_safe("2.5E+02"), Ok(Some(250.0)));
        assert_eq!(parse_f64_safe("heavy"), Err(NotANumber));
        assert_eq!(parse_f64_safe("inf"), Err(NotANumber));
        assert_eq!(parse_f64_safe("1.2.3"), Err(NotANumber));
    }

    #[test]
    fn missing_markers_are_blank() {
        for marker in ["NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", " <NA> "] {
            assert_eq!(parse_f64_safe(marker), Ok(None), "{marker}");
        }
    }

    #[test]
    fn dates_accept_iso_variants() {
        let expected = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        assert_eq!(parse_date_safe("2020-06-01"), Some(expected));
        assert_eq!(parse_date_safe("2020/06/01"), Some(expected));
        assert_eq!(parse_date_safe("2020-06-01 08:30:00"), Some(expected));
        assert_eq!(parse_date_safe("2020-06-01T08:30:00"), Some(expected));
        assert_eq!(parse_date_safe("2020-06-01 08:30"), Some(expected));
        assert_eq!(parse_date_safe("2020/06/01 08:30"), Some(expected));
        assert_eq!(parse_date_safe("2020-02-30"), None);
        assert_eq!(parse_date_safe("yesterday"), None);
        assert_eq!(parse_date_safe(""), None);
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_abbr(9), "Sep");
        assert_eq!(month_name(13), "");
        assert_eq!(month_abbr(0), "");
    }

    #[test]
    fn formatting() {
        assert_eq!(format_fixed(50.0, 2), "50.00");
        assert_eq!(format_fixed(123.456, 2), "123.46");
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 1), "-1,500.0");
        assert_eq!(format_number(-0.01, 1), "0.0");
        assert_eq!(format_int(2557usize), "2,557");
    }

    #[test]
    fn qualifier_is_stripped() {
        assert_eq!(strip_qualifier("Wet (Above Average)"), "Wet");
        assert_eq!(strip_qualifier("Dry (Below Average)"), "Dry");
        assert_eq!(strip_qualifier("Normal"), "Normal");
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 3.0]), 2.0);
    }
}
