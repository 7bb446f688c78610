use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Wire and URL date format.
pub const ISO_DATE: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn iso_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"))
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts `2024-4-9`; the wire format does not.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !iso_shape().is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, ISO_DATE).ok()
}

pub fn format_iso(d: NaiveDate) -> String {
    d.format(ISO_DATE).to_string()
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long form used for display, e.g. `April 29th, 2024`.
pub fn format_long(d: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        d.format("%B"),
        d.day(),
        ordinal_suffix(d.day()),
        d.year()
    )
}
