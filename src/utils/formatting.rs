//! Formatting utilities used for CLI output.

use regex::Regex;
use std::sync::OnceLock;

use crate::utils::colors::{GREEN, GREY, RESET};

pub fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));
    re.replace_all(s, "").into_owned()
}

/// Cost cell: the number, or a grey dash when unset.
pub fn format_cost(cost: Option<i32>) -> String {
    match cost {
        Some(c) => c.to_string(),
        None => format!("{GREY}-{RESET}"),
    }
}

pub fn format_done(is_completed: bool) -> String {
    if is_completed {
        format!("{GREEN}[x]{RESET}")
    } else {
        "[ ]".to_string()
    }
}

/// Recurrence cell, e.g. `every 2w`.
pub fn format_every(every_n_weeks: Option<u32>) -> String {
    match every_n_weeks {
        Some(1) => "weekly".to_string(),
        Some(n) => format!("every {}w", n),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(strip_ansi(&format_cost(None)), "-");
        assert_eq!(format_cost(Some(5)), "5");
        assert_eq!(strip_ansi(&format_done(true)), "[x]");
        assert_eq!(format_every(Some(1)), "weekly");
        assert_eq!(format_every(Some(3)), "every 3w");
    }
}
