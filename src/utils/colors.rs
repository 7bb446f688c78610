/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for finished tasks, plain otherwise.
pub fn color_for_task(is_completed: bool) -> &'static str {
    if is_completed { GREY } else { RESET }
}

/// Tint for an epoch kind label (`ALL`, `DATE`, `WEEK`).
pub fn color_for_kind(kind: &str) -> &'static str {
    match kind {
        "DATE" => GREEN,
        "WEEK" => CYAN,
        "ALL" => YELLOW,
        _ => RESET,
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
