/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Maximum in red, minimum in blue.
pub fn colorize_max(value: &str) -> String {
    format!("{RED}{value}{RESET}")
}

pub fn colorize_min(value: &str) -> String {
    format!("{BLUE}{value}{RESET}")
}

/// Grey placeholder for a value that is not available.
pub fn missing() -> String {
    format!("{GREY}--{RESET}")
}
