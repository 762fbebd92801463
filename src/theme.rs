//! ANSI colour helpers for terminal output.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";
pub const BOLD_CYAN: &str = "\x1b[1;36m";
pub const BOLD_GREEN: &str = "\x1b[1;32m";

pub fn heading(text: &str) -> String {
    format!("{BOLD_CYAN}{text}{RESET}")
}

pub fn success(text: &str) -> String {
    format!("{BOLD_GREEN}✓{RESET} {text}")
}

pub fn failure(text: &str) -> String {
    format!("{RED}✗{RESET} {text}")
}

pub fn dim(text: &str) -> String {
    format!("{DIM}{text}{RESET}")
}

pub fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}
