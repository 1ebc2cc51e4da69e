//! Terminal styling for verdict output

/// ANSI color codes
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

use colors::*;
use snippet_guard::Status;

pub fn style_dim(s: &str) -> String {
    format!("{}{}{}", DIM, s, RESET)
}

pub fn style_cyan(s: &str) -> String {
    format!("{}{}{}", CYAN, s, RESET)
}

pub fn icon_success() -> String {
    format!("{}✓{}", GREEN, RESET)
}

pub fn icon_error() -> String {
    format!("{}✗{}", RED, RESET)
}

pub fn icon_warning() -> String {
    format!("{}⚠{}", YELLOW, RESET)
}

pub fn icon_bullet() -> String {
    format!("{}•{}", GRAY, RESET)
}

pub fn status_color(status: Status) -> &'static str {
    match status {
        Status::Pass => GREEN,
        Status::Review => YELLOW,
        Status::Fail => RED,
    }
}

pub fn status_icon(status: Status) -> String {
    match status {
        Status::Pass => icon_success(),
        Status::Review => icon_warning(),
        Status::Fail => icon_error(),
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}{}{}", icon_error(), RED, msg, RESET);
}

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}{} {} {}{}",
        BOLD,
        CYAN,
        title,
        "─".repeat(50usize.saturating_sub(title.chars().count())),
        RESET
    );
    println!();
}

pub fn print_section(title: &str) {
    println!();
    println!("  {}{}{}", BOLD, title, RESET);
    println!("  {}", style_dim(&"─".repeat(40)));
}

pub fn print_key_value(key: &str, value: &str) {
    println!("  {}{}:{} {}", GRAY, key, RESET, value);
}

pub fn print_key_value_colored(key: &str, value: &str, color: &str) {
    println!("  {}{}:{} {}{}{}", GRAY, key, RESET, color, value, RESET);
}

/// Bar for a value in [0, 1], colored by status
pub fn similarity_bar(similarity: f64, status: Status, width: usize) -> String {
    let filled = ((similarity.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let empty = width - filled.min(width);

    format!(
        "{}{}{}{}{}",
        status_color(status),
        "█".repeat(filled.min(width)),
        GRAY,
        "░".repeat(empty),
        RESET
    )
}
