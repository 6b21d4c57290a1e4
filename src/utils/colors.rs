/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Parse `#RRGGBB` into its components.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Normalize a user supplied color to upper-case `#RRGGBB`.
pub fn normalize_hex_color(s: &str) -> Option<String> {
    let s = s.trim();
    let s = if s.starts_with('#') {
        s.to_string()
    } else {
        format!("#{s}")
    };
    parse_hex_color(&s).map(|_| s.to_uppercase())
}

/// Returns GREY when the field is empty (None or "" or "--"),
/// and RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() && v.as_ref() != "--" => RESET,
        _ => GREY,
    }
}

/// Grey out zero durations, keep the others as they are.
pub fn colorize_duration(value: &str) -> String {
    if value.trim() == "0h 0m 0s" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
