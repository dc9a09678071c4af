//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Short human label for the remind flag, with its ANSI colour.
pub fn describe_remind(remind_me: bool) -> (&'static str, &'static str) {
    if remind_me {
        ("on", "\x1b[32m")
    } else {
        ("off", "\x1b[90m")
    }
}

/// Cut `s` to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
