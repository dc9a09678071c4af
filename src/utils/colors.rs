/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for blank values, plain otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Calendar cell colour: highlighted when the day has events, bold cyan for today.
pub fn color_for_day(has_events: bool, is_today: bool) -> &'static str {
    match (has_events, is_today) {
        (_, true) => CYAN,
        (true, false) => GREEN,
        (false, false) => RESET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_grey() {
        assert_eq!(colorize_optional("--"), format!("{GREY}--{RESET}"));
        assert_eq!(colorize_optional("text"), "text");
    }

    #[test]
    fn today_wins_over_event_marker() {
        assert_eq!(color_for_day(true, true), CYAN);
        assert_eq!(color_for_day(true, false), GREEN);
        assert_eq!(color_for_day(false, false), RESET);
    }
}
