//! "remind me to …" parsing
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use regex::Regex;
use std::sync::OnceLock;

use super::intent::{ReminderRequest, ReminderTime};

/// Phrase that introduces a reminder
pub const REMINDER_PREFIX: &str = "remind me to";

fn hhmm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid HH:MM pattern"))
}

/// Strict 24-hour `HH:MM` with both fields zero-padded
pub fn is_valid_hhmm(token: &str) -> bool {
    hhmm_pattern().is_match(token)
}

/// Parse the text after "remind me to"
///
/// The time is whatever follows the last " at ". A time that is not valid
/// `HH:MM` does not reject the request; the whole phrase is kept as a
/// timeless reminder instead.
pub fn parse_reminder(text: &str) -> ReminderRequest {
    let after = text
        .split_once(REMINDER_PREFIX)
        .map(|(_, rest)| rest)
        .unwrap_or(text)
        .trim();

    match after.rsplit_once(" at ") {
        Some((body, token)) => {
            let token = token.trim();
            if is_valid_hhmm(token) {
                ReminderRequest {
                    text: body.trim().to_string(),
                    time: ReminderTime::At(token.to_string()),
                }
            } else {
                ReminderRequest {
                    text: after.to_string(),
                    time: ReminderTime::Malformed(token.to_string()),
                }
            }
        }
        None => ReminderRequest {
            text: after.to_string(),
            time: ReminderTime::Unspecified,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_time() {
        let req = parse_reminder("remind me to call sam at 18:00");
        assert_eq!(req.text, "call sam");
        assert_eq!(req.time, ReminderTime::At("18:00".to_string()));
        assert_eq!(req.fire_time().as_deref(), Some("18:00"));
    }

    #[test]
    fn test_invalid_time_degrades_to_whole_phrase() {
        let req = parse_reminder("remind me to buy milk at 9pm");
        assert_eq!(req.text, "buy milk at 9pm");
        assert_eq!(req.time, ReminderTime::Malformed("9pm".to_string()));
        assert_eq!(req.fire_time(), None);
    }

    #[test]
    fn test_splits_on_last_at() {
        let req = parse_reminder("remind me to look at the oven at 07:45");
        assert_eq!(req.text, "look at the oven");
        assert_eq!(req.time, ReminderTime::At("07:45".to_string()));
    }

    #[test]
    fn test_no_time() {
        let req = parse_reminder("remind me to water the plants");
        assert_eq!(req.text, "water the plants");
        assert_eq!(req.time, ReminderTime::Unspecified);
    }

    #[test]
    fn test_prefix_mid_sentence() {
        let req = parse_reminder("please remind me to stretch at 10:30");
        assert_eq!(req.text, "stretch");
        assert_eq!(req.time, ReminderTime::At("10:30".to_string()));
    }

    #[test]
    fn test_strict_hhmm() {
        assert!(is_valid_hhmm("00:00"));
        assert!(is_valid_hhmm("23:59"));
        assert!(!is_valid_hhmm("24:00"));
        assert!(!is_valid_hhmm("9:05"));
        assert!(!is_valid_hhmm("12:60"));
        assert!(!is_valid_hhmm("18:00pm"));
        assert!(!is_valid_hhmm(""));
    }
}
