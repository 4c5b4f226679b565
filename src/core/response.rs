//! Dispatch results and spoken-text utilities
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: DispatchResult and FollowUpKind moved here from the dispatcher
//! - 1.0.0: Sentence trimming for encyclopedia summaries

/// Generic reply when nothing else could answer
pub const NOT_UNDERSTOOD: &str = "Sorry, I don't understand that yet. Try asking another way.";

/// Spoken when a command was not heard, before asking for typed input
pub const MISSED_COMMAND: &str = "I didn't catch that. Please type your command.";

/// Spoken when the session ends
pub const GOODBYE: &str = "Goodbye! Have a great day.";

/// The second round a two-phase intent is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpKind {
    /// Title of an application template to create
    ApplicationTitle,
    /// Body of a note, essay or letter to write out
    FreeText,
}

impl FollowUpKind {
    /// Question asked before the follow-up round
    pub fn prompt(&self) -> &'static str {
        match self {
            FollowUpKind::ApplicationTitle => "Please tell me the application title.",
            FollowUpKind::FreeText => "What should I write?",
        }
    }

    /// Label shown when falling back to typed input
    pub fn typed_label(&self) -> &'static str {
        match self {
            FollowUpKind::ApplicationTitle => "Application title: ",
            FollowUpKind::FreeText => "Text: ",
        }
    }

    /// Spoken when nothing was heard, before asking for typed input
    pub fn missed(&self) -> &'static str {
        match self {
            FollowUpKind::ApplicationTitle => {
                "I did not catch the title. Please type the application title."
            }
            FollowUpKind::FreeText => "I did not catch the text. Please type the text to write.",
        }
    }

    /// Spoken when the follow-up round yields nothing
    pub fn cancelled(&self) -> &'static str {
        match self {
            FollowUpKind::ApplicationTitle => "No title provided. Cancelled.",
            FollowUpKind::FreeText => "No text provided. Cancelled.",
        }
    }
}

/// Outcome of dispatching one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Speak(String),
    PromptForFollowUp(FollowUpKind),
    Terminate,
}

impl DispatchResult {
    pub fn speak(text: impl Into<String>) -> Self {
        DispatchResult::Speak(text.into())
    }

    /// Spoken text, if this result carries any
    pub fn text(&self) -> Option<&str> {
        match self {
            DispatchResult::Speak(text) => Some(text),
            _ => None,
        }
    }
}

/// Keep the first `count` sentences of a passage
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of the
/// text, so abbreviations like "U.S." inside a word are not split.
pub fn first_sentences(text: &str, count: usize) -> String {
    if count == 0 {
        return String::new();
    }

    let mut seen = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = match chars.peek() {
                Some((_, next)) => next.is_whitespace(),
                None => true,
            };
            if at_boundary {
                seen += 1;
                if seen == count {
                    return text[..idx + ch.len_utf8()].trim().to_string();
                }
            }
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentences_limits_count() {
        let text = "Rust is a language. It is fast. It is safe.";
        assert_eq!(first_sentences(text, 2), "Rust is a language. It is fast.");
        assert_eq!(first_sentences(text, 1), "Rust is a language.");
    }

    #[test]
    fn test_first_sentences_short_text_unchanged() {
        assert_eq!(first_sentences("Only one sentence", 2), "Only one sentence");
        assert_eq!(first_sentences("  Padded.  ", 3), "Padded.");
    }

    #[test]
    fn test_first_sentences_ignores_inner_periods() {
        let text = "The U.S. capital is Washington. It has a river.";
        assert_eq!(first_sentences(text, 1), "The U.S. capital is Washington.");
    }

    #[test]
    fn test_first_sentences_zero() {
        assert_eq!(first_sentences("Anything.", 0), "");
    }

    #[test]
    fn test_follow_up_messages() {
        assert!(FollowUpKind::ApplicationTitle.prompt().contains("title"));
        assert!(FollowUpKind::FreeText.cancelled().contains("Cancelled"));
        assert!(FollowUpKind::ApplicationTitle.missed().contains("type the application title"));
    }

    #[test]
    fn test_dispatch_result_text() {
        assert_eq!(DispatchResult::speak("hi").text(), Some("hi"));
        assert_eq!(DispatchResult::Terminate.text(), None);
    }
}
