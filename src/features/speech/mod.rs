//! # Feature: Speech I/O
//!
//! Speech recognition through an external command, typed fallback input and
//! spoken/printed output.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true (recognizer and TTS are disabled without a command)
//!
//! ## Changelog
//! - 1.2.0: Speech commands run through `cmd /C` on Windows
//! - 1.1.0: Bounded acquisition shared by every prompt
//! - 1.0.0: Initial release

pub mod input;
pub mod recognizer;
pub mod voice;

pub use input::{Acquired, ConsoleInput, InputAcquirer, TypedInput};
pub use recognizer::{CommandRecognizer, DisabledRecognizer, SpeechRecognizer};
pub use voice::{ConsoleVoice, SpeechOutput};

use std::sync::Arc;

/// Recognizer for an optional configured command
pub fn recognizer_from(command: Option<&str>) -> Arc<dyn SpeechRecognizer> {
    match command {
        Some(cmd) => Arc::new(CommandRecognizer::new(cmd)),
        None => Arc::new(DisabledRecognizer),
    }
}

/// Program and arguments running `command` through the platform shell,
/// with `text` (if any) appended as its final argument
#[cfg(not(windows))]
pub fn shell_invocation(command: &str, text: Option<&str>) -> (String, Vec<String>) {
    let args = match text {
        Some(text) => vec![
            "-c".to_string(),
            format!("{command} \"$1\""),
            "jarvis-tts".to_string(),
            text.to_string(),
        ],
        None => vec!["-c".to_string(), command.to_string()],
    };
    ("sh".to_string(), args)
}

/// `cmd /C` joins its arguments back into one line, so the command goes
/// word by word and only the text is quoted
#[cfg(windows)]
pub fn shell_invocation(command: &str, text: Option<&str>) -> (String, Vec<String>) {
    let mut args = vec!["/C".to_string()];
    args.extend(command.split_whitespace().map(str::to_string));
    args.extend(text.map(str::to_string));
    ("cmd".to_string(), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_shell_invocation_uses_sh() {
        let (program, args) = shell_invocation("whisper-listen --model base", None);
        assert_eq!(program, "sh");
        assert_eq!(args, ["-c", "whisper-listen --model base"]);

        let (_, args) = shell_invocation("espeak", Some("it's 5 \"pm\""));
        assert_eq!(args, ["-c", "espeak \"$1\"", "jarvis-tts", "it's 5 \"pm\""]);
    }

    #[cfg(windows)]
    #[test]
    fn test_shell_invocation_uses_cmd() {
        let (program, args) = shell_invocation("balcon -n Zira -t", Some("hello there"));
        assert_eq!(program, "cmd");
        assert_eq!(args, ["/C", "balcon", "-n", "Zira", "-t", "hello there"]);

        let (_, args) = shell_invocation("listen.bat", None);
        assert_eq!(args, ["/C", "listen.bat"]);
    }
}
