//! Speech-to-text adapters
//!
//! The recognizer is an external command that records one phrase and prints
//! the transcript on stdout. Anything that fails is reported as an error and
//! the caller falls back to typed input.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Listen window passed to the command via `JARVIS_LISTEN_SECONDS`
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::shell_invocation;

/// Extra time given to the command beyond the listen window to finish transcribing
const TRANSCRIBE_GRACE: Duration = Duration::from_secs(5);

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Capture one phrase; an empty string means nothing was heard
    async fn listen(&self, window: Duration) -> Result<String>;
}

/// Used when no speech-to-text command is configured
pub struct DisabledRecognizer;

#[async_trait]
impl SpeechRecognizer for DisabledRecognizer {
    async fn listen(&self, _window: Duration) -> Result<String> {
        Ok(String::new())
    }
}

/// Runs a shell command such as `whisper-listen --model base`
#[derive(Clone)]
pub struct CommandRecognizer {
    command: String,
}

impl CommandRecognizer {
    pub fn new(command: impl Into<String>) -> Self {
        CommandRecognizer {
            command: command.into(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn listen(&self, window: Duration) -> Result<String> {
        debug!("Listening via '{}' for {:?}", self.command, window);

        let (program, args) = shell_invocation(&self.command, None);
        let mut cmd = Command::new(program);
        cmd.args(args)
            .env("JARVIS_LISTEN_SECONDS", window.as_secs().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match timeout(window + TRANSCRIBE_GRACE, cmd.output()).await {
            Ok(Ok(output)) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).trim().to_lowercase();
                if !text.is_empty() {
                    info!("You: {text}");
                }
                Ok(text)
            }
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    "Speech command exited with {:?}: {}",
                    output.status.code(),
                    stderr.trim()
                );
                Err(anyhow::anyhow!("Speech command failed: {}", stderr.trim()))
            }
            Ok(Err(e)) => Err(anyhow::anyhow!("Failed to start speech command: {}", e)),
            Err(_) => Err(anyhow::anyhow!(
                "Speech command timed out after {:?}",
                window + TRANSCRIBE_GRACE
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_recognizer_hears_nothing() {
        let text = DisabledRecognizer.listen(Duration::from_secs(1)).await.unwrap();
        assert!(text.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_transcript_is_trimmed_and_lowercased() {
        let recognizer = CommandRecognizer::new("echo '  What Time Is It  '");
        let text = recognizer.listen(Duration::from_secs(2)).await.unwrap();
        assert_eq!(text, "what time is it");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_sees_listen_window() {
        let recognizer = CommandRecognizer::new("echo $JARVIS_LISTEN_SECONDS");
        let text = recognizer.listen(Duration::from_secs(7)).await.unwrap();
        assert_eq!(text, "7");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_an_error() {
        let recognizer = CommandRecognizer::new("echo broken >&2; exit 3");
        let err = recognizer.listen(Duration::from_secs(1)).await.unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
