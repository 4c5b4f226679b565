//! Spoken output
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use log::{info, warn};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::shell_invocation;

/// Longest a single utterance may take to synthesize and play
const TTS_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Best-effort: failures are logged, never returned
    async fn render(&self, text: &str);
}

/// Prints every line and optionally speaks it through a TTS command
///
/// The TTS command receives the text as its last argument, e.g.
/// `espeak` or `say`.
#[derive(Clone, Default)]
pub struct ConsoleVoice {
    tts_command: Option<String>,
}

impl ConsoleVoice {
    pub fn new(tts_command: Option<String>) -> Self {
        ConsoleVoice { tts_command }
    }

    async fn speak_aloud(&self, command: &str, text: &str) {
        let (program, args) = shell_invocation(command, Some(text));
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match timeout(TTS_TIMEOUT, cmd.output()).await {
            Ok(Ok(output)) if output.status.success() => {}
            Ok(Ok(output)) => warn!(
                "TTS command failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Ok(Err(e)) => warn!("Could not start TTS command: {e}"),
            Err(_) => warn!("TTS command timed out after {TTS_TIMEOUT:?}"),
        }
    }
}

#[async_trait]
impl SpeechOutput for ConsoleVoice {
    async fn render(&self, text: &str) {
        if text.is_empty() {
            return;
        }

        println!("Jarvis: {text}");
        info!("Jarvis: {text}");

        if let Some(command) = &self.tts_command {
            self.speak_aloud(command, text).await;
        }
    }
}
