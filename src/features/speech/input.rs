//! Bounded input acquisition
//!
//! Every prompt waits a bounded time on the recognizer, then degrades to a
//! typed line. No call site can block on the microphone forever.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Closed stdin reported separately so the loop can end cleanly
//! - 1.0.0: Initial release

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tokio::time::timeout;

use super::recognizer::SpeechRecognizer;

/// Slack on top of the listen window before the recognizer is abandoned
const LISTEN_GRACE: Duration = Duration::from_secs(5);

#[async_trait]
pub trait TypedInput: Send + Sync {
    /// One typed line, trimmed; `None` once input is closed
    async fn read_line(&self, prompt: &str) -> Option<String>;
}

/// Line reader over the process stdin
pub struct ConsoleInput {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleInput {
    pub fn new() -> Self {
        ConsoleInput {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TypedInput for ConsoleInput {
    async fn read_line(&self, prompt: &str) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(prompt.as_bytes()).await {
            debug!("Could not write prompt: {e}");
        }
        let _ = stdout.flush().await;

        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read typed input: {e}");
                None
            }
        }
    }
}

/// What one acquisition round produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquired {
    Text(String),
    /// Neither speech nor a typed line
    Nothing,
    /// Typed input is closed; no more input will arrive
    Closed,
}

#[derive(Clone)]
pub struct InputAcquirer {
    recognizer: Arc<dyn SpeechRecognizer>,
    typed: Arc<dyn TypedInput>,
}

impl InputAcquirer {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, typed: Arc<dyn TypedInput>) -> Self {
        InputAcquirer { recognizer, typed }
    }

    /// Listen for up to `window`, then fall back to a typed line labelled `label`
    pub async fn acquire(&self, window: Duration, label: &str) -> Acquired {
        match self.listen(window).await {
            Some(text) => Acquired::Text(text),
            None => self.read_typed(label).await,
        }
    }

    /// Recognized speech, or `None` when nothing usable was heard in time
    pub async fn listen(&self, window: Duration) -> Option<String> {
        match timeout(window + LISTEN_GRACE, self.recognizer.listen(window)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => return Some(text.trim().to_string()),
            Ok(Ok(_)) => debug!("Nothing heard"),
            Ok(Err(e)) => warn!("Speech recognition failed: {e:#}"),
            Err(_) => warn!("Speech recognition did not return within {window:?}"),
        }
        None
    }

    /// One typed line labelled `label`
    pub async fn read_typed(&self, label: &str) -> Acquired {
        match self.typed.read_line(label).await {
            Some(line) if !line.is_empty() => Acquired::Text(line),
            Some(_) => Acquired::Nothing,
            None => Acquired::Closed,
        }
    }
}
