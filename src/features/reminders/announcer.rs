//! Queued announcements
//!
//! Background activities never speak directly; they enqueue text and a single
//! delivery task renders it, so announcements never interleave mid-sentence.

use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::features::speech::SpeechOutput;

#[derive(Clone)]
pub struct Announcer {
    sender: mpsc::UnboundedSender<String>,
}

impl Announcer {
    /// Spawn the delivery task rendering through `output`
    pub fn spawn(output: Arc<dyn SpeechOutput>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::deliver(output, receiver));
        Announcer { sender }
    }

    /// Announcer whose queue is read by the caller
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Announcer { sender }, receiver)
    }

    /// Queue text for delivery (non-blocking)
    pub fn announce(&self, text: impl Into<String>) {
        if let Err(e) = self.sender.send(text.into()) {
            warn!("Failed to queue announcement: {e}");
        }
    }

    async fn deliver(output: Arc<dyn SpeechOutput>, mut receiver: mpsc::UnboundedReceiver<String>) {
        while let Some(text) = receiver.recv().await {
            output.render(&text).await;
        }
        debug!("Announcement queue closed");
    }
}
