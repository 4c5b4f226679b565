//! Interaction state machine
//!
//! One [`Session::step`] is one acquisition round. A two-phase intent moves
//! the session to `AwaitingFollowUp`, and the very next round (whatever it
//! yields) completes it and returns to `AwaitingIntent`.

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{DispatchResult, FollowUpKind, GOODBYE, MISSED_COMMAND};
use crate::features::dispatch::Dispatcher;
use crate::features::intents::{normalize, IntentClassifier};
use crate::features::speech::{Acquired, InputAcquirer, SpeechOutput};

pub const COMMAND_PROMPT: &str = "Please say your command.";
const TYPED_COMMAND_LABEL: &str = "Type command (or press Enter to skip): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingIntent,
    AwaitingFollowUp(FollowUpKind),
}

/// Whether the loop should keep going after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop,
}

/// Acquisition windows for commands and for dictation
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub listen: Duration,
    pub dictation: Duration,
}

pub struct Session {
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    acquirer: InputAcquirer,
    output: Arc<dyn SpeechOutput>,
    timeouts: Timeouts,
    state: SessionState,
}

impl Session {
    pub fn new(
        classifier: IntentClassifier,
        dispatcher: Dispatcher,
        acquirer: InputAcquirer,
        output: Arc<dyn SpeechOutput>,
        timeouts: Timeouts,
    ) -> Self {
        Session {
            classifier,
            dispatcher,
            acquirer,
            output,
            timeouts,
            state: SessionState::AwaitingIntent,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Prompt, acquire one input and act on it
    pub async fn step(&mut self) -> Step {
        let (window, missed, label) = match self.state {
            SessionState::AwaitingIntent => {
                self.output.render(COMMAND_PROMPT).await;
                (self.timeouts.listen, MISSED_COMMAND, TYPED_COMMAND_LABEL)
            }
            SessionState::AwaitingFollowUp(kind) => {
                let window = match kind {
                    FollowUpKind::FreeText => self.timeouts.dictation,
                    FollowUpKind::ApplicationTitle => self.timeouts.listen,
                };
                (window, kind.missed(), kind.typed_label())
            }
        };

        let acquired = match self.acquirer.listen(window).await {
            Some(text) => Acquired::Text(text),
            None => {
                self.output.render(missed).await;
                self.acquirer.read_typed(label).await
            }
        };
        self.handle(acquired).await
    }

    /// Apply one acquisition result to the current state
    pub async fn handle(&mut self, acquired: Acquired) -> Step {
        if acquired == Acquired::Closed {
            info!("Input closed, ending session");
            return Step::Stop;
        }

        match self.state {
            SessionState::AwaitingIntent => match acquired {
                Acquired::Text(raw) => self.handle_command(&raw).await,
                _ => Step::Continue,
            },
            SessionState::AwaitingFollowUp(kind) => {
                let text = match acquired {
                    Acquired::Text(text) => Some(text),
                    _ => None,
                };
                let result = self.dispatcher.complete_follow_up(kind, text).await;
                self.state = SessionState::AwaitingIntent;
                self.render(result).await
            }
        }
    }

    async fn handle_command(&mut self, raw: &str) -> Step {
        let text = normalize(raw);
        if text.is_empty() {
            return Step::Continue;
        }

        let intent = self.classifier.classify(&text);
        debug!("'{text}' classified as {intent}");
        let result = self.dispatcher.dispatch(&text, intent).await;
        self.render(result).await
    }

    async fn render(&mut self, result: DispatchResult) -> Step {
        match result {
            DispatchResult::Speak(text) => {
                self.output.render(&text).await;
                Step::Continue
            }
            DispatchResult::PromptForFollowUp(kind) => {
                self.output.render(kind.prompt()).await;
                self.state = SessionState::AwaitingFollowUp(kind);
                Step::Continue
            }
            DispatchResult::Terminate => {
                self.output.render(GOODBYE).await;
                Step::Stop
            }
        }
    }
}
