//! # Feature: Conversational Fallback
//!
//! Last-resort replies for utterances no rule or lookup could answer. The
//! dispatcher behaves the same with [`NoFallback`] as with any other
//! responder, apart from the text it speaks.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: true

use async_trait::async_trait;

#[async_trait]
pub trait FallbackResponder: Send + Sync {
    async fn respond(&self, text: &str) -> Option<String>;
}

/// Never answers
pub struct NoFallback;

#[async_trait]
impl FallbackResponder for NoFallback {
    async fn respond(&self, _text: &str) -> Option<String> {
        None
    }
}

/// (phrase, reply) pairs; first phrase contained in the text wins
const SMALL_TALK: &[(&str, &str)] = &[
    ("how are you", "I'm doing well, thank you for asking."),
    ("what is your name", "I am Jarvis, your personal assistant."),
    ("what's your name", "I am Jarvis, your personal assistant."),
    ("who are you", "I am Jarvis, your personal assistant."),
    ("who created you", "I was built by my developer as a personal assistant project."),
    ("who made you", "I was built by my developer as a personal assistant project."),
    ("thank you", "You're welcome."),
    ("thanks", "You're welcome."),
    ("good morning", "Good morning! How can I help?"),
    ("good night", "Good night! Sleep well."),
    ("hello", "Hello! How can I help you?"),
    ("hi", "Hi there! How can I help you?"),
];

/// Canned small talk
#[derive(Default)]
pub struct CannedResponder;

impl CannedResponder {
    fn reply_for(text: &str) -> Option<&'static str> {
        let words: Vec<&str> = text.split_whitespace().collect();
        SMALL_TALK
            .iter()
            .find(|(phrase, _)| {
                if phrase.contains(' ') {
                    text.contains(phrase)
                } else {
                    // single words must match whole words ("hi" is not in "this")
                    words.iter().any(|w| w.trim_matches(|c: char| !c.is_alphanumeric()) == *phrase)
                }
            })
            .map(|(_, reply)| *reply)
    }
}

#[async_trait]
impl FallbackResponder for CannedResponder {
    async fn respond(&self, text: &str) -> Option<String> {
        Self::reply_for(&text.to_lowercase()).map(|r| r.to_string())
    }
}
