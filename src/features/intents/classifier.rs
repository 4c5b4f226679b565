use std::sync::Arc;

use log::debug;

use super::intent::Intent;
use super::knowledge::KnowledgeBase;
use super::rules::{default_rules, Rule};

/// Trim and case-fold raw input before classification
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ordered rule chain; the first matching rule decides the intent
pub struct IntentClassifier {
    rules: Vec<Rule>,
    knowledge: Arc<KnowledgeBase>,
}

impl IntentClassifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        IntentClassifier {
            rules: default_rules(),
            knowledge,
        }
    }

    /// Classifier with no rules; everything is `Unresolved` until rules are registered
    pub fn empty(knowledge: Arc<KnowledgeBase>) -> Self {
        IntentClassifier {
            rules: Vec::new(),
            knowledge,
        }
    }

    /// Append a rule at the lowest precedence
    pub fn register(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn classify(&self, text: &str) -> Intent {
        match self.rules.iter().find(|r| r.matches(text)) {
            Some(rule) => {
                let intent = rule.build(text, &self.knowledge);
                debug!("Rule '{}' matched: {}", rule.name, intent);
                intent
            }
            None => Intent::Unresolved,
        }
    }

    /// Name of the rule that would decide this text
    pub fn matching_rule(&self, text: &str) -> Option<&'static str> {
        self.rules.iter().find(|r| r.matches(text)).map(|r| r.name)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::intents::intent::{AppId, ReminderTime, SystemCommand};

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(Arc::new(KnowledgeBase::builtin()))
    }

    fn classify(raw: &str) -> Intent {
        classifier().classify(&normalize(raw))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  What Time Is It \n"), "what time is it");
    }

    #[test]
    fn test_exit_beats_everything() {
        for text in ["exit", "quit now", "bye jarvis", "goodbye", "what time is it, bye"] {
            assert_eq!(classify(text), Intent::Exit, "{text}");
        }
    }

    #[test]
    fn test_time_queries() {
        for text in ["what time is it", "time", "tell me the time", "What is the TIME"] {
            assert_eq!(classify(text), Intent::QueryTime, "{text}");
        }
        assert_ne!(classify("i have no time"), Intent::QueryTime);
    }

    #[test]
    fn test_day_substring_shadows_independence_day() {
        assert_eq!(classify("what date is today"), Intent::QueryDate);
        assert_eq!(classify("tell me about independence day"), Intent::QueryDate);
        assert_eq!(classify("14 august"), Intent::IndependenceDayInfo);
    }

    #[test]
    fn test_knowledge_topics() {
        assert_eq!(
            classify("capital of pakistan"),
            Intent::KnowledgeLookup("capital".to_string())
        );
        assert_eq!(
            classify("who founded pakistan"),
            Intent::KnowledgeLookup("founder".to_string())
        );
        assert_eq!(classify("k2"), Intent::KnowledgeLookup("k2".to_string()));
        assert_eq!(
            classify("pakistan"),
            Intent::KnowledgeLookup("history".to_string())
        );
    }

    #[test]
    fn test_weather() {
        assert_eq!(classify("how is the weather"), Intent::WeatherQuery);
    }

    #[test]
    fn test_apps() {
        assert_eq!(classify("open chrome"), Intent::OpenApp(AppId::Chrome, None));
        assert_eq!(classify("chrome"), Intent::OpenApp(AppId::Chrome, None));
        assert_eq!(
            classify("open youtube for lofi beats"),
            Intent::OpenApp(AppId::YouTube, Some("lofi beats".to_string()))
        );
        assert_eq!(classify("open youtube"), Intent::OpenApp(AppId::YouTube, None));
        assert_eq!(classify("open vs code"), Intent::OpenApp(AppId::VsCode, None));
        assert_eq!(classify("cmd"), Intent::OpenApp(AppId::CommandPrompt, None));
        assert_eq!(
            classify("open task manager"),
            Intent::OpenApp(AppId::TaskManager, None)
        );
    }

    #[test]
    fn test_bare_app_words_are_broad() {
        assert_eq!(
            classify("i hate my calculator"),
            Intent::OpenApp(AppId::Calculator, None)
        );
        assert_eq!(
            classify("change the settings please"),
            Intent::OpenApp(AppId::Settings, None)
        );
    }

    #[test]
    fn test_system_controls() {
        assert_eq!(
            classify("shutdown"),
            Intent::SystemControl(SystemCommand::Shutdown, 60)
        );
        assert_eq!(
            classify("abort shutdown"),
            Intent::SystemControl(SystemCommand::Abort, 0)
        );
        assert_eq!(
            classify("cancel shutdown"),
            Intent::SystemControl(SystemCommand::Abort, 0)
        );
        assert_eq!(
            classify("restart"),
            Intent::SystemControl(SystemCommand::Restart, 60)
        );
        // restart is checked first
        assert_eq!(
            classify("abort restart"),
            Intent::SystemControl(SystemCommand::Restart, 60)
        );
        assert_eq!(classify("lock"), Intent::SystemControl(SystemCommand::Lock, 0));
        assert_eq!(classify("lock workstation"), Intent::Unresolved);
        assert_eq!(classify("sleep"), Intent::SystemControl(SystemCommand::Sleep, 0));
        assert_eq!(
            classify("log off"),
            Intent::SystemControl(SystemCommand::LogOff, 0)
        );
    }

    #[test]
    fn test_music() {
        assert_eq!(classify("play music"), Intent::PlayMusic);
        assert_eq!(classify("music"), Intent::PlayMusic);
    }

    #[test]
    fn test_two_phase_intents() {
        assert_eq!(
            classify("write application"),
            Intent::CreateApplicationTemplate
        );
        assert_eq!(
            classify("please write me an application"),
            Intent::CreateApplicationTemplate
        );
        assert_eq!(classify("write a note"), Intent::WriteFreeText);
        assert_eq!(classify("write letter"), Intent::WriteFreeText);
    }

    #[test]
    fn test_reminders() {
        match classify("remind me to call sam at 18:00") {
            Intent::SetReminder(req) => {
                assert_eq!(req.text, "call sam");
                assert_eq!(req.time, ReminderTime::At("18:00".to_string()));
            }
            other => panic!("unexpected intent {other}"),
        }
        match classify("remind me to buy milk at 9pm") {
            Intent::SetReminder(req) => {
                assert_eq!(req.text, "buy milk at 9pm");
                assert_eq!(req.fire_time(), None);
            }
            other => panic!("unexpected intent {other}"),
        }
    }

    #[test]
    fn test_identity() {
        assert_eq!(classify("what is my name"), Intent::QueryIdentity);
        assert_eq!(classify("what's my name"), Intent::QueryIdentity);
        assert_eq!(
            classify("My name is Ali"),
            Intent::SetIdentity("ali".to_string())
        );
    }

    #[test]
    fn test_encyclopedia() {
        assert_eq!(
            classify("who is alan turing"),
            Intent::EncyclopediaLookup("alan turing".to_string())
        );
        assert_eq!(
            classify("explain photosynthesis"),
            Intent::EncyclopediaLookup("photosynthesis".to_string())
        );
    }

    #[test]
    fn test_unresolved() {
        assert_eq!(classify("banana"), Intent::Unresolved);
        assert_eq!(classifier().matching_rule("banana"), None);
    }

    #[test]
    fn test_matching_rule_reports_winner() {
        let c = classifier();
        assert_eq!(c.matching_rule("abort restart"), Some("restart"));
        assert_eq!(c.matching_rule("open whatsapp"), Some("open_whatsapp"));
        assert_eq!(c.matching_rule("whatsapp"), Some("whatsapp_word"));
        assert_eq!(c.rule_names().first(), Some(&"exit"));
        assert_eq!(c.rule_names().last(), Some(&"encyclopedia"));
    }

    #[test]
    fn test_registered_rule_has_lowest_precedence() {
        let mut c = IntentClassifier::empty(Arc::new(KnowledgeBase::builtin()));
        assert_eq!(c.classify("anything"), Intent::Unresolved);
        c.register(Rule::new("catch_all", |_| true, |_, _| Intent::PlayMusic));
        c.register(Rule::new("never", |_| true, |_, _| Intent::Exit));
        assert_eq!(c.classify("anything"), Intent::PlayMusic);
    }
}
