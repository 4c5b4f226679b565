//! Built-in classification rules, in precedence order
//!
//! Many predicates are plain substring tests that can match the same
//! utterance, so the order of [`default_rules`] is the priority. Generic
//! single-word app matches ("settings", "calculator", "whatsapp") sit after
//! every specific "open …" phrase.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Specific app phrases evaluated before generic bare words
//! - 1.1.0: Founder/K2 knowledge aliases
//! - 1.0.0: Initial rule set

use super::intent::{AppId, Intent, SystemCommand, POWER_DELAY_SECONDS};
use super::knowledge::{mentions_pakistan, KnowledgeBase};
use super::reminder_parser::{parse_reminder, REMINDER_PREFIX};

pub type Predicate = fn(&str) -> bool;
pub type Builder = fn(&str, &KnowledgeBase) -> Intent;

/// One named predicate → intent pair
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    predicate: Predicate,
    build: Builder,
}

impl Rule {
    pub const fn new(name: &'static str, predicate: Predicate, build: Builder) -> Self {
        Rule {
            name,
            predicate,
            build,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        (self.predicate)(text)
    }

    pub fn build(&self, text: &str, knowledge: &KnowledgeBase) -> Intent {
        (self.build)(text, knowledge)
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];
const CANONICAL_TIME_QUERIES: &[&str] = &["time", "what time is it", "tell me the time"];
const QUESTION_WORDS: &[&str] = &[
    "who",
    "what",
    "when",
    "where",
    "why",
    "how",
    "tell me about",
    "define",
    "explain",
];
const QUESTION_PREFIXES: &[&str] = &[
    "tell me about",
    "who is",
    "what is",
    "what are",
    "define",
    "explain",
];

fn is_exit(t: &str) -> bool {
    contains_any(t, EXIT_WORDS)
}

// Either both words anywhere, or one of the canonical phrases verbatim.
fn is_time_query(t: &str) -> bool {
    (t.contains("time") && t.contains("what")) || CANONICAL_TIME_QUERIES.contains(&t.trim())
}

fn is_date_query(t: &str) -> bool {
    t.contains("date") || t.contains("day")
}

fn is_independence_day(t: &str) -> bool {
    contains_any(t, &["independence day", "14 august", "august 14"])
}

fn is_pakistan_topic(t: &str) -> bool {
    mentions_pakistan(t)
}

fn build_knowledge(t: &str, kb: &KnowledgeBase) -> Intent {
    Intent::KnowledgeLookup(kb.resolve_topic(t).to_string())
}

fn is_weather(t: &str) -> bool {
    t.contains("weather")
}

fn is_open_chrome(t: &str) -> bool {
    t.contains("open chrome") || t.trim() == "chrome"
}

fn is_open_youtube(t: &str) -> bool {
    t.contains("open youtube")
}

/// Search phrase after the word "for", e.g. "open youtube for cats"
fn build_youtube(t: &str, _: &KnowledgeBase) -> Intent {
    let query = t
        .split_once(" for ")
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|q| !q.is_empty());
    Intent::OpenApp(AppId::YouTube, query)
}

fn is_open_whatsapp(t: &str) -> bool {
    t.contains("open whatsapp")
}

fn is_open_settings(t: &str) -> bool {
    t.contains("open settings")
}

fn is_open_vscode(t: &str) -> bool {
    contains_any(t, &["open vscode", "open visual studio code", "vs code"])
}

fn is_open_calculator(t: &str) -> bool {
    t.contains("open calculator")
}

fn is_task_manager(t: &str) -> bool {
    t.contains("task manager")
}

fn is_command_prompt(t: &str) -> bool {
    t.contains("command prompt") || t.trim() == "cmd"
}

fn is_control_panel(t: &str) -> bool {
    t.contains("control panel")
}

// Broad: the word anywhere in the sentence opens the app.
fn mentions_whatsapp(t: &str) -> bool {
    t.contains("whatsapp")
}

fn mentions_settings(t: &str) -> bool {
    t.contains("settings")
}

fn mentions_calculator(t: &str) -> bool {
    t.contains("calculator")
}

fn is_shutdown(t: &str) -> bool {
    t.contains("shutdown") && !t.contains("abort") && !t.contains("cancel")
}

fn is_restart(t: &str) -> bool {
    t.contains("restart")
}

fn is_abort(t: &str) -> bool {
    contains_any(t, &["abort shutdown", "cancel shutdown", "abort restart"])
}

fn is_lock(t: &str) -> bool {
    t.contains("lock") && !t.contains("workstation")
}

fn is_sleep(t: &str) -> bool {
    t.contains("sleep")
}

fn is_log_off(t: &str) -> bool {
    contains_any(t, &["log off", "logoff"])
}

fn is_music(t: &str) -> bool {
    t.contains("play music") || t.trim() == "music"
}

fn is_write_application(t: &str) -> bool {
    contains_any(t, &["write application", "create application"])
        || (t.contains("write") && t.contains("application"))
}

fn is_write_text(t: &str) -> bool {
    contains_any(
        t,
        &["write note", "write a note", "write essay", "write letter"],
    )
}

fn is_reminder(t: &str) -> bool {
    t.contains(REMINDER_PREFIX)
}

fn is_identity_query(t: &str) -> bool {
    contains_any(t, &["what is my name", "what's my name"])
}

fn is_identity_statement(t: &str) -> bool {
    t.starts_with("my name is ")
}

fn build_identity(t: &str, _: &KnowledgeBase) -> Intent {
    let name = t.trim_start_matches("my name is").trim();
    Intent::SetIdentity(name.to_string())
}

fn is_question(t: &str) -> bool {
    contains_any(t, QUESTION_WORDS)
}

/// Strip question scaffolding so only the subject is looked up
pub fn encyclopedia_topic(t: &str) -> String {
    let mut topic = t.to_string();
    for prefix in QUESTION_PREFIXES {
        topic = topic.replace(prefix, "");
    }
    topic.trim().to_string()
}

fn build_encyclopedia(t: &str, _: &KnowledgeBase) -> Intent {
    Intent::EncyclopediaLookup(encyclopedia_topic(t))
}

fn app(id: AppId) -> Intent {
    Intent::OpenApp(id, None)
}

/// The full rule chain; `Unresolved` is implied after the last rule
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("exit", is_exit, |_, _| Intent::Exit),
        Rule::new("time", is_time_query, |_, _| Intent::QueryTime),
        Rule::new("date", is_date_query, |_, _| Intent::QueryDate),
        Rule::new("independence_day", is_independence_day, |_, _| {
            Intent::IndependenceDayInfo
        }),
        Rule::new("pakistan_knowledge", is_pakistan_topic, build_knowledge),
        Rule::new("weather", is_weather, |_, _| Intent::WeatherQuery),
        // Specific app phrases
        Rule::new("open_chrome", is_open_chrome, |_, _| app(AppId::Chrome)),
        Rule::new("open_youtube", is_open_youtube, build_youtube),
        Rule::new("open_whatsapp", is_open_whatsapp, |_, _| app(AppId::WhatsApp)),
        Rule::new("open_settings", is_open_settings, |_, _| app(AppId::Settings)),
        Rule::new("open_vscode", is_open_vscode, |_, _| app(AppId::VsCode)),
        Rule::new("open_calculator", is_open_calculator, |_, _| {
            app(AppId::Calculator)
        }),
        Rule::new("task_manager", is_task_manager, |_, _| app(AppId::TaskManager)),
        Rule::new("command_prompt", is_command_prompt, |_, _| {
            app(AppId::CommandPrompt)
        }),
        Rule::new("control_panel", is_control_panel, |_, _| {
            app(AppId::ControlPanel)
        }),
        // Generic bare words
        Rule::new("whatsapp_word", mentions_whatsapp, |_, _| app(AppId::WhatsApp)),
        Rule::new("settings_word", mentions_settings, |_, _| app(AppId::Settings)),
        Rule::new("calculator_word", mentions_calculator, |_, _| {
            app(AppId::Calculator)
        }),
        // System controls
        Rule::new("shutdown", is_shutdown, |_, _| {
            Intent::SystemControl(SystemCommand::Shutdown, POWER_DELAY_SECONDS)
        }),
        Rule::new("restart", is_restart, |_, _| {
            Intent::SystemControl(SystemCommand::Restart, POWER_DELAY_SECONDS)
        }),
        Rule::new("abort_shutdown", is_abort, |_, _| {
            Intent::SystemControl(SystemCommand::Abort, 0)
        }),
        Rule::new("lock", is_lock, |_, _| {
            Intent::SystemControl(SystemCommand::Lock, 0)
        }),
        Rule::new("sleep", is_sleep, |_, _| {
            Intent::SystemControl(SystemCommand::Sleep, 0)
        }),
        Rule::new("log_off", is_log_off, |_, _| {
            Intent::SystemControl(SystemCommand::LogOff, 0)
        }),
        Rule::new("music", is_music, |_, _| Intent::PlayMusic),
        // Two-phase content creation
        Rule::new("write_application", is_write_application, |_, _| {
            Intent::CreateApplicationTemplate
        }),
        Rule::new("write_text", is_write_text, |_, _| Intent::WriteFreeText),
        Rule::new("reminder", is_reminder, |t, _| {
            Intent::SetReminder(parse_reminder(t))
        }),
        Rule::new("identity_query", is_identity_query, |_, _| Intent::QueryIdentity),
        Rule::new("identity_set", is_identity_statement, build_identity),
        Rule::new("encyclopedia", is_question, build_encyclopedia),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<&str> = default_rules().iter().map(|r| r.name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total, "Duplicate rule names found");
    }

    #[test]
    fn test_specific_app_rules_precede_generic_words() {
        let rules = default_rules();
        let position = |name: &str| rules.iter().position(|r| r.name == name).unwrap();
        let last_specific = ["open_chrome", "open_youtube", "open_vscode", "control_panel"]
            .iter()
            .map(|n| position(n))
            .max()
            .unwrap();
        let first_generic = ["whatsapp_word", "settings_word", "calculator_word"]
            .iter()
            .map(|n| position(n))
            .min()
            .unwrap();
        assert!(last_specific < first_generic);
    }

    #[test]
    fn test_encyclopedia_topic_strips_prefixes() {
        assert_eq!(encyclopedia_topic("who is alan turing"), "alan turing");
        assert_eq!(encyclopedia_topic("tell me about black holes"), "black holes");
        assert_eq!(encyclopedia_topic("define"), "");
        assert_eq!(encyclopedia_topic("how do magnets work"), "how do magnets work");
    }
}
