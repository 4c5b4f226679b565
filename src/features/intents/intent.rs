//! Intent values produced by the classifier
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: ReminderTime distinguishes a malformed time from a missing one
//! - 1.0.0: Initial intent set

use std::fmt;

/// Applications and websites the assistant can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppId {
    Chrome,
    YouTube,
    WhatsApp,
    Settings,
    VsCode,
    Calculator,
    TaskManager,
    CommandPrompt,
    ControlPanel,
}

impl AppId {
    /// Name used in spoken confirmations and failure notices
    pub fn display_name(&self) -> &'static str {
        match self {
            AppId::Chrome => "Chrome",
            AppId::YouTube => "YouTube",
            AppId::WhatsApp => "WhatsApp Web",
            AppId::Settings => "Settings",
            AppId::VsCode => "VS Code",
            AppId::Calculator => "Calculator",
            AppId::TaskManager => "Task Manager",
            AppId::CommandPrompt => "Command Prompt",
            AppId::ControlPanel => "Control Panel",
        }
    }
}

/// Power and session controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Shutdown,
    Restart,
    Abort,
    Lock,
    Sleep,
    LogOff,
}

/// Delay applied to scheduled shutdowns and restarts
pub const POWER_DELAY_SECONDS: u64 = 60;

/// Time portion of a "remind me to" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderTime {
    /// Valid 24-hour `HH:MM`
    At(String),
    /// No " at " clause was given
    Unspecified,
    /// An " at " clause was given but its token is not `HH:MM`
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub text: String,
    pub time: ReminderTime,
}

impl ReminderRequest {
    /// Time to store with the reminder; malformed times are dropped
    pub fn fire_time(&self) -> Option<String> {
        match &self.time {
            ReminderTime::At(hhmm) => Some(hhmm.clone()),
            _ => None,
        }
    }
}

/// Structured meaning of one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Exit,
    QueryTime,
    QueryDate,
    IndependenceDayInfo,
    /// Key into the offline knowledge base
    KnowledgeLookup(String),
    WeatherQuery,
    OpenApp(AppId, Option<String>),
    SystemControl(SystemCommand, u64),
    PlayMusic,
    CreateApplicationTemplate,
    WriteFreeText,
    SetReminder(ReminderRequest),
    QueryIdentity,
    SetIdentity(String),
    EncyclopediaLookup(String),
    Unresolved,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Exit => write!(f, "exit"),
            Intent::QueryTime => write!(f, "query_time"),
            Intent::QueryDate => write!(f, "query_date"),
            Intent::IndependenceDayInfo => write!(f, "independence_day"),
            Intent::KnowledgeLookup(topic) => write!(f, "knowledge({topic})"),
            Intent::WeatherQuery => write!(f, "weather"),
            Intent::OpenApp(app, _) => write!(f, "open_app({app:?})"),
            Intent::SystemControl(cmd, delay) => write!(f, "system({cmd:?}, {delay}s)"),
            Intent::PlayMusic => write!(f, "play_music"),
            Intent::CreateApplicationTemplate => write!(f, "create_application"),
            Intent::WriteFreeText => write!(f, "write_text"),
            Intent::SetReminder(_) => write!(f, "set_reminder"),
            Intent::QueryIdentity => write!(f, "query_identity"),
            Intent::SetIdentity(_) => write!(f, "set_identity"),
            Intent::EncyclopediaLookup(_) => write!(f, "encyclopedia"),
            Intent::Unresolved => write!(f, "unresolved"),
        }
    }
}
