//! Intent execution
//!
//! Turns an [`Intent`] into a [`DispatchResult`], calling collaborators and
//! the profile store. Collaborator failures become spoken notices; nothing
//! here returns an error to the interaction loop.

use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{DispatchResult, FollowUpKind, NOT_UNDERSTOOD};
use crate::features::fallback::FallbackResponder;
use crate::features::intents::knowledge::DEFAULT_TOPIC;
use crate::features::intents::{
    normalize, AppId, Intent, KnowledgeBase, ReminderRequest, ReminderTime, SystemCommand,
};
use crate::features::lookup::{Encyclopedia, WeatherService};
use crate::features::profile::{ProfileStore, Reminder};
use crate::features::system::{ActionLauncher, DocumentWriter, MediaLibrary, SystemAction};

use super::templates::template_for_title;

/// Sentences kept from an encyclopedia summary
const SUMMARY_SENTENCES: usize = 2;
/// File that dictated free text is written to
pub const NOTE_FILENAME: &str = "jarvis_note.txt";

const INDEPENDENCE_DAY_INFO: &str =
    "Pakistan's Independence Day is on 14 August. Pakistan became independent on 14 August 1947.";

/// External capabilities the dispatcher acts through
#[derive(Clone)]
pub struct Collaborators {
    pub launcher: Arc<dyn ActionLauncher>,
    pub documents: Arc<dyn DocumentWriter>,
    pub media: Arc<dyn MediaLibrary>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
    /// `None` when weather is not configured
    pub weather: Option<Arc<dyn WeatherService>>,
    pub fallback: Arc<dyn FallbackResponder>,
}

pub struct Dispatcher {
    store: ProfileStore,
    knowledge: Arc<KnowledgeBase>,
    collaborators: Collaborators,
    editor_path: PathBuf,
    weather_city: String,
}

impl Dispatcher {
    pub fn new(
        store: ProfileStore,
        knowledge: Arc<KnowledgeBase>,
        collaborators: Collaborators,
        editor_path: impl Into<PathBuf>,
        weather_city: impl Into<String>,
    ) -> Self {
        Dispatcher {
            store,
            knowledge,
            collaborators,
            editor_path: editor_path.into(),
            weather_city: weather_city.into(),
        }
    }

    /// Execute one intent; `utterance` is the normalized text it came from
    pub async fn dispatch(&self, utterance: &str, intent: Intent) -> DispatchResult {
        self.dispatch_at(utterance, intent, Local::now().naive_local())
            .await
    }

    /// [`Self::dispatch`] against a fixed clock
    pub async fn dispatch_at(
        &self,
        utterance: &str,
        intent: Intent,
        now: NaiveDateTime,
    ) -> DispatchResult {
        debug!("Dispatching {intent}");
        match intent {
            Intent::Exit => DispatchResult::Terminate,
            Intent::QueryTime => {
                DispatchResult::Speak(format!("The time is {}", now.format("%I:%M %p")))
            }
            Intent::QueryDate => {
                DispatchResult::Speak(format!("Today is {}", now.format("%A, %d %B %Y")))
            }
            Intent::IndependenceDayInfo => DispatchResult::speak(INDEPENDENCE_DAY_INFO),
            Intent::KnowledgeLookup(topic) => DispatchResult::speak(self.knowledge_answer(&topic)),
            Intent::WeatherQuery => DispatchResult::Speak(self.weather().await),
            Intent::OpenApp(app, arg) => DispatchResult::Speak(self.open_app(app, arg).await),
            Intent::SystemControl(cmd, delay) => {
                DispatchResult::Speak(self.system_control(cmd, delay).await)
            }
            Intent::PlayMusic => DispatchResult::Speak(self.play_music().await),
            Intent::CreateApplicationTemplate => {
                DispatchResult::PromptForFollowUp(FollowUpKind::ApplicationTitle)
            }
            Intent::WriteFreeText => DispatchResult::PromptForFollowUp(FollowUpKind::FreeText),
            Intent::SetReminder(request) => DispatchResult::Speak(self.set_reminder(request).await),
            Intent::QueryIdentity => DispatchResult::Speak(match self.store.identity().await {
                Some(name) => format!("Your name is {name}."),
                None => "I don't know your name yet. Tell me 'my name is ...' to save it."
                    .to_string(),
            }),
            Intent::SetIdentity(name) => DispatchResult::Speak(self.set_identity(&name).await),
            Intent::EncyclopediaLookup(topic) => {
                if let Some(summary) = self
                    .collaborators
                    .encyclopedia
                    .lookup(&topic, SUMMARY_SENTENCES)
                    .await
                {
                    return DispatchResult::Speak(summary);
                }
                DispatchResult::Speak(self.fallback(utterance).await)
            }
            Intent::Unresolved => DispatchResult::Speak(self.fallback(utterance).await),
        }
    }

    /// Second round of a two-phase intent
    pub async fn complete_follow_up(
        &self,
        kind: FollowUpKind,
        text: Option<String>,
    ) -> DispatchResult {
        let Some(text) = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) else {
            return DispatchResult::speak(kind.cancelled());
        };

        let documents = &self.collaborators.documents;
        match kind {
            FollowUpKind::ApplicationTitle => {
                let template = template_for_title(&text, &self.editor_path);
                match documents
                    .write_and_open(&template.content, &template.filename)
                    .await
                {
                    Ok(path) => {
                        info!("Created application template {}", path.display());
                        DispatchResult::Speak(format!("Created application template for {text}."))
                    }
                    Err(e) => {
                        warn!("Application template failed: {e:#}");
                        DispatchResult::Speak(format!("Could not write the application: {e}"))
                    }
                }
            }
            FollowUpKind::FreeText => match documents.write_and_open(&text, NOTE_FILENAME).await {
                Ok(_) => DispatchResult::speak("Written and opened your note."),
                Err(e) => {
                    warn!("Writing note failed: {e:#}");
                    DispatchResult::Speak(format!("Could not write the note: {e}"))
                }
            },
        }
    }

    fn knowledge_answer(&self, topic: &str) -> &'static str {
        self.knowledge
            .fact(topic)
            .or_else(|| self.knowledge.fact(DEFAULT_TOPIC))
            .unwrap_or(NOT_UNDERSTOOD)
    }

    async fn weather(&self) -> String {
        let Some(service) = &self.collaborators.weather else {
            return "Weather is not configured. Set JARVIS_WEATHER_API_KEY to enable weather."
                .to_string();
        };

        match service.lookup(&self.weather_city).await {
            Ok(Some(report)) => report.describe(),
            Ok(None) => "Sorry, I couldn't fetch weather now.".to_string(),
            Err(e) => {
                warn!("Weather lookup failed: {e:#}");
                "Weather check failed (network or API error).".to_string()
            }
        }
    }

    async fn open_app(&self, app: AppId, arg: Option<String>) -> String {
        let (action, confirmation) = match app {
            AppId::Chrome => (
                SystemAction::OpenUrl("https://www.google.com".to_string()),
                "Opened Chrome.",
            ),
            AppId::YouTube => (SystemAction::OpenUrl(youtube_url(arg.as_deref())), "Opened YouTube."),
            AppId::WhatsApp => (
                SystemAction::OpenUrl("https://web.whatsapp.com".to_string()),
                "Opened WhatsApp Web.",
            ),
            AppId::Settings => (SystemAction::OpenSettings, "Opened Settings."),
            AppId::VsCode => {
                if !program_available(&self.editor_path) {
                    warn!("Editor not found at {}", self.editor_path.display());
                    return "VS Code not found at configured path.".to_string();
                }
                (SystemAction::RunProgram(self.editor_path.clone()), "Opening VS Code.")
            }
            AppId::Calculator => (SystemAction::OpenCalculator, "Calculator opened."),
            AppId::TaskManager => (SystemAction::OpenTaskManager, "Task Manager opened."),
            AppId::CommandPrompt => (SystemAction::OpenTerminal, "Command Prompt opened."),
            AppId::ControlPanel => (SystemAction::OpenControlPanel, "Control Panel opened."),
        };

        match self.collaborators.launcher.launch(action).await {
            Ok(()) => confirmation.to_string(),
            Err(e) => {
                warn!("Opening {} failed: {e:#}", app.display_name());
                format!("Could not open {}: {e}", app.display_name())
            }
        }
    }

    async fn system_control(&self, cmd: SystemCommand, delay: u64) -> String {
        let (confirmation, failure) = match cmd {
            SystemCommand::Shutdown => (
                format!("Shutdown scheduled in {delay} seconds."),
                "schedule shutdown",
            ),
            SystemCommand::Restart => (
                format!("Restart scheduled in {delay} seconds."),
                "schedule restart",
            ),
            SystemCommand::Abort => ("Shutdown/restart aborted.".to_string(), "abort shutdown"),
            SystemCommand::Lock => ("Workstation locked.".to_string(), "lock workstation"),
            SystemCommand::Sleep => (
                "System sleep attempted.".to_string(),
                "put system to sleep",
            ),
            SystemCommand::LogOff => ("Logoff initiated.".to_string(), "log off"),
        };

        match self
            .collaborators
            .launcher
            .launch(SystemAction::Power(cmd, delay))
            .await
        {
            Ok(()) => confirmation,
            Err(e) => {
                warn!("System control {cmd:?} failed: {e:#}");
                format!("Could not {failure}: {e}")
            }
        }
    }

    async fn play_music(&self) -> String {
        let track = match self.collaborators.media.pick_track().await {
            Ok(Some(track)) => track,
            Ok(None) => return "No music files found in your configured music folder.".to_string(),
            Err(e) => return format!("Could not play music: {e}"),
        };

        let name = track
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| track.display().to_string());

        match self
            .collaborators
            .launcher
            .launch(SystemAction::OpenFile(track))
            .await
        {
            Ok(()) => format!("Playing {name}"),
            Err(e) => format!("Could not play music: {e}"),
        }
    }

    async fn set_reminder(&self, request: ReminderRequest) -> String {
        let text = request.text.trim();
        if text.is_empty() {
            return "Sorry, I couldn't parse the reminder.".to_string();
        }

        self.store
            .add_reminder(Reminder::new(text, request.fire_time()))
            .await;

        match &request.time {
            ReminderTime::At(hhmm) => format!("Reminder set for {hhmm}: {text}"),
            ReminderTime::Malformed(_) => {
                "Reminder added without specific time (time format invalid).".to_string()
            }
            ReminderTime::Unspecified => "Reminder added without time.".to_string(),
        }
    }

    async fn set_identity(&self, name: &str) -> String {
        let name = normalize(name);
        if name.is_empty() {
            return "I did not catch your name.".to_string();
        }
        self.store.set_identity(&name).await;
        format!("Nice to meet you, {name}. I will remember your name.")
    }

    async fn fallback(&self, utterance: &str) -> String {
        self.collaborators
            .fallback
            .respond(utterance)
            .await
            .unwrap_or_else(|| NOT_UNDERSTOOD.to_string())
    }
}

fn youtube_url(query: Option<&str>) -> String {
    match query {
        Some(q) => reqwest::Url::parse_with_params(
            "https://www.youtube.com/results",
            &[("search_query", q)],
        )
        .map(|u| u.to_string())
        .unwrap_or_else(|_| "https://www.youtube.com".to_string()),
        None => "https://www.youtube.com".to_string(),
    }
}

/// An existing path, or a bare command name found on `PATH`
fn program_available(program: &Path) -> bool {
    if program.exists() {
        return true;
    }
    if program.components().count() != 1 {
        return false;
    }

    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| {
                let candidate = dir.join(program);
                candidate.is_file() || candidate.with_extension("exe").is_file()
            })
        })
        .unwrap_or(false)
}
