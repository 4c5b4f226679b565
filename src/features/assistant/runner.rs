//! Startup wiring and the main interaction loop

use anyhow::Result;
use chrono::Local;
use log::{info, warn};
use std::sync::Arc;

use super::session::{Session, Step, Timeouts};
use crate::core::Config;
use crate::features::dispatch::{Collaborators, Dispatcher};
use crate::features::fallback::CannedResponder;
use crate::features::intents::{normalize, IntentClassifier, KnowledgeBase};
use crate::features::lookup::{OpenWeatherClient, WeatherService, WikipediaClient};
use crate::features::profile::ProfileStore;
use crate::features::reminders::{claim_annual_alert, Announcer, ReminderScheduler};
use crate::features::speech::{
    recognizer_from, Acquired, ConsoleInput, ConsoleVoice, InputAcquirer, SpeechOutput,
};
use crate::features::system::{FolderLibrary, NotesWriter, OsLauncher};

pub struct Assistant {
    session: Session,
    store: ProfileStore,
    acquirer: InputAcquirer,
    output: Arc<dyn SpeechOutput>,
    scheduler: ReminderScheduler,
    timeouts: Timeouts,
}

impl Assistant {
    /// Wire the default adapters from configuration
    ///
    /// Fails only when the memory file cannot be used.
    pub async fn build(config: &Config) -> Result<Self> {
        let output: Arc<dyn SpeechOutput> = Arc::new(ConsoleVoice::new(config.tts_command.clone()));
        let acquirer = InputAcquirer::new(
            recognizer_from(config.stt_command.as_deref()),
            Arc::new(ConsoleInput::new()),
        );
        Self::with_io(config, acquirer, output).await
    }

    async fn with_io(
        config: &Config,
        acquirer: InputAcquirer,
        output: Arc<dyn SpeechOutput>,
    ) -> Result<Self> {
        let store = ProfileStore::open(&config.memory_file).await?;
        let knowledge = Arc::new(KnowledgeBase::builtin());

        let launcher = Arc::new(OsLauncher);
        let weather: Option<Arc<dyn WeatherService>> = match &config.weather_api_key {
            Some(key) if config.weather_enabled() => Some(Arc::new(OpenWeatherClient::new(key)?)),
            _ => {
                info!("Weather disabled (no JARVIS_WEATHER_API_KEY)");
                None
            }
        };
        let collaborators = Collaborators {
            launcher: launcher.clone(),
            documents: Arc::new(NotesWriter::new(&config.notes_dir, launcher)),
            media: Arc::new(FolderLibrary::new(&config.music_folder)),
            encyclopedia: Arc::new(WikipediaClient::new()?),
            weather,
            fallback: Arc::new(CannedResponder),
        };

        let dispatcher = Dispatcher::new(
            store.clone(),
            knowledge.clone(),
            collaborators,
            &config.editor_path,
            &config.weather_city,
        );
        let timeouts = Timeouts {
            listen: config.listen_timeout(),
            dictation: config.dictation_timeout(),
        };
        let session = Session::new(
            IntentClassifier::new(knowledge),
            dispatcher,
            acquirer.clone(),
            output.clone(),
            timeouts,
        );
        let scheduler = ReminderScheduler::new(
            store.clone(),
            Announcer::spawn(output.clone()),
            config.reminder_interval(),
        );

        Ok(Assistant {
            session,
            store,
            acquirer,
            output,
            scheduler,
            timeouts,
        })
    }

    /// Start the scheduler, greet and loop until exit or closed input
    pub async fn run(self) -> Result<()> {
        let Assistant {
            mut session,
            store,
            acquirer,
            output,
            scheduler,
            timeouts,
        } = self;

        output.render("Jarvis starting up.").await;
        let handle = scheduler.start();

        greet(&store, &acquirer, output.as_ref(), timeouts).await;

        if let Some(alert) = claim_annual_alert(&store, Local::now().date_naive()).await {
            output.render(alert).await;
        }

        output.render("How can I assist you today?").await;

        while session.step().await == Step::Continue {}

        handle.stop().await;
        info!("Session ended");
        Ok(())
    }
}

async fn greet(
    store: &ProfileStore,
    acquirer: &InputAcquirer,
    output: &dyn SpeechOutput,
    timeouts: Timeouts,
) {
    if let Some(name) = store.identity().await {
        output.render(&format!("Welcome back, {name}!")).await;
        return;
    }

    output.render("Hello! What's your name?").await;
    match acquirer.acquire(timeouts.listen, "Your name: ").await {
        Acquired::Text(raw) => {
            let name = normalize(&raw);
            store.set_identity(&name).await;
            output.render(&format!("Nice to meet you, {name}!")).await;
        }
        Acquired::Nothing => info!("No name given at startup"),
        Acquired::Closed => warn!("Input closed before a name was given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profile::Reminder;
    use crate::features::speech::input::tests::{ScriptedRecognizer, ScriptedTyped};
    use crate::features::speech::TypedInput;
    use async_trait::async_trait;
    use chrono::Timelike;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Captured(Mutex<Vec<String>>);

    #[async_trait]
    impl SpeechOutput for Captured {
        async fn render(&self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    /// Keyboard nobody ever types on
    struct SilentKeyboard;

    #[async_trait]
    impl TypedInput for SilentKeyboard {
        async fn read_line(&self, _prompt: &str) -> Option<String> {
            std::future::pending().await
        }
    }

    fn timeouts() -> Timeouts {
        Timeouts {
            listen: Duration::from_secs(1),
            dictation: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_greet_asks_and_stores_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().join("m.json")).await.unwrap();
        let acquirer = InputAcquirer::new(
            Arc::new(ScriptedRecognizer::new(vec![])),
            Arc::new(ScriptedTyped::new(&["  Ali "])),
        );
        let output = Captured::default();

        greet(&store, &acquirer, &output, timeouts()).await;

        assert_eq!(store.identity().await.as_deref(), Some("ali"));
        assert_eq!(
            output.0.lock().unwrap().as_slice(),
            &[
                "Hello! What's your name?".to_string(),
                "Nice to meet you, ali!".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_greet_welcomes_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().join("m.json")).await.unwrap();
        store.set_identity("sara").await;
        let acquirer = InputAcquirer::new(
            Arc::new(ScriptedRecognizer::new(vec![])),
            Arc::new(ScriptedTyped::new(&[])),
        );
        let output = Captured::default();

        greet(&store, &acquirer, &output, timeouts()).await;

        assert_eq!(
            output.0.lock().unwrap().as_slice(),
            &["Welcome back, sara!".to_string()]
        );
    }

    #[tokio::test]
    async fn test_build_fails_on_unusable_memory_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            memory_file: dir.path().join("missing-dir").join("m.json"),
            ..Config::default()
        };
        assert!(Assistant::build(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_reminders_fire_while_waiting_for_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            memory_file: dir.path().join("m.json"),
            notes_dir: dir.path().to_path_buf(),
            reminder_check_seconds: 1,
            ..Config::default()
        };
        let acquirer = InputAcquirer::new(
            Arc::new(ScriptedRecognizer::new(vec![])),
            Arc::new(SilentKeyboard),
        );
        let output = Arc::new(Captured::default());
        let assistant = Assistant::with_io(&config, acquirer, output.clone())
            .await
            .unwrap();

        // Keep the due minute from rolling over mid-test
        if Local::now().second() >= 55 {
            tokio::time::sleep(Duration::from_secs(6)).await;
        }
        let hhmm = Local::now().format("%H:%M").to_string();
        let store = assistant.store.clone();
        store.add_reminder(Reminder::new("due now", Some(hhmm))).await;

        let task = tokio::spawn(assistant.run());
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!task.is_finished());
        task.abort();

        assert!(store.reminders().await.is_empty());
        let spoken = output.0.lock().unwrap().clone();
        assert!(spoken.contains(&"Hello! What's your name?".to_string()));
        assert!(spoken.contains(&"Reminder: due now".to_string()));
    }
}
