// Core layer - configuration and shared response types
pub mod core;

// Features layer - classifier, dispatcher, scheduler and adapters
pub mod features;

pub use core::Config;

pub use features::{
    // Interaction loop
    Assistant, Session, SessionState,
    // Dispatch
    Collaborators, Dispatcher,
    // Fallback
    CannedResponder, FallbackResponder, NoFallback,
    // Intents
    normalize, Intent, IntentClassifier, KnowledgeBase,
    // Profile
    Profile, ProfileStore, Reminder,
    // Reminders
    Announcer, ReminderScheduler, SchedulerHandle,
};
