//! OS actions: opening apps, URLs and files, and power controls
//!
//! Each action maps to one platform command that is spawned and left running.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: macOS and Linux command tables alongside Windows
//! - 1.1.0: Power controls
//! - 1.0.0: Initial release

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::features::intents::SystemCommand;

/// Something the host OS is asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemAction {
    OpenUrl(String),
    OpenSettings,
    OpenCalculator,
    OpenTaskManager,
    OpenTerminal,
    OpenControlPanel,
    /// Start an executable directly
    RunProgram(PathBuf),
    /// Open a file with its default application
    OpenFile(PathBuf),
    Power(SystemCommand, u64),
}

#[async_trait]
pub trait ActionLauncher: Send + Sync {
    /// Start the action without waiting for it to finish
    async fn launch(&self, action: SystemAction) -> Result<()>;
}

/// Launches actions on the machine the assistant runs on
#[derive(Clone, Default)]
pub struct OsLauncher;

#[async_trait]
impl ActionLauncher for OsLauncher {
    async fn launch(&self, action: SystemAction) -> Result<()> {
        let (program, args) = command_for(&action);
        info!("Launching {action:?}: {program} {args:?}");

        Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|e| anyhow!("{program}: {e}"))
    }
}

fn owned(program: &str, args: &[&str]) -> (String, Vec<String>) {
    (
        program.to_string(),
        args.iter().map(|a| a.to_string()).collect(),
    )
}

/// `shutdown` on Unix takes whole minutes
#[cfg(not(windows))]
fn delay_minutes(seconds: u64) -> String {
    format!("+{}", seconds.div_ceil(60))
}

#[cfg(windows)]
pub fn command_for(action: &SystemAction) -> (String, Vec<String>) {
    match action {
        SystemAction::OpenUrl(url) => owned("cmd", &["/C", "start", "", url.as_str()]),
        SystemAction::OpenSettings => owned("cmd", &["/C", "start", "ms-settings:"]),
        SystemAction::OpenCalculator => owned("calc.exe", &[]),
        SystemAction::OpenTaskManager => owned("taskmgr", &[]),
        SystemAction::OpenTerminal => owned("cmd", &["/C", "start", "cmd"]),
        SystemAction::OpenControlPanel => owned("control", &[]),
        SystemAction::RunProgram(path) => (path.display().to_string(), Vec::new()),
        SystemAction::OpenFile(path) => {
            let path = path.display().to_string();
            owned("cmd", &["/C", "start", "", path.as_str()])
        }
        SystemAction::Power(cmd, delay) => {
            let delay = delay.to_string();
            match cmd {
                SystemCommand::Shutdown => owned("shutdown", &["/s", "/t", delay.as_str()]),
                SystemCommand::Restart => owned("shutdown", &["/r", "/t", delay.as_str()]),
                SystemCommand::Abort => owned("shutdown", &["/a"]),
                SystemCommand::Lock => owned("rundll32.exe", &["user32.dll,LockWorkStation"]),
                SystemCommand::Sleep => {
                    owned("rundll32.exe", &["powrprof.dll,SetSuspendState", "0,1,0"])
                }
                SystemCommand::LogOff => owned("shutdown", &["/l"]),
            }
        }
    }
}

#[cfg(target_os = "macos")]
pub fn command_for(action: &SystemAction) -> (String, Vec<String>) {
    match action {
        SystemAction::OpenUrl(url) => owned("open", &[url.as_str()]),
        SystemAction::OpenSettings => owned("open", &["x-apple.systempreferences:"]),
        SystemAction::OpenCalculator => owned("open", &["-a", "Calculator"]),
        SystemAction::OpenTaskManager => owned("open", &["-a", "Activity Monitor"]),
        SystemAction::OpenTerminal => owned("open", &["-a", "Terminal"]),
        SystemAction::OpenControlPanel => owned("open", &["-a", "System Settings"]),
        SystemAction::RunProgram(path) => (path.display().to_string(), Vec::new()),
        SystemAction::OpenFile(path) => {
            let path = path.display().to_string();
            owned("open", &[path.as_str()])
        }
        SystemAction::Power(cmd, delay) => match cmd {
            SystemCommand::Shutdown => owned("shutdown", &["-h", delay_minutes(*delay).as_str()]),
            SystemCommand::Restart => owned("shutdown", &["-r", delay_minutes(*delay).as_str()]),
            SystemCommand::Abort => owned("killall", &["shutdown"]),
            SystemCommand::Lock => owned("pmset", &["displaysleepnow"]),
            SystemCommand::Sleep => owned("pmset", &["sleepnow"]),
            SystemCommand::LogOff => owned(
                "osascript",
                &["-e", "tell application \"System Events\" to log out"],
            ),
        },
    }
}

#[cfg(all(not(windows), not(target_os = "macos")))]
pub fn command_for(action: &SystemAction) -> (String, Vec<String>) {
    match action {
        SystemAction::OpenUrl(url) => owned("xdg-open", &[url.as_str()]),
        SystemAction::OpenSettings | SystemAction::OpenControlPanel => {
            owned("gnome-control-center", &[])
        }
        SystemAction::OpenCalculator => owned("gnome-calculator", &[]),
        SystemAction::OpenTaskManager => owned("gnome-system-monitor", &[]),
        SystemAction::OpenTerminal => owned("x-terminal-emulator", &[]),
        SystemAction::RunProgram(path) => (path.display().to_string(), Vec::new()),
        SystemAction::OpenFile(path) => {
            let path = path.display().to_string();
            owned("xdg-open", &[path.as_str()])
        }
        SystemAction::Power(cmd, delay) => match cmd {
            SystemCommand::Shutdown => owned("shutdown", &["-h", delay_minutes(*delay).as_str()]),
            SystemCommand::Restart => owned("shutdown", &["-r", delay_minutes(*delay).as_str()]),
            SystemCommand::Abort => owned("shutdown", &["-c"]),
            SystemCommand::Lock => owned("loginctl", &["lock-session"]),
            SystemCommand::Sleep => owned("systemctl", &["suspend"]),
            SystemCommand::LogOff => owned("gnome-session-quit", &["--logout", "--no-prompt"]),
        },
    }
}
