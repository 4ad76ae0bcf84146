//! Configuration types for the reminder daemon.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChimeConfig {
    /// Where the weekly schedule lives.
    pub schedule: ScheduleConfig,
    /// Reminder loop behaviour.
    pub reminders: ReminderConfig,
    /// Text-to-speech output.
    pub speech: SpeechConfig,
}

/// Schedule input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Path to the CSV schedule (relative paths resolve against the working directory).
    pub path: PathBuf,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("schedule.csv"),
        }
    }
}

/// What the engine does when the process runs past midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayRollover {
    /// Today's tasks are computed once at startup and never refreshed.
    #[default]
    Startup,
    /// Today's tasks are recomputed whenever the calendar date changes.
    Refresh,
}

/// Reminder loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Name used to greet the user ("Hello <name>! ..."). `None` disables the greeting.
    pub name: Option<String>,
    /// Speak today's agenda once at startup.
    pub announce_agenda: bool,
    /// Midnight behaviour for the applicable task set.
    pub rollover: DayRollover,
    /// Interval between engine ticks in milliseconds.
    pub tick_interval_ms: u64,
    /// Redraw the "current time" status line on every tick.
    pub status_line: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            name: None,
            announce_agenda: true,
            rollover: DayRollover::default(),
            tick_interval_ms: 1000,
            status_line: true,
        }
    }
}

/// Text-to-speech configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether notifications are spoken at all.
    pub enabled: bool,
    /// `"auto"`, `"say"`, `"espeak"`, `"none"`, or a path to a custom program
    /// that takes the text as its only argument.
    pub engine: String,
    /// Voice name passed to the engine (engine-specific).
    pub voice: Option<String>,
    /// Speech rate in words per minute.
    pub rate: u32,
    /// Volume multiplier (0.0–2.0, 1.0 = normal).
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            engine: "auto".to_owned(),
            voice: None,
            rate: 150,
            volume: 1.0,
        }
    }
}

impl ChimeConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::ChimeError::Config(e.to_string()))
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> crate::error::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ChimeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/chime/config.toml`.
    pub fn default_config_path() -> PathBuf {
        crate::app_dirs::config_file()
    }

    /// Tick period as a [`std::time::Duration`], never shorter than 10ms.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reminders.tick_interval_ms.max(10))
    }
}
