//! Spoken notifications through an external text-to-speech program.
//!
//! Supported engines:
//! - `say` (macOS): `say -r <rate> [-v voice] <text>`
//! - `espeak-ng` / `espeak`: `-s <rate> -a <amplitude> [-v voice] <text>`
//! - any other program, which receives the text as its only argument

use crate::config::SpeechConfig;
use crate::error::{ChimeError, Result};
use crate::notify::Notifier;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Espeak amplitude at volume 1.0.
const ESPEAK_BASE_AMPLITUDE: f32 = 100.0;
const ESPEAK_MAX_AMPLITUDE: f32 = 200.0;

/// A resolved text-to-speech program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEngine {
    Say(PathBuf),
    Espeak(PathBuf),
    Custom(PathBuf),
}

impl SpeechEngine {
    /// Resolve a configured engine name.
    ///
    /// `"none"` (or an empty string) disables speech. `"auto"` probes `PATH`
    /// for `say`, then `espeak-ng`, then `espeak`. Returns `None` when nothing
    /// usable is found.
    pub fn resolve(choice: &str) -> Option<Self> {
        match choice.trim() {
            "" | "none" => None,
            "auto" => Self::detect(),
            "say" => which::which("say").ok().map(Self::Say),
            "espeak" | "espeak-ng" => find_espeak().map(Self::Espeak),
            other => {
                let path = Path::new(other);
                if path.components().count() > 1 {
                    Some(Self::Custom(path.to_path_buf()))
                } else {
                    which::which(other).ok().map(Self::Custom)
                }
            }
        }
    }

    fn detect() -> Option<Self> {
        if let Ok(say) = which::which("say") {
            return Some(Self::Say(say));
        }
        find_espeak().map(Self::Espeak)
    }

    /// The program to execute.
    pub fn program(&self) -> &Path {
        match self {
            Self::Say(p) | Self::Espeak(p) | Self::Custom(p) => p.as_path(),
        }
    }

    /// Command-line arguments for speaking `text`.
    pub fn args(&self, text: &str, voice: Option<&str>, rate: u32, volume: f32) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Self::Say(_) => {
                args.push("-r".to_owned());
                args.push(rate.to_string());
                if let Some(voice) = voice {
                    args.push("-v".to_owned());
                    args.push(voice.to_owned());
                }
            }
            Self::Espeak(_) => {
                let amplitude =
                    (volume * ESPEAK_BASE_AMPLITUDE).clamp(0.0, ESPEAK_MAX_AMPLITUDE).round();
                args.push("-s".to_owned());
                args.push(rate.to_string());
                args.push("-a".to_owned());
                args.push(format!("{amplitude:.0}"));
                if let Some(voice) = voice {
                    args.push("-v".to_owned());
                    args.push(voice.to_owned());
                }
            }
            Self::Custom(_) => {}
        }
        args.push(text.to_owned());
        args
    }
}

fn find_espeak() -> Option<PathBuf> {
    which::which("espeak-ng")
        .or_else(|_| which::which("espeak"))
        .ok()
}

/// Speaks each notification and waits for the program to finish.
#[derive(Debug, Clone)]
pub struct SpeechNotifier {
    engine: SpeechEngine,
    voice: Option<String>,
    rate: u32,
    volume: f32,
}

impl SpeechNotifier {
    pub fn new(engine: SpeechEngine) -> Self {
        let defaults = SpeechConfig::default();
        Self {
            engine,
            voice: defaults.voice,
            rate: defaults.rate,
            volume: defaults.volume,
        }
    }

    /// Build a notifier from config. Returns `None` when speech is disabled
    /// or no engine could be found.
    pub fn from_config(config: &SpeechConfig) -> Option<Self> {
        if !config.enabled {
            debug!("speech disabled in config");
            return None;
        }
        let Some(engine) = SpeechEngine::resolve(&config.engine) else {
            if config.engine.trim() != "none" {
                warn!(
                    "no text-to-speech program found for engine {:?}; notifications will be printed only",
                    config.engine
                );
            }
            return None;
        };
        debug!("using speech program {}", engine.program().display());
        Some(Self {
            engine,
            voice: config.voice.clone(),
            rate: config.rate,
            volume: config.volume,
        })
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_rate(mut self, rate: u32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn engine(&self) -> &SpeechEngine {
        &self.engine
    }

    /// The command that would speak `text`.
    pub fn command(&self, text: &str) -> Command {
        let mut cmd = Command::new(self.engine.program());
        cmd.args(
            self.engine
                .args(text, self.voice.as_deref(), self.rate, self.volume),
        )
        .stdin(Stdio::null())
        .stdout(Stdio::null());
        cmd
    }
}

impl Notifier for SpeechNotifier {
    fn notify(&mut self, text: &str) -> Result<()> {
        let program = self.engine.program().display().to_string();
        let status = self
            .command(text)
            .status()
            .map_err(|e| ChimeError::Speech(format!("failed to run {program}: {e}")))?;
        if !status.success() {
            return Err(ChimeError::Speech(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}
