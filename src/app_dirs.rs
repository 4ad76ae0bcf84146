//! Application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution:
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config | `~/Library/Application Support/chime/` | `~/.config/chime/` |

use std::path::PathBuf;

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/chime/`, falling back to a temp path when
/// the platform has no config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("chime"))
        .unwrap_or_else(|| std::env::temp_dir().join("chime-config"))
}

/// Path to `config.toml` inside [`config_dir`].
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_config_dir() {
        let file = config_file();
        assert_eq!(file.parent(), Some(config_dir().as_path()));
        assert!(file.ends_with("chime/config.toml") || file.ends_with("chime-config/config.toml"));
    }
}
