//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/<app>/<app>.toml`, or an explicit path
//! 3. Environment variables: `<APP>_*` prefix (e.g. `KURL_LOG_LEVEL`)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// When to emit ANSI colors on the diagnostic stream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow NO_COLOR / CLICOLOR and terminal detection
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(SettingsError::Config {
                message: format!("invalid color mode: {}", other),
            }),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        };
        f.write_str(s)
    }
}

/// Settings shared by programs built on the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tracing filter directive used when no `-v` flag is given (default: "warn")
    pub log_level: String,
    /// Color mode for diagnostics
    pub color: ColorMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            color: ColorMode::Auto,
        }
    }
}

/// Get the XDG config directory for `app`.
pub fn global_config_dir(app: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", app).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file for `app`.
pub fn global_config_path(app: &str) -> Option<PathBuf> {
    global_config_dir(app).map(|dir| dir.join(format!("{}.toml", app)))
}

impl Settings {
    /// Load settings from defaults, the global config file (if present), and `<APP>_*`
    /// environment variables.
    pub fn load(app: &str) -> Result<Self, SettingsError> {
        let global = global_config_path(app).filter(|p| p.exists());
        Self::build(app, global.as_deref(), false)
    }

    /// Like [`Settings::load`], but read `path` instead of the global config file.
    ///
    /// The file must exist.
    pub fn load_from(app: &str, path: &Path) -> Result<Self, SettingsError> {
        Self::build(app, Some(path), true)
    }

    fn build(app: &str, file: Option<&Path>, required: bool) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("color", defaults.color.to_string())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(required));
        }

        builder = builder.add_source(
            Environment::with_prefix(&app.to_uppercase())
                .prefix_separator("_")
                .separator("__"),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }
}
