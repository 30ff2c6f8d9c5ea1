//! Configuration for the TaskDeck client.
//!
//! Layered with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskdeck/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;
use std::time::Duration;

use crate::session::OwnerSession;
use crate::state::Theme;

/// Errors that can occur when loading client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerSection,
    user: UserSection,
    ui: UiSection,
}

/// `[server]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerSection {
    url: Option<String>,
}

/// `[user]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UserSection {
    id: Option<String>,
    display_name: Option<String>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiSection {
    theme: Option<String>,
    poll_timeout_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the client.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "TaskDeck — terminal task manager")]
pub struct CliArgs {
    /// Base URL of the task service.
    #[arg(short, long, env = "TASKDECK_SERVER_URL")]
    pub server_url: Option<String>,

    /// Sign in as this user id; omit to start as a guest.
    #[arg(short, long, env = "TASKDECK_USER")]
    pub user_id: Option<String>,

    /// Display name shown in the status bar.
    #[arg(short, long)]
    pub display_name: Option<String>,

    /// Color theme: `light` or `dark`.
    #[arg(long)]
    pub theme: Option<String>,

    /// Path to config file (default: `~/.config/taskdeck/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDECK_LOG")]
    pub log_level: String,

    /// Log file path (default: a file in the system temp directory).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the task service.
    pub server_url: String,
    /// Stable user id, or `None` for a guest session.
    pub user_id: Option<String>,
    /// Display name for signed-in sessions.
    pub display_name: Option<String>,
    /// Starting color theme.
    pub theme: Theme,
    /// Log level filter string.
    pub log_level: String,
    /// How long to block waiting for terminal input each tick.
    pub poll_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            user_id: None,
            display_name: None,
            theme: Theme::Light,
            log_level: "info".to_string(),
            poll_timeout: Duration::from_millis(100),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        let theme = cli
            .theme
            .as_deref()
            .or(file.ui.theme.as_deref())
            .map_or(defaults.theme, parse_theme);

        Self {
            server_url: cli
                .server_url
                .clone()
                .or_else(|| file.server.url.clone())
                .unwrap_or(defaults.server_url),
            user_id: cli.user_id.clone().or_else(|| file.user.id.clone()),
            display_name: cli
                .display_name
                .clone()
                .or_else(|| file.user.display_name.clone()),
            theme,
            log_level: cli.log_level.clone(),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
        }
    }

    /// The session this configuration signs in as.
    #[must_use]
    pub fn to_session(&self) -> OwnerSession {
        match &self.user_id {
            Some(id) => {
                let name = self.display_name.clone().unwrap_or_else(|| id.clone());
                OwnerSession::signed_in(id.clone(), name)
            }
            None => OwnerSession::guest(),
        }
    }
}

/// Parse a theme name, defaulting to light for anything unrecognized.
fn parse_theme(name: &str) -> Theme {
    if name.eq_ignore_ascii_case("dark") {
        Theme::Dark
    } else {
        Theme::Light
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file for the client.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdeck").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
