//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.study-assistant/config.toml`. If missing on first
//! run, a commented-out default is generated so users can discover all options.

use log::{Level, log};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::history::DEFAULT_PREVIEW_COUNT;
use crate::core::support::{DEFAULT_EMAIL, DEFAULT_NAME};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub preview_count: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "study-assistant.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub name: String,
    pub email: String,
    pub history_preview: usize,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// A startup message from loading or resolving config.
///
/// Config is read before the file logger exists, so anything worth logging
/// is collected here and replayed once the logger is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Emit through the `log` facade.
    pub fn log(&self) {
        log!(self.level, "{}", self.message);
    }
}

/// A parsed config file plus the notices produced while reading it.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: AssistantConfig,
    pub notices: Vec<Notice>,
}

/// Returns the path to `~/.study-assistant/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".study-assistant").join("config.toml"))
}

/// Load config from the default location.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AssistantConfig::default()`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path, true),
        None => Ok(LoadedConfig {
            config: AssistantConfig::default(),
            notices: vec![Notice::new(
                Level::Warn,
                "Could not determine home directory, using default config",
            )],
        }),
    }
}

/// Load config from an explicit path. A missing file yields the defaults;
/// `generate` controls whether a commented template is written in its place.
pub fn load_config_from(path: &Path, generate: bool) -> Result<LoadedConfig, ConfigError> {
    let mut notices = Vec::new();
    if !path.exists() {
        if generate {
            notices.push(Notice::new(
                Level::Info,
                format!("No config file found, generating default at {}", path.display()),
            ));
            notices.extend(generate_default_config(path));
        } else {
            notices.push(Notice::new(
                Level::Warn,
                format!("Config file {} not found, using defaults", path.display()),
            ));
        }
        return Ok(LoadedConfig {
            config: AssistantConfig::default(),
            notices,
        });
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AssistantConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    notices.push(Notice::new(
        Level::Info,
        format!("Loaded config from {}", path.display()),
    ));
    notices.push(Notice::new(Level::Debug, format!("Config: {:?}", config)));
    Ok(LoadedConfig { config, notices })
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Study Assistant Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [profile]
# name = "Иван Петров"                 # Or set STUDY_ASSISTANT_NAME
# email = "ivan.petrov@example.com"    # Or set STUDY_ASSISTANT_EMAIL

# [history]
# preview_count = 5                    # Entries shown before "Показать еще"

# [logging]
# file = "study-assistant.log"         # Or set STUDY_ASSISTANT_LOG
# level = "info"                       # "error", "warn", "info", "debug", "trace"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> Option<Notice> {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return Some(Notice::new(
            Level::Warn,
            format!("Failed to create config directory: {}", e),
        ));
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .err()
        .map(|e| Notice::new(Level::Warn, format!("Failed to write default config: {}", e)))
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// Values that had to be discarded are reported in `notices`.
pub fn resolve(
    config: &AssistantConfig,
    cli: &CliOverrides,
    notices: &mut Vec<Notice>,
) -> ResolvedConfig {
    // Profile: env → config → default
    let name = env_nonempty("STUDY_ASSISTANT_NAME")
        .or_else(|| config.profile.name.clone())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let email = env_nonempty("STUDY_ASSISTANT_EMAIL")
        .or_else(|| config.profile.email.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    // A zero preview would hide the whole list behind the toggle.
    let history_preview = config
        .history
        .preview_count
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PREVIEW_COUNT);

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env_nonempty("STUDY_ASSISTANT_LOG").map(PathBuf::from))
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = if cli.debug {
        LevelFilter::Debug
    } else {
        config
            .logging
            .level
            .as_deref()
            .and_then(|level| match parse_level(level) {
                Some(filter) => Some(filter),
                None => {
                    notices.push(Notice::new(
                        Level::Warn,
                        format!("Unknown log level {:?}, using default", level),
                    ));
                    None
                }
            })
            .unwrap_or(DEFAULT_LOG_LEVEL)
    };

    ResolvedConfig {
        name,
        email,
        history_preview,
        log_file,
        log_level,
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}
