use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::strings::WizardStrings;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Localized labels for buttons and navigation chrome
    #[serde(default)]
    pub strings: WizardStrings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Permit jumping ahead to unvisited steps from the side navigation
    #[serde(default)]
    pub allow_skip_to: bool,
}

/// Knobs for the demo host's simulated validation/commit behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Milliseconds of simulated async work before a forward commit lands
    #[serde(default = "default_commit_delay_ms")]
    pub commit_delay_ms: u64,
    /// Whether the acknowledgement step blocks forward navigation until toggled
    #[serde(default = "default_require_acknowledgement")]
    pub require_acknowledgement: bool,
}

fn default_commit_delay_ms() -> u64 {
    600
}

fn default_require_acknowledgement() -> bool {
    true
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            commit_delay_ms: default_commit_delay_ms(),
            require_acknowledgement: default_require_acknowledgement(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
}

fn default_refresh_rate() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Load configuration, layered lowest to highest precedence:
    /// embedded defaults, user config, explicit `--config` path, then
    /// `STEPNAV_`-prefixed environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so stepnav works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/stepnav/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("stepnav").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with STEPNAV_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("STEPNAV")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Directory where TUI-mode log files are written
    pub fn logs_path(&self) -> PathBuf {
        dirs::state_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("stepnav")
            .join("logs")
    }
}
