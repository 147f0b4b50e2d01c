//! Configuration loading for Parley.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level Parley configuration, loaded from `~/.parley/config.json`.
///
/// All sections are optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base directory for persisted state (orders, wellness log, leads,
    /// calendar). Defaults to `~/.parley`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Path to the mock calendar file. Defaults to `<data_dir>/mock_calendar.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level override (trace/debug/info/warn/error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Config {
    /// Load a config file (JSON5, with `${ENV_VAR}` substitution).
    /// A missing file is not an error; it yields the defaults.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(crate::error::ParleyError::Io)?;
        let substituted = substitute_env_vars(&raw);
        let config: Config = json5::from_str(&substituted)
            .map_err(|e| crate::error::ParleyError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        data_dir().join("config.json")
    }

    /// Resolved base directory for persisted state.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(data_dir)
    }

    pub fn orders_file(&self) -> PathBuf {
        self.resolved_data_dir().join("orders.json")
    }

    pub fn wellness_log_file(&self) -> PathBuf {
        self.resolved_data_dir().join("wellness_log.json")
    }

    pub fn leads_dir(&self) -> PathBuf {
        self.resolved_data_dir().join("leads")
    }

    pub fn calendar_file(&self) -> PathBuf {
        self.calendar_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.resolved_data_dir().join("mock_calendar.json"))
    }
}

/// Default data directory: `~/.parley`
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".parley")
}

fn substitute_env_vars(input: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_default()
    })
    .into_owned()
}
