use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from taskdeck.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    #[serde(default)]
    pub url: String,
    /// Anon or service key; sent as both `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,
    /// Default: see TASKDECK_TOML_TEMPLATE
    #[serde(default = "default_table")]
    pub table: String,
    /// Default: see TASKDECK_TOML_TEMPLATE
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_table() -> String {
    "tasks".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log directory, relative to the config file's directory
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            dir: default_log_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    ".taskdeck/logs".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Title shown in the TUI header (default: "Tasks")
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
