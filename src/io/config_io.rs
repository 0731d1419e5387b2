use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, RemoteConfig};

pub const CONFIG_FILE: &str = "taskdeck.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "TASKDECK_CONFIG";
/// Environment override for `remote.url`
pub const URL_ENV: &str = "TASKDECK_URL";
/// Environment override for `remote.api_key`
pub const KEY_ENV: &str = "TASKDECK_API_KEY";

const TASKDECK_TOML_TEMPLATE: &str = r##"# taskdeck configuration

[remote]
# Project URL of the hosted database, e.g. "https://abcd.supabase.co"
url = ""
# Sent as the `apikey` header and as a bearer token.
# TASKDECK_URL and TASKDECK_API_KEY override these two values.
api_key = ""
table = "tasks"
timeout_secs = 30

[log]
# Used when RUST_LOG is unset
level = "info"
# Relative to the directory holding this file
dir = ".taskdeck/logs"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# title = "Tasks"
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# red = "#FF4444"
# green = "#44FF88"
"##;

/// Error type for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no taskdeck.toml found (run `td init` or pass --config)")]
    NotFound,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("remote.url is not set (edit taskdeck.toml or set TASKDECK_URL)")]
    MissingUrl,
    #[error("remote.api_key is not set (edit taskdeck.toml or set TASKDECK_API_KEY)")]
    MissingKey,
}

/// A parsed config together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

impl LoadedConfig {
    /// Directory holding the config file; relative paths resolve against it
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_dir().join(&self.config.log.dir)
    }
}

/// Find taskdeck.toml by walking up from the given directory.
pub fn discover_config(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ConfigError::NotFound);
        }
    }
}

/// Pick the config file: an explicit path, then `$TASKDECK_CONFIG`, then
/// discovery from `cwd`.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    cwd: &Path,
) -> Result<PathBuf, ConfigError> {
    let chosen = explicit.map(Path::to_path_buf).or(env_path);
    match chosen {
        Some(path) if path.is_file() => Ok(path),
        Some(path) => Err(ConfigError::ReadError {
            path,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }),
        None => discover_config(cwd),
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replace url/api_key with non-empty values from the environment lookup.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.remote.url = url;
    }
    if let Some(key) = lookup(KEY_ENV).filter(|v| !v.trim().is_empty()) {
        config.remote.api_key = key;
    }
}

/// Resolve, read, and apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = resolve_config_path(explicit, env_path, &cwd)?;
    let mut config = read_config(&path)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(LoadedConfig { config, path })
}

/// Check that the remote section can be used to make requests.
pub fn validate_remote(remote: &RemoteConfig) -> Result<(), ConfigError> {
    if remote.url.trim().is_empty() {
        return Err(ConfigError::MissingUrl);
    }
    if remote.api_key.trim().is_empty() {
        return Err(ConfigError::MissingKey);
    }
    Ok(())
}

/// Fill the commented template, keeping its comments and layout.
pub fn render_template(url: Option<&str>, api_key: Option<&str>, table: Option<&str>) -> String {
    let mut doc: toml_edit::DocumentMut = match TASKDECK_TOML_TEMPLATE.parse() {
        Ok(doc) => doc,
        Err(_) => return TASKDECK_TOML_TEMPLATE.to_string(),
    };
    if let Some(url) = url {
        doc["remote"]["url"] = toml_edit::value(url);
    }
    if let Some(key) = api_key {
        doc["remote"]["api_key"] = toml_edit::value(key);
    }
    if let Some(table) = table {
        doc["remote"]["table"] = toml_edit::value(table);
    }
    doc.to_string()
}

/// Write a config file atomically (temp file in the same directory, then rename).
pub fn write_config(path: &Path, contents: &str, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let write_err = |e: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
