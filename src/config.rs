//! Explorer configuration, persisted as TOML.
//!
//! Resolution order: an explicit `--config` path, then
//! `$XDG_CONFIG_HOME/ros-component-explorer/config.toml` if present, then
//! built-in defaults. `ROS_EXPLORER_*` environment variables are applied on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory name under `$XDG_CONFIG_HOME`.
pub const APP_DIR: &str = "ros-component-explorer";

/// Errors from configuration loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(explorer::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(explorer::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("invalid value for {var}: \"{value}\"")]
    #[diagnostic(
        code(explorer::config::env),
        help("ROS_EXPLORER_PORT must be a TCP port number between 0 and 65535.")
    )]
    InvalidEnv { var: String, value: String },

    #[error("cannot determine home directory")]
    #[diagnostic(
        code(explorer::config::no_home),
        help("Set the HOME or XDG_CONFIG_HOME environment variable, or pass --config.")
    )]
    NoHome,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Runtime configuration for the CLI and the HTTP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Turtle dataset loaded into the embedded store.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// On-disk oxigraph directory; in-memory when unset.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
    /// Remote SPARQL query endpoint; replaces the embedded store when set.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// HTTP timeout for the remote endpoint.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Server bind address.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/components.ttl")
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            store_dir: None,
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl ExplorerConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist; the XDG default is optional.
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Ok(path) if path.is_file() => {
                    tracing::debug!(path = %path.display(), "using config file");
                    Self::from_file(&path)?
                }
                _ => Self::default(),
            },
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply `ROS_EXPLORER_*` overrides from the given lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(endpoint) = lookup("ROS_EXPLORER_ENDPOINT").filter(|s| !s.is_empty()) {
            self.endpoint = Some(endpoint);
        }
        if let Some(bind) = lookup("ROS_EXPLORER_BIND").filter(|s| !s.is_empty()) {
            self.bind = bind;
        }
        if let Some(port) = lookup("ROS_EXPLORER_PORT").filter(|s| !s.is_empty()) {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "ROS_EXPLORER_PORT".into(),
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `bind:port` for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// `$XDG_CONFIG_HOME/ros-component-explorer/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> ConfigResult<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .map_err(|_| ConfigError::NoHome)?,
    };
    Ok(base.join(APP_DIR).join("config.toml"))
}
