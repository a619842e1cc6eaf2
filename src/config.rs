//! Configuration resolution for hookline
//!
//! Two-tier resolution with ENV → TOML priority and built-in defaults.
//! There is no database tier: the engine persists nothing.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::params::SelectionParams;

/// Environment variable names.
const ENV_BIND_ADDRESS: &str = "HOOKLINE_BIND_ADDRESS";
const ENV_SIGNAL_URL: &str = "HOOKLINE_SIGNAL_URL";
const ENV_LYRICS_URL: &str = "HOOKLINE_LYRICS_URL";

/// Built-in defaults.
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5730";
const DEFAULT_SIGNAL_URL: &str = "http://127.0.0.1:5731";
const DEFAULT_LYRICS_URL: &str = "http://127.0.0.1:5732";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP service binds to
    pub bind_address: String,
    /// Base URL of the signal-analysis collaborator
    pub signal_service_url: String,
    /// Base URL of the lyrics-transcription collaborator
    pub lyrics_service_url: String,
    /// Engine tunables
    pub selection: SelectionParams,
}

/// TOML file shape (all fields optional).
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    bind_address: Option<String>,
    signal_service_url: Option<String>,
    lyrics_service_url: Option<String>,
    #[serde(default)]
    selection: Option<SelectionParams>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            signal_service_url: DEFAULT_SIGNAL_URL.to_string(),
            lyrics_service_url: DEFAULT_LYRICS_URL.to_string(),
            selection: SelectionParams::default(),
        }
    }
}

impl Config {
    /// Load configuration with ENV → TOML → default priority.
    ///
    /// A missing TOML file is normal (defaults apply); a present but
    /// unparseable file is a warning, not a failure.
    pub fn load(toml_path: &Path) -> Self {
        let toml_config = match std::fs::read_to_string(toml_path) {
            Ok(content) => match toml::from_str::<TomlConfig>(&content) {
                Ok(config) => {
                    info!("Configuration loaded from {}", toml_path.display());
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {}. Using defaults.",
                        toml_path.display(),
                        e
                    );
                    TomlConfig::default()
                }
            },
            Err(_) => TomlConfig::default(),
        };

        let defaults = Config::default();
        Self {
            bind_address: resolve(ENV_BIND_ADDRESS, toml_config.bind_address, defaults.bind_address),
            signal_service_url: resolve(
                ENV_SIGNAL_URL,
                toml_config.signal_service_url,
                defaults.signal_service_url,
            ),
            lyrics_service_url: resolve(
                ENV_LYRICS_URL,
                toml_config.lyrics_service_url,
                defaults.lyrics_service_url,
            ),
            selection: toml_config.selection.unwrap_or_default(),
        }
    }
}

/// Single-value resolution: ENV wins over TOML wins over the default.
fn resolve(env_var: &str, toml_value: Option<String>, default: String) -> String {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            info!("{} set; overriding configuration", env_var);
            return value;
        }
    }
    toml_value.unwrap_or(default)
}
