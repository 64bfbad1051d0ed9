//! # Server Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PORT=4000  SHOELAB_DB_PATH=/data/shoelab.db                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $SHOELAB_CONFIG, or ./shoelab.toml if present                      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     port 3000, ./shoelab.db, rules enforced                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shoelab.toml
//! port = 3000
//! bind_addr = "0.0.0.0"
//! database_path = "./shoelab.db"
//! port_retries = 10
//! enforce_rules = true
//! seed_on_empty = true
//! currency = "USD"
//! locale = "en-US"
//! cors_origins = ["http://localhost:5173"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use shoelab_core::pricing::{try_format_price, DEFAULT_CURRENCY, DEFAULT_LOCALE};

/// Config file picked up from the working directory when no path is given.
const DEFAULT_CONFIG_FILE: &str = "shoelab.toml";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// First port to try.
    pub port: u16,

    /// Interface to bind (default: 0.0.0.0 for all interfaces).
    pub bind_addr: String,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// How many successive ports to try when the port is taken.
    pub port_retries: u16,

    /// Reject saves whose configuration has blocking violations.
    pub enforce_rules: bool,

    /// Insert the demo shoe when the table is empty at startup.
    pub seed_on_empty: bool,

    /// Currency code for price labels.
    pub currency: String,

    /// Locale tag for price labels.
    pub locale: String,

    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            bind_addr: "0.0.0.0".to_string(),
            database_path: PathBuf::from("./shoelab.db"),
            port_retries: 10,
            enforce_rules: true,
            seed_on_empty: true,
            currency: DEFAULT_CURRENCY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration: defaults, then the config file, then the
    /// process environment.
    ///
    /// An explicitly named file (argument or `SHOELAB_CONFIG`) must exist;
    /// `./shoelab.toml` is optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.or_else(|| std::env::var("SHOELAB_CONFIG").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Keys it omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading server config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Unparseable values are errors, not silently ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = parse_value("PORT", &port)?;
            debug!(port = self.port, "Overriding port from environment");
        }

        if let Some(addr) = lookup("SHOELAB_BIND_ADDR") {
            self.bind_addr = addr;
        }

        if let Some(path) = lookup("SHOELAB_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = PathBuf::from(path);
        }

        if let Some(retries) = lookup("SHOELAB_PORT_RETRIES") {
            self.port_retries = parse_value("SHOELAB_PORT_RETRIES", &retries)?;
        }

        if let Some(enforce) = lookup("SHOELAB_ENFORCE_RULES") {
            self.enforce_rules = parse_bool("SHOELAB_ENFORCE_RULES", &enforce)?;
        }

        if let Some(seed) = lookup("SHOELAB_SEED") {
            self.seed_on_empty = parse_bool("SHOELAB_SEED", &seed)?;
        }

        if let Some(currency) = lookup("SHOELAB_CURRENCY") {
            self.currency = currency;
        }

        if let Some(locale) = lookup("SHOELAB_LOCALE") {
            self.locale = locale;
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// A currency or locale without formatting rules is accepted with a
    /// warning; labels then use the `$<amount>.00` fallback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("database_path".to_string()));
        }

        if self.currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue("currency".to_string()));
        }

        if let Err(e) = try_format_price(0, &self.currency, &self.locale) {
            warn!(error = %e, "Price labels will use the fallback format");
        }

        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
