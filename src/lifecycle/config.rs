//! Settings for the desk runtime.
//!
//! Resolution order: built-in defaults, then `product-desk.toml` if present,
//! then environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PRODUCT_DESK_API_URL` | `api_url` |
//! | `PRODUCT_DESK_TIMEOUT_SECS` | `request_timeout_secs` |
//! | `PRODUCT_DESK_BUFFER_SIZE` | `store_buffer_size` |

use std::path::Path;
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "product-desk.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Product collection endpoint. Without one the in-process store is used.
    pub api_url: Option<String>,
    pub request_timeout_secs: u64,
    /// Channel capacity of the in-process store.
    pub store_buffer_size: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: 10,
            store_buffer_size: 32,
        }
    }
}

impl DeskConfig {
    /// Reads `path` (a missing file is fine) and applies the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(raw)?.normalized()
    }

    /// Overrides fields from `lookup`, which maps a variable name to its value.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("PRODUCT_DESK_API_URL") {
            self.api_url = Some(v);
        }
        if let Some(v) = lookup("PRODUCT_DESK_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_number("PRODUCT_DESK_TIMEOUT_SECS", v)?;
        }
        if let Some(v) = lookup("PRODUCT_DESK_BUFFER_SIZE") {
            self.store_buffer_size = parse_number("PRODUCT_DESK_BUFFER_SIZE", v)?;
        }
        self.normalized()
    }

    /// Rejects values the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                value: "0".into(),
            });
        }
        if self.store_buffer_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "store_buffer_size",
                value: "0".into(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn normalized(mut self) -> Result<Self, ConfigError> {
        if self.api_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            self.api_url = None;
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
