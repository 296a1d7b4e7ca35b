//! Server configuration loading and validation.
//!
//! The configuration file is a JSON object in the format used by
//! `ss-server`/`ss-local`:
//!
//! ```json
//! {
//!     "server": "1.2.3.4",
//!     "server_port": 8388,
//!     "password": "hunter2",
//!     "method": "aes-256-gcm"
//! }
//! ```
//!
//! Extra keys (`local_port`, `timeout`, ...) are ignored.

use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Raw parsed configuration record.
pub type ConfigRecord = Map<String, Value>;

pub const KEY_METHOD: &str = "method";
pub const KEY_PASSWORD: &str = "password";
pub const KEY_SERVER: &str = "server";
pub const KEY_SERVER_PORT: &str = "server_port";

/// Errors that can occur while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file {} does not contain a JSON object", path.display())]
    NotARecord { path: PathBuf },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Server port, kept with the digits it was written with.
///
/// A config string `"0443"` stays `0443` in the URL; a JSON number is
/// rendered in plain decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    value: u16,
    text: String,
}

impl Port {
    /// Parses a string of ASCII decimal digits that fits in a `u16`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = text.parse::<u16>().ok()?;
        Some(Self {
            value,
            text: text.to_string(),
        })
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }
}

impl PartialEq<u16> for Port {
    fn eq(&self, other: &u16) -> bool {
        self.value == *other
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Connection parameters of a single server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Cipher name, passed through as-is.
    pub method: String,
    /// Empty when the password is excluded.
    pub password: String,
    /// Host name or address. Also the base name of written images.
    pub server: String,
    pub server_port: Port,
}

impl ServiceConfig {
    /// Loads and validates a configuration file.
    pub fn load<P: AsRef<Path>>(path: P, include_password: bool) -> Result<Self, ConfigError> {
        let record = load_record(path)?;
        Self::from_record(&record, include_password)
    }

    /// Builds a config from a parsed record.
    ///
    /// Keys are checked in the order `method`, `password`, `server`,
    /// `server_port`, and the first absent one is reported. `password` is
    /// only required (and only read) when `include_password` is set; an
    /// absent password is an error, never an implicit empty string.
    pub fn from_record(record: &ConfigRecord, include_password: bool) -> Result<Self, ConfigError> {
        let method = string_field(record, KEY_METHOD)?;
        let password = if include_password {
            string_field(record, KEY_PASSWORD)?
        } else {
            String::new()
        };
        let server = string_field(record, KEY_SERVER)?;
        if server.is_empty() {
            return Err(ConfigError::InvalidField {
                field: KEY_SERVER,
                reason: "must not be empty".to_string(),
            });
        }
        let server_port = port_field(record)?;

        Ok(Self {
            method,
            password,
            server,
            server_port,
        })
    }

    /// Returns a copy with the password blanked.
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// Reads a file and parses it as a JSON object.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// The top-level object, unvalidated. Use [`ServiceConfig::from_record`]
/// to check the required keys.
pub fn load_record<P: AsRef<Path>>(path: P) -> Result<ConfigRecord, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read config file");

    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(record) => Ok(record),
        _ => Err(ConfigError::NotARecord {
            path: path.to_path_buf(),
        }),
    }
}

fn string_field(record: &ConfigRecord, key: &'static str) -> Result<String, ConfigError> {
    match record.get(key) {
        None => Err(ConfigError::MissingField(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ConfigError::InvalidField {
            field: key,
            reason: format!("expected a string, found {}", json_type(other)),
        }),
    }
}

fn port_field(record: &ConfigRecord) -> Result<Port, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidField {
        field: KEY_SERVER_PORT,
        reason,
    };

    match record.get(KEY_SERVER_PORT) {
        None => Err(ConfigError::MissingField(KEY_SERVER_PORT)),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .map(Port::from)
            .ok_or_else(|| invalid(format!("{} is not a port number", n))),
        Some(Value::String(s)) => {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("{:?} is not a decimal number", s)));
            }
            Port::parse(s).ok_or_else(|| invalid(format!("{} is out of range", s)))
        }
        Some(other) => Err(invalid(format!(
            "expected a number or numeric string, found {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
