//! Runtime configuration read from the page URL (`?seed=42&debug=true`).

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_LOG_LINES: usize = 8;
pub const MAX_LOG_LINES: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid query parameter: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Recent game-log lines shown under the choices.
    pub log_lines: usize,
    /// Debug-level console logging.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            log_lines: DEFAULT_LOG_LINES,
            debug: false,
        }
    }
}

impl Config {
    /// Parse a URL query string, with or without the leading `?`.
    /// Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut map = Map::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, "true"));
            map.insert(key.to_string(), typed_value(raw));
        }
        let mut config: Config = serde_json::from_value(Value::Object(map))?;
        config.log_lines = config.log_lines.clamp(1, MAX_LOG_LINES);
        Ok(config)
    }

    /// Read the current page's query string.
    pub fn from_location() -> Result<Self, ConfigError> {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }

    /// Fall back to defaults on a bad query, handing the error back so it
    /// can be logged once the logger is up.
    pub fn resolve(result: Result<Self, ConfigError>) -> (Self, Option<ConfigError>) {
        match result {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Numbers and booleans become typed JSON values so serde can match them
/// against the field types; anything else stays a string.
fn typed_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<u64>() {
        return Value::from(n);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
