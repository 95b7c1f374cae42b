//! Lookup options and keyword-argument validation.
//!
//! Hosts hand the resolver an untyped keyword mapping (template call
//! arguments, `-o key=value` CLI flags). [`LookupOptions::merge_kwargs`]
//! turns it into a typed value, rejecting unknown keys and ill-typed values
//! before anything touches the secret store.

use std::collections::HashMap;
use tera::Value;

use crate::error::ConfigurationError;

/// Default generated secret length.
pub const DEFAULT_LENGTH: u32 = 32;

/// The option keys a lookup accepts.
pub const VALID_OPTIONS: &[&str] = &["length", "symbols", "regenerate", "list"];

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Options shared by every term of one resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Length of generated secrets.
    pub length: u32,
    /// Ask the generator to include symbols.
    pub symbols: bool,
    /// Force-generate before retrieving.
    pub regenerate: bool,
    /// List secret names under the path instead of retrieving a value.
    pub list: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            symbols: false,
            regenerate: false,
            list: false,
        }
    }
}

impl LookupOptions {
    /// Validate a keyword mapping, filling missing keys from `self`.
    ///
    /// All unknown keys are reported together, sorted, before any value is
    /// looked at.
    pub fn merge_kwargs(self, kwargs: &HashMap<String, Value>) -> Result<Self, ConfigurationError> {
        let mut unknown: Vec<&str> = kwargs
            .keys()
            .map(String::as_str)
            .filter(|key| !VALID_OPTIONS.contains(key))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(ConfigurationError::UnknownOptions {
                hint: suggestion_hint(&unknown),
                keys: unknown.into_iter().map(str::to_string).collect(),
            });
        }

        let mut options = self;
        if let Some(value) = kwargs.get("length") {
            options.length = parse_length(value)?;
        }
        if let Some(value) = kwargs.get("symbols") {
            options.symbols = parse_bool("symbols", value)?;
        }
        if let Some(value) = kwargs.get("regenerate") {
            options.regenerate = parse_bool("regenerate", value)?;
        }
        if let Some(value) = kwargs.get("list") {
            options.list = parse_bool("list", value)?;
        }
        Ok(options)
    }
}

/// Build a ` (did you mean ...?)` suffix for keys close to a valid option.
fn suggestion_hint(unknown: &[&str]) -> String {
    let suggestions: Vec<String> = unknown
        .iter()
        .filter_map(|key| {
            VALID_OPTIONS
                .iter()
                .map(|valid| (*valid, strsim::jaro_winkler(key, valid)))
                .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(valid, _)| format!("`{key}` -> `{valid}`"))
        })
        .collect();

    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

fn parse_length(value: &Value) -> Result<u32, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidValue {
        key: "length".to_string(),
        reason,
    };

    let length = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| invalid(format!("expected a positive integer, got {n}")))?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(format!("expected a positive integer, got {s:?}")))?,
        other => return Err(invalid(format!("expected a positive integer, got {other}"))),
    };

    if length == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    u32::try_from(length).map_err(|_| invalid(format!("{length} is too large")))
}

/// Accepts booleans, `0`/`1`, and the usual yes/no spellings.
fn parse_bool(key: &str, value: &Value) -> Result<bool, ConfigurationError> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" | "1" | "y" => Some(true),
            "no" | "false" | "off" | "0" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    };

    parsed.ok_or_else(|| ConfigurationError::InvalidValue {
        key: key.to_string(),
        reason: format!("expected a boolean, got {value}"),
    })
}
