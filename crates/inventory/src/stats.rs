//! Item stats and the `key=value` text format used by creation forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// A single stat value: numeric when the input parsed as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    /// Coerce raw text: finite numbers become `Number`, anything else `Text`.
    pub fn coerce(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => StatValue::Number(n),
            _ => StatValue::Text(raw.to_string()),
        }
    }
}

impl core::fmt::Display for StatValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0".
            StatValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            StatValue::Number(n) => write!(f, "{n}"),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        StatValue::Number(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

/// Stat name → value. Keys are unique; order is not meaningful.
pub type Stats = BTreeMap<String, StatValue>;

/// Parse comma-separated `key=value` pairs.
///
/// Pieces without `=` or with an empty key are skipped. Keys and values are
/// trimmed; a value may itself contain `=`. Later duplicates win.
pub fn parse_stats(text: &str) -> Stats {
    let mut stats = Stats::new();
    for piece in text.split(',') {
        let Some((key, value)) = piece.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        stats.insert(key.to_string(), StatValue::coerce(value.trim()));
    }
    stats
}

/// Decode persisted stats, keeping whatever is readable.
///
/// `null` or a non-object decodes as no stats; entries whose value is not a
/// number or a string are skipped.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Stats, D::Error>
where
    D: Deserializer<'de>,
{
    let JsonValue::Object(raw) = JsonValue::deserialize(deserializer)? else {
        return Ok(Stats::new());
    };

    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            JsonValue::Number(n) => n.as_f64().map(|n| (key, StatValue::Number(n))),
            JsonValue::String(s) => Some((key, StatValue::Text(s))),
            _ => None,
        })
        .collect())
}

/// Render stats back into the `key=value` text format.
pub fn format_stats(stats: &Stats) -> String {
    stats
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
