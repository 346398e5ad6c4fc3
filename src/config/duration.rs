//! Serde `with` module for human-readable durations such as "500ms", "10s", "1h".

use serde::{self, Deserialize, Deserializer};
use std::time::Duration;

/// Recognised unit suffixes and their length in seconds.
const UNITS: &[(&str, f64)] = &[
    ("ms", 1e-3),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3600.0),
    ("d", 86400.0),
];

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

/// Parses "<number><unit>"; a bare number is taken as seconds.
pub(crate) fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Duration::ZERO);
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let unit = unit.trim();

    let seconds_per_unit = if unit.is_empty() {
        1.0
    } else {
        UNITS
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, secs)| *secs)
            .ok_or_else(|| format!("unknown duration unit: {}", unit))?
    };

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration number: {}", number))?;

    Duration::try_from_secs_f64(value * seconds_per_unit)
        .map_err(|e| format!("duration out of range: {}: {}", s, e))
}
