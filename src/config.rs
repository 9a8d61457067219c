//! Application configuration loaded from environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::ServiceError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Build Metadata ===
    /// Commit the binary was built from.
    #[serde(default = "default_build_commit")]
    pub build_commit: String,

    /// Build timestamp.
    #[serde(default = "default_build_time")]
    pub build_time: String,

    /// Release tag.
    #[serde(default = "default_build_tag")]
    pub build_tag: String,

    // === HTTP Server ===
    /// Time allowed to read a request.
    #[serde(
        default = "default_read_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub server_read_timeout: Duration,

    /// Time allowed to produce a response. Used as the per-request lookup deadline.
    #[serde(
        default = "default_write_timeout",
        deserialize_with = "deserialize_duration",
        alias = "server_write_timetout"
    )]
    pub server_write_timeout: Duration,

    /// Keep-alive idle time.
    #[serde(
        default = "default_idle_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub server_idle_timeout: Duration,

    /// Upper bound on draining in-flight requests at shutdown.
    #[serde(
        default = "default_shutdown_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub server_shutdown_timeout: Duration,

    /// Bind address of the API listener.
    #[serde(default = "default_api_host")]
    pub server_api_host: String,

    /// Bind address reserved for debug tooling.
    #[serde(default = "default_debug_host")]
    pub server_debug_host: String,
}

fn default_build_commit() -> String {
    "sha256 some number".to_string()
}

fn default_build_time() -> String {
    "2024-09-22T13:44:51.662-0300".to_string()
}

fn default_build_tag() -> String {
    "1.0.0".to_string()
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_write_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_api_host() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_debug_host() -> String {
    "0.0.0.0:4000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_commit: default_build_commit(),
            build_time: default_build_time(),
            build_tag: default_build_tag(),
            server_read_timeout: default_read_timeout(),
            server_write_timeout: default_write_timeout(),
            server_idle_timeout: default_idle_timeout(),
            server_shutdown_timeout: default_shutdown_timeout(),
            server_api_host: default_api_host(),
            server_debug_host: default_debug_host(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading `env_file` first.
    ///
    /// A missing env file is not an error; a malformed one is.
    pub fn load(env_file: &Path) -> Result<Self, ServiceError> {
        match dotenvy::from_path(env_file) {
            Ok(()) => {}
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ServiceError::EnvFile(e)),
        }

        Ok(envy::from_env()?)
    }

    /// Build configuration from explicit key/value pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.server_api_host.trim().is_empty() {
            return Err("SERVER_API_HOST is required".to_string());
        }

        if self.server_write_timeout.is_zero() {
            return Err("SERVER_WRITE_TIMEOUT must be greater than zero".to_string());
        }

        if self.server_shutdown_timeout.is_zero() {
            return Err("SERVER_SHUTDOWN_TIMEOUT must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Parse a duration like `5s`, `1.5s`, `250ms` or `1m30s`.
///
/// Each component is a decimal number with an optional fraction followed by
/// a unit: `ns`, `us`, `ms`, `s`, `m`, `h`. A leading `+` and a bare `0` are
/// allowed. Negative durations are rejected. Fraction digits beyond the 18th
/// are truncated.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let trimmed = input.trim();
    let s = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if s.starts_with('-') {
        return Err(format!("negative duration {input:?}"));
    }
    if s.is_empty() {
        return Err(format!("invalid duration {input:?}"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let out_of_range = || format!("duration {input:?} out of range");
    let mut total_nanos: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(format!("invalid duration {input:?}"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let unit_nanos: u128 = match unit {
            "" => return Err(format!("missing unit in duration {input:?}")),
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            other => return Err(format!("unknown unit {other:?} in duration {input:?}")),
        };

        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        let fraction = fraction.get(..18).unwrap_or(fraction);
        let fraction_nanos = if fraction.is_empty() {
            0
        } else {
            let digits: u128 = fraction.parse().map_err(|_| out_of_range())?;
            let scale = fraction
                .chars()
                .fold(1u128, |scale, _| scale.saturating_mul(10));
            digits * unit_nanos / scale
        };

        let part = whole_value
            .checked_mul(unit_nanos)
            .and_then(|n| n.checked_add(fraction_nanos))
            .ok_or_else(out_of_range)?;
        total_nanos = total_nanos.checked_add(part).ok_or_else(out_of_range)?;
        rest = next;
    }

    let secs = u64::try_from(total_nanos / 1_000_000_000).map_err(|_| out_of_range())?;
    let nanos = u32::try_from(total_nanos % 1_000_000_000).map_err(|_| out_of_range())?;
    Ok(Duration::new(secs, nanos))
}

/// Split a leading run of ASCII digits from `s`.
fn split_digits(s: &str) -> (&str, &str) {
    let len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(len)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}
