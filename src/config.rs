//! Server configuration from environment variables

use crate::types::*;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub draw_settings: DrawSettings,
    pub animation_type: AnimationType,
    pub theme: VisualTheme,
    pub refill: RefillThreshold,
    /// Fixed RNG seed for reproducible rehearsals
    pub seed: Option<u64>,
    pub completion_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            draw_settings: DrawSettings::default(),
            animation_type: AnimationType::default(),
            theme: VisualTheme::default(),
            refill: RefillThreshold::default(),
            seed: None,
            completion_grace: Duration::from_millis(1500),
        }
    }
}

impl ServerConfig {
    /// Load config from `LUCKYDRAW_*` environment variables. Invalid values
    /// are logged and replaced by defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let spin_duration_secs = env_or(
            "LUCKYDRAW_SPIN_DURATION",
            defaults.draw_settings.spin_duration_secs,
        );
        let spin_speed_ms = env_or("LUCKYDRAW_SPIN_SPEED", defaults.draw_settings.spin_speed_ms);

        let config = Self {
            bind_addr: env_or("LUCKYDRAW_BIND", defaults.bind_addr),
            draw_settings: DrawSettings {
                spin_duration_secs,
                spin_speed_ms,
            }
            .clamped(),
            animation_type: env_or("LUCKYDRAW_ANIMATION", defaults.animation_type),
            theme: env_or("LUCKYDRAW_THEME", defaults.theme),
            refill: env_parsed("LUCKYDRAW_REFILL", parse_refill).unwrap_or(defaults.refill),
            seed: env_or_none("LUCKYDRAW_SEED"),
            completion_grace: env_or_none("LUCKYDRAW_COMPLETION_GRACE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.completion_grace),
        };

        if config.seed.is_some() {
            tracing::warn!("LUCKYDRAW_SEED is set, draws are reproducible");
        }
        config
    }
}

pub fn parse_refill(value: &str) -> Result<RefillThreshold, String> {
    match value.to_ascii_lowercase().as_str() {
        "empty" => Ok(RefillThreshold::Empty),
        "last_one" | "lastone" | "last-one" => Ok(RefillThreshold::LastOne),
        other => Err(format!("expected 'empty' or 'last_one', got '{}'", other)),
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Parse an env var with `parse`, logging and discarding invalid values
fn env_parsed<T>(name: &'static str, parse: impl Fn(&str) -> Result<T, String>) -> Option<T> {
    let value = read_var(name)?;
    match parse(&value) {
        Ok(v) => Some(v),
        Err(reason) => {
            let err = ConfigError::InvalidValue {
                name,
                value,
                reason,
            };
            tracing::warn!("{}, using default", err);
            None
        }
    }
}

fn env_or_none<T>(name: &'static str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_parsed(name, |v| v.parse::<T>().map_err(|e| e.to_string()))
}

fn env_or<T>(name: &'static str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_none(name).unwrap_or(default)
}
