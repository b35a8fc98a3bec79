use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::constants::{CHART_HEIGHT, CHART_WIDTH};
use crate::error::ConfigError;

pub const ENV_BIND_ADDR: &str = "PITCHVIZ_BIND_ADDR";
pub const ENV_CHART_WIDTH: &str = "PITCHVIZ_CHART_WIDTH";
pub const ENV_CHART_HEIGHT: &str = "PITCHVIZ_CHART_HEIGHT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "PITCHVIZ_MAX_UPLOAD_BYTES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub chart_width: u32,
    pub chart_height: u32,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            chart_width: CHART_WIDTH,
            chart_height: CHART_HEIGHT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parse_var(&lookup, ENV_BIND_ADDR)?.unwrap_or(defaults.bind_addr),
            chart_width: parse_positive(&lookup, ENV_CHART_WIDTH)?.unwrap_or(defaults.chart_width),
            chart_height: parse_positive(&lookup, ENV_CHART_HEIGHT)?
                .unwrap_or(defaults.chart_height),
            max_upload_bytes: parse_var(&lookup, ENV_MAX_UPLOAD_BYTES)?
                .unwrap_or(defaults.max_upload_bytes),
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|err| ConfigError::InvalidValue {
            name,
            value: value.clone(),
            reason: err.to_string(),
        })
}

fn parse_positive<F>(lookup: &F, name: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<u32, F>(lookup, name)? {
        Some(0) => Err(ConfigError::InvalidValue {
            name,
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}
