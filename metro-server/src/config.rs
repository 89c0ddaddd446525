//! Server configuration from environment variables.
//!
//! - `METRO_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `METRO_DATA_DIR`: where trip history and stats are written (default `.`)
//! - `METRO_CACHE_TTL_SECS`: route cache TTL (default 300)
//! - `METRO_CACHE_CAPACITY`: route cache size (default 1000)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;

/// An environment variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("."),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables
    /// take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get("METRO_BIND_ADDR") {
            Some(v) => parse("METRO_BIND_ADDR", &v)?,
            None => defaults.bind_addr,
        };

        let data_dir = get("METRO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let ttl = match get("METRO_CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(parse("METRO_CACHE_TTL_SECS", &v)?),
            None => defaults.cache.ttl,
        };

        let max_capacity = match get("METRO_CACHE_CAPACITY") {
            Some(v) => parse("METRO_CACHE_CAPACITY", &v)?,
            None => defaults.cache.max_capacity,
        };

        Ok(Self {
            bind_addr,
            data_dir,
            cache: CacheConfig { ttl, max_capacity },
        })
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
