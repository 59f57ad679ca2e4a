//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::cache::MAX_ENTRY_TTL;

/// Server configuration parameters.
///
/// Everything except `JWT_SECRET` has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database file (`:memory:` for a throwaway database)
    pub database_path: PathBuf,
    /// Shared secret used to verify HS256 bearer tokens
    pub jwt_secret: String,
    /// Lifetime of cached item representations, in seconds
    pub cache_ttl: u64,
    /// Maximum number of cached items
    pub cache_max_entries: usize,
    /// Cache cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DATABASE_PATH` - SQLite database file (default: inventory.db)
    /// - `JWT_SECRET` - Token signing secret (required)
    /// - `CACHE_TTL` - Item cache TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached items (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cache cleanup frequency in seconds (default: 60)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must be set to verify bearer tokens");
        }

        let cache_ttl = parse_or(&lookup, "CACHE_TTL", 3600)?;
        if cache_ttl > MAX_ENTRY_TTL.as_secs() {
            bail!(
                "CACHE_TTL must be at most {} seconds, got {}",
                MAX_ENTRY_TTL.as_secs(),
                cache_ttl
            );
        }

        Ok(Self {
            server_port: parse_or(&lookup, "SERVER_PORT", 8000)?,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("inventory.db")),
            jwt_secret,
            cache_ttl,
            cache_max_entries: parse_or(&lookup, "CACHE_MAX_ENTRIES", 1000)?,
            cleanup_interval: parse_or(&lookup, "CLEANUP_INTERVAL", 60)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.database_path, PathBuf::from("inventory.db"));
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_max_entries, 1000);
        assert_eq!(config.cleanup_interval, 60);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "9090"),
            ("DATABASE_PATH", ":memory:"),
            ("CACHE_TTL", "5"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 9090);
        assert_eq!(config.database_path, PathBuf::from(":memory:"));
        assert_eq!(config.cache_ttl, 5);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("JWT_SECRET", "  ")])).is_err());
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "eighty"),
        ]));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("SERVER_PORT"));
    }

    #[test]
    fn test_out_of_range_cache_ttl_is_rejected() {
        let max = u64::MAX.to_string();
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("CACHE_TTL", max.as_str()),
        ]));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("CACHE_TTL"));

        let limit = MAX_ENTRY_TTL.as_secs().to_string();
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("CACHE_TTL", limit.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.cache_ttl, MAX_ENTRY_TTL.as_secs());
    }
}
