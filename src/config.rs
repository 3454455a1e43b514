//! Configuration Module
//!
//! Handles loading server and cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

// == Cache Backend ==
/// Which cache backend the binary wires behind the product cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Remote Redis-compatible store
    Redis,
    /// In-process store with TTL and LRU eviction
    Memory,
    /// Every read misses, every write is dropped
    None,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" | "in-memory" => Ok(Self::Memory),
            "none" | "noop" | "off" => Ok(Self::None),
            _ => Err(format!("Unknown cache backend: {value}")),
        }
    }
}

// == Cache Settings ==
/// Policy knobs consumed by `ProductCache`.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Master switch; when false every call goes straight to the inner store
    pub enabled: bool,
    /// Expiry applied to every entry the cache writes
    pub default_ttl: Duration,
    /// Namespace prepended to every stored key
    pub key_prefix: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: Duration::from_secs(300),
            key_prefix: None,
        }
    }
}

// == Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether the product cache is active
    pub cache_enabled: bool,
    /// Default TTL in seconds for cached products and pages
    pub default_ttl: u64,
    /// Optional key namespace shared by every generated key
    pub key_prefix: Option<String>,
    /// Backend selected at startup
    pub cache_backend: CacheBackend,
    /// Redis connection URL
    pub redis_url: String,
    /// Upper bound for a single Redis command, in milliseconds
    pub redis_timeout_ms: u64,
    /// Maximum number of entries the in-memory backend can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// In-memory backend cleanup interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Master cache switch, true/false, 1/0, yes/no or on/off (default: true)
    /// - `CACHE_DEFAULT_TTL` - Entry TTL in seconds (default: 300)
    /// - `CACHE_KEY_PREFIX` - Key namespace (default: none)
    /// - `CACHE_BACKEND` - `redis`, `memory` or `none` (default: memory)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `REDIS_OPERATION_TIMEOUT_MS` - Per-command timeout (default: 500)
    /// - `MAX_ENTRIES` - In-memory backend capacity (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_enabled: parse_flag("CACHE_ENABLED").unwrap_or(defaults.cache_enabled),
            default_ttl: parse_var("CACHE_DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            key_prefix: env::var("CACHE_KEY_PREFIX")
                .ok()
                .filter(|prefix| !prefix.trim().is_empty()),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            redis_timeout_ms: parse_var("REDIS_OPERATION_TIMEOUT_MS")
                .unwrap_or(defaults.redis_timeout_ms),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Cache policy derived from this configuration.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            enabled: self.cache_enabled,
            default_ttl: Duration::from_secs(self.default_ttl),
            key_prefix: self.key_prefix.clone(),
        }
    }

    /// Redis per-command timeout as a Duration.
    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            default_ttl: 300,
            key_prefix: None,
            cache_backend: CacheBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            redis_timeout_ms: 500,
            max_entries: 10_000,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(name, value = %raw, "Ignoring unparseable environment variable, using default");
    }
    parsed
}

fn parse_flag(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    let parsed = flag_value(&raw);
    if parsed.is_none() {
        warn!(name, value = %raw, "Ignoring unrecognized switch value, using default");
    }
    parsed
}

/// Reads common on/off spellings, case-insensitively.
fn flag_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
