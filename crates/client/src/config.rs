//! Client configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

pub const API_URL_ENV: &str = "RETAILOPS_API_URL";
pub const TIMEOUT_ENV: &str = "RETAILOPS_TIMEOUT_SECS";
pub const STALE_ENV: &str = "RETAILOPS_STALE_SECS";
pub const STORAGE_PATH_ENV: &str = "RETAILOPS_STORAGE_PATH";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STALE_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API root, without trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// How long a successful query result is served without refetching.
    pub stale_time: Duration,
    /// SQLite file for persisted client state.
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url.into()),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            stale_time: Duration::from_secs(DEFAULT_STALE_SECS),
            storage_path: default_storage_path(),
        }
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Read `RETAILOPS_*` variables, falling back to defaults.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let api_base_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "{API_URL_ENV} must be an http(s) URL, got '{api_base_url}'"
            )));
        }

        let request_timeout = secs(&lookup, TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS)?;
        if request_timeout.is_zero() {
            return Err(ClientError::Config(format!("{TIMEOUT_ENV} must be > 0")));
        }
        let stale_time = secs(&lookup, STALE_ENV, DEFAULT_STALE_SECS)?;

        let storage_path = lookup(STORAGE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_path);

        Ok(Self {
            api_base_url: normalize_base_url(api_base_url),
            request_timeout,
            stale_time,
            storage_path,
        })
    }
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> ClientResult<Duration> {
    match lookup(name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ClientError::Config(format!("{name}='{raw}': {e}"))),
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `{app_data_dir}/retailops/client.db`.
fn default_storage_path() -> PathBuf {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .unwrap_or_else(std::env::temp_dir);
    dir.push("retailops");
    dir.push("client.db");
    dir
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.storage_path.ends_with("retailops/client.db"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config =
            ClientConfig::from_lookup(lookup(&[(API_URL_ENV, "https://pos.example.com/api/")])).unwrap();
        assert_eq!(config.api_base_url, "https://pos.example.com/api");
    }

    #[test]
    fn invalid_numbers_are_config_errors() {
        let err = ClientConfig::from_lookup(lookup(&[(STALE_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(API_URL_ENV, "ftp://x")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
