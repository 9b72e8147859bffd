use std::env;
use std::time::Duration;

use crate::utils::pagination::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    /// `None` keeps the transport default (no timeout)
    pub request_timeout: Option<Duration>,
    pub default_page_size: usize,
    pub profile: String,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let api_url = env::var("CATALOG_API_URL")
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            profile,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            profile: "default".to_string(),
        }
    }
}
