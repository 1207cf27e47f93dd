use super::error::AppError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://35dee773a9ec441e9f38d5fc249406ce.api.mockbin.io";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,

    /// Fully resolved holdings endpoint (base URL joined with the path).
    pub holdings_url: Url,
    pub request_timeout: Option<Duration>,

    // Server startup knobs
    pub startup_fetch: bool,
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env()` but reads values through `lookup`, so callers
    /// (and tests) can supply their own source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let server_addr = get("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".into());

        let base_url = get("HOLDINGS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let path = get("HOLDINGS_PATH").unwrap_or_else(|| "/".into());
        let holdings_url = holdings_url(&base_url, &path)?;

        let request_timeout = match get("HOLDINGS_TIMEOUT_SECS") {
            None => None,
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|e| AppError::InvalidConfig {
                    key: "HOLDINGS_TIMEOUT_SECS",
                    message: format!("{e}"),
                })?;
                // 0 means "no timeout", same as leaving it unset.
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let startup_fetch = get("STARTUP_FETCH").map(|v| parse_bool(&v)).unwrap_or(true);
        let log_json = get("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            server_addr,
            holdings_url,
            request_timeout,
            startup_fetch,
            log_json,
        })
    }
}

fn holdings_url(base: &str, path: &str) -> Result<Url, AppError> {
    let base = Url::parse(base).map_err(|e| AppError::InvalidConfig {
        key: "HOLDINGS_BASE_URL",
        message: e.to_string(),
    })?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(AppError::InvalidConfig {
            key: "HOLDINGS_BASE_URL",
            message: format!("unsupported scheme {}", base.scheme()),
        });
    }

    base.join(path).map_err(|e| AppError::InvalidConfig {
        key: "HOLDINGS_PATH",
        message: e.to_string(),
    })
}

fn parse_bool(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}
