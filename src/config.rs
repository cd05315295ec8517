//! Client configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload-document";
pub const DEFAULT_QUERY_PATH: &str = "/query-rag";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
    #[error("invalid value '{value}' for {var}: expected a positive whole number of seconds")]
    InvalidNumber { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub upload_path: String,
    pub query_path: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Defaults for everything but the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not http(s).
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            upload_path: DEFAULT_UPLOAD_PATH.to_owned(),
            query_path: DEFAULT_QUERY_PATH.to_owned(),
            timeouts: Timeouts::default(),
        })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `RAG_BASE_URL`: default `http://127.0.0.1:5001`
    /// - `RAG_UPLOAD_PATH`: default `/upload-document`
    /// - `RAG_QUERY_PATH`: default `/query-rag`
    /// - `RAG_REQUEST_TIMEOUT_SECS`: default 120
    /// - `RAG_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base URL is not http(s) or a timeout
    /// is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&env_or("RAG_BASE_URL", DEFAULT_BASE_URL))?;
        let upload_path = normalize_path(&env_or("RAG_UPLOAD_PATH", DEFAULT_UPLOAD_PATH));
        let query_path = normalize_path(&env_or("RAG_QUERY_PATH", DEFAULT_QUERY_PATH));
        let timeouts = Timeouts {
            request_secs: env_parse_secs("RAG_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_secs("RAG_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { base_url, upload_path, query_path, timeouts })
    }

    /// Replace the base URL, keeping paths and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not http(s).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Replace the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] if `secs` is zero.
    pub fn with_request_timeout(mut self, secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::InvalidNumber { var: "--timeout-secs".to_owned(), value: secs.to_string() });
        }
        self.timeouts.request_secs = secs;
        Ok(self)
    }

    #[must_use]
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, self.upload_path)
    }

    #[must_use]
    pub fn query_url(&self) -> String {
        format!("{}{}", self.base_url, self.query_path)
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_owned(),
        _ => default.to_owned(),
    }
}

/// Zero is rejected: reqwest would fail every request immediately.
fn env_parse_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidNumber { var: key.to_owned(), value: raw }),
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

fn normalize_path(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_owned()
    } else {
        format!("/{raw}")
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
