use std::env;
use std::time::Duration;

use crate::error::{AdError, Result};
use crate::logger::LogLevel;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_ENDPOINT: &str = "/generate_ad";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
    pub log_json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            log_level: LogLevel::Info,
            log_file: None,
            log_json: false,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `ADFORGE_*` variables; anything missing or unparsable keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend_url = env::var("ADFORGE_BACKEND_URL")
            .or_else(|_| env::var("BACKEND_URL"))
            .unwrap_or(defaults.backend_url);
        let endpoint = env::var("ADFORGE_ENDPOINT").unwrap_or(defaults.endpoint);
        let timeout = env::var("ADFORGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let log_level = env::var("ADFORGE_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);
        let log_file = env::var("ADFORGE_LOG_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty());
        let log_json = env::var("ADFORGE_LOG_JSON")
            .ok()
            .map_or(false, |val| val == "true" || val == "1");

        ClientConfig {
            backend_url,
            endpoint,
            timeout,
            log_level,
            log_file,
            log_json,
        }
        .normalized()
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self.normalized()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self.normalized()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Full URL the generate request is POSTed to.
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.backend_url, self.endpoint)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(AdError::Config("backend URL is required".into()));
        }
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://")
        {
            return Err(AdError::Config(format!(
                "backend URL must start with http:// or https://, got {}",
                self.backend_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(AdError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.backend_url = self.backend_url.trim().trim_end_matches('/').to_string();
        let endpoint = self.endpoint.trim();
        self.endpoint = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{}", endpoint)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.generate_url(), "http://localhost:5000/generate_ad");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn url_and_endpoint_are_normalized() {
        let config = ClientConfig::new()
            .with_backend_url("http://192.168.0.36:5000/")
            .with_endpoint("generate_ad");
        assert_eq!(config.generate_url(), "http://192.168.0.36:5000/generate_ad");
    }

    #[test]
    fn rejects_empty_url() {
        let config = ClientConfig::new().with_backend_url("  ");
        assert!(matches!(config.validate(), Err(AdError::Config(_))));
    }

    #[test]
    fn rejects_url_without_scheme() {
        let config = ClientConfig::new().with_backend_url("localhost:5000");
        assert!(matches!(config.validate(), Err(AdError::Config(_))));
    }

    // Single test: the env is process-wide and tests run in parallel.
    #[test]
    fn from_env_resolution() {
        let vars = [
            "ADFORGE_BACKEND_URL",
            "BACKEND_URL",
            "ADFORGE_ENDPOINT",
            "ADFORGE_TIMEOUT_SECS",
            "ADFORGE_LOG_LEVEL",
            "ADFORGE_LOG_FILE",
            "ADFORGE_LOG_JSON",
        ];
        for var in vars {
            env::remove_var(var);
        }

        let config = ClientConfig::from_env();
        assert_eq!(config.generate_url(), "http://localhost:5000/generate_ad");
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_file, None);
        assert!(!config.log_json);

        env::set_var("BACKEND_URL", "http://proxy:5000/");
        env::set_var("ADFORGE_TIMEOUT_SECS", "0");
        env::set_var("ADFORGE_LOG_LEVEL", "warning");
        let config = ClientConfig::from_env();
        assert_eq!(config.backend_url, "http://proxy:5000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, LogLevel::Warn);

        env::set_var("ADFORGE_BACKEND_URL", "http://192.168.0.36:5000//");
        env::set_var("ADFORGE_ENDPOINT", "ads/generate");
        env::set_var("ADFORGE_TIMEOUT_SECS", "abc");
        env::set_var("ADFORGE_LOG_FILE", "/tmp/adforge.log");
        env::set_var("ADFORGE_LOG_JSON", "true");
        let config = ClientConfig::from_env();
        assert_eq!(config.generate_url(), "http://192.168.0.36:5000/ads/generate");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/adforge.log"));
        assert!(config.log_json);

        env::set_var("ADFORGE_TIMEOUT_SECS", " 12 ");
        assert_eq!(ClientConfig::from_env().timeout, Duration::from_secs(12));

        for var in vars {
            env::remove_var(var);
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ClientConfig::new().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
