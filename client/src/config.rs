//! Client configuration

use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default prefix of the auth routes
pub const DEFAULT_AUTH_PREFIX: &str = "/api/v1/auth";

/// Where the API lives and how long to wait for it
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Prefix of the auth routes
    pub auth_prefix: String,
    pub http_timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_prefix: DEFAULT_AUTH_PREFIX.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Reads `API_BASE_URL`, falling back to `http://localhost:8080`
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        Self::new(base_url)
    }

    #[must_use]
    pub fn with_auth_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.auth_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Absolute URL for a path relative to the base
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Absolute URL of an auth route such as `refresh-token`
    pub fn auth_url(&self, route: &str) -> String {
        self.url(&format!(
            "{}/{}",
            self.auth_prefix.trim_end_matches('/'),
            route.trim_start_matches('/')
        ))
    }

    pub fn refresh_url(&self) -> String {
        self.auth_url("refresh-token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.url("/health"), "http://localhost:8080/health");
        assert_eq!(config.url("health"), "http://localhost:8080/health");
    }

    #[test]
    fn test_refresh_url() {
        let config = ClientConfig::new("http://api.test");
        assert_eq!(
            config.refresh_url(),
            "http://api.test/api/v1/auth/refresh-token"
        );

        let custom = ClientConfig::new("http://api.test").with_auth_prefix("/auth/");
        assert_eq!(custom.auth_url("/me"), "http://api.test/auth/me");
    }

    #[test]
    fn test_builder_sets_timeout() {
        let config = ClientConfig::new("http://api.test").with_http_timeout(Duration::from_secs(2));
        assert_eq!(config.http_timeout, Duration::from_secs(2));
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }
}
