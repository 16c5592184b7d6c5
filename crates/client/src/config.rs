//! Client configuration loaded from environment variables.

/// Configuration for an [`ApiClient`](crate::http::ApiClient).
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://api.example.com` (default:
    /// `http://localhost:3000`).
    pub base_url: String,
    /// Path prefix every endpoint is nested under (default: `/api`).
    pub api_prefix: String,
    /// Per-request timeout in seconds (default: `30`). A request exceeding
    /// this is surfaced as a normalized status-500 failure.
    pub request_timeout_secs: u64,
}

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `API_BASE_URL`         | `http://localhost:3000` |
    /// | `API_PREFIX`           | `/api`                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let api_prefix = std::env::var("API_PREFIX").unwrap_or_else(|_| "/api".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_prefix,
            request_timeout_secs,
        }
    }

    /// Build a config pointing at an explicit origin, keeping the default
    /// prefix and timeout. Mostly useful for tests and tools.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: "/api".into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Full URL for an endpoint path, e.g. `endpoint("/users")` →
    /// `http://localhost:3000/api/users`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_prefix_and_path() {
        let config = ClientConfig {
            base_url: "http://localhost:3000".into(),
            api_prefix: "/api".into(),
            request_timeout_secs: 30,
        };
        assert_eq!(config.endpoint("/users"), "http://localhost:3000/api/users");
        assert_eq!(
            config.endpoint("/users/7"),
            "http://localhost:3000/api/users/7"
        );
    }

    #[test]
    fn for_base_url_applies_defaults() {
        let config = ClientConfig::for_base_url("http://127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(
            config.endpoint("/protected"),
            "http://127.0.0.1:8080/api/protected"
        );
    }
}
