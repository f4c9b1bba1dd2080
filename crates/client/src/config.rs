//! Client configuration, read once from the environment at startup.

use std::time::Duration;
use tracing::warn;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "SPRINTDECK_API_URL";

/// Environment variable overriding the per-request timeout, in milliseconds.
pub const ENV_API_TIMEOUT_MS: &str = "SPRINTDECK_API_TIMEOUT_MS";

/// Environment variable naming the credential token file. When unset, the
/// token lives in process memory only.
pub const ENV_TOKEN_FILE: &str = "SPRINTDECK_TOKEN_FILE";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto.
    pub base_url: String,

    /// Timeout applied to each outbound call.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = get(ENV_API_URL)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = match get(ENV_API_TIMEOUT_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) => ms,
                Err(_) => {
                    warn!("ignoring unparseable {}: {:?}", ENV_API_TIMEOUT_MS, raw);
                    DEFAULT_TIMEOUT_MS
                }
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn environment_overrides_apply() {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_API_URL => Some("https://tracker.internal:9443".to_string()),
            ENV_API_TIMEOUT_MS => Some("5000".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://tracker.internal:9443");
        assert_eq!(config.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn unparseable_timeout_falls_back() {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_API_TIMEOUT_MS => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.timeout, Duration::from_millis(30_000));
    }
}
