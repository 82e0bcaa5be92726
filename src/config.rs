use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "OPPDESK_API_URL";
pub const API_TIMEOUT_ENV: &str = "OPPDESK_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Resolves from the process environment; `url_override` (the `--api-url` flag) wins.
    pub fn resolve(url_override: Option<&str>) -> Self {
        Self::resolve_with(url_override, |key| std::env::var(key).ok())
    }

    pub fn resolve_with(
        url_override: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let base_url = url_override
            .map(str::to_string)
            .or_else(|| lookup(API_URL_ENV))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = lookup(API_TIMEOUT_ENV)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_to_local_development_endpoint() {
        let cfg = ClientConfig::resolve_with(None, env(&[]));
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.base_url, "http://localhost:8000");
    }

    #[test]
    fn env_overrides_default_and_flag_overrides_env() {
        let lookup = env(&[(API_URL_ENV, "http://api.internal:9000/")]);
        let cfg = ClientConfig::resolve_with(None, &lookup);
        assert_eq!(cfg.base_url, "http://api.internal:9000");

        let cfg = ClientConfig::resolve_with(Some("http://127.0.0.1:1"), &lookup);
        assert_eq!(cfg.base_url, "http://127.0.0.1:1");
    }

    #[test]
    fn blank_url_and_bad_timeout_fall_back() {
        let cfg = ClientConfig::resolve_with(
            None,
            env(&[(API_URL_ENV, "   "), (API_TIMEOUT_ENV, "soon")]),
        );
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(10));

        let cfg = ClientConfig::resolve_with(None, env(&[(API_TIMEOUT_ENV, "3")]));
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }
}
