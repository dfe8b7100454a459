use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "software@example.com";

#[derive(Clone, Debug)]
pub struct FilingsConfig {
    pub api_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FilingsConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FilingsConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup` so tests need not touch the process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup("SEC_FILINGS_API_URL") {
            Some(raw) => Self::parse_api_url(&raw)?,
            None => Url::parse(DEFAULT_API_URL)?,
        };

        let timeout = match lookup("SEC_FILINGS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    anyhow!("SEC_FILINGS_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw)
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let user_agent = lookup("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            api_url,
            timeout,
            user_agent,
        })
    }

    pub fn parse_api_url(raw: &str) -> Result<Url> {
        let url = Url::parse(raw.trim())
            .map_err(|e| anyhow!("Invalid SEC filings API URL '{}': {}", raw, e))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!("SEC filings API URL '{}' cannot be used as a base", raw));
        }
        Ok(url)
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<FilingsConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FilingsConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "software@example.com");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("SEC_FILINGS_API_URL", "https://filings.example.com"),
            ("SEC_FILINGS_TIMEOUT_SECS", "3"),
            ("USER_AGENT", "me@example.com"),
        ])
        .unwrap();
        assert_eq!(config.api_url.host_str(), Some("filings.example.com"));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "me@example.com");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("SEC_FILINGS_API_URL", "not a url")]).is_err());
        assert!(config_from(&[("SEC_FILINGS_API_URL", "mailto:x@example.com")]).is_err());
        assert!(config_from(&[("SEC_FILINGS_TIMEOUT_SECS", "ten")]).is_err());
    }
}
