//! Control-plane configuration
//!
//! Polling periods and the manager connection are configurable so tests and
//! deployments can tune them; the defaults match the dashboard cadence.

use std::time::Duration;

/// Control-plane configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Process manager base URL (e.g., "http://localhost:8000")
    pub manager_url: String,

    /// Job status poll period while a job is running
    pub fast_poll: Duration,

    /// Job status poll period while idle
    pub slow_poll: Duration,

    /// Leader service poll period, independent of job state
    pub leader_poll: Duration,
}

impl Config {
    /// Creates a new configuration with default periods
    pub fn new(manager_url: impl Into<String>) -> Self {
        Self {
            manager_url: manager_url.into(),
            fast_poll: Duration::from_millis(1500),
            slow_poll: Duration::from_millis(3000),
            leader_poll: Duration::from_millis(5000),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - RIGSTUDIO_MANAGER_URL (required)
    /// - RIGSTUDIO_FAST_POLL_MS (optional, default: 1500)
    /// - RIGSTUDIO_SLOW_POLL_MS (optional, default: 3000)
    /// - RIGSTUDIO_LEADER_POLL_MS (optional, default: 5000)
    pub fn from_env() -> anyhow::Result<Self> {
        let manager_url = std::env::var("RIGSTUDIO_MANAGER_URL")
            .map_err(|_| anyhow::anyhow!("RIGSTUDIO_MANAGER_URL environment variable not set"))?;

        let mut config = Self::new(manager_url);

        if let Some(ms) = env_millis("RIGSTUDIO_FAST_POLL_MS") {
            config.fast_poll = ms;
        }
        if let Some(ms) = env_millis("RIGSTUDIO_SLOW_POLL_MS") {
            config.slow_poll = ms;
        }
        if let Some(ms) = env_millis("RIGSTUDIO_LEADER_POLL_MS") {
            config.leader_poll = ms;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.manager_url.is_empty() {
            anyhow::bail!("manager_url cannot be empty");
        }

        if !self.manager_url.starts_with("http://") && !self.manager_url.starts_with("https://") {
            anyhow::bail!("manager_url must start with http:// or https://");
        }

        if self.fast_poll.is_zero() || self.slow_poll.is_zero() || self.leader_poll.is_zero() {
            anyhow::bail!("poll periods must be greater than 0");
        }

        if self.fast_poll > self.slow_poll {
            anyhow::bail!("fast_poll must not exceed slow_poll");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fast_poll, Duration::from_millis(1500));
        assert_eq!(config.slow_poll, Duration::from_millis(3000));
        assert_eq!(config.leader_poll, Duration::from_millis(5000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.manager_url = String::new();
        assert!(config.validate().is_err());

        config.manager_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.manager_url = "http://localhost:8000".to_string();
        assert!(config.validate().is_ok());

        config.fast_poll = Duration::from_secs(10);
        assert!(config.validate().is_err(), "fast above slow must fail");
    }
}
