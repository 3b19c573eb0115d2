//! HTTP client configuration.

use std::time::Duration;

use ureq::Agent;
use url::Url;

use crate::error::{ClientError, Result};

/// Connection settings for the record service.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the service, normalized to end with a slash.
    pub base_url: Url,
    /// Authentication token, sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for the given service domain.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `domain` is not an
    /// absolute URL.
    pub fn new(domain: &str, token: Option<String>) -> Result<Self> {
        let mut base_url =
            Url::parse(domain).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(domain.to_string()));
        }
        // Url::join treats a path without a trailing slash as a file.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            base_url,
            token,
            user_agent: Some("pkgforge/sift".into()),
            timeout: Some(Duration::from_secs(30)),
        })
    }

    /// Builds an HTTP `Agent` from this configuration.
    ///
    /// Error statuses are surfaced as plain responses so the caller can
    /// read the body detail the service attaches to rejections.
    pub fn build(&self) -> Agent {
        let mut config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(self.timeout);

        if let Some(user_agent) = &self.user_agent {
            config = config.user_agent(user_agent);
        }

        config.build().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_normalizes_trailing_slash() {
        let config = ClientConfig::new("https://records.example.com", None).unwrap();
        assert_eq!(config.base_url.as_str(), "https://records.example.com/");

        let config = ClientConfig::new("https://records.example.com/api", None).unwrap();
        assert_eq!(config.base_url.as_str(), "https://records.example.com/api/");
    }

    #[test]
    fn test_config_rejects_invalid_domain() {
        assert!(matches!(
            ClientConfig::new("not a url", None),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("mailto:nobody@example.com", None),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("https://records.example.com", Some("t0k3n".into())).unwrap();
        assert_eq!(config.user_agent.as_deref(), Some("pkgforge/sift"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.token.as_deref(), Some("t0k3n"));
    }

    #[test]
    fn test_config_build() {
        let config = ClientConfig::new("https://records.example.com", None).unwrap();
        let _agent = config.build();
    }
}
