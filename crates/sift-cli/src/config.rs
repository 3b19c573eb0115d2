//! Configuration file handling.
//!
//! Settings live in a TOML file (`$SIFT_CONFIG`, or
//! `$XDG_CONFIG_HOME/sift/config.toml`); command-line flags override
//! file values.

use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use sift_query::{MissingOperator, QueryPolicy, DEFAULT_SLOTS};

use crate::{
    cli::Args,
    error::{CliError, Result},
};

/// On-disk configuration. Every field is optional; [`Settings`]
/// applies the defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the record service.
    pub domain: Option<String>,

    /// Authentication token.
    pub token: Option<String>,

    /// Number of filter slots.
    /// Default: 3
    pub slots: Option<usize>,

    /// Request timeout in seconds.
    /// Default: 30
    pub timeout_secs: Option<u64>,

    /// Value text treated as "nothing entered".
    /// Default: "Enter value"
    pub placeholder: Option<String>,

    /// Pass placeholder text through as an ordinary literal instead.
    /// Default: false
    pub placeholder_is_literal: Option<bool>,

    /// Reject populated slots that have no operator selected, instead
    /// of letting the service apply its default comparison.
    /// Default: false
    pub require_operator: Option<bool>,
}

impl Config {
    /// Loads the config file, or defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| {
            CliError::IoError {
                action: format!("reading config file {}", path.display()),
                source,
            }
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn default_path() -> PathBuf {
        match env::var("SIFT_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => xdg_config_home().join("sift").join("config.toml"),
        }
    }
}

fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(env::var("HOME").unwrap_or_else(|_| ".".to_string())).join(".config")
        })
}

/// Effective settings after CLI flags override the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub domain: String,
    pub token: Option<String>,
    pub slots: usize,
    pub timeout: Duration,
    pub policy: QueryPolicy,
}

impl Settings {
    pub fn resolve(args: &Args, config: Config) -> Result<Self> {
        let domain = args
            .domain
            .clone()
            .or(config.domain)
            .ok_or(CliError::MissingDomain)?;
        let token = args
            .token
            .clone()
            .or_else(|| env::var("SIFT_TOKEN").ok())
            .or(config.token);
        let slots = args.slots.or(config.slots).unwrap_or(DEFAULT_SLOTS);
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(30));

        let mut policy = QueryPolicy::default();
        if config.placeholder_is_literal.unwrap_or(false) {
            policy.placeholder = None;
        } else if let Some(placeholder) = config.placeholder {
            policy.placeholder = Some(placeholder);
        }
        if config.require_operator.unwrap_or(false) {
            policy.missing_operator = MissingOperator::Reject;
        }

        Ok(Self {
            domain,
            token,
            slots,
            timeout,
            policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["sift"];
        full.extend_from_slice(argv);
        Args::parse_from(full)
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let config = Config::load(Path::new("/nonexistent/sift/config.toml")).unwrap();
        assert!(config.domain.is_none());
        assert!(config.slots.is_none());
    }

    #[test]
    fn test_load_parses_fields() {
        let file = write_config(
            r#"
            domain = "https://records.example.com/"
            token = "t0k3n"
            slots = 5
            timeout_secs = 10
            placeholder = "type here"
            require_operator = true
            "#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.domain.as_deref(), Some("https://records.example.com/"));
        assert_eq!(config.slots, Some(5));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.placeholder.as_deref(), Some("type here"));
        assert_eq!(config.require_operator, Some(true));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let file = write_config("domain = [not toml");
        assert!(matches!(
            Config::load(file.path()),
            Err(CliError::TomlError(_))
        ));
    }

    #[test]
    fn test_resolve_requires_domain() {
        assert!(matches!(
            Settings::resolve(&args(&[]), Config::default()),
            Err(CliError::MissingDomain)
        ));
    }

    #[test]
    fn test_resolve_flag_overrides_file() {
        let config = Config {
            domain: Some("https://file.example.com/".to_string()),
            slots: Some(4),
            ..Config::default()
        };
        let settings =
            Settings::resolve(&args(&["--domain", "https://flag.example.com/"]), config).unwrap();
        assert_eq!(settings.domain, "https://flag.example.com/");
        // Unset flags still fall back to the file.
        assert_eq!(settings.slots, 4);
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config {
            domain: Some("https://records.example.com/".to_string()),
            ..Config::default()
        };
        let settings = Settings::resolve(&args(&[]), config).unwrap();
        assert_eq!(settings.slots, DEFAULT_SLOTS);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.policy, QueryPolicy::default());
    }

    #[test]
    fn test_resolve_policy_mapping() {
        let config = Config {
            domain: Some("https://records.example.com/".to_string()),
            placeholder: Some("type here".to_string()),
            require_operator: Some(true),
            ..Config::default()
        };
        let settings = Settings::resolve(&args(&[]), config).unwrap();
        assert_eq!(settings.policy.placeholder.as_deref(), Some("type here"));
        assert_eq!(settings.policy.missing_operator, MissingOperator::Reject);

        let config = Config {
            domain: Some("https://records.example.com/".to_string()),
            placeholder_is_literal: Some(true),
            ..Config::default()
        };
        let settings = Settings::resolve(&args(&[]), config).unwrap();
        assert_eq!(settings.policy.placeholder, None);
    }
}
