//! Directory connection settings.
//!
//! # Responsibility
//! - Load connection parameters from the process environment.
//! - Derive defaults (base DN, result cap, timeout) when not configured.
//!
//! # Invariants
//! - The bind password is never rendered by `Debug` or `Display`.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;

pub const DEFAULT_SIZE_LIMIT: i32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing env {key}"),
            Self::Invalid { key, message } => write!(f, "invalid {key}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Connection parameters for the organizational directory.
#[derive(Clone)]
pub struct DirectoryConfig {
    /// `ldap://` or `ldaps://` URL of a domain controller.
    pub url: String,
    pub bind_user: String,
    pub bind_password: String,
    /// DNS domain name, e.g. `corp.example.com`.
    pub domain: String,
    pub base_dn: String,
    /// Maximum entries returned per search.
    pub size_limit: i32,
    pub timeout: Duration,
}

impl DirectoryConfig {
    /// Loads configuration from `AD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &'static str| -> Option<String> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let url = required("AD_URL")?;
        if !(url.starts_with("ldap://") || url.starts_with("ldaps://")) {
            return Err(ConfigError::Invalid {
                key: "AD_URL",
                message: format!("expected ldap:// or ldaps:// URL, got `{url}`"),
            });
        }
        let bind_user = required("AD_USER")?;
        let bind_password = required("AD_PASSWORD")?;
        let domain = required("AD_DOMAIN")?;

        let base_dn = match optional("AD_BASE_DN") {
            Some(value) => value,
            None => base_dn_from_domain(&domain).ok_or_else(|| ConfigError::Invalid {
                key: "AD_DOMAIN",
                message: format!("cannot derive base DN from `{domain}`"),
            })?,
        };

        let size_limit = match optional("AD_SIZE_LIMIT") {
            Some(value) => parse_positive(&value)
                .and_then(|limit| i32::try_from(limit).ok())
                .ok_or_else(|| ConfigError::Invalid {
                    key: "AD_SIZE_LIMIT",
                    message: format!("expected positive integer, got `{value}`"),
                })?,
            None => DEFAULT_SIZE_LIMIT,
        };

        let timeout_secs = match optional("AD_TIMEOUT_SECS") {
            Some(value) => parse_positive(&value).ok_or_else(|| ConfigError::Invalid {
                key: "AD_TIMEOUT_SECS",
                message: format!("expected positive integer, got `{value}`"),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            url,
            bind_user,
            bind_password,
            domain,
            base_dn,
            size_limit,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Human-readable connection summary used as a window/banner title.
    pub fn title(&self) -> String {
        format!("AD Lookup | Host: {} | Domain: {}", self.url, self.domain)
    }
}

impl Debug for DirectoryConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("url", &self.url)
            .field("bind_user", &self.bind_user)
            .field("bind_password", &"<redacted>")
            .field("domain", &self.domain)
            .field("base_dn", &self.base_dn)
            .field("size_limit", &self.size_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `corp.example.com` -> `DC=corp,DC=example,DC=com`.
pub fn base_dn_from_domain(domain: &str) -> Option<String> {
    let labels = domain
        .trim()
        .trim_end_matches('.')
        .split('.')
        .map(str::trim)
        .collect::<Vec<_>>();
    if labels.iter().any(|label| label.is_empty()) {
        return None;
    }
    Some(
        labels
            .iter()
            .map(|label| format!("DC={label}"))
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn parse_positive(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|parsed| *parsed > 0)
}

#[cfg(test)]
mod tests {
    use super::{base_dn_from_domain, ConfigError, DirectoryConfig, DEFAULT_SIZE_LIMIT};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    fn base_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("AD_URL", "ldap://dc01.corp.example.com"),
            ("AD_USER", "svc-lookup@corp.example.com"),
            ("AD_PASSWORD", "s3cret"),
            ("AD_DOMAIN", "corp.example.com"),
        ]
    }

    #[test]
    fn defaults_are_applied() {
        let config = DirectoryConfig::from_lookup(lookup(&base_pairs())).unwrap();
        assert_eq!(config.base_dn, "DC=corp,DC=example,DC=com");
        assert_eq!(config.size_limit, DEFAULT_SIZE_LIMIT);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let mut pairs = base_pairs();
        pairs.push(("AD_BASE_DN", "OU=Staff,DC=corp,DC=example,DC=com"));
        pairs.push(("AD_SIZE_LIMIT", "50"));
        pairs.push(("AD_TIMEOUT_SECS", "5"));
        let config = DirectoryConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.base_dn, "OU=Staff,DC=corp,DC=example,DC=com");
        assert_eq!(config.size_limit, 50);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_password_is_reported() {
        let pairs = base_pairs()
            .into_iter()
            .filter(|(key, _)| *key != "AD_PASSWORD")
            .collect::<Vec<_>>();
        let err = DirectoryConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("AD_PASSWORD"));
    }

    #[test]
    fn non_ldap_url_is_rejected() {
        let mut pairs = base_pairs();
        pairs[0] = ("AD_URL", "LDAP:/dc01");
        let err = DirectoryConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "AD_URL", .. }));
    }

    #[test]
    fn zero_size_limit_is_rejected() {
        let mut pairs = base_pairs();
        pairs.push(("AD_SIZE_LIMIT", "0"));
        let err = DirectoryConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "AD_SIZE_LIMIT", .. }));
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = DirectoryConfig::from_lookup(lookup(&base_pairs())).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn title_names_host_and_domain() {
        let config = DirectoryConfig::from_lookup(lookup(&base_pairs())).unwrap();
        assert_eq!(
            config.title(),
            "AD Lookup | Host: ldap://dc01.corp.example.com | Domain: corp.example.com"
        );
    }

    #[test]
    fn base_dn_rejects_empty_labels() {
        assert_eq!(base_dn_from_domain("corp..com"), None);
        assert_eq!(base_dn_from_domain("corp.com."), Some("DC=corp,DC=com".into()));
    }
}
