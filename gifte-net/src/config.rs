//! Provider configuration
//!
//! Base URLs, credentials, the per-call timeout and the caller-ID toggle.
//! Loaded from a TOML file or from the environment; the lookup layer only
//! ever reads it.

use serde::Deserialize;
use std::env;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Timeouts outside this range are accepted but logged
pub const RECOMMENDED_TIMEOUT_SECS: RangeInclusive<u64> = 8..=12;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// One provider endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// API credential, if the provider needs one
    pub api_key: Option<String>,
}

impl EndpointConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn with_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Credential, or empty when absent
    pub fn key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn has_key(&self) -> bool {
        !self.key().is_empty()
    }

    /// Join a path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Endpoint section as written in a config file; absent fields keep the
/// provider's default
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EndpointSection {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl EndpointSection {
    fn apply(self, endpoint: &mut EndpointConfig) {
        if let Some(base_url) = self.base_url {
            endpoint.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(api_key) = self.api_key {
            endpoint.api_key = Some(api_key);
        }
    }
}

/// Config file layout, layered over [`ProviderConfig::default`]
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    caller_id_enabled: Option<bool>,
    email_a: EndpointSection,
    email_b: EndpointSection,
    phone_a: EndpointSection,
    phone_b: EndpointSection,
    caller_id: EndpointSection,
    social: EndpointSection,
    self_ip: EndpointSection,
    geo: EndpointSection,
}

impl From<ConfigFile> for ProviderConfig {
    fn from(file: ConfigFile) -> Self {
        let mut config = ProviderConfig::default();
        if let Some(timeout_secs) = file.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(user_agent) = file.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(enabled) = file.caller_id_enabled {
            config.caller_id_enabled = enabled;
        }
        file.email_a.apply(&mut config.email_a);
        file.email_b.apply(&mut config.email_b);
        file.phone_a.apply(&mut config.phone_a);
        file.phone_b.apply(&mut config.phone_b);
        file.caller_id.apply(&mut config.caller_id);
        file.social.apply(&mut config.social);
        file.self_ip.apply(&mut config.self_ip);
        file.geo.apply(&mut config.geo);
        config
    }
}

/// Configuration for every lookup provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct ProviderConfig {
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// Caller-ID feature toggle
    pub caller_id_enabled: bool,
    pub email_a: EndpointConfig,
    pub email_b: EndpointConfig,
    pub phone_a: EndpointConfig,
    pub phone_b: EndpointConfig,
    pub caller_id: EndpointConfig,
    pub social: EndpointConfig,
    pub self_ip: EndpointConfig,
    pub geo: EndpointConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("gifte-osint/{}", env!("CARGO_PKG_VERSION")),
            caller_id_enabled: true,
            email_a: EndpointConfig::new("https://emailvalidation.abstractapi.com"),
            email_b: EndpointConfig::new("https://apilayer.net"),
            phone_a: EndpointConfig::new("https://phoneintelligence.abstractapi.com"),
            phone_b: EndpointConfig::new("https://apilayer.net"),
            caller_id: EndpointConfig::new("https://tenapi.net/api"),
            social: EndpointConfig::new("https://tenapi.net/api"),
            self_ip: EndpointConfig::new("https://api.ipify.org"),
            geo: EndpointConfig::new("https://ip-intelligence.abstractapi.com"),
        }
    }
}

impl ProviderConfig {
    /// Defaults with credentials and timeout taken from `GIFTE_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `var`
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let keys = [
            ("GIFTE_EMAIL_A_KEY", &mut config.email_a),
            ("GIFTE_EMAIL_B_KEY", &mut config.email_b),
            ("GIFTE_PHONE_A_KEY", &mut config.phone_a),
            ("GIFTE_PHONE_B_KEY", &mut config.phone_b),
            ("GIFTE_CALLER_ID_KEY", &mut config.caller_id),
            ("GIFTE_SOCIAL_KEY", &mut config.social),
            ("GIFTE_GEO_KEY", &mut config.geo),
        ];
        for (name, endpoint) in keys {
            if let Some(key) = var(name) {
                endpoint.api_key = Some(key);
            }
        }

        if let Some(value) = var("GIFTE_TIMEOUT_SECS") {
            config.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "GIFTE_TIMEOUT_SECS".to_string(),
                value,
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections and fields keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject a zero timeout; warn when outside the recommended range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !RECOMMENDED_TIMEOUT_SECS.contains(&self.timeout_secs) {
            warn!(
                "Per-call timeout of {}s is outside the recommended {}-{}s",
                self.timeout_secs,
                RECOMMENDED_TIMEOUT_SECS.start(),
                RECOMMENDED_TIMEOUT_SECS.end()
            );
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether caller-ID lookups may be attempted
    pub fn caller_id_configured(&self) -> bool {
        self.caller_id_enabled && self.caller_id.has_key()
    }
}
