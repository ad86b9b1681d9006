use crate::core::types::SigningScheme;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const DEFAULT_HOST: &str = "https://www.cryptopia.co.nz";
pub const DEFAULT_API_VERSION: &str = "api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub otp: Option<Secret<String>>,
    pub base_url: Option<String>,
    pub api_version: String,
    pub timeout_seconds: u64,
    pub signing_scheme: SigningScheme,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 7)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("otp", &self.otp.as_ref().map(|_| "[REDACTED]"))?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("api_version", &self.api_version)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.serialize_field("signing_scheme", &self.signing_scheme)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            #[serde(default)]
            api_key: String,
            #[serde(default)]
            secret_key: String,
            otp: Option<String>,
            base_url: Option<String>,
            api_version: Option<String>,
            timeout_seconds: Option<u64>,
            #[serde(default)]
            signing_scheme: SigningScheme,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            secret_key: Secret::new(helper.secret_key),
            otp: helper.otp.map(Secret::new),
            base_url: helper.base_url,
            api_version: helper
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout_seconds: helper.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            signing_scheme: helper.signing_scheme,
        })
    }
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            otp: None,
            base_url: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            signing_scheme: SigningScheme::default(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `CRYPTOPIA_API_KEY`)
    /// - `{PREFIX}_SECRET_KEY` (base64, as issued by the exchange)
    /// - `{PREFIX}_OTP` (optional)
    /// - `{PREFIX}_BASE_URL` (optional)
    /// - `{PREFIX}_API_VERSION` (optional, defaults to `api`)
    /// - `{PREFIX}_TIMEOUT_SECONDS` (optional, defaults to 30)
    /// - `{PREFIX}_SIGNING_SCHEME` (optional, `amx` or `message-signature`)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let secret_key_var = format!("{}_SECRET_KEY", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let secret_key = env::var(&secret_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_key_var))?;

        let mut config = Self::new(api_key, secret_key);
        config.otp = env::var(format!("{}_OTP", prefix)).ok().map(Secret::new);
        config.base_url = env::var(format!("{}_BASE_URL", prefix)).ok();

        if let Ok(version) = env::var(format!("{}_API_VERSION", prefix)) {
            config.api_version = version;
        }

        if let Ok(timeout) = env::var(format!("{}_TIMEOUT_SECONDS", prefix)) {
            config.timeout_seconds = timeout.parse().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "{}_TIMEOUT_SECONDS must be a whole number of seconds, got '{}'",
                    prefix, timeout
                ))
            })?;
        }

        if let Ok(scheme) = env::var(format!("{}_SIGNING_SCHEME", prefix)) {
            config.signing_scheme = scheme
                .parse()
                .map_err(ConfigError::InvalidConfiguration)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // no file, fall through to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Configuration for public market data only
    #[must_use]
    pub fn read_only() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Check if this configuration has credentials for private methods
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Reject settings that can never produce a working client
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.api_version.trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "api_version must not be empty".to_string(),
            ));
        }
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "base_url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }
        Ok(())
    }

    /// Set custom base URL (scheme + host, no version segment)
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub fn api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    #[must_use]
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    #[must_use]
    pub fn otp(mut self, otp: String) -> Self {
        self.otp = Some(Secret::new(otp));
        self
    }

    #[must_use]
    pub fn signing_scheme(mut self, signing_scheme: SigningScheme) -> Self {
        self.signing_scheme = signing_scheme;
        self
    }

    /// Host the client talks to, honouring any override
    pub fn host(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_HOST)
            .trim_end_matches('/')
    }

    /// Host plus API version segment, e.g. `https://www.cryptopia.co.nz/api`
    pub fn api_root(&self) -> String {
        format!("{}/{}", self.host(), self.api_version.trim_matches('/'))
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    pub fn otp_value(&self) -> Option<&str> {
        self.otp.as_ref().map(|otp| otp.expose_secret().as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExchangeConfig::new("key".to_string(), "c2VjcmV0".to_string());
        assert!(config.has_credentials());
        assert_eq!(config.api_root(), "https://www.cryptopia.co.nz/api");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.signing_scheme, SigningScheme::Amx);
    }

    #[test]
    fn test_read_only_has_no_credentials() {
        assert!(!ExchangeConfig::read_only().has_credentials());
        let half = ExchangeConfig::new("key".to_string(), String::new());
        assert!(!half.has_credentials());
    }

    #[test]
    fn test_api_root_trims_slashes() {
        let config = ExchangeConfig::read_only()
            .base_url("http://localhost:8080/".to_string())
            .api_version("/v2/".to_string());
        assert_eq!(config.api_root(), "http://localhost:8080/v2");
    }

    #[test]
    fn test_serialize_redacts_secrets() {
        let config = ExchangeConfig::new("my_key".to_string(), "my_secret".to_string())
            .otp("123456".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("my_key"));
        assert!(!json.contains("my_secret"));
        assert!(!json.contains("123456"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ExchangeConfig =
            serde_json::from_str(r#"{"api_key":"k","secret_key":"s"}"#).unwrap();
        assert_eq!(config.api_key(), "k");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ExchangeConfig::read_only()
            .timeout_seconds(0)
            .validate()
            .is_err());
        assert!(ExchangeConfig::read_only()
            .base_url("ftp://example.com".to_string())
            .validate()
            .is_err());
        assert!(ExchangeConfig::read_only().validate().is_ok());
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = ExchangeConfig::from_env("CRYPTOPIA_TEST_DEFINITELY_UNSET");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvironmentVariable(var)) if var == "CRYPTOPIA_TEST_DEFINITELY_UNSET_API_KEY"
        ));
    }
}
