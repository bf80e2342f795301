//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `BANKING_*` environment variables and the OrthoConfig
//! configuration file; the CLI applies its own flags on top.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Backend base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Session file used when none is configured.
pub const DEFAULT_SESSION_FILE: &str = "banking-session.json";

/// Errors raised while resolving configured values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API URL does not parse.
    #[error("invalid api_url `{url}`: {message}")]
    InvalidApiUrl {
        /// Configured value.
        url: String,
        /// Parser message.
        message: String,
    },
    /// The API URL is not HTTP(S).
    #[error("api_url `{url}` must use http or https")]
    UnsupportedScheme {
        /// Configured value.
        url: String,
    },
    /// The timeout is zero.
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Connection and session settings for the banking client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BANKING")]
pub struct ClientSettings {
    /// Backend base URL, such as `http://localhost:8080/api`.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
    /// File holding the persisted session.
    pub session_file: Option<String>,
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Fails when the value is not an absolute HTTP(S) URL.
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL).trim();
        let url = Url::parse(raw).map_err(|err| ConfigError::InvalidApiUrl {
            url: raw.to_owned(),
            message: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::UnsupportedScheme {
                url: raw.to_owned(),
            }),
        }
    }

    /// Return the configured request timeout, falling back to the default.
    ///
    /// # Errors
    ///
    /// Fails when the timeout is zero.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        match self.timeout_secs {
            0 => Err(ConfigError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Return the configured session file, falling back to the default.
    pub fn session_file(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.session_file.as_deref().unwrap_or(DEFAULT_SESSION_FILE))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("banking-client")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("BANKING_API_URL", None::<String>),
            ("BANKING_TIMEOUT_SECS", None::<String>),
            ("BANKING_SESSION_FILE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_url().expect("default url").as_str(),
            DEFAULT_API_URL
        );
        assert_eq!(settings.timeout(), Ok(Duration::from_secs(10)));
        assert_eq!(settings.session_file(), Utf8PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BANKING_API_URL", Some("https://bank.example.com/api".to_owned())),
            ("BANKING_TIMEOUT_SECS", Some("3".to_owned())),
            ("BANKING_SESSION_FILE", Some("/tmp/banking/session.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_url().expect("configured url").host_str(),
            Some("bank.example.com")
        );
        assert_eq!(settings.timeout(), Ok(Duration::from_secs(3)));
        assert_eq!(
            settings.session_file(),
            Utf8PathBuf::from("/tmp/banking/session.json")
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://bank.example.com")]
    fn unusable_urls_are_rejected(#[case] raw: &str) {
        let settings = ClientSettings {
            api_url: Some(raw.to_owned()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: None,
        };
        assert!(settings.api_url().is_err());
    }

    #[rstest]
    fn zero_timeout_is_rejected() {
        let settings = ClientSettings {
            api_url: None,
            timeout_secs: 0,
            session_file: None,
        };
        assert_eq!(settings.timeout(), Err(ConfigError::ZeroTimeout));
    }
}
