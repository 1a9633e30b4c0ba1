//! Process configuration, read once at startup from a JSON file.
//!
//! ```json
//! {
//!     "listen": "0.0.0.0:8080",
//!     "username": "New Relic",
//!     "icon_url": "https://example.com/newrelic.png",
//!     "tokens": [
//!         {"token": "s3cr3t", "webhook": "https://chat.example.com/hooks/x", "channel": "ops"}
//!     ]
//! }
//! ```

use serde::Deserialize;
use std::{fmt, fs, io, net::SocketAddr, path::Path, time::Duration};
use url::Url;

/// Request bodies larger than this are rejected unless configured otherwise.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub listen: SocketAddr,
    /// Display name used for every message unless a token overrides it.
    pub username: String,
    /// Avatar used for every message unless a token overrides it.
    pub icon_url: Url,
    /// Seconds to wait on the destination webhook. No timeout when absent.
    #[serde(default)]
    pub forward_timeout_secs: Option<u64>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    pub tokens: Vec<TokenConfig>,
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// A single token entry. Each becomes a [crate::binding::Binding].
#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    #[serde(deserialize_with = "crate::de::path_segment")]
    pub token: String,
    pub webhook: Url,
    pub channel: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub icon_url: Option<Url>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(io::Error),
    Parse(serde_json::Error),
    /// Index of the repeated entry within `tokens`.
    DuplicateToken(usize),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Read(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "Could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Could not parse config: {}", e),
            ConfigError::DuplicateToken(i) => write!(f, "Duplicate token at tokens[{}]", i),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;

        let mut seen = std::collections::HashSet::with_capacity(config.tokens.len());
        for (i, t) in config.tokens.iter().enumerate() {
            if !seen.insert(t.token.as_str()) {
                return Err(ConfigError::DuplicateToken(i));
            }
        }

        Ok(config)
    }

    pub fn forward_timeout(&self) -> Option<Duration> {
        self.forward_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "listen": "127.0.0.1:8080",
        "username": "New Relic",
        "icon_url": "https://example.com/nr.png",
        "tokens": [
            {
                "token": "first",
                "webhook": "https://chat.example.com/hooks/1",
                "channel": "ops"
            },
            {
                "token": "second",
                "webhook": "https://chat.example.com/hooks/2",
                "channel": "deploys",
                "username": "Deploy Bot",
                "icon_url": "https://example.com/deploy.png"
            }
        ]
    }"#;

    #[test]
    fn test_parse() {
        let config = Config::parse(EXAMPLE).unwrap();

        assert_eq!(config.listen, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.username, "New Relic");
        assert_eq!(config.forward_timeout(), None);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.tokens.len(), 2);
        assert_eq!(config.tokens[0].token, "first");
        assert_eq!(config.tokens[0].username, None);
        assert_eq!(config.tokens[1].username.as_deref(), Some("Deploy Bot"));
    }

    #[test]
    fn test_timeout() {
        let raw = r#"{
            "listen": "127.0.0.1:8080",
            "username": "x",
            "icon_url": "https://example.com/x.png",
            "forward_timeout_secs": 5,
            "tokens": []
        }"#;

        assert_eq!(
            Config::parse(raw).unwrap().forward_timeout(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_duplicate_token() {
        let raw = r#"{
            "listen": "127.0.0.1:8080",
            "username": "x",
            "icon_url": "https://example.com/x.png",
            "tokens": [
                {"token": "a", "webhook": "https://example.com/1", "channel": "x"},
                {"token": "a", "webhook": "https://example.com/2", "channel": "y"}
            ]
        }"#;

        assert!(matches!(
            Config::parse(raw),
            Err(ConfigError::DuplicateToken(1))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let bad_url = r#"{
            "listen": "127.0.0.1:8080",
            "username": "x",
            "icon_url": "https://example.com/x.png",
            "tokens": [{"token": "a", "webhook": "not a url", "channel": "x"}]
        }"#;
        assert!(matches!(Config::parse(bad_url), Err(ConfigError::Parse(_))));

        let bad_token = r#"{
            "listen": "127.0.0.1:8080",
            "username": "x",
            "icon_url": "https://example.com/x.png",
            "tokens": [{"token": "a/b", "webhook": "https://example.com", "channel": "x"}]
        }"#;
        assert!(matches!(Config::parse(bad_token), Err(ConfigError::Parse(_))));

        let bad_listen = r#"{
            "listen": "localhost",
            "username": "x",
            "icon_url": "https://example.com/x.png",
            "tokens": []
        }"#;
        assert!(matches!(Config::parse(bad_listen), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here.json"),
            Err(ConfigError::Read(_))
        ));
    }
}
