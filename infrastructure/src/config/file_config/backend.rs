//! Backend connection configuration from TOML (`[backend]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// HTTP base URL of the backend (file endpoints live under it)
    pub base_url: String,
    /// Path of the chat WebSocket endpoint, relative to the base URL
    pub chat_path: String,
    /// WebSocket handshake timeout
    pub connect_timeout_seconds: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            chat_path: "/chatbot".to_string(),
            connect_timeout_seconds: 10,
        }
    }
}

impl FileBackendConfig {
    /// Parse `base_url`, accepting only `http` and `https`.
    pub fn parse_base_url(&self) -> Result<Url, ConfigValidationError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigValidationError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigValidationError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Base URL for the file endpoints, without a trailing slash.
    pub fn http_base(&self) -> Result<String, ConfigValidationError> {
        let url = self.parse_base_url()?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// WebSocket URL of the chat endpoint.
    ///
    /// `http` maps to `ws` and `https` to `wss`; `chat_path` is appended to
    /// whatever path the base URL already has.
    pub fn chat_endpoint(&self) -> Result<String, ConfigValidationError> {
        let mut url = self.parse_base_url()?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| ConfigValidationError::UnsupportedScheme(url.scheme().to_string()))?;

        let base_path = url.path().trim_end_matches('/').to_string();
        let chat_path = self.chat_path.trim_start_matches('/');
        url.set_path(&format!("{}/{}", base_path, chat_path));
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> FileBackendConfig {
        FileBackendConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_endpoint() {
        let config = FileBackendConfig::default();
        assert_eq!(
            config.chat_endpoint().unwrap(),
            "ws://localhost:8000/chatbot"
        );
        assert_eq!(config.http_base().unwrap(), "http://localhost:8000");
    }

    #[test]
    fn test_https_maps_to_wss_and_keeps_prefix() {
        let config = FileBackendConfig {
            base_url: "https://chat.example.com/api/".to_string(),
            chat_path: "chatbot".to_string(),
            connect_timeout_seconds: 5,
        };
        assert_eq!(
            config.chat_endpoint().unwrap(),
            "wss://chat.example.com/api/chatbot"
        );
        assert_eq!(config.http_base().unwrap(), "https://chat.example.com/api");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            backend("ftp://localhost").chat_endpoint(),
            Err(ConfigValidationError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            backend("ws://localhost:8000").parse_base_url(),
            Err(ConfigValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        assert!(matches!(
            backend("not a url").parse_base_url(),
            Err(ConfigValidationError::InvalidBaseUrl { .. })
        ));
    }
}
