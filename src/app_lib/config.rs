//! Resolved client configuration. Values come from CLI flags or their
//! environment fallbacks; empty values fall back to defaults. Configuration is
//! public; the session token never lives here.

use super::errors::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const SESSION_FILE_NAME: &str = "session.json";
const FALLBACK_SESSION_FILE: &str = ".catalog-session.json";

/// Client configuration shared by the API client and the session storage.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Builds a config, applying defaults for missing or blank values.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the API base URL is not an http(s) URL.
    pub fn new(
        api_base_url: Option<&str>,
        session_file: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, AppError> {
        let api_base_url = api_base_url
            .and_then(normalize_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        validate_base_url(&api_base_url)?;

        let session_file = session_file
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| default_session_file(std::env::var("HOME").ok().as_deref()));

        Ok(Self {
            api_base_url,
            session_file,
            request_timeout: timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs),
        })
    }
}

/// Default location of the persisted session.
pub fn default_session_file(home: Option<&str>) -> PathBuf {
    match home.and_then(normalize_value) {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("catalog")
            .join(SESSION_FILE_NAME),
        None => PathBuf::from(FALLBACK_SESSION_FILE),
    }
}

fn validate_base_url(value: &str) -> Result<(), AppError> {
    let url = Url::parse(value)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {value}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::Config(format!(
            "Invalid API base URL {value}: unsupported scheme {scheme}"
        ))),
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://shop.example "),
            Some("https://shop.example".to_string())
        );
    }

    #[test]
    fn new_applies_defaults() {
        let config = AppConfig::new(Some("  "), Some(PathBuf::from("/tmp/s.json")), None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn new_keeps_explicit_values() {
        let config = AppConfig::new(
            Some("https://shop.example/base"),
            Some(PathBuf::from("session.json")),
            Some(15),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://shop.example/base");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = AppConfig::new(None, Some(PathBuf::from("s.json")), Some(0)).unwrap();
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn new_rejects_unsupported_scheme() {
        let err = AppConfig::new(Some("ftp://shop.example"), None, None).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme ftp"));
    }

    #[test]
    fn new_rejects_garbage_url() {
        assert!(matches!(
            AppConfig::new(Some("not a url"), None, None),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn default_session_file_uses_home() {
        assert_eq!(
            default_session_file(Some("/home/ana")),
            PathBuf::from("/home/ana/.config/catalog/session.json")
        );
        assert_eq!(
            default_session_file(Some(" ")),
            PathBuf::from(FALLBACK_SESSION_FILE)
        );
        assert_eq!(default_session_file(None), PathBuf::from(FALLBACK_SESSION_FILE));
    }
}
