use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

/// Backend origin baked in at build time. `SCREENER_API_URL` at runtime still wins.
const DEFAULT_API_URL: &str = match option_env!("SCREENER_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Client configuration loaded from environment variables.
/// Nothing is required; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub download_dir: PathBuf,
    pub request_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url =
            std::env::var("SCREENER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Config {
            api_url: parse_api_url(&api_url)?,
            download_dir: std::env::var("SCREENER_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            request_timeout: optional_env("SCREENER_REQUEST_TIMEOUT_SECS")
                .map(|secs| {
                    secs.parse::<u64>()
                        .map(Duration::from_secs)
                        .context("SCREENER_REQUEST_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Parses the backend origin. Only http(s) origins that can carry path segments are accepted.
pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("SCREENER_API_URL '{raw}' is not a valid URL"))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        anyhow::bail!("SCREENER_API_URL '{raw}' must be an http(s) origin");
    }

    Ok(url)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_accepts_plain_origin() {
        let url = parse_api_url("http://localhost:8000").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8000));
    }

    #[test]
    fn test_parse_api_url_trims_whitespace() {
        assert!(parse_api_url("  https://screening.example.com  ").is_ok());
    }

    #[test]
    fn test_parse_api_url_rejects_non_http_scheme() {
        assert!(parse_api_url("ftp://example.com").is_err());
        assert!(parse_api_url("mailto:hr@example.com").is_err());
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_default_api_url_is_valid() {
        assert!(parse_api_url(DEFAULT_API_URL).is_ok());
    }
}
