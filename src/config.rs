// Application configuration, loaded from environment variables and CLI flags.

use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the Arena backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Path prefix every backend route lives under.
const API_PREFIX: &str = "/api";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external Arena API, always ending in `/api`.
    pub api_url: String,
    /// Directory holding the token stores.
    pub data_dir: PathBuf,
    /// Per-request timeout for API calls.
    pub request_timeout: Duration,
    /// Refresh interval for live views (rankings, matchmaking queue).
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `ARENA_API_URL` - backend base URL (default: `http://localhost:8080/api`)
    /// - `ARENA_DATA_DIR` - token store directory (default: `$HOME/.arena`)
    /// - `ARENA_HTTP_TIMEOUT_SECS` - per-request timeout (default: 10)
    /// - `ARENA_POLL_INTERVAL_SECS` - live view refresh interval (default: 5)
    ///
    /// CLI flags:
    /// - `--api-url <URL>` - override the backend base URL
    /// - `--data-dir <DIR>` - override the token store directory
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let api_url = Self::parse_cli_value(&args, "--api-url")
            .or_else(|| std::env::var("ARENA_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url);

        let data_dir = Self::parse_cli_value(&args, "--data-dir")
            .map(PathBuf::from)
            .or_else(|| std::env::var("ARENA_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let request_timeout = std::env::var("ARENA_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let poll_interval = std::env::var("ARENA_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        Config {
            api_url,
            data_dir,
            request_timeout,
            poll_interval,
        }
    }

    /// Parse a CLI flag value like `--api-url http://host:8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".arena")
}

/// Normalize an operator-supplied base URL so it always ends in the API's
/// path prefix: trailing slashes are stripped and `/api` is appended when
/// missing. `http://host:8080`, `http://host:8080/` and `http://host:8080/api/`
/// all normalize to `http://host:8080/api`.
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.ends_with(API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{API_PREFIX}")
    }
}
