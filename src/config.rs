use std::env;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// User-Agent header sent with every portal request
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Accept self-signed certificates (common on Xtream portals)
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            request_timeout_secs: env::var("XTREAMPLAY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            accept_invalid_certs: env::var("XTREAMPLAY_ACCEPT_INVALID_CERTS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),

            // Use VLC user agent to avoid IPTV server blocks
            user_agent: env::var("XTREAMPLAY_USER_AGENT")
                .unwrap_or_else(|_| "VLC/3.0.20 LibVLC/3.0.20".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
