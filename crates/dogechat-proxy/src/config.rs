use std::env;
use std::time::Duration;

/// Upstream chat-completion endpoint used when `UPSTREAM_URL` is unset.
pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Deploy-time proxy settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Bearer credential for the upstream API. Requests fail with a
    /// configuration error while this is missing.
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    /// Optional attribution sent as `HTTP-Referer`.
    pub site_url: Option<String>,
    /// Optional attribution sent as `X-Title`.
    pub site_name: Option<String>,
    /// Bind address when not running on Lambda.
    pub listen_addr: String,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Self {
            api_key: non_empty_var("OPENROUTER_API_KEY"),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            upstream_timeout: Duration::from_secs(upstream_timeout),
            site_url: non_empty_var("OPENROUTER_SITE_URL"),
            site_name: non_empty_var("OPENROUTER_SITE_NAME"),
            listen_addr: env::var("PROXY_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
