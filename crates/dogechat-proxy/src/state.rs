use crate::config::ProxyConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub upstream_url: String,
    pub api_key: Option<String>,
    pub site_url: Option<String>,
    pub site_name: Option<String>,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            http,
            upstream_url: config.upstream_url.clone(),
            api_key: config.api_key.clone(),
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        })
    }
}
