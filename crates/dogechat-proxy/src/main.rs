use std::env;

use tracing_subscriber::EnvFilter;

use dogechat_proxy::config::ProxyConfig;
use dogechat_proxy::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ProxyConfig::from_env();
    if config.api_key.is_none() {
        tracing::error!("OPENROUTER_API_KEY is not set; chat requests will fail");
    }

    let state = AppState::new(&config)?;
    let app = dogechat_proxy::app(state);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        tracing::info!(upstream = %config.upstream_url, "starting on lambda");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upstream = %config.upstream_url,
        "proxy listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
