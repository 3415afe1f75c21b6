mod app;
mod login;

use anyhow::Context;
use formbody::Config;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,formbody=debug")),
        )
        .init();

    let config_path =
        std::env::var("FORMBODY_CONFIG").unwrap_or_else(|_| "formbody.toml".to_string());
    let mut config = Config::load(&config_path)?;

    if let Ok(host) = std::env::var("HOST") {
        config.server.host = host;
    }
    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        config.server.port = port;
    }

    let state = app::AppState::from_config(&config).context("Failed to build the form")?;
    info!(
        fields = state.dialog().form().fields().len(),
        action = %config.form.action,
        "form ready"
    );

    let app = app::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
