//! Relay Server - forwards send requests to Firebase Cloud Messaging.

mod config;

use color_eyre::eyre::WrapErr as _;

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("relay-server starting");

    let config = config::RelayConfig::from_env().wrap_err("invalid relay configuration")?;

    let pusher = notify_push::FcmPusher::with_endpoint(
        &config.fcm_endpoint,
        &config.fcm_project_id,
        config.fcm_access_token.clone(),
    );

    let app = notify_http::relay_router(pusher);

    tracing::info!(addr = %config.addr, project = %config.fcm_project_id, "listening");

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .wrap_err("failed to bind")?;

    axum::serve(listener, app).await.wrap_err("server error")?;

    Ok(())
}
