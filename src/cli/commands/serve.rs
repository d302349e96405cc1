use clap::Args;
use tracing::info;

use crate::config;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Port to bind (overrides PORT / DISPATCH_API_PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config();

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set");
    }
    if crate::is_production!() && config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL must be set in production");
    }

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    info!(environment = ?config.environment, "Dispatch console listening on http://{}", bind_addr);

    axum::serve(listener, crate::app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    crate::database::DatabaseManager::close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
