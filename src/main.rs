use anyhow::{Context, Result};
use docsum::{api, config, logging, processing, summarization};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    config::init_config().context("failed to load configuration")?;
    logging::init_tracing();
    summarization::init_resources();

    let config = config::get_config();
    let app = api::create_router(Arc::new(processing::SummaryService::new()), config);

    let (listener, addr) = bind_listener(config)
        .await
        .context("failed to bind listener")?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn bind_listener(
    config: &config::Config,
) -> Result<(TcpListener, SocketAddr), std::io::Error> {
    let host = config.server_host.as_str();
    if let Some(port) = config.server_port {
        let listener = TcpListener::bind((host, port)).await?;
        let addr = listener.local_addr()?;
        return Ok((listener, addr));
    }

    const PORT_RANGE: std::ops::RangeInclusive<u16> = 8000..=8099;
    for port in PORT_RANGE {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                tracing::debug!(port, "Bound server port");
                let addr = listener.local_addr()?;
                return Ok((listener, addr));
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AddrNotAvailable,
        "No available port found in range 8000-8099",
    ))
}
