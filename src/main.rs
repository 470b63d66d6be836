use fission_dashboard::{AppState, DashboardConfig, HttpSource, poller, router};
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = DashboardConfig::from_env()?;
    let source = HttpSource::new(&config.base_url)?;
    info!(endpoint = %source.endpoint(), tables = config.features.tables, "polling data endpoint");

    let state = AppState::new(config.features);

    // The first fetch runs while the listener comes up.
    let (page_ready, ready) = oneshot::channel::<()>();
    tokio::spawn(poller::run(
        state.dashboard.clone(),
        source,
        async move {
            let _ = ready.await;
        },
        config.poll_interval,
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let _ = page_ready.send(());

    info!("listening on http://{addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
