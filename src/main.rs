use goal_dashboard::{
    clock::{Clock, SystemClock},
    models::demo_goals,
    router, spawn_timers, AppState, Config, Dashboard,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let now = clock.now();

    let mut dashboard = Dashboard::new(config.timezone, now);
    if config.seed_demo {
        dashboard = dashboard.with_goals(demo_goals(now, config.timezone));
        info!("loaded demo goals");
    }

    let state = AppState::new(clock, dashboard);
    let timers = spawn_timers(state.clone(), config.tick_interval);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(zone = %config.timezone, tick = ?config.tick_interval, "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    timers.shutdown();
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
