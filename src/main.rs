use crate::app_config::AppConfig;
use crate::dispatcher::Dispatcher;
use crate::domain::events::Event;
use crate::geometry::{GeoService, GeometryService};
use crate::map::MemorySurface;
use crate::scheduler::{SchedulerCommand, scheduler};
use crate::views::Workspace;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{error, info};

mod actions;
mod analysis;
mod app_config;
mod dispatcher;
mod domain;
mod geo_point_deserializer;
mod geometry;
mod host_listen;
mod map;
mod scheduler;
mod views;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let median = *config.optimal_location().median();
    let geometry: Arc<dyn GeometryService> = match config.analysis().seed() {
        Some(seed) => Arc::new(GeoService::with_seed(median, seed)),
        None => Arc::new(GeoService::new(median)),
    };

    let workspace = Workspace::new(&config, geometry, |view| Box::new(MemorySurface::new(view)));
    info!("✅  Initialized maps");

    let (tx, rx) = mpsc::channel::<Event>(config.core().event_buffer_size());
    let (scheduler_tx, scheduler_rx) = mpsc::channel::<SchedulerCommand>(config.core().scheduler_buffer_size());

    let scheduler_events_tx = tx.clone();
    task::spawn(async move {
        scheduler(scheduler_rx, scheduler_events_tx).await;
    });
    info!("✅  Initialized scheduler");

    let shutdown_tx = tx.clone();
    task::spawn(async move {
        if let Err(e) = host_listen::listen(BufReader::new(tokio::io::stdin()), tx).await {
            error!("❌ Host stopped: {}", e);
            shutdown_tx.send(Event::Shutdown).await.unwrap_or_default();
        }
    });
    info!("✅  Listening on stdin");

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
    let mut dispatcher = Dispatcher::new(workspace, rx, scheduler_tx);
    dispatcher.listen().await;

    Ok(())
}
