use std::net::SocketAddr;

use ingest_worker::bus::KafkaBus;
use ingest_worker::config::WorkerConfig;
use ingest_worker::cycle::WorkCycleOrchestrator;
use ingest_worker::directory::PeerDirectory;
use ingest_worker::filter::AddressFilter;
use ingest_worker::health;
use ingest_worker::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = WorkerConfig::from_env()?;

    tracing::info!(
        "Starting worker {} (role {}) against {}",
        config.worker_id,
        config.role_label,
        config.upstream_url
    );

    // The bus connection is the one startup step allowed to kill the
    // process: a worker that cannot publish is useless.
    let bus = KafkaBus::connect(&config.bus_brokers)?;
    tracing::info!("Connected producer to {}", config.bus_brokers);

    // Health probes on their own task so an in-flight cycle never blocks them.
    let health_addr = SocketAddr::from(([0, 0, 0, 0], config.health_port));
    let listener = tokio::net::TcpListener::bind(health_addr).await?;
    tracing::info!("Health server listening on {}", health_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health::router()).await {
            tracing::error!("Health server stopped: {}", e);
        }
    });

    let directory = PeerDirectory::new(
        &config.directory_url,
        &config.directory_token_path,
        &config.worker_id,
    );
    let upstream = UpstreamClient::new(&config.upstream_url);
    let filter = AddressFilter::new(config.district_terms.clone());

    let mut orchestrator = WorkCycleOrchestrator::new(
        directory,
        upstream,
        bus,
        filter,
        &config.worker_id,
        &config.role_label,
        &config.bus_topic,
    );

    tracing::info!(
        "Running one cycle every {}s, publishing to {}",
        config.cycle_interval.as_secs(),
        config.bus_topic
    );

    // Sequential scheduler: at most one cycle in flight per process, and a
    // failed cycle simply waits for the next tick.
    let mut interval = tokio::time::interval(config.cycle_interval);
    loop {
        interval.tick().await;
        orchestrator.run_once().await;
    }
}
