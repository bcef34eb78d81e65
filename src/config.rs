//! Worker Configuration
//!
//! All process-local configuration is supplied through the environment at
//! startup: credentials and endpoints for the external collaborators
//! (orchestration API, upstream records API, Kafka brokers) plus this
//! replica's own identity and role label. No core logic lives here.

use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 300;
const DEFAULT_HEALTH_PORT: u16 = 8080;

/// Fully resolved worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// This replica's identifier, as it appears in the orchestration API's
    /// member listing. Falls back to `HOSTNAME` when `WORKER_ID` is unset.
    pub worker_id: String,
    /// Role label shared by all replicas of this workload.
    pub role_label: String,
    /// Base URL of the orchestration API.
    pub directory_url: String,
    /// Path of the locally-mounted bearer token for the orchestration API.
    pub directory_token_path: String,
    /// Base URL of the upstream records API.
    pub upstream_url: String,
    /// Kafka bootstrap brokers, comma-separated.
    pub bus_brokers: String,
    /// Topic receiving one message per completed work cycle.
    pub bus_topic: String,
    /// District terms for the address inclusion predicate.
    pub district_terms: Vec<String>,
    /// Delay between scheduled work cycles.
    pub cycle_interval: Duration,
    /// Port for the liveness/readiness HTTP server.
    pub health_port: u16,
}

impl WorkerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Required variables produce a contextual error when missing; optional
    /// ones fall back to the documented defaults.
    pub fn from_env() -> Result<Self> {
        let worker_id = std::env::var("WORKER_ID")
            .or_else(|_| std::env::var("HOSTNAME"))
            .context("neither WORKER_ID nor HOSTNAME is set")?;

        let role_label = require("ROLE_LABEL")?;
        let directory_url = require("DIRECTORY_URL")?;
        let directory_token_path = require("DIRECTORY_TOKEN_FILE")?;
        let upstream_url = require("UPSTREAM_URL")?;
        let bus_brokers = require("BUS_BROKERS")?;
        let bus_topic = require("BUS_TOPIC")?;

        let district_terms = std::env::var("DISTRICT_TERMS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect();

        let cycle_interval_secs = match std::env::var("CYCLE_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("CYCLE_INTERVAL_SECS is not a valid integer")?,
            Err(_) => DEFAULT_CYCLE_INTERVAL_SECS,
        };

        let health_port = match std::env::var("HEALTH_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("HEALTH_PORT is not a valid port")?,
            Err(_) => DEFAULT_HEALTH_PORT,
        };

        Ok(Self {
            worker_id,
            role_label,
            directory_url,
            directory_token_path,
            upstream_url,
            bus_brokers,
            bus_topic,
            district_terms,
            cycle_interval: Duration::from_secs(cycle_interval_secs),
            health_port,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} is not set", name))
}
