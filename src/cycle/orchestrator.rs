use tracing::{error, info};

use super::error::CycleError;
use crate::bus::{MessageBus, WorkResult};
use crate::directory::PeerDirectory;
use crate::filter::{AddressFilter, filter_records};
use crate::partition::{WorkRange, compute_range};
use crate::upstream::UpstreamClient;

/// Position of the cycle pipeline. `Idle` between cycles; the remaining
/// states are passed through in order while a cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    DiscoveringPeers,
    ComputingRange,
    Fetching,
    Filtering,
    Publishing,
}

/// Summary of one completed cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub range: WorkRange,
    pub peer_count: usize,
    pub fetched: usize,
    pub published: usize,
}

/// Outcome handed to the scheduler. Failures are already logged and
/// contained by the time the caller sees this.
#[derive(Debug)]
pub enum CycleOutcome {
    Published(CycleReport),
    Failed,
}

/// Runs the discover -> partition -> fetch -> filter -> publish pipeline
/// once per trigger, containing any stage failure to the current cycle.
pub struct WorkCycleOrchestrator<B: MessageBus> {
    directory: PeerDirectory,
    upstream: UpstreamClient,
    bus: B,
    filter: AddressFilter,
    worker_id: String,
    role_label: String,
    topic: String,
    state: CycleState,
}

impl<B: MessageBus> WorkCycleOrchestrator<B> {
    pub fn new(
        directory: PeerDirectory,
        upstream: UpstreamClient,
        bus: B,
        filter: AddressFilter,
        worker_id: &str,
        role_label: &str,
        topic: &str,
    ) -> Self {
        Self {
            directory,
            upstream,
            bus,
            filter,
            worker_id: worker_id.to_string(),
            role_label: role_label.to_string(),
            topic: topic.to_string(),
            state: CycleState::Idle,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Runs one cycle, never propagating an error to the caller.
    ///
    /// This is the containment boundary: stage failures are logged with the
    /// worker identity and mapped to `CycleOutcome::Failed`, and the state
    /// returns to `Idle` either way so the next trigger starts clean.
    pub async fn run_once(&mut self) -> CycleOutcome {
        let outcome = match self.run_cycle().await {
            Ok(report) => {
                info!(
                    "Cycle complete: range [{}, {}] across {} peer(s), {} fetched, {} published",
                    report.range.start,
                    report.range.end,
                    report.peer_count,
                    report.fetched,
                    report.published
                );
                CycleOutcome::Published(report)
            }
            Err(err) => {
                error!("Cycle failed on {}: {}", self.worker_id, err);
                CycleOutcome::Failed
            }
        };

        self.state = CycleState::Idle;
        outcome
    }

    /// The raw pipeline. Errors abort the current cycle only; `run_once`
    /// owns mapping them to a contained outcome.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        self.state = CycleState::DiscoveringPeers;
        let view = self.directory.list_peers(&self.role_label).await;

        self.state = CycleState::ComputingRange;
        let total = self
            .upstream
            .total_count()
            .await
            .map_err(CycleError::Count)?;
        let range = compute_range(total, view.self_index, view.peer_count());

        info!(
            "Peer {}/{} owns range [{}, {}] of {} item(s)",
            view.self_index + 1,
            view.peer_count(),
            range.start,
            range.end,
            total
        );

        self.state = CycleState::Fetching;
        let records = self
            .upstream
            .fetch_range(range.start, range.end)
            .await
            .map_err(CycleError::Fetch)?;
        let fetched = records.len();

        self.state = CycleState::Filtering;
        let matched = filter_records(records, |r| self.filter.matches(r));

        self.state = CycleState::Publishing;
        let result = WorkResult {
            producer_id: self.worker_id.clone(),
            range,
            records: matched,
        };
        let published = result.records.len();

        let key = result.message_key();
        let payload = serde_json::to_vec(&result).map_err(|err| {
            // Serialization of our own types failing means a bug, but it is
            // still contained to the cycle like any other publish problem.
            CycleError::Publish(crate::bus::PublishError::Delivery {
                reason: err.to_string(),
            })
        })?;

        self.bus.publish(&self.topic, &key, &payload).await?;

        Ok(CycleReport {
            range,
            peer_count: view.peer_count(),
            fetched,
            published,
        })
    }
}
