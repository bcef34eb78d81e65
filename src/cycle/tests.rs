//! Work Cycle Tests
//!
//! End-to-end cycles against mock orchestration and upstream servers with an
//! in-memory bus, plus the containment behavior on stage failures.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Extension, Json, Router};
    use serde::Deserialize;

    use crate::bus::WorkResult;
    use crate::bus::producer::memory::{FailingBus, MemoryBus};
    use crate::cycle::{CycleError, CycleOutcome, CycleState, WorkCycleOrchestrator};
    use crate::directory::PeerDirectory;
    use crate::directory::types::{Member, MemberListResponse};
    use crate::filter::AddressFilter;
    use crate::upstream::UpstreamClient;
    use crate::upstream::types::{PageResponse, Record};

    const TOTAL: u64 = 101;

    #[derive(Debug, Deserialize)]
    struct Window {
        start: u64,
        end: u64,
    }

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn token_file() -> String {
        let path = std::env::temp_dir().join(format!("cycle-token-{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, "test-token\n").unwrap();
        path.to_string_lossy().to_string()
    }

    fn member(id: &str) -> Member {
        let mut labels = HashMap::new();
        labels.insert("role".to_string(), "ingest".to_string());
        Member {
            id: id.to_string(),
            labels,
        }
    }

    async fn spawn_directory(ids: &[&str]) -> String {
        let listing = MemberListResponse {
            members: ids.iter().map(|id| member(id)).collect(),
        };
        let app = Router::new().route(
            "/members",
            get(move || {
                let listing = listing.clone();
                async move { Json(listing) }
            }),
        );
        spawn(app).await
    }

    /// Upstream with even-indexed records in Vegueta and the rest elsewhere.
    async fn handle_records(
        Query(window): Query<Window>,
        Extension(healthy): Extension<Arc<AtomicBool>>,
    ) -> Json<PageResponse> {
        if !healthy.load(Ordering::SeqCst) {
            return Json(PageResponse {
                status: "error".to_string(),
                message: Some("upstream offline".to_string()),
                total: 0,
                items: vec![],
            });
        }

        let items = (window.start..=window.end.min(TOTAL))
            .map(|id| Record {
                id,
                address: if id % 2 == 0 {
                    format!("{} Vegueta Lane", id)
                } else {
                    format!("{} Harbor Road", id)
                },
                extra: serde_json::Map::new(),
            })
            .collect();

        Json(PageResponse {
            status: "ok".to_string(),
            message: None,
            total: TOTAL,
            items,
        })
    }

    async fn spawn_upstream(healthy: Arc<AtomicBool>) -> String {
        let app = Router::new()
            .route("/records", get(handle_records))
            .layer(Extension(healthy));
        spawn(app).await
    }

    fn orchestrator<B: crate::bus::MessageBus>(
        directory_url: &str,
        upstream_url: &str,
        bus: B,
        worker_id: &str,
    ) -> WorkCycleOrchestrator<B> {
        WorkCycleOrchestrator::new(
            PeerDirectory::new(directory_url, &token_file(), worker_id),
            UpstreamClient::new(upstream_url),
            bus,
            AddressFilter::new(vec!["Vegueta".to_string()]),
            worker_id,
            "ingest",
            "listings",
        )
    }

    // ============================================================
    // HAPPY PATH
    // ============================================================

    #[tokio::test]
    async fn test_full_cycle_publishes_own_slice_filtered() {
        let directory_url = spawn_directory(&["ingest-0", "ingest-1", "ingest-2"]).await;
        let upstream_url = spawn_upstream(Arc::new(AtomicBool::new(true))).await;

        let mut orchestrator =
            orchestrator(&directory_url, &upstream_url, MemoryBus::default(), "ingest-1");

        let outcome = orchestrator.run_once().await;

        let report = match outcome {
            CycleOutcome::Published(report) => report,
            CycleOutcome::Failed => panic!("cycle should have completed"),
        };

        // 101 items across 3 peers, index 1 -> [35, 68]
        assert_eq!(report.peer_count, 3);
        assert_eq!((report.range.start, report.range.end), (35, 68));
        assert_eq!(report.fetched, 34);
        // Even ids within [35, 68]: 36, 38, ..., 68
        assert_eq!(report.published, 17);

        assert_eq!(orchestrator.state(), CycleState::Idle);
    }

    #[tokio::test]
    async fn test_published_payload_is_the_work_result() {
        let directory_url = spawn_directory(&["ingest-0"]).await;
        let upstream_url = spawn_upstream(Arc::new(AtomicBool::new(true))).await;

        let bus = Arc::new(MemoryBus::default());
        let mut orchestrator = WorkCycleOrchestrator::new(
            PeerDirectory::new(&directory_url, &token_file(), "ingest-0"),
            UpstreamClient::new(&upstream_url),
            bus.clone(),
            AddressFilter::new(vec!["Vegueta".to_string()]),
            "ingest-0",
            "ingest",
            "listings",
        );

        orchestrator.run_once().await;

        let messages = bus.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].topic, "listings");
        assert!(messages[0].key.starts_with("ingest-0:1-101:"));

        let result: WorkResult = serde_json::from_slice(&messages[0].payload).unwrap();
        assert_eq!(result.producer_id, "ingest-0");
        assert_eq!((result.range.start, result.range.end), (1, 101));
        assert!(result.records.iter().all(|r| r.address.contains("Vegueta")));
        assert_eq!(result.records.len(), 50);
    }

    #[tokio::test]
    async fn test_degraded_directory_still_completes_solo() {
        // Unreachable orchestration API: the worker assumes it is alone and
        // processes the whole index space.
        let upstream_url = spawn_upstream(Arc::new(AtomicBool::new(true))).await;

        let mut orchestrator = orchestrator(
            "http://127.0.0.1:1",
            &upstream_url,
            MemoryBus::default(),
            "ingest-0",
        );

        match orchestrator.run_once().await {
            CycleOutcome::Published(report) => {
                assert_eq!(report.peer_count, 1);
                assert_eq!((report.range.start, report.range.end), (1, TOTAL));
            }
            CycleOutcome::Failed => panic!("degraded directory must not fail the cycle"),
        }
    }

    // ============================================================
    // FAILURE CONTAINMENT
    // ============================================================

    #[tokio::test]
    async fn test_fetch_failure_is_contained_and_next_cycle_recovers() {
        let directory_url = spawn_directory(&["ingest-0"]).await;
        let healthy = Arc::new(AtomicBool::new(false));
        let upstream_url = spawn_upstream(healthy.clone()).await;

        let mut orchestrator =
            orchestrator(&directory_url, &upstream_url, MemoryBus::default(), "ingest-0");

        // Cycle 1: upstream reports its error marker; contained, no panic.
        assert!(matches!(
            orchestrator.run_once().await,
            CycleOutcome::Failed
        ));
        assert_eq!(orchestrator.state(), CycleState::Idle);

        // Cycle 2: upstream recovered; the same orchestrator succeeds.
        healthy.store(true, Ordering::SeqCst);
        assert!(matches!(
            orchestrator.run_once().await,
            CycleOutcome::Published(_)
        ));
    }

    #[tokio::test]
    async fn test_count_failure_maps_to_count_error() {
        let directory_url = spawn_directory(&["ingest-0"]).await;
        let upstream_url = spawn_upstream(Arc::new(AtomicBool::new(false))).await;

        let mut orchestrator =
            orchestrator(&directory_url, &upstream_url, MemoryBus::default(), "ingest-0");

        let err = orchestrator.run_cycle().await.unwrap_err();
        assert!(matches!(err, CycleError::Count(_)));
    }

    #[tokio::test]
    async fn test_publish_failure_is_contained() {
        let directory_url = spawn_directory(&["ingest-0"]).await;
        let upstream_url = spawn_upstream(Arc::new(AtomicBool::new(true))).await;

        let mut orchestrator =
            orchestrator(&directory_url, &upstream_url, FailingBus, "ingest-0");

        assert!(matches!(
            orchestrator.run_once().await,
            CycleOutcome::Failed
        ));
        assert_eq!(orchestrator.state(), CycleState::Idle);
    }

    // ============================================================
    // EMPTY WORKLOAD
    // ============================================================

    #[tokio::test]
    async fn test_empty_total_publishes_empty_result() {
        let directory_url = spawn_directory(&["ingest-0", "ingest-1"]).await;

        // Upstream with nothing to hand out.
        let app = Router::new().route(
            "/records",
            get(|| async {
                Json(PageResponse {
                    status: "ok".to_string(),
                    message: None,
                    total: 0,
                    items: vec![],
                })
            }),
        );
        let upstream_url = spawn(app).await;

        let bus = Arc::new(MemoryBus::default());
        let mut orchestrator = WorkCycleOrchestrator::new(
            PeerDirectory::new(&directory_url, &token_file(), "ingest-1"),
            UpstreamClient::new(&upstream_url),
            bus.clone(),
            AddressFilter::new(vec!["Vegueta".to_string()]),
            "ingest-1",
            "ingest",
            "listings",
        );

        match orchestrator.run_once().await {
            CycleOutcome::Published(report) => {
                assert!(report.range.is_empty());
                assert_eq!(report.fetched, 0);
                assert_eq!(report.published, 0);
            }
            CycleOutcome::Failed => panic!("empty workload is a no-op, not an error"),
        }

        // One message still goes out per completed cycle.
        let messages = bus.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        let result: WorkResult = serde_json::from_slice(&messages[0].payload).unwrap();
        assert!(result.records.is_empty());
    }
}
