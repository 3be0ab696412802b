/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match identity, finalization, and overlay control.
pub mod match_service;
/// Score sheet updates and scoreboard snapshots.
pub mod score_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Storage reconnection and degraded-mode supervision.
pub mod storage_supervisor;
/// The single task driving the match clock.
pub mod timer_engine;
/// Operator command issuance and clock snapshots.
pub mod timer_service;
