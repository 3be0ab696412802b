//! DTO definitions for the match clock REST API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::common::TimerSnapshot;

/// Acknowledgement returned when an operator command has been queued for the
/// match engine.
#[derive(Debug, Serialize, ToSchema)]
pub struct TimerCommandResponse {
    /// Sequence number assigned to the command.
    pub seq: u64,
    /// Clock snapshot taken when the command was accepted. The effect of the
    /// command is broadcast over SSE once the engine consumes it.
    pub timer: TimerSnapshot,
}

/// Full clock state returned by `GET /timer`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TimerStateResponse {
    /// Clock snapshot.
    pub timer: TimerSnapshot,
    /// Season ruleset the clock runs with.
    pub season: String,
}
