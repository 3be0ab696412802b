//! Thin service translating REST calls into sequenced commands for the match
//! engine and read-only clock snapshots.

use crate::{
    dto::{
        common::TimerSnapshot,
        timer::{TimerCommandResponse, TimerStateResponse},
    },
    error::ServiceError,
    state::{SharedState, timer::TimerCommand},
};

/// Stamp `command` with the next sequence number and queue it for the engine.
///
/// The returned snapshot reflects the clock at acceptance time; the effect of
/// the command is observed through the SSE stream once the engine consumes
/// it. Stamping and queue insertion are atomic, so concurrent requests reach
/// the engine in the order their sequence numbers say.
pub async fn issue_command(
    state: &SharedState,
    command: TimerCommand,
) -> Result<TimerCommandResponse, ServiceError> {
    let seq = state.enqueue_command(command).await?;

    let timer = {
        let guard = state.timer().lock().await;
        TimerSnapshot::from(&*guard)
    };

    Ok(TimerCommandResponse { seq, timer })
}

/// Snapshot the clock for `GET /timer`.
pub async fn clock_state(state: &SharedState) -> TimerStateResponse {
    let timer = {
        let guard = state.timer().lock().await;
        TimerSnapshot::from(&*guard)
    };

    TimerStateResponse {
        timer,
        season: state.season().to_string(),
    }
}
