use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{
        common::TimerSnapshot,
        phase::VisibleMatchPhase,
        score::{ScoreboardSnapshot, TeamScoreSummary},
    },
    state::{MatchInfo, timer::CueKind},
};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Build an event from a pre-rendered data string.
    pub fn new<E>(event: E, data: String) -> Self
    where
        E: Into<Option<String>>,
    {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream (`public` or `operator`).
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether the backend is running without a storage backend connection.
    pub degraded: bool,
    /// Optional operator token returned when the stream is privileged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast once per second while the match clock is moving.
pub struct TimerTickEvent(pub TimerSnapshot);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever the visible match phase changes.
pub struct PhaseChangedEvent {
    /// New visible phase.
    pub phase: VisibleMatchPhase,
    /// Clock snapshot taken after the change.
    pub timer: TimerSnapshot,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the match crosses a presentation cue mark. Display
/// surfaces decide what to do with each cue (sound, color flash, banner).
pub struct CueEvent {
    pub cue: CueKind,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast whenever a score sheet edit changes the scoreboard.
pub struct ScoreUpdatedEvent(pub ScoreboardSnapshot);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the identity of the match on the field changes.
pub struct MatchUpdatedEvent {
    pub info: MatchInfo,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast once when the match is finalized, carrying the frozen scores.
pub struct FinalScoresEvent {
    /// Identity of the finished match.
    pub info: MatchInfo,
    /// Red alliance final score line.
    pub red: TeamScoreSummary,
    /// Blue alliance final score line.
    pub blue: TeamScoreSummary,
    /// Whether the record was persisted (false while degraded).
    pub persisted: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the stream overlay reveals or hides the final scores.
pub struct OverlayRevealedEvent {
    pub revealed: bool,
}
