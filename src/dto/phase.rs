use serde::Serialize;
use utoipa::ToSchema;

use crate::state::timer::{MatchPeriod, MatchPhase, PausedIn};

/// Publicly visible match phase exposed to clients (REST/SSE).
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleMatchPhase {
    /// No match is running.
    Idle,
    /// Autonomous period is in progress.
    Autonomous,
    /// Countdown between the two periods.
    Transition,
    /// Driver-control period is in progress.
    DriverControl,
    /// Match clock is paused.
    Paused,
    /// Match has been declared over.
    MatchOver,
}

impl From<&MatchPhase> for VisibleMatchPhase {
    fn from(value: &MatchPhase) -> Self {
        match value {
            MatchPhase::Idle => VisibleMatchPhase::Idle,
            MatchPhase::Running(MatchPeriod::Autonomous) => VisibleMatchPhase::Autonomous,
            MatchPhase::Running(MatchPeriod::DriverControl) => VisibleMatchPhase::DriverControl,
            MatchPhase::TransitionCountdown => VisibleMatchPhase::Transition,
            MatchPhase::Paused(PausedIn::Period(_) | PausedIn::Transition) => {
                VisibleMatchPhase::Paused
            }
            MatchPhase::MatchOver => VisibleMatchPhase::MatchOver,
        }
    }
}
