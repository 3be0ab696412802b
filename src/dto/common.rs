use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::phase::VisibleMatchPhase, state::timer::MatchTimer};

/// Shared snapshot of the match clock sent over REST and SSE.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct TimerSnapshot {
    /// Current visible phase.
    pub phase: VisibleMatchPhase,
    /// Seconds the display surfaces should show.
    pub seconds_remaining: u32,
    /// Pre-formatted `M:SS` clock string.
    pub clock: String,
    /// Countdown value, present while the inter-period transition runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<u32>,
    /// Sequence number of the last operator command applied.
    pub last_seq: u64,
}

impl From<&MatchTimer> for TimerSnapshot {
    fn from(timer: &MatchTimer) -> Self {
        let phase = VisibleMatchPhase::from(&timer.phase());
        let countdown = match phase {
            VisibleMatchPhase::Transition => Some(timer.countdown()),
            _ => None,
        };

        Self {
            phase,
            seconds_remaining: timer.display_seconds(),
            clock: timer.display(),
            countdown,
            last_seq: timer.last_seq(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timer::{
        CueCheckpoint, CueKind, SequencedCommand, TimerCommand, TimerSettings,
    };

    fn timer() -> MatchTimer {
        MatchTimer::new(TimerSettings {
            phase1_seconds: 150,
            transition_offset_seconds: 120,
            transition_countdown_seconds: 8,
            phase2_seconds: 120,
            imminent_cue_offset_seconds: 3,
            checkpoints: vec![CueCheckpoint {
                at_remaining: 30,
                cue: CueKind::EndgameStart,
            }],
        })
    }

    #[test]
    fn snapshot_of_idle_timer_shows_full_clock() {
        let snapshot = TimerSnapshot::from(&timer());
        assert_eq!(snapshot.phase, VisibleMatchPhase::Idle);
        assert_eq!(snapshot.seconds_remaining, 150);
        assert_eq!(snapshot.clock, "2:30");
        assert!(snapshot.countdown.is_none());
    }

    #[test]
    fn snapshot_during_transition_carries_the_countdown() {
        let mut timer = timer();
        timer.apply(SequencedCommand {
            seq: 1,
            command: TimerCommand::Start,
        });
        for _ in 0..31 {
            timer.tick();
        }

        let snapshot = TimerSnapshot::from(&timer);
        assert_eq!(snapshot.phase, VisibleMatchPhase::Transition);
        assert_eq!(snapshot.countdown, Some(7));
        assert_eq!(snapshot.seconds_remaining, 7);
    }
}
