//! Typed broadcast helpers mapping domain changes to named SSE events.
//!
//! Public events reach every display surface (scoreboard, stream overlay,
//! color displays); operator events only reach the scorekeeper console.

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        common::TimerSnapshot,
        score::ScoreboardSnapshot,
        sse::{
            CueEvent, FinalScoresEvent, MatchUpdatedEvent, OverlayRevealedEvent,
            PhaseChangedEvent, ScoreUpdatedEvent, ServerEvent, SystemStatus, TimerTickEvent,
        },
    },
    state::{MatchInfo, SharedState, timer::CueKind},
};

const EVENT_SYSTEM_STATUS: &str = "system.status";
const EVENT_TIMER_TICK: &str = "timer.tick";
const EVENT_PHASE_CHANGED: &str = "phase.changed";
const EVENT_CUE: &str = "cue";
const EVENT_SCORE_UPDATED: &str = "score.updated";
const EVENT_MATCH_UPDATED: &str = "match.updated";
const EVENT_FINAL_SCORES: &str = "scores.final";
const EVENT_OVERLAY_REVEALED: &str = "overlay.revealed";

/// Broadcast a degraded-mode change to every subscriber.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    let payload = SystemStatus { degraded };
    send_public_event(state, EVENT_SYSTEM_STATUS, &payload);
    send_operator_event(state, EVENT_SYSTEM_STATUS, &payload);
}

/// Broadcast one clock tick to the display surfaces.
pub fn broadcast_timer_tick(state: &SharedState, snapshot: TimerSnapshot) {
    send_public_event(state, EVENT_TIMER_TICK, &TimerTickEvent(snapshot));
}

/// Broadcast a visible phase change to every subscriber.
pub fn broadcast_phase_changed(state: &SharedState, snapshot: TimerSnapshot) {
    let payload = PhaseChangedEvent {
        phase: snapshot.phase,
        timer: snapshot,
    };
    send_public_event(state, EVENT_PHASE_CHANGED, &payload);
    send_operator_event(state, EVENT_PHASE_CHANGED, &payload);
}

/// Broadcast a presentation cue. Each surface decides how to play it.
pub fn broadcast_cue(state: &SharedState, cue: CueKind) {
    let payload = CueEvent { cue };
    send_public_event(state, EVENT_CUE, &payload);
    send_operator_event(state, EVENT_CUE, &payload);
}

/// Broadcast the recomputed scoreboard after a sheet edit.
pub fn broadcast_score_updated(state: &SharedState, scoreboard: ScoreboardSnapshot) {
    let payload = ScoreUpdatedEvent(scoreboard);
    send_public_event(state, EVENT_SCORE_UPDATED, &payload);
    send_operator_event(state, EVENT_SCORE_UPDATED, &payload);
}

/// Broadcast a change of the match identity on the field.
pub fn broadcast_match_updated(state: &SharedState, info: MatchInfo) {
    let payload = MatchUpdatedEvent { info };
    send_public_event(state, EVENT_MATCH_UPDATED, &payload);
    send_operator_event(state, EVENT_MATCH_UPDATED, &payload);
}

/// Broadcast the frozen final scores once a match is finalized.
pub fn broadcast_final_scores(state: &SharedState, event: &FinalScoresEvent) {
    send_public_event(state, EVENT_FINAL_SCORES, event);
    send_operator_event(state, EVENT_FINAL_SCORES, event);
}

/// Broadcast an overlay reveal or hide to the stream surfaces.
pub fn broadcast_overlay_revealed(state: &SharedState, revealed: bool) {
    let payload = OverlayRevealedEvent { revealed };
    send_public_event(state, EVENT_OVERLAY_REVEALED, &payload);
    send_operator_event(state, EVENT_OVERLAY_REVEALED, &payload);
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}

fn send_operator_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.operator_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize operator SSE payload"),
    }
}
