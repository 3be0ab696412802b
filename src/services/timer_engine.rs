//! The single task that owns the wall clock.
//!
//! One loop advances the match timer once per second and consumes operator
//! commands from the queue, so command application and ticking can never
//! interleave. Everything the timer reports back (cues, phase changes) is
//! turned into SSE broadcasts here.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::{
    dto::common::TimerSnapshot,
    services::{match_service, sse_events},
    state::{
        SharedState,
        timer::{CommandOutcome, SequencedCommand, TimerCommand},
    },
};

/// Drive the match clock until the command queue closes.
pub async fn run(state: SharedState, mut commands: mpsc::Receiver<SequencedCommand>) {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("match engine started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                on_tick(&state).await;
            }
            maybe_command = commands.recv() => {
                let Some(command) = maybe_command else {
                    break;
                };
                on_command(&state, command).await;
            }
        }
    }

    info!("command queue closed; match engine stopping");
}

async fn on_tick(state: &SharedState) {
    let (outcome, snapshot) = {
        let mut guard = state.timer().lock().await;
        let outcome = guard.tick();
        (outcome, TimerSnapshot::from(&*guard))
    };

    if !outcome.moved {
        return;
    }

    if outcome.phase_changed {
        sse_events::broadcast_phase_changed(state, snapshot.clone());
    }
    sse_events::broadcast_timer_tick(state, snapshot);

    for cue in outcome.cues {
        debug!(?cue, "presentation cue crossed");
        sse_events::broadcast_cue(state, cue);
    }
}

async fn on_command(state: &SharedState, command: SequencedCommand) {
    let issued = command.command;

    let (outcome, snapshot) = {
        let mut guard = state.timer().lock().await;
        let outcome = guard.apply(command);
        (outcome, TimerSnapshot::from(&*guard))
    };

    let (cues, phase_changed) = match outcome {
        CommandOutcome::Applied {
            cues,
            phase_changed,
        } => (cues, phase_changed),
        CommandOutcome::Stale { seq, last_seq } => {
            warn!(seq, last_seq, ?issued, "ignoring stale timer command");
            return;
        }
    };

    info!(seq = snapshot.last_seq, ?issued, "timer command applied");

    if phase_changed {
        sse_events::broadcast_phase_changed(state, snapshot.clone());
        sse_events::broadcast_timer_tick(state, snapshot);
    }

    for cue in cues {
        debug!(?cue, "presentation cue emitted by command");
        sse_events::broadcast_cue(state, cue);
    }

    // Finishing a match freezes and archives the scores. Only the transition
    // into the finished state does this; a redundant finish is inert.
    if issued == TimerCommand::Finish && phase_changed {
        match_service::finalize(state).await;
    }

    // Rearming the clock also takes the final-scores overlay off the stream.
    if issued == TimerCommand::Reset {
        match_service::hide_overlay(state).await;
    }
}
