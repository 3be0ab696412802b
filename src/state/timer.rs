use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Timed period of a match whose clock counts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPeriod {
    /// First period, robots run pre-programmed routines.
    Autonomous,
    /// Second period, drivers control the robots.
    DriverControl,
}

/// Records what a pause interrupted so `start` can resume it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PausedIn {
    /// A running period was interrupted; its remaining seconds are frozen.
    Period(MatchPeriod),
    /// The inter-period countdown was interrupted; its value is frozen.
    Transition,
}

/// High-level phase of the match clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match is running; the clock shows the full first-period duration.
    Idle,
    /// A period clock is counting down.
    Running(MatchPeriod),
    /// The fixed-length countdown between the two periods.
    TransitionCountdown,
    /// The clock is frozen and will resume where it stopped.
    Paused(PausedIn),
    /// The match was declared finished by the operator.
    MatchOver,
}

/// Operator commands accepted by the match timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Begin the match from idle, or resume from a pause.
    Start,
    /// Freeze the clock without losing period or countdown state.
    Pause,
    /// Return to idle defaults from any state.
    Reset,
    /// Declare the match over and freeze the final scores.
    Finish,
}

/// A timer command stamped with a monotonically increasing sequence number so
/// replays and out-of-order deliveries are applied at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedCommand {
    /// Sequence number assigned when the command was accepted.
    pub seq: u64,
    /// The command itself.
    pub command: TimerCommand,
}

/// Named presentation cue emitted at fixed points of the match, played by
/// whichever display surfaces care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    /// The match clock started from idle.
    MatchStart,
    /// The autonomous period ended.
    AutonomousComplete,
    /// Drivers should pick up their controllers.
    DriversReady,
    /// The next period starts in a few seconds.
    PhaseImminent,
    /// The endgame window of the driver-control period opened.
    EndgameStart,
    /// Season-specific mid-period warning.
    RingWarning,
    /// The driver-control clock reached zero.
    MatchEnd,
}

/// A cue fired when the driver-control clock crosses a remaining-time mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CueCheckpoint {
    /// Remaining seconds at which the cue fires.
    pub at_remaining: u32,
    /// Cue to emit.
    pub cue: CueKind,
}

/// Season-specific timing parameters for the two-period match clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// Full duration of the autonomous period in seconds.
    pub phase1_seconds: u32,
    /// Remaining-seconds mark of the autonomous clock at which the
    /// inter-period transition begins. An absolute checkpoint, not an offset
    /// from zero: a 150 s period with a 120 mark transitions 30 s in.
    pub transition_offset_seconds: u32,
    /// Length of the inter-period countdown in seconds.
    pub transition_countdown_seconds: u32,
    /// Full duration of the driver-control period in seconds.
    pub phase2_seconds: u32,
    /// Countdown value at which the "phase imminent" cue fires.
    pub imminent_cue_offset_seconds: u32,
    /// Remaining-time cue marks for the driver-control period.
    pub checkpoints: Vec<CueCheckpoint>,
}

/// What a single one-second tick produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Cues crossed during this tick, in firing order.
    pub cues: Vec<CueKind>,
    /// Whether the visible phase changed (e.g. countdown entered or left).
    pub phase_changed: bool,
    /// Whether the displayed value changed at all.
    pub moved: bool,
}

/// Result of applying a sequenced command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was consumed (possibly as a deliberate no-op).
    Applied {
        /// Cues emitted by the command (e.g. match start).
        cues: Vec<CueKind>,
        /// Whether the visible phase changed.
        phase_changed: bool,
    },
    /// The command's sequence number was already consumed and was ignored.
    Stale {
        /// Sequence number of the ignored command.
        seq: u64,
        /// Highest sequence number applied so far.
        last_seq: u64,
    },
}

/// Match clock state machine driving the two-period match flow:
/// `Idle → Running(Autonomous) → TransitionCountdown → Running(DriverControl)
/// → MatchOver`, with pause/resume from either running state and a universal
/// reset back to idle.
///
/// The machine is pure: it is advanced one second at a time by [`tick`] and
/// mutated by [`apply`], and reports side effects as [`CueKind`] values
/// instead of performing them. The async engine owns the wall clock.
///
/// [`tick`]: MatchTimer::tick
/// [`apply`]: MatchTimer::apply
#[derive(Debug, Clone)]
pub struct MatchTimer {
    settings: TimerSettings,
    phase: MatchPhase,
    remaining: u32,
    countdown: u32,
    transition_fired: bool,
    last_seq: u64,
}

impl MatchTimer {
    /// Create an idle timer for the given season settings.
    pub fn new(settings: TimerSettings) -> Self {
        let remaining = settings.phase1_seconds;
        let countdown = settings.transition_countdown_seconds;
        Self {
            settings,
            phase: MatchPhase::Idle,
            remaining,
            countdown,
            transition_fired: false,
            last_seq: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Seconds remaining in the current period clock.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current value of the inter-period countdown.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Highest command sequence number applied so far.
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    /// Seconds the display should show right now: the countdown while the
    /// transition (or a pause inside it) is active, the period clock
    /// otherwise.
    pub fn display_seconds(&self) -> u32 {
        match self.phase {
            MatchPhase::TransitionCountdown | MatchPhase::Paused(PausedIn::Transition) => {
                self.countdown
            }
            _ => self.remaining,
        }
    }

    /// Displayable `M:SS` clock string.
    pub fn display(&self) -> String {
        let seconds = self.display_seconds();
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    /// Apply a sequenced operator command. Commands whose sequence number was
    /// already consumed are reported as [`CommandOutcome::Stale`] and leave
    /// the timer untouched.
    pub fn apply(&mut self, command: SequencedCommand) -> CommandOutcome {
        if command.seq <= self.last_seq {
            return CommandOutcome::Stale {
                seq: command.seq,
                last_seq: self.last_seq,
            };
        }
        self.last_seq = command.seq;

        let mut cues = Vec::new();
        let before = self.phase;

        match command.command {
            TimerCommand::Start => match self.phase {
                MatchPhase::Idle => {
                    self.remaining = self.settings.phase1_seconds;
                    self.countdown = self.settings.transition_countdown_seconds;
                    self.transition_fired = false;
                    self.phase = MatchPhase::Running(MatchPeriod::Autonomous);
                    cues.push(CueKind::MatchStart);
                }
                MatchPhase::Paused(PausedIn::Period(period)) => {
                    self.phase = MatchPhase::Running(period);
                }
                MatchPhase::Paused(PausedIn::Transition) => {
                    self.phase = MatchPhase::TransitionCountdown;
                }
                // Starting an already-running or finished match is a no-op;
                // a finished match needs a reset first.
                MatchPhase::Running(_) | MatchPhase::TransitionCountdown | MatchPhase::MatchOver => {
                }
            },
            TimerCommand::Pause => match self.phase {
                MatchPhase::Running(period) => {
                    self.phase = MatchPhase::Paused(PausedIn::Period(period));
                }
                MatchPhase::TransitionCountdown => {
                    self.phase = MatchPhase::Paused(PausedIn::Transition);
                }
                MatchPhase::Idle | MatchPhase::Paused(_) | MatchPhase::MatchOver => {}
            },
            TimerCommand::Reset => {
                self.remaining = self.settings.phase1_seconds;
                self.countdown = self.settings.transition_countdown_seconds;
                self.transition_fired = false;
                self.phase = MatchPhase::Idle;
            }
            TimerCommand::Finish => {
                self.phase = MatchPhase::MatchOver;
            }
        }

        CommandOutcome::Applied {
            cues,
            phase_changed: self.phase != before,
        }
    }

    /// Advance the clock by one wall-clock second.
    ///
    /// Idle, paused, and finished timers do not move, and a period clock that
    /// already reached zero stays parked until the operator finishes or
    /// resets the match.
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            MatchPhase::Running(period) => self.tick_period(period),
            MatchPhase::TransitionCountdown => self.tick_transition(),
            MatchPhase::Idle | MatchPhase::Paused(_) | MatchPhase::MatchOver => {
                TickOutcome::default()
            }
        }
    }

    fn tick_period(&mut self, period: MatchPeriod) -> TickOutcome {
        if self.remaining == 0 {
            return TickOutcome::default();
        }

        let prev = self.remaining;
        self.remaining -= 1;
        let mut outcome = TickOutcome {
            moved: true,
            ..TickOutcome::default()
        };

        match period {
            MatchPeriod::Autonomous => {
                if !self.transition_fired
                    && crossed(prev, self.remaining, self.settings.transition_offset_seconds)
                {
                    self.transition_fired = true;
                    self.countdown = self.settings.transition_countdown_seconds;
                    self.phase = MatchPhase::TransitionCountdown;
                    outcome.phase_changed = true;
                    outcome.cues.push(CueKind::AutonomousComplete);
                    outcome.cues.push(CueKind::DriversReady);
                }
            }
            MatchPeriod::DriverControl => {
                for checkpoint in &self.settings.checkpoints {
                    if checkpoint.at_remaining > 0
                        && crossed(prev, self.remaining, checkpoint.at_remaining)
                    {
                        outcome.cues.push(checkpoint.cue);
                    }
                }
                if self.remaining == 0 {
                    outcome.cues.push(CueKind::MatchEnd);
                }
            }
        }

        outcome
    }

    fn tick_transition(&mut self) -> TickOutcome {
        if self.countdown == 0 {
            return TickOutcome::default();
        }

        let prev = self.countdown;
        self.countdown -= 1;
        let mut outcome = TickOutcome {
            moved: true,
            ..TickOutcome::default()
        };

        if crossed(
            prev,
            self.countdown,
            self.settings.imminent_cue_offset_seconds,
        ) {
            outcome.cues.push(CueKind::PhaseImminent);
        }

        if self.countdown == 0 {
            self.remaining = self.settings.phase2_seconds;
            self.phase = MatchPhase::Running(MatchPeriod::DriverControl);
            outcome.phase_changed = true;
        }

        outcome
    }
}

/// Downward threshold crossing: true when the value passed `threshold` during
/// this step. Unlike an equality test, a step that skips over the mark still
/// fires, and it fires exactly once because the clock is monotonic within a
/// run.
fn crossed(prev: u32, current: u32, threshold: u32) -> bool {
    prev > threshold && current <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TimerSettings {
        TimerSettings {
            phase1_seconds: 150,
            transition_offset_seconds: 120,
            transition_countdown_seconds: 8,
            phase2_seconds: 120,
            imminent_cue_offset_seconds: 3,
            checkpoints: vec![CueCheckpoint {
                at_remaining: 30,
                cue: CueKind::EndgameStart,
            }],
        }
    }

    fn timer() -> MatchTimer {
        MatchTimer::new(settings())
    }

    fn apply(timer: &mut MatchTimer, command: TimerCommand) -> CommandOutcome {
        let seq = timer.last_seq() + 1;
        timer.apply(SequencedCommand { seq, command })
    }

    fn tick_n(timer: &mut MatchTimer, n: u32) -> Vec<CueKind> {
        let mut cues = Vec::new();
        for _ in 0..n {
            cues.extend(timer.tick().cues);
        }
        cues
    }

    #[test]
    fn initial_state_is_idle_with_full_clock() {
        let timer = timer();
        assert_eq!(timer.phase(), MatchPhase::Idle);
        assert_eq!(timer.remaining(), 150);
        assert_eq!(timer.countdown(), 8);
        assert_eq!(timer.display(), "2:30");
    }

    #[test]
    fn idle_timer_does_not_tick() {
        let mut timer = timer();
        let outcome = timer.tick();
        assert!(!outcome.moved);
        assert_eq!(timer.remaining(), 150);
    }

    #[test]
    fn start_enters_autonomous_and_fires_match_start() {
        let mut timer = timer();
        let outcome = apply(&mut timer, TimerCommand::Start);
        assert_eq!(
            outcome,
            CommandOutcome::Applied {
                cues: vec![CueKind::MatchStart],
                phase_changed: true,
            }
        );
        assert_eq!(timer.phase(), MatchPhase::Running(MatchPeriod::Autonomous));
    }

    #[test]
    fn transition_starts_when_autonomous_clock_reaches_offset() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);

        let cues = tick_n(&mut timer, 30);
        assert_eq!(timer.phase(), MatchPhase::TransitionCountdown);
        assert_eq!(timer.countdown(), 8);
        assert_eq!(timer.remaining(), 120);
        assert!(cues.contains(&CueKind::AutonomousComplete));
        assert!(cues.contains(&CueKind::DriversReady));
    }

    #[test]
    fn countdown_emits_imminent_cue_and_loads_second_period() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 30);

        let cues = tick_n(&mut timer, 5);
        assert_eq!(timer.countdown(), 3);
        assert_eq!(cues, vec![CueKind::PhaseImminent]);

        tick_n(&mut timer, 3);
        assert_eq!(
            timer.phase(),
            MatchPhase::Running(MatchPeriod::DriverControl)
        );
        assert_eq!(timer.remaining(), 120);
    }

    #[test]
    fn transition_fires_only_once_per_run() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 38);

        // Driver control is now running; nothing in the second period may
        // re-enter the countdown.
        let cues = tick_n(&mut timer, 120);
        assert!(!cues.contains(&CueKind::AutonomousComplete));
        assert_eq!(
            timer.phase(),
            MatchPhase::Running(MatchPeriod::DriverControl)
        );
    }

    #[test]
    fn endgame_cue_fires_at_checkpoint_exactly_once() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 38);

        let cues = tick_n(&mut timer, 90);
        assert_eq!(timer.remaining(), 30);
        assert_eq!(
            cues.iter().filter(|c| **c == CueKind::EndgameStart).count(),
            1
        );

        let rest = tick_n(&mut timer, 29);
        assert!(!rest.contains(&CueKind::EndgameStart));
    }

    #[test]
    fn full_match_runs_for_158_ticks() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);

        let cues = tick_n(&mut timer, 158);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(cues.iter().filter(|c| **c == CueKind::MatchEnd).count(), 1);

        // The clock parks at zero; only a finish or reset moves on.
        let outcome = timer.tick();
        assert!(!outcome.moved);
        assert_eq!(
            timer.phase(),
            MatchPhase::Running(MatchPeriod::DriverControl)
        );
    }

    #[test]
    fn pause_and_start_resume_from_the_frozen_value() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 10);
        assert_eq!(timer.remaining(), 140);

        apply(&mut timer, TimerCommand::Pause);
        assert_eq!(
            timer.phase(),
            MatchPhase::Paused(PausedIn::Period(MatchPeriod::Autonomous))
        );
        assert!(!timer.tick().moved);
        assert_eq!(timer.remaining(), 140);

        apply(&mut timer, TimerCommand::Start);
        assert_eq!(timer.phase(), MatchPhase::Running(MatchPeriod::Autonomous));
        timer.tick();
        assert_eq!(timer.remaining(), 139);
    }

    #[test]
    fn pause_during_transition_preserves_countdown() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 32);
        assert_eq!(timer.countdown(), 6);

        apply(&mut timer, TimerCommand::Pause);
        assert_eq!(timer.phase(), MatchPhase::Paused(PausedIn::Transition));
        assert_eq!(timer.display(), "0:06");
        assert!(!timer.tick().moved);

        apply(&mut timer, TimerCommand::Start);
        assert_eq!(timer.phase(), MatchPhase::TransitionCountdown);
        assert_eq!(timer.countdown(), 6);
    }

    #[test]
    fn reset_restores_idle_defaults_from_any_state() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 45);
        apply(&mut timer, TimerCommand::Pause);

        apply(&mut timer, TimerCommand::Reset);
        assert_eq!(timer.phase(), MatchPhase::Idle);
        assert_eq!(timer.remaining(), 150);
        assert_eq!(timer.countdown(), 8);

        apply(&mut timer, TimerCommand::Finish);
        apply(&mut timer, TimerCommand::Reset);
        assert_eq!(timer.phase(), MatchPhase::Idle);
    }

    #[test]
    fn reset_rearms_the_transition_guard() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 30);
        assert_eq!(timer.phase(), MatchPhase::TransitionCountdown);

        apply(&mut timer, TimerCommand::Reset);
        apply(&mut timer, TimerCommand::Start);
        let cues = tick_n(&mut timer, 30);
        assert!(cues.contains(&CueKind::AutonomousComplete));
    }

    #[test]
    fn finish_freezes_the_clock() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 50);

        apply(&mut timer, TimerCommand::Finish);
        assert_eq!(timer.phase(), MatchPhase::MatchOver);
        assert!(!timer.tick().moved);

        // A finished match does not restart without a reset.
        apply(&mut timer, TimerCommand::Start);
        assert_eq!(timer.phase(), MatchPhase::MatchOver);
    }

    #[test]
    fn stale_sequence_numbers_are_ignored() {
        let mut timer = timer();
        assert!(matches!(
            timer.apply(SequencedCommand {
                seq: 1,
                command: TimerCommand::Start,
            }),
            CommandOutcome::Applied { .. }
        ));
        tick_n(&mut timer, 5);

        // A replayed command must not reset the clock.
        let outcome = timer.apply(SequencedCommand {
            seq: 1,
            command: TimerCommand::Reset,
        });
        assert_eq!(outcome, CommandOutcome::Stale { seq: 1, last_seq: 1 });
        assert_eq!(timer.remaining(), 145);
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let mut timer = timer();
        apply(&mut timer, TimerCommand::Start);
        tick_n(&mut timer, 12);

        let outcome = apply(&mut timer, TimerCommand::Start);
        assert_eq!(
            outcome,
            CommandOutcome::Applied {
                cues: vec![],
                phase_changed: false,
            }
        );
        assert_eq!(timer.remaining(), 138);
    }

    #[test]
    fn crossed_fires_even_when_a_second_is_skipped() {
        assert!(crossed(31, 30, 30));
        assert!(crossed(31, 29, 30));
        assert!(!crossed(30, 29, 30));
        assert!(!crossed(33, 31, 30));
    }
}
