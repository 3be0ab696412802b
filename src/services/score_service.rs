//! Score sheet updates and scoreboard snapshots.
//!
//! Every edit replaces the whole sheet for one alliance and recomputes both
//! derived score lines from scratch, so a re-delivered or re-ordered edit
//! converges to the same scoreboard.

use crate::{
    dto::score::{ScoreSheetRequest, ScoreboardSnapshot, TeamScoreSummary},
    services::sse_events,
    state::{
        SharedState,
        score::{ScoreSheet, TeamSide},
    },
};

/// Read the stored sheet for one side, defaulting to an empty sheet.
fn sheet_for(state: &SharedState, side: TeamSide) -> ScoreSheet {
    state
        .scores()
        .get(&side)
        .map(|entry| *entry.value())
        .unwrap_or_default()
}

/// Build the derived score line for one alliance.
pub fn team_summary(state: &SharedState, side: TeamSide) -> TeamScoreSummary {
    let sheet = sheet_for(state, side);
    let opponent_penalties = sheet_for(state, side.opponent()).penalties;
    TeamScoreSummary::compute(side, &sheet, opponent_penalties)
}

/// Build both alliances' derived score lines.
pub fn scoreboard_snapshot(state: &SharedState) -> ScoreboardSnapshot {
    ScoreboardSnapshot {
        red: team_summary(state, TeamSide::Red),
        blue: team_summary(state, TeamSide::Blue),
    }
}

/// Replace one alliance's sheet and broadcast the recomputed scoreboard.
/// Both lines are rebroadcast because the opponent's displayed score moves
/// with this side's penalties.
pub fn update_sheet(
    state: &SharedState,
    side: TeamSide,
    request: ScoreSheetRequest,
) -> ScoreboardSnapshot {
    state.scores().insert(side, ScoreSheet::from(request));

    let snapshot = scoreboard_snapshot(state);
    sse_events::broadcast_score_updated(state, snapshot.clone());
    snapshot
}

/// Clear both sheets back to zero, without broadcasting. Callers broadcast
/// the containing change (new match identity) themselves.
pub fn reset_sheets(state: &SharedState) {
    state.scores().insert(TeamSide::Red, ScoreSheet::default());
    state.scores().insert(TeamSide::Blue, ScoreSheet::default());
}
