//! Match identity, finalization, and stream overlay control.

use std::time::SystemTime;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::{MatchRecordEntity, TeamScoreEntity},
    dto::{
        matches::{MatchRecordResponse, MatchSummaryResponse, OverlayResponse},
        score::TeamScoreSummary,
        sse::FinalScoresEvent,
    },
    error::ServiceError,
    services::{score_service, sse_events},
    state::{MatchInfo, SharedState, score::TeamSide},
};

/// Current match identity.
pub async fn match_info(state: &SharedState) -> MatchInfo {
    state.match_info().read().await.clone()
}

/// Replace the match identity on the field. Starting a new match clears both
/// score sheets and hides the overlay again.
pub async fn update_match_info(state: &SharedState, info: MatchInfo) -> MatchInfo {
    {
        let mut guard = state.match_info().write().await;
        *guard = info.clone();
    }
    score_service::reset_sheets(state);
    hide_overlay(state).await;

    sse_events::broadcast_match_updated(state, info.clone());
    sse_events::broadcast_score_updated(state, score_service::scoreboard_snapshot(state));
    info
}

/// Current overlay state.
pub async fn overlay_state(state: &SharedState) -> OverlayResponse {
    OverlayResponse {
        revealed: *state.overlay_revealed().read().await,
    }
}

/// Reveal the final scores on the stream overlay.
pub async fn reveal_overlay(state: &SharedState) -> OverlayResponse {
    set_overlay(state, true).await;
    sse_events::broadcast_overlay_revealed(state, true);
    OverlayResponse { revealed: true }
}

/// Hide the overlay again, broadcasting only when it was actually visible.
pub async fn hide_overlay(state: &SharedState) {
    let was_revealed = {
        let mut guard = state.overlay_revealed().write().await;
        std::mem::replace(&mut *guard, false)
    };
    if was_revealed {
        sse_events::broadcast_overlay_revealed(state, false);
    }
}

async fn set_overlay(state: &SharedState, revealed: bool) {
    let mut guard = state.overlay_revealed().write().await;
    *guard = revealed;
}

/// Freeze the current scores, persist the match record, and broadcast the
/// final tallies. Invoked by the match engine when the operator's finish
/// command is applied.
///
/// Persistence failures degrade to a broadcast-only finalization so the venue
/// still sees the result; the record is reported as not persisted.
pub async fn finalize(state: &SharedState) {
    let info = match_info(state).await;
    let red = score_service::team_summary(state, TeamSide::Red);
    let blue = score_service::team_summary(state, TeamSide::Blue);

    let record = build_record(state, &info, &red, &blue);
    let id = record.id;

    let persisted = match state.match_store().await {
        Some(store) => match store.save_match(record).await {
            Ok(()) => {
                info!(%id, match_number = info.match_number, "match record persisted");
                true
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to persist match record");
                false
            }
        },
        None => {
            warn!(%id, "no storage backend; match record not persisted");
            false
        }
    };

    sse_events::broadcast_final_scores(
        state,
        &FinalScoresEvent {
            info,
            red,
            blue,
            persisted,
        },
    );
}

fn build_record(
    state: &SharedState,
    info: &MatchInfo,
    red: &TeamScoreSummary,
    blue: &TeamScoreSummary,
) -> MatchRecordEntity {
    MatchRecordEntity {
        id: Uuid::new_v4(),
        match_number: info.match_number,
        season: state.season().to_string(),
        finished_at: SystemTime::now(),
        red: to_entity(info.red_team.clone(), red),
        blue: to_entity(info.blue_team.clone(), blue),
    }
}

fn to_entity(team: String, summary: &TeamScoreSummary) -> TeamScoreEntity {
    TeamScoreEntity {
        team,
        auto_score: summary.auto_score,
        teleop_score: summary.teleop_score,
        post_match_added_points: summary.post_match_added_points,
        total_score: summary.total_score,
        penalties: summary.penalties,
        final_score: summary.display_score,
    }
}

/// List archived matches from storage.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchSummaryResponse>, ServiceError> {
    let store = state.require_match_store().await?;
    let summaries = store.list_matches().await?;
    Ok(summaries.into_iter().map(Into::into).collect())
}

/// Load one archived match by its identifier.
pub async fn get_match(state: &SharedState, id: Uuid) -> Result<MatchRecordResponse, ServiceError> {
    let store = state.require_match_store().await?;
    let record = store
        .find_match(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("match record {id}")))?;
    Ok(record.into())
}
