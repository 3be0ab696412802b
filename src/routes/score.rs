//! Scoring endpoints: public scoreboard reads and scorekeeper sheet edits.

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, put},
};
use axum_valid::Valid;

use crate::{
    dto::score::{ScoreSheetRequest, ScoreboardSnapshot, TeamScoreSummary},
    error::AppError,
    routes::require_operator_token,
    services::score_service,
    state::{SharedState, score::TeamSide},
};

/// Configure the scoring routes; sheet edits require the operator token.
pub fn router(state: SharedState) -> Router<SharedState> {
    let guarded = Router::new()
        .route("/scores/{side}", put(update_score_sheet))
        .route_layer(middleware::from_fn_with_state(state, require_operator_token));

    Router::new()
        .route("/scores", get(scoreboard))
        .route("/scores/{side}", get(team_score))
        .merge(guarded)
}

/// Read both alliances' derived score lines.
#[utoipa::path(
    get,
    path = "/scores",
    tag = "scores",
    responses((status = 200, description = "Current scoreboard", body = ScoreboardSnapshot))
)]
pub async fn scoreboard(State(state): State<SharedState>) -> Json<ScoreboardSnapshot> {
    Json(score_service::scoreboard_snapshot(&state))
}

/// Read one alliance's derived score line.
#[utoipa::path(
    get,
    path = "/scores/{side}",
    tag = "scores",
    params(("side" = String, Path, description = "Alliance side (`red` or `blue`)")),
    responses((status = 200, description = "Score line for one alliance", body = TeamScoreSummary))
)]
pub async fn team_score(
    State(state): State<SharedState>,
    Path(side): Path<TeamSide>,
) -> Json<TeamScoreSummary> {
    Json(score_service::team_summary(&state, side))
}

/// Replace one alliance's raw score sheet and rebroadcast the scoreboard.
#[utoipa::path(
    put,
    path = "/scores/{side}",
    tag = "scores",
    params(
        ("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream"),
        ("side" = String, Path, description = "Alliance side (`red` or `blue`)")
    ),
    request_body = ScoreSheetRequest,
    responses((status = 200, description = "Updated scoreboard", body = ScoreboardSnapshot))
)]
pub async fn update_score_sheet(
    State(state): State<SharedState>,
    Path(side): Path<TeamSide>,
    Valid(Json(payload)): Valid<Json<ScoreSheetRequest>>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    Ok(Json(score_service::update_sheet(&state, side, payload)))
}
