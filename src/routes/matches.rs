//! Match identity, stream overlay, and completed-match archive endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::matches::{
        MatchInfoRequest, MatchRecordResponse, MatchSummaryResponse, OverlayResponse,
    },
    error::AppError,
    routes::require_operator_token,
    services::match_service,
    state::{MatchInfo, SharedState},
};

/// Configure the match routes; mutations require the operator token.
pub fn router(state: SharedState) -> Router<SharedState> {
    let guarded = Router::new()
        .route("/match", put(update_match))
        .route("/overlay/reveal", post(reveal_overlay))
        .route_layer(middleware::from_fn_with_state(state, require_operator_token));

    Router::new()
        .route("/match", get(current_match))
        .route("/overlay", get(overlay_state))
        .route("/matches", get(list_matches))
        .route("/matches/{id}", get(get_match))
        .merge(guarded)
}

/// Read the identity of the match on the field.
#[utoipa::path(
    get,
    path = "/match",
    tag = "match",
    responses((status = 200, description = "Current match identity", body = MatchInfo))
)]
pub async fn current_match(State(state): State<SharedState>) -> Json<MatchInfo> {
    Json(match_service::match_info(&state).await)
}

/// Put a new match on the field, clearing scores and hiding the overlay.
#[utoipa::path(
    put,
    path = "/match",
    tag = "match",
    params(("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream")),
    request_body = MatchInfoRequest,
    responses((status = 200, description = "Match identity updated", body = MatchInfo))
)]
pub async fn update_match(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<MatchInfoRequest>>,
) -> Result<Json<MatchInfo>, AppError> {
    let info = match_service::update_match_info(&state, payload.into()).await;
    Ok(Json(info))
}

/// Read the overlay reveal state.
#[utoipa::path(
    get,
    path = "/overlay",
    tag = "match",
    responses((status = 200, description = "Overlay state", body = OverlayResponse))
)]
pub async fn overlay_state(State(state): State<SharedState>) -> Json<OverlayResponse> {
    Json(match_service::overlay_state(&state).await)
}

/// Reveal the final scores on the stream overlay.
#[utoipa::path(
    post,
    path = "/overlay/reveal",
    tag = "match",
    params(("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream")),
    responses((status = 200, description = "Overlay revealed", body = OverlayResponse))
)]
pub async fn reveal_overlay(State(state): State<SharedState>) -> Json<OverlayResponse> {
    Json(match_service::reveal_overlay(&state).await)
}

/// List archived match records.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "match",
    responses((status = 200, description = "Archived matches", body = [MatchSummaryResponse]))
)]
pub async fn list_matches(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MatchSummaryResponse>>, AppError> {
    Ok(Json(match_service::list_matches(&state).await?))
}

/// Load one archived match record.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "match",
    params(("id" = String, Path, description = "Identifier of the match record")),
    responses((status = 200, description = "Archived match", body = MatchRecordResponse))
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchRecordResponse>, AppError> {
    Ok(Json(match_service::get_match(&state, id).await?))
}
