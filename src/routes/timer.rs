//! Match clock endpoints: a public snapshot and the operator command surface.

use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};

use crate::{
    dto::timer::{TimerCommandResponse, TimerStateResponse},
    error::AppError,
    routes::require_operator_token,
    services::timer_service,
    state::{SharedState, timer::TimerCommand},
};

/// Configure the clock routes; command endpoints require the operator token.
pub fn router(state: SharedState) -> Router<SharedState> {
    let commands = Router::new()
        .route("/timer/start", post(start_match))
        .route("/timer/pause", post(pause_match))
        .route("/timer/reset", post(reset_match))
        .route("/timer/finish", post(finish_match))
        .route_layer(middleware::from_fn_with_state(state, require_operator_token));

    Router::new()
        .route("/timer", get(clock_state))
        .merge(commands)
}

/// Read the current clock state.
#[utoipa::path(
    get,
    path = "/timer",
    tag = "timer",
    responses((status = 200, description = "Current match clock state", body = TimerStateResponse))
)]
pub async fn clock_state(State(state): State<SharedState>) -> Json<TimerStateResponse> {
    Json(timer_service::clock_state(&state).await)
}

/// Start the match from idle, or resume a paused clock.
#[utoipa::path(
    post,
    path = "/timer/start",
    tag = "timer",
    params(("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream")),
    responses((status = 202, description = "Start command queued", body = TimerCommandResponse))
)]
pub async fn start_match(
    State(state): State<SharedState>,
) -> Result<Json<TimerCommandResponse>, AppError> {
    Ok(Json(
        timer_service::issue_command(&state, TimerCommand::Start).await?,
    ))
}

/// Freeze the clock without losing state.
#[utoipa::path(
    post,
    path = "/timer/pause",
    tag = "timer",
    params(("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream")),
    responses((status = 202, description = "Pause command queued", body = TimerCommandResponse))
)]
pub async fn pause_match(
    State(state): State<SharedState>,
) -> Result<Json<TimerCommandResponse>, AppError> {
    Ok(Json(
        timer_service::issue_command(&state, TimerCommand::Pause).await?,
    ))
}

/// Return the clock to idle defaults.
#[utoipa::path(
    post,
    path = "/timer/reset",
    tag = "timer",
    params(("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream")),
    responses((status = 202, description = "Reset command queued", body = TimerCommandResponse))
)]
pub async fn reset_match(
    State(state): State<SharedState>,
) -> Result<Json<TimerCommandResponse>, AppError> {
    Ok(Json(
        timer_service::issue_command(&state, TimerCommand::Reset).await?,
    ))
}

/// Declare the match over, freezing and archiving the final scores.
#[utoipa::path(
    post,
    path = "/timer/finish",
    tag = "timer",
    params(("X-Operator-Token" = String, Header, description = "Operator token issued by the /sse/operator stream")),
    responses((status = 202, description = "Finish command queued", body = TimerCommandResponse))
)]
pub async fn finish_match(
    State(state): State<SharedState>,
) -> Result<Json<TimerCommandResponse>, AppError> {
    Ok(Json(
        timer_service::issue_command(&state, TimerCommand::Finish).await?,
    ))
}
