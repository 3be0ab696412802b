use axum::{
    Router, body::Body, extract::State, http::Request, middleware::Next, response::Response,
};

use crate::{error::AppError, state::SharedState};

pub mod docs;
pub mod health;
pub mod matches;
pub mod score;
pub mod sse;
pub mod timer;

const OPERATOR_TOKEN_HEADER: &str = "x-operator-token";

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(timer::router(state.clone()))
        .merge(score::router(state.clone()))
        .merge(matches::router(state.clone()));

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Reject requests whose `X-Operator-Token` header does not match the token
/// issued to the connected operator console.
pub(crate) async fn require_operator_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(OPERATOR_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing operator token header `X-Operator-Token`".into())
        })?;

    let expected = {
        let guard = state.operator_token().lock().await;
        guard.clone()
    };

    match expected {
        Some(token) if token == provided => Ok(next.run(req).await),
        Some(_) => Err(AppError::Unauthorized("invalid operator token".into())),
        None => Err(AppError::Unauthorized(
            "operator SSE stream not initialised yet".into(),
        )),
    }
}
