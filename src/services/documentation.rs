use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Arena Live Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::sse::operator_stream,
        crate::routes::timer::clock_state,
        crate::routes::timer::start_match,
        crate::routes::timer::pause_match,
        crate::routes::timer::reset_match,
        crate::routes::timer::finish_match,
        crate::routes::score::scoreboard,
        crate::routes::score::team_score,
        crate::routes::score::update_score_sheet,
        crate::routes::matches::current_match,
        crate::routes::matches::update_match,
        crate::routes::matches::overlay_state,
        crate::routes::matches::reveal_overlay,
        crate::routes::matches::list_matches,
        crate::routes::matches::get_match,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::TimerSnapshot,
            crate::dto::phase::VisibleMatchPhase,
            crate::dto::timer::TimerCommandResponse,
            crate::dto::timer::TimerStateResponse,
            crate::dto::score::ScoreSheetRequest,
            crate::dto::score::TeamScoreSummary,
            crate::dto::score::ScoreboardSnapshot,
            crate::dto::matches::MatchInfoRequest,
            crate::dto::matches::OverlayResponse,
            crate::dto::matches::MatchRecordResponse,
            crate::dto::matches::MatchSummaryResponse,
            crate::dto::sse::Handshake,
            crate::dto::sse::SystemStatus,
            crate::dto::sse::CueEvent,
            crate::dto::sse::PhaseChangedEvent,
            crate::dto::sse::FinalScoresEvent,
            crate::dto::sse::OverlayRevealedEvent,
            crate::state::MatchInfo,
            crate::state::score::TeamSide,
            crate::state::timer::CueKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "timer", description = "Match clock control"),
        (name = "scores", description = "Scoreboard reads and score sheet edits"),
        (name = "match", description = "Match identity, overlay, and archive"),
    )
)]
pub struct ApiDoc;
