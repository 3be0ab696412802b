//! DTO definitions for match identity, the stream overlay, and the archive
//! of completed matches.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{MatchRecordEntity, MatchSummaryEntity, TeamScoreEntity},
    dto::{format_system_time, validation::validate_team_name},
    state::MatchInfo,
};

/// Payload updating the identity of the match on the field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MatchInfoRequest {
    /// Event-local match number.
    pub match_number: u32,
    /// Red alliance team name.
    pub red_team: String,
    /// Blue alliance team name.
    pub blue_team: String,
}

impl Validate for MatchInfoRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_team_name(&self.red_team) {
            errors.add("red_team", e);
        }
        if let Err(e) = validate_team_name(&self.blue_team) {
            errors.add("blue_team", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<MatchInfoRequest> for MatchInfo {
    fn from(value: MatchInfoRequest) -> Self {
        Self {
            match_number: value.match_number,
            red_team: value.red_team.trim().to_string(),
            blue_team: value.blue_team.trim().to_string(),
        }
    }
}

/// Overlay state returned by `GET /overlay` and `POST /overlay/reveal`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverlayResponse {
    /// Whether the final scores are revealed on the stream overlay.
    pub revealed: bool,
}

/// Persisted score line of one alliance as returned by the archive routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamScoreRecord {
    pub team: String,
    pub auto_score: u32,
    pub teleop_score: u32,
    pub post_match_added_points: u32,
    pub total_score: u32,
    pub penalties: u32,
    pub final_score: u32,
}

impl From<TeamScoreEntity> for TeamScoreRecord {
    fn from(value: TeamScoreEntity) -> Self {
        Self {
            team: value.team,
            auto_score: value.auto_score,
            teleop_score: value.teleop_score,
            post_match_added_points: value.post_match_added_points,
            total_score: value.total_score,
            penalties: value.penalties,
            final_score: value.final_score,
        }
    }
}

/// Full archived match returned by `GET /matches/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchRecordResponse {
    pub id: Uuid,
    pub match_number: u32,
    pub season: String,
    /// RFC 3339 timestamp of when the match was declared finished.
    pub finished_at: String,
    pub red: TeamScoreRecord,
    pub blue: TeamScoreRecord,
}

impl From<MatchRecordEntity> for MatchRecordResponse {
    fn from(value: MatchRecordEntity) -> Self {
        Self {
            id: value.id,
            match_number: value.match_number,
            season: value.season,
            finished_at: format_system_time(value.finished_at),
            red: value.red.into(),
            blue: value.blue.into(),
        }
    }
}

/// Archive listing item returned by `GET /matches`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchSummaryResponse {
    pub id: Uuid,
    pub match_number: u32,
    pub season: String,
    /// RFC 3339 timestamp of when the match was declared finished.
    pub finished_at: String,
    pub red_team: String,
    pub red_final: u32,
    pub blue_team: String,
    pub blue_final: u32,
}

impl From<MatchSummaryEntity> for MatchSummaryResponse {
    fn from(value: MatchSummaryEntity) -> Self {
        Self {
            id: value.id,
            match_number: value.match_number,
            season: value.season,
            finished_at: format_system_time(value.finished_at),
            red_team: value.red_team,
            red_final: value.red_final,
            blue_team: value.blue_team,
            blue_final: value.blue_final,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_info_request_rejects_blank_team_names() {
        let request = MatchInfoRequest {
            match_number: 12,
            red_team: "   ".into(),
            blue_team: "Gear Grinders".into(),
        };
        let errors = request.validate().expect_err("blank name rejected");
        assert!(errors.field_errors().contains_key("red_team"));
        assert!(!errors.field_errors().contains_key("blue_team"));
    }

    #[test]
    fn match_info_request_trims_team_names() {
        let request = MatchInfoRequest {
            match_number: 3,
            red_team: "  Red Hot Robots ".into(),
            blue_team: "Blue Crew".into(),
        };
        assert!(request.validate().is_ok());
        let info: MatchInfo = request.into();
        assert_eq!(info.red_team, "Red Hot Robots");
    }
}
