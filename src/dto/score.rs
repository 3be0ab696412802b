//! DTO definitions for the scoring REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::validate_element_count,
    state::score::{ScoreBreakdown, ScoreSheet, TeamSide},
};

/// Full score sheet submitted by the scorekeeper for one alliance. Every
/// submission replaces the stored sheet; the derived totals are recomputed
/// server-side.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct ScoreSheetRequest {
    /// Pegs scored during autonomous.
    #[serde(default)]
    pub auto_peg: u32,
    /// Uprights scored during autonomous.
    #[serde(default)]
    pub auto_upright: u32,
    /// Targets knocked during autonomous.
    #[serde(default)]
    pub auto_knocked: u32,
    /// Whether the robot parked before autonomous ended.
    #[serde(default)]
    pub parked: bool,
    /// Pegs scored during driver control.
    #[serde(default)]
    pub teleop_peg: u32,
    /// Uprights scored during driver control.
    #[serde(default)]
    pub teleop_upright: u32,
    /// Targets knocked during driver control.
    #[serde(default)]
    pub teleop_knocked: u32,
    /// Rows owned at the end of the match.
    #[serde(default)]
    pub teleop_rows: u32,
    /// Whether the robot climbed in the endgame.
    #[serde(default)]
    pub climbed: bool,
    /// Penalties taken by this alliance.
    #[serde(default)]
    pub penalties: u32,
}

impl Validate for ScoreSheetRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let counters = [
            ("auto_peg", self.auto_peg),
            ("auto_upright", self.auto_upright),
            ("auto_knocked", self.auto_knocked),
            ("teleop_peg", self.teleop_peg),
            ("teleop_upright", self.teleop_upright),
            ("teleop_knocked", self.teleop_knocked),
            ("teleop_rows", self.teleop_rows),
            ("penalties", self.penalties),
        ];

        for (field, count) in counters {
            if let Err(e) = validate_element_count(count) {
                errors.add(field, e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<ScoreSheetRequest> for ScoreSheet {
    fn from(value: ScoreSheetRequest) -> Self {
        Self {
            auto_peg: value.auto_peg,
            auto_upright: value.auto_upright,
            auto_knocked: value.auto_knocked,
            parked: value.parked,
            teleop_peg: value.teleop_peg,
            teleop_upright: value.teleop_upright,
            teleop_knocked: value.teleop_knocked,
            teleop_rows: value.teleop_rows,
            climbed: value.climbed,
            penalties: value.penalties,
        }
    }
}

/// Derived score line for one alliance, including the opponent-penalty
/// conversion applied to the displayed total.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamScoreSummary {
    /// Alliance side.
    pub side: TeamSide,
    /// Autonomous sub-score.
    pub auto_score: u32,
    /// Driver-control sub-score.
    pub teleop_score: u32,
    /// Endgame bonuses added after the match clock expires.
    pub post_match_added_points: u32,
    /// Live score shown during play.
    pub preliminary_score: u32,
    /// Sum of all sub-scores before penalty conversion.
    pub total_score: u32,
    /// Penalties taken by this alliance.
    pub penalties: u32,
    /// Displayed score including the opponent's converted penalties.
    pub display_score: u32,
}

impl TeamScoreSummary {
    /// Build the summary for `side` from its sheet and the opponent's
    /// penalty count.
    pub fn compute(side: TeamSide, sheet: &ScoreSheet, opponent_penalties: u32) -> Self {
        let breakdown: ScoreBreakdown = sheet.breakdown();
        Self {
            side,
            auto_score: breakdown.auto_score,
            teleop_score: breakdown.teleop_score,
            post_match_added_points: breakdown.post_match_added_points,
            preliminary_score: breakdown.preliminary_score,
            total_score: breakdown.total_score,
            penalties: sheet.penalties,
            display_score: breakdown.display_score(opponent_penalties),
        }
    }
}

/// Both alliances' summaries, as shown on the scoreboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreboardSnapshot {
    /// Red alliance score line.
    pub red: TeamScoreSummary,
    /// Blue alliance score line.
    pub blue: TeamScoreSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_with_default_fields_validates() {
        let request: ScoreSheetRequest = serde_json::from_str("{}").expect("empty sheet parses");
        assert!(request.validate().is_ok());
        assert_eq!(ScoreSheet::from(request), ScoreSheet::default());
    }

    #[test]
    fn out_of_range_counter_is_rejected() {
        let request: ScoreSheetRequest =
            serde_json::from_str(r#"{"teleop_peg": 500}"#).expect("sheet parses");
        let errors = request.validate().expect_err("should be rejected");
        assert!(errors.field_errors().contains_key("teleop_peg"));
    }

    #[test]
    fn summary_applies_opponent_penalties() {
        let sheet = ScoreSheet {
            teleop_peg: 2,
            penalties: 1,
            ..Default::default()
        };
        let summary = TeamScoreSummary::compute(TeamSide::Red, &sheet, 4);
        assert_eq!(summary.total_score, 10);
        assert_eq!(summary.display_score, 30);
        assert_eq!(summary.penalties, 1);
    }
}
