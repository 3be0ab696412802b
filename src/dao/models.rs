use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Final score line of one alliance, persisted alongside its raw counters so
/// the season weighting can be re-audited later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamScoreEntity {
    /// Display name of the team.
    pub team: String,
    /// Autonomous sub-score.
    pub auto_score: u32,
    /// Driver-control sub-score.
    pub teleop_score: u32,
    /// Endgame bonuses added after the match clock expired.
    pub post_match_added_points: u32,
    /// Sum of the three sub-scores, before penalty conversion.
    pub total_score: u32,
    /// Penalties this team took during the match.
    pub penalties: u32,
    /// Final score including the opponent's converted penalties.
    pub final_score: u32,
}

/// Completed match persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecordEntity {
    /// Primary key of the record.
    pub id: Uuid,
    /// Event-local match number.
    pub match_number: u32,
    /// Season ruleset the match was scored under.
    pub season: String,
    /// When the operator declared the match finished.
    pub finished_at: SystemTime,
    /// Red alliance score line.
    pub red: TeamScoreEntity,
    /// Blue alliance score line.
    pub blue: TeamScoreEntity,
}

/// Summary representation of a match record (subset of [`MatchRecordEntity`])
/// used for listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSummaryEntity {
    /// Primary key of the record.
    pub id: Uuid,
    /// Event-local match number.
    pub match_number: u32,
    /// Season ruleset the match was scored under.
    pub season: String,
    /// When the operator declared the match finished.
    pub finished_at: SystemTime,
    /// Red alliance team name.
    pub red_team: String,
    /// Red alliance final score.
    pub red_final: u32,
    /// Blue alliance team name.
    pub blue_team: String,
    /// Blue alliance final score.
    pub blue_final: u32,
}

impl From<MatchRecordEntity> for MatchSummaryEntity {
    fn from(entity: MatchRecordEntity) -> Self {
        Self {
            id: entity.id,
            match_number: entity.match_number,
            season: entity.season,
            finished_at: entity.finished_at,
            red_team: entity.red.team,
            red_final: entity.red.final_score,
            blue_team: entity.blue.team,
            blue_final: entity.blue.final_score,
        }
    }
}
