use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Points credited to the opposing alliance for each penalty a team takes.
pub const PENALTY_POINTS: u32 = 5;

/// Alliance side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    /// Red alliance.
    Red,
    /// Blue alliance.
    Blue,
}

impl TeamSide {
    /// The opposing side.
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Red => TeamSide::Blue,
            TeamSide::Blue => TeamSide::Red,
        }
    }

    /// Lowercase name used in routes and event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Red => "red",
            TeamSide::Blue => "blue",
        }
    }
}

/// Raw per-team event counters recorded by the scorekeeper. The weighting
/// below is season-specific and re-derived for each game ruleset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreSheet {
    /// Pegs scored during autonomous.
    pub auto_peg: u32,
    /// Uprights scored during autonomous.
    pub auto_upright: u32,
    /// Targets knocked during autonomous.
    pub auto_knocked: u32,
    /// Whether the robot parked before autonomous ended.
    pub parked: bool,
    /// Pegs scored during driver control.
    pub teleop_peg: u32,
    /// Uprights scored during driver control.
    pub teleop_upright: u32,
    /// Targets knocked during driver control.
    pub teleop_knocked: u32,
    /// Rows owned at the end of the match.
    pub teleop_rows: u32,
    /// Whether the robot climbed in the endgame.
    pub climbed: bool,
    /// Penalties taken by this team. Each one awards [`PENALTY_POINTS`] to
    /// the opponent and never reduces this team's own score.
    pub penalties: u32,
}

/// Derived sub-scores, recomputed in full from the raw counters on every
/// edit. There are no incremental updates: the whole tuple is a pure function
/// of a [`ScoreSheet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreBreakdown {
    /// Autonomous sub-score (doubled, including the park bonus).
    pub auto_score: u32,
    /// Driver-control sub-score.
    pub teleop_score: u32,
    /// Endgame bonuses added after the match clock expires.
    pub post_match_added_points: u32,
    /// Live score shown during play: autonomous plus driver control.
    pub preliminary_score: u32,
    /// Preliminary score plus post-match bonuses. Own penalties are not
    /// deducted here.
    pub total_score: u32,
}

impl ScoreSheet {
    /// Recompute the full derived tuple from the raw counters.
    pub fn breakdown(&self) -> ScoreBreakdown {
        // Autonomous actions are worth double; the 2.5-point park bonus
        // doubles to a flat 5 so all scores stay integral.
        let auto_score = (self.auto_peg * 5 + self.auto_upright * 2 + self.auto_knocked) * 2
            + if self.parked { 5 } else { 0 };
        let teleop_score = self.teleop_peg * 5 + self.teleop_upright * 2 + self.teleop_knocked;
        let post_match_added_points = self.teleop_rows * 5 + if self.climbed { 10 } else { 0 };
        let preliminary_score = auto_score + teleop_score;
        let total_score = preliminary_score + post_match_added_points;

        ScoreBreakdown {
            auto_score,
            teleop_score,
            post_match_added_points,
            preliminary_score,
            total_score,
        }
    }
}

impl ScoreBreakdown {
    /// Score shown for a team once the opponent's penalties are converted
    /// into bonus points. Used both for the live operator display and the
    /// final reveal.
    pub fn display_score(&self, opponent_penalties: u32) -> u32 {
        self.total_score + opponent_penalties * PENALTY_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> ScoreSheet {
        ScoreSheet {
            auto_peg: 2,
            auto_upright: 1,
            auto_knocked: 3,
            parked: true,
            teleop_peg: 4,
            teleop_upright: 2,
            teleop_knocked: 1,
            teleop_rows: 2,
            climbed: true,
            penalties: 3,
        }
    }

    #[test]
    fn breakdown_matches_season_weighting() {
        let breakdown = sheet().breakdown();
        // (2*5 + 1*2 + 3) * 2 + 5 = 35
        assert_eq!(breakdown.auto_score, 35);
        // 4*5 + 2*2 + 1 = 25
        assert_eq!(breakdown.teleop_score, 25);
        // 2*5 + 10 = 20
        assert_eq!(breakdown.post_match_added_points, 20);
        assert_eq!(breakdown.preliminary_score, 60);
        assert_eq!(breakdown.total_score, 80);
    }

    #[test]
    fn derived_totals_obey_the_sum_laws() {
        for sheet in [ScoreSheet::default(), sheet()] {
            let b = sheet.breakdown();
            assert_eq!(b.preliminary_score, b.auto_score + b.teleop_score);
            assert_eq!(
                b.total_score,
                b.preliminary_score + b.post_match_added_points
            );
        }
    }

    #[test]
    fn recomputation_is_idempotent_and_order_independent() {
        let a = ScoreSheet {
            teleop_peg: 3,
            auto_peg: 1,
            ..Default::default()
        };
        let b = ScoreSheet {
            auto_peg: 1,
            teleop_peg: 3,
            ..Default::default()
        };

        assert_eq!(a.breakdown(), b.breakdown());
        assert_eq!(a.breakdown(), a.breakdown());
    }

    #[test]
    fn own_penalties_do_not_reduce_own_score() {
        let mut with_penalties = sheet();
        with_penalties.penalties = 9;
        let mut without = sheet();
        without.penalties = 0;
        assert_eq!(with_penalties.breakdown(), without.breakdown());
    }

    #[test]
    fn display_score_converts_opponent_penalties_symmetrically() {
        let red = sheet().breakdown();
        let blue = ScoreSheet {
            penalties: 1,
            ..Default::default()
        }
        .breakdown();

        // Red sees blue's single penalty, blue sees red's three.
        assert_eq!(red.display_score(1), red.total_score + 5);
        assert_eq!(blue.display_score(3), blue.total_score + 15);
    }

    #[test]
    fn opponent_lookup_is_symmetric() {
        assert_eq!(TeamSide::Red.opponent(), TeamSide::Blue);
        assert_eq!(TeamSide::Blue.opponent(), TeamSide::Red);
        assert_eq!(TeamSide::Red.as_str(), "red");
    }

    #[test]
    fn empty_sheet_scores_zero() {
        let b = ScoreSheet::default().breakdown();
        assert_eq!(b.total_score, 0);
        assert_eq!(b.display_score(0), 0);
    }
}
