//! Required-versus-historical performance assessment.

use serde::{Deserialize, Serialize};

use super::{Difficulty, Rank, TeamColor};

/// Assessment of one team's part in a desired outcome.
///
/// Each team is paired with one rival: the desired winner with the desired
/// runner-up, every other team with the team ranked directly above it. The
/// runner-up's entry therefore repeats the winner's swing from the trailing
/// side, and its lead over the third team shows up in the third team's entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredPerformance {
    /// Team being assessed
    pub team: TeamColor,

    /// Display name (colour when no history was supplied)
    pub team_name: String,

    /// Rank the team holds in the desired outcome
    pub target_rank: Rank,

    /// Team the VP gap is measured against
    pub rival: TeamColor,

    /// VP the team holds right now
    pub current_vp: u32,

    /// VP the rival holds right now
    pub rival_vp: u32,

    /// VP that has to swing between the team and its rival
    pub required_vp_swing: u32,

    /// Share of remaining skirmishes the team must finish at `target_rank`
    pub required_rate: f64,

    /// Historical probability of finishing at `target_rank`
    pub historical_win_rate: f64,

    /// Whether the required rate is at most one finish per skirmish
    pub achievable: bool,

    /// Difficulty from the required-to-historical ratio
    pub difficulty: Difficulty,

    /// Current VP plus historically expected gains over the remaining skirmishes
    pub projected_vp: f64,
}

/// Required rate as a multiple of the historical rate.
///
/// Zero when nothing is required, infinite when a team has to finish where it
/// never has.
pub fn pressure(required_rate: f64, historical_rate: f64) -> f64 {
    if required_rate <= 0.0 {
        0.0
    } else if historical_rate <= 0.0 {
        f64::INFINITY
    } else {
        required_rate / historical_rate
    }
}
