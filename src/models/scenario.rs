//! Scenario planning input and output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Difficulty, Rank, Ranking, TeamColor, TeamMap, VpTable};

/// Margin used when a caller does not ask for one.
pub const DEFAULT_MIN_MARGIN: u32 = 1;

/// A skirmish that has not been played yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemainingSkirmish {
    pub id: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// VP award table for this skirmish
    pub vp_awards: VpTable,
}

/// What the scenario solver is asked to plan for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// VP each team holds right now
    pub current_vp: TeamMap<u32>,

    /// Unplayed skirmishes, in schedule order
    #[serde(default)]
    pub remaining_skirmishes: Vec<RemainingSkirmish>,

    /// Final ranking to plan towards
    pub desired_outcome: Ranking,

    /// Minimum VP gap between consecutively ranked teams; unset falls back
    /// to [`DEFAULT_MIN_MARGIN`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_margin: Option<u32>,
}

impl ScenarioInput {
    pub fn new(
        current_vp: TeamMap<u32>,
        remaining_skirmishes: Vec<RemainingSkirmish>,
        desired_outcome: Ranking,
    ) -> Self {
        Self {
            current_vp,
            remaining_skirmishes,
            desired_outcome,
            min_margin: None,
        }
    }

    /// Builder method to set the margin.
    pub fn with_min_margin(mut self, min_margin: u32) -> Self {
        self.min_margin = Some(min_margin);
        self
    }

    /// Margin the solver enforces.
    pub fn effective_margin(&self) -> u32 {
        self.min_margin.unwrap_or(DEFAULT_MIN_MARGIN)
    }
}

/// Required finish for one remaining skirmish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSkirmish {
    pub skirmish_id: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Finishing position per team
    pub placements: TeamMap<Rank>,

    /// VP each team gains from this finish
    pub vp_awarded: TeamMap<u32>,
}

impl PlannedSkirmish {
    /// Team that has to take first place.
    pub fn winner(&self) -> Option<TeamColor> {
        self.placements
            .iter()
            .find(|(_, rank)| **rank == Rank::First)
            .map(|(team, _)| team)
    }
}

/// Outcome of a scenario search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Whether the desired ranking can be reached
    pub is_possible: bool,

    /// One entry per remaining skirmish, in input order (empty when impossible)
    pub required_placements: Vec<PlannedSkirmish>,

    /// Final VP after the plan (or after the best attempt when impossible)
    pub final_vp: TeamMap<u32>,

    /// Desired first minus desired second in `final_vp`
    pub margin: i64,

    /// Skirmishes the desired winner must take
    pub first_place_finishes: usize,

    /// Number of remaining skirmishes considered
    pub total_skirmishes: usize,

    /// Effort label (omitted when nothing remains to play)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Why no plan exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ScenarioResult {
    /// Share of remaining skirmishes the desired winner must take, as a percentage.
    pub fn first_place_percentage(&self) -> Option<f64> {
        if self.total_skirmishes == 0 {
            None
        } else {
            Some(100.0 * self.first_place_finishes as f64 / self.total_skirmishes as f64)
        }
    }
}
