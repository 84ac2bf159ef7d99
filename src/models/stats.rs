//! Historical placement statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AverageVpTable, Rank, TeamColor, TimeWindow};

/// How often a team finished at each position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCounts {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl PlacementCounts {
    /// Count one finish at `rank`.
    pub fn record(&mut self, rank: Rank) {
        match rank {
            Rank::First => self.first += 1,
            Rank::Second => self.second += 1,
            Rank::Third => self.third += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.first + self.second + self.third
    }

    pub fn count_for(&self, rank: Rank) -> u32 {
        match rank {
            Rank::First => self.first,
            Rank::Second => self.second,
            Rank::Third => self.third,
        }
    }
}

/// Probability of finishing at each position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementProbability {
    pub first: f64,
    pub second: f64,
    pub third: f64,
}

impl PlacementProbability {
    /// Prior used when a team has no history at all: exactly 1/3 each.
    pub const DEFAULT_PRIOR: PlacementProbability = PlacementProbability {
        first: 1.0 / 3.0,
        second: 1.0 / 3.0,
        third: 1.0 / 3.0,
    };

    /// Relative frequencies, or `None` for an empty sample.
    pub fn from_counts(counts: &PlacementCounts) -> Option<Self> {
        let total = counts.total();
        if total == 0 {
            return None;
        }

        let n = total as f64;
        Some(Self {
            first: counts.first as f64 / n,
            second: counts.second as f64 / n,
            third: counts.third as f64 / n,
        })
    }

    pub fn for_rank(&self, rank: Rank) -> f64 {
        match rank {
            Rank::First => self.first,
            Rank::Second => self.second,
            Rank::Third => self.third,
        }
    }

    /// Expected VP from one skirmish under these odds.
    pub fn expected_vp(&self, table: &AverageVpTable) -> f64 {
        Rank::ALL
            .into_iter()
            .map(|rank| self.for_rank(rank) * table.points_for(rank))
            .sum()
    }
}

impl Default for PlacementProbability {
    fn default() -> Self {
        Self::DEFAULT_PRIOR
    }
}

/// Sample size and placement counts for one slice of history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    pub total_skirmishes: u32,
    pub placements: PlacementCounts,
}

impl WindowStats {
    pub fn record(&mut self, rank: Rank) {
        self.total_skirmishes += 1;
        self.placements.record(rank);
    }
}

/// Historical placement profile for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHistoricalStats {
    /// Team colour the history was collected under
    pub team_color: TeamColor,

    /// Display name
    pub team_name: String,

    /// All skirmishes
    pub overall: WindowStats,

    /// Overall placement odds
    pub placement_probability: PlacementProbability,

    /// Per-window sample counts (every window present)
    pub by_window: BTreeMap<TimeWindow, WindowStats>,

    /// Per-window placement odds (every window present)
    pub placement_probability_by_window: BTreeMap<TimeWindow, PlacementProbability>,
}

impl TeamHistoricalStats {
    /// Historical first-place rate.
    pub fn win_rate(&self) -> f64 {
        self.placement_probability.first
    }

    /// Placement odds within a window, falling back to the overall odds.
    pub fn probability_in(&self, window: TimeWindow) -> PlacementProbability {
        self.placement_probability_by_window
            .get(&window)
            .copied()
            .unwrap_or(self.placement_probability)
    }

    pub fn has_history(&self) -> bool {
        self.overall.total_skirmishes > 0
    }
}
