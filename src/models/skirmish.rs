//! Skirmish records: raw upstream shape and the converted, ranked form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Rank, Region, TeamMap};

/// VP awarded per finishing position in one skirmish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VpTable {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl VpTable {
    pub fn new(first: u32, second: u32, third: u32) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// VP granted for finishing at `rank`.
    pub fn points_for(&self, rank: Rank) -> u32 {
        match rank {
            Rank::First => self.first,
            Rank::Second => self.second,
            Rank::Third => self.third,
        }
    }

    /// VP granted to each team for the given placements.
    pub fn award(&self, placements: &TeamMap<Rank>) -> TeamMap<u32> {
        placements.map(|_, rank| self.points_for(*rank))
    }
}

/// Mean VP per finishing position across several skirmishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageVpTable {
    pub first: f64,
    pub second: f64,
    pub third: f64,
}

impl AverageVpTable {
    /// Average a list of award tables. An empty list averages to zero.
    pub fn from_tables<'a, I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'a VpTable>,
    {
        let mut sum = AverageVpTable::default();
        let mut count = 0usize;

        for table in tables {
            sum.first += table.first as f64;
            sum.second += table.second as f64;
            sum.third += table.third as f64;
            count += 1;
        }

        if count == 0 {
            return sum;
        }

        let n = count as f64;
        Self {
            first: sum.first / n,
            second: sum.second / n,
            third: sum.third / n,
        }
    }

    pub fn points_for(&self, rank: Rank) -> f64 {
        match rank {
            Rank::First => self.first,
            Rank::Second => self.second,
            Rank::Third => self.third,
        }
    }
}

impl From<VpTable> for AverageVpTable {
    fn from(table: VpTable) -> Self {
        Self {
            first: table.first as f64,
            second: table.second as f64,
            third: table.third as f64,
        }
    }
}

/// One skirmish as supplied by the upstream match data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSkirmish {
    /// 1-based skirmish number within the match
    pub id: u32,

    /// Raw score per team
    pub scores: TeamMap<i64>,

    /// VP award table in force for this skirmish
    pub vp_table: VpTable,
}

/// A match as supplied by the upstream match data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatch {
    /// Upstream match id (e.g. "1-4")
    pub id: String,

    /// When the first skirmish started
    pub start_time: DateTime<Utc>,

    /// Completed skirmishes
    #[serde(default)]
    pub skirmishes: Vec<RawSkirmish>,
}

/// One completed skirmish with decided placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkirmishResult {
    /// Skirmish number, unique within a match
    pub skirmish_id: u32,

    /// When the skirmish started
    pub timestamp: DateTime<Utc>,

    /// Finishing position per team (each rank used exactly once)
    pub placements: TeamMap<Rank>,

    /// Raw score per team
    pub scores: TeamMap<i64>,

    /// VP granted per team
    pub vp_awarded: TeamMap<u32>,

    /// Region the match was played in
    pub region: Region,
}
