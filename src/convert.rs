//! Convert upstream match records to skirmish results.
//!
//! Bridges between the match data source's shape (RawMatch, RawSkirmish)
//! and the ranked SkirmishResult the engine aggregates.

use chrono::{DateTime, Duration, Utc};

use crate::models::{RawMatch, RawSkirmish, Ranking, Region, SkirmishResult, TeamMap};

/// Length of one skirmish.
pub const SKIRMISH_HOURS: i64 = 2;

/// Start time of a 1-based skirmish within a match. Skirmish 0 maps to the match start.
pub fn skirmish_start(match_start: DateTime<Utc>, skirmish_id: u32) -> DateTime<Utc> {
    let offset = skirmish_id.saturating_sub(1) as i64 * SKIRMISH_HOURS;
    match_start + Duration::hours(offset)
}

/// Rank one raw skirmish by score and award VP from its table.
///
/// Equal scores are ranked in canonical colour order (red, blue, green).
pub fn skirmish_from_raw(
    raw: &RawSkirmish,
    match_start: DateTime<Utc>,
    region: Region,
) -> SkirmishResult {
    let placements = Ranking::from_scores(&raw.scores).placements();

    SkirmishResult {
        skirmish_id: raw.id,
        timestamp: skirmish_start(match_start, raw.id),
        vp_awarded: raw.vp_table.award(&placements),
        placements,
        scores: raw.scores,
        region,
    }
}

/// Convert every completed skirmish of a match.
pub fn skirmish_results_from_match(raw: &RawMatch, region: Region) -> Vec<SkirmishResult> {
    raw.skirmishes
        .iter()
        .map(|skirmish| skirmish_from_raw(skirmish, raw.start_time, region))
        .collect()
}

/// Current VP per team: the sum of VP awarded over completed skirmishes,
/// saturating at `u32::MAX`.
pub fn standings_from_results(results: &[SkirmishResult]) -> TeamMap<u32> {
    let mut standings = TeamMap::splat(0u32);
    for result in results {
        for (team, vp) in result.vp_awarded.iter() {
            standings[team] = standings[team].saturating_add(*vp);
        }
    }
    standings
}
