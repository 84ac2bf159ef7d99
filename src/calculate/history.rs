//! Historical placement aggregation.

use std::collections::BTreeMap;

use tracing::debug;

use super::time_window;
use crate::models::{
    PlacementProbability, Region, SkirmishResult, TeamColor, TeamHistoricalStats, TeamMap,
    TimeWindow, WindowStats,
};

/// Aggregate one team's placements, overall and per time window.
///
/// Total over any input. With no history the overall odds are the default
/// 1/3 prior; a window with no samples copies the overall odds.
pub fn aggregate_history(
    results: &[SkirmishResult],
    team_color: TeamColor,
    team_name: &str,
    region: Region,
) -> TeamHistoricalStats {
    let mut overall = WindowStats::default();
    let mut by_window: BTreeMap<TimeWindow, WindowStats> = TimeWindow::ALL
        .into_iter()
        .map(|window| (window, WindowStats::default()))
        .collect();

    for result in results {
        let rank = result.placements[team_color];
        overall.record(rank);

        let window = time_window(&result.timestamp, region);
        by_window.entry(window).or_default().record(rank);
    }

    let placement_probability = PlacementProbability::from_counts(&overall.placements)
        .unwrap_or(PlacementProbability::DEFAULT_PRIOR);

    let placement_probability_by_window = by_window
        .iter()
        .map(|(window, stats)| {
            let prob = PlacementProbability::from_counts(&stats.placements)
                .unwrap_or(placement_probability);
            (*window, prob)
        })
        .collect();

    debug!(
        "Aggregated {} skirmishes for {} ({}): first={} second={} third={}",
        overall.total_skirmishes,
        team_name,
        team_color,
        overall.placements.first,
        overall.placements.second,
        overall.placements.third
    );

    TeamHistoricalStats {
        team_color,
        team_name: team_name.to_string(),
        overall,
        placement_probability,
        by_window,
        placement_probability_by_window,
    }
}

/// Aggregate all three teams of one history in a single call.
pub fn aggregate_teams(
    results: &[SkirmishResult],
    team_names: &TeamMap<String>,
    region: Region,
) -> TeamMap<TeamHistoricalStats> {
    TeamMap::from_fn(|team| aggregate_history(results, team, &team_names[team], region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rank, Ranking};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn result_at(id: u32, timestamp: DateTime<Utc>, ranking: Ranking) -> SkirmishResult {
        SkirmishResult {
            skirmish_id: id,
            timestamp,
            placements: ranking.placements(),
            scores: TeamMap::new(0, 0, 0),
            vp_awarded: TeamMap::new(0, 0, 0),
            region: Region::Na,
        }
    }

    fn rbg() -> Ranking {
        Ranking::new(TeamColor::Red, TeamColor::Blue, TeamColor::Green)
    }

    fn bgr() -> Ranking {
        Ranking::new(TeamColor::Blue, TeamColor::Green, TeamColor::Red)
    }

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 13, h, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_sum_to_sample_size() {
        let results = vec![
            result_at(1, hour(0), rbg()),
            result_at(2, hour(2), bgr()),
            result_at(3, hour(4), rbg()),
            result_at(4, hour(6), rbg()),
            result_at(5, hour(8), bgr()),
        ];

        let stats = aggregate_history(&results, TeamColor::Red, "Red Team", Region::Na);
        let placements = stats.overall.placements;

        assert_eq!(stats.overall.total_skirmishes, 5);
        assert_eq!(placements.first + placements.second + placements.third, 5);
        assert_eq!(placements.first, 3);
        assert_eq!(placements.third, 2);

        let prob = stats.placement_probability;
        assert!((prob.first + prob.second + prob.third - 1.0).abs() < 1e-9);
        assert!((prob.first - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_history_uses_prior() {
        let stats = aggregate_history(&[], TeamColor::Green, "Green Team", Region::Eu);

        assert_eq!(stats.overall.total_skirmishes, 0);
        assert!(!stats.has_history());
        for p in [
            stats.placement_probability.first,
            stats.placement_probability.second,
            stats.placement_probability.third,
        ] {
            assert!((p - 0.333).abs() < 0.02);
        }
        for window in TimeWindow::ALL {
            assert_eq!(stats.by_window[&window], WindowStats::default());
            assert_eq!(
                stats.placement_probability_by_window[&window],
                PlacementProbability::DEFAULT_PRIOR
            );
        }
    }

    #[test]
    fn test_empty_window_copies_overall() {
        // All in NA prime; every other window is empty
        let results = vec![
            result_at(1, hour(0), rbg()),
            result_at(2, hour(1), bgr()),
            result_at(3, hour(2), rbg()),
        ];

        let stats = aggregate_history(&results, TeamColor::Blue, "Blue Team", Region::Na);

        assert_eq!(stats.by_window[&TimeWindow::NaPrime].total_skirmishes, 3);
        for window in [TimeWindow::EuPrime, TimeWindow::Ocx, TimeWindow::OffHours] {
            assert_eq!(stats.by_window[&window].total_skirmishes, 0);
            assert_eq!(
                stats.placement_probability_by_window[&window],
                stats.placement_probability
            );
        }
        assert_ne!(
            stats.placement_probability,
            PlacementProbability::DEFAULT_PRIOR
        );
    }

    #[test]
    fn test_windowed_probabilities() {
        let results = vec![
            result_at(1, hour(1), rbg()),
            result_at(2, hour(3), rbg()),
            result_at(3, hour(19), bgr()),
            result_at(4, hour(20), bgr()),
        ];

        let stats = aggregate_history(&results, TeamColor::Red, "Red Team", Region::Na);

        let na = stats.probability_in(TimeWindow::NaPrime);
        assert_eq!(na.first, 1.0);
        let eu = stats.probability_in(TimeWindow::EuPrime);
        assert_eq!(eu.third, 1.0);
        assert_eq!(stats.win_rate(), 0.5);
    }

    #[test]
    fn test_order_independent() {
        let results = vec![
            result_at(1, hour(0), rbg()),
            result_at(2, hour(9), bgr()),
            result_at(3, hour(19), rbg()),
            result_at(4, hour(14), bgr()),
        ];
        let mut reversed = results.clone();
        reversed.reverse();

        let a = aggregate_history(&results, TeamColor::Green, "Green", Region::Na);
        let b = aggregate_history(&reversed, TeamColor::Green, "Green", Region::Na);
        let c = aggregate_history(&results, TeamColor::Green, "Green", Region::Na);

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_region_changes_buckets() {
        let results = vec![result_at(1, hour(0), rbg())];

        let na = aggregate_history(&results, TeamColor::Red, "Red", Region::Na);
        let eu = aggregate_history(&results, TeamColor::Red, "Red", Region::Eu);

        assert_eq!(na.by_window[&TimeWindow::NaPrime].total_skirmishes, 1);
        assert_eq!(eu.by_window[&TimeWindow::OffHours].total_skirmishes, 1);
    }

    #[test]
    fn test_large_history() {
        let start = hour(0);
        let results: Vec<_> = (0..5000u32)
            .map(|i| {
                let ranking = if i % 3 == 0 { rbg() } else { bgr() };
                result_at(i, start + Duration::hours(2 * i as i64), ranking)
            })
            .collect();

        let stats = aggregate_history(&results, TeamColor::Red, "Red", Region::Na);
        assert_eq!(stats.overall.total_skirmishes, 5000);

        let windowed: u32 = stats.by_window.values().map(|w| w.total_skirmishes).sum();
        assert_eq!(windowed, 5000);
    }

    #[test]
    fn test_aggregate_teams() {
        let results = vec![result_at(1, hour(0), rbg()), result_at(2, hour(2), bgr())];
        let names = TeamMap::new(
            "Red Team".to_string(),
            "Blue Team".to_string(),
            "Green Team".to_string(),
        );

        let all = aggregate_teams(&results, &names, Region::Na);

        assert_eq!(all.blue.team_name, "Blue Team");
        assert_eq!(all.blue.overall.placements.first, 1);
        assert_eq!(all.blue.overall.placements.second, 1);
        assert_eq!(all.green.overall.placements.count_for(Rank::Third), 1);
    }
}
