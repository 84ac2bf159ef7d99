//! Required-versus-historical performance assessment.

use std::collections::BTreeMap;

use tracing::debug;

use super::{validate_outcome, ScenarioError};
use crate::models::{
    pressure, AverageVpTable, Difficulty, PlacementProbability, Rank, Ranking,
    RequiredPerformance, TeamColor, TeamHistoricalStats, TeamMap, DEFAULT_MIN_MARGIN,
};

/// Assess every team of `desired` using the default margin.
///
/// See [`evaluate_required_performance_with_margin`].
pub fn evaluate_required_performance(
    current_vp: &TeamMap<u32>,
    remaining: usize,
    average_vp: &AverageVpTable,
    desired: &Ranking,
    history: &BTreeMap<TeamColor, TeamHistoricalStats>,
) -> Result<Vec<RequiredPerformance>, ScenarioError> {
    evaluate_required_performance_with_margin(
        current_vp,
        remaining,
        average_vp,
        desired,
        history,
        DEFAULT_MIN_MARGIN,
    )
}

/// Compare the finish rate each team needs against how often it historically finishes there.
///
/// The desired winner is measured against the desired runner-up, which it
/// must lead. Every other team is measured against the team directly above
/// it, which it must trail. Teams missing from `history` use the default prior.
pub fn evaluate_required_performance_with_margin(
    current_vp: &TeamMap<u32>,
    remaining: usize,
    average_vp: &AverageVpTable,
    desired: &Ranking,
    history: &BTreeMap<TeamColor, TeamHistoricalStats>,
    min_margin: u32,
) -> Result<Vec<RequiredPerformance>, ScenarioError> {
    validate_outcome(desired)?;

    let assessments: Vec<RequiredPerformance> = Rank::ALL
        .into_iter()
        .map(|rank| {
            let team = desired.team_at(rank);
            let (leader, trailer, rival) = match rank.above() {
                None => (team, desired.second, desired.second),
                Some(above) => {
                    let rival = desired.team_at(above);
                    (rival, team, rival)
                }
            };

            let swing = required_swing(current_vp[leader], current_vp[trailer], min_margin);
            let gap = pair_gap(average_vp, rank);
            let required_rate = required_rate(swing, remaining, gap);

            let stats = history.get(&team);
            let probability = stats
                .map(|s| s.placement_probability)
                .unwrap_or(PlacementProbability::DEFAULT_PRIOR);
            let historical_rate = probability.for_rank(rank);
            let difficulty =
                Difficulty::from_percentage(100.0 * pressure(required_rate, historical_rate));

            debug!(
                "{} as {}: swing {} VP, required {:.3}, historical {:.3} -> {}",
                team, rank, swing, required_rate, historical_rate, difficulty
            );

            RequiredPerformance {
                team,
                team_name: stats
                    .map(|s| s.team_name.clone())
                    .unwrap_or_else(|| team.to_string()),
                target_rank: rank,
                rival,
                current_vp: current_vp[team],
                rival_vp: current_vp[rival],
                required_vp_swing: swing,
                required_rate,
                historical_win_rate: historical_rate,
                achievable: required_rate <= 1.0,
                difficulty,
                projected_vp: current_vp[team] as f64
                    + remaining as f64 * probability.expected_vp(average_vp),
            }
        })
        .collect();

    Ok(assessments)
}

/// VP the trailer must lose relative to the leader to end `min_margin` behind.
fn required_swing(leader_vp: u32, trailer_vp: u32, min_margin: u32) -> u32 {
    let needed = trailer_vp as i64 + min_margin as i64 - leader_vp as i64;
    needed.max(0) as u32
}

/// Average VP gained on the rival per skirmish finished at the target rank.
fn pair_gap(average_vp: &AverageVpTable, rank: Rank) -> f64 {
    match rank {
        Rank::First | Rank::Second => average_vp.first - average_vp.second,
        Rank::Third => average_vp.second - average_vp.third,
    }
}

/// Share of remaining skirmishes needed to swing `swing` VP at `gap` per skirmish.
fn required_rate(swing: u32, remaining: usize, gap: f64) -> f64 {
    if swing == 0 {
        0.0
    } else if remaining == 0 || gap <= 0.0 {
        f64::INFINITY
    } else {
        swing as f64 / (remaining as f64 * gap)
    }
}
