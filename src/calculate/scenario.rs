//! Minimum-effort scenario search.
//!
//! For an effort level `k` the plan hands the desired winner first place in
//! the `k` remaining skirmishes worth the most first-place VP, finishing in
//! the desired order there. Every other skirmish is won by the desired third
//! team, with the desired winner second and the desired runner-up last. A
//! binary search over `k` finds the smallest level whose final VP satisfies
//! the margin between consecutive teams.
//!
//! The search relies on each extra first place never hurting the winner's
//! lead over the runner-up, which holds when every table has
//! `first - second >= second - third`. Any other table makes feasibility
//! non-monotonic in `k`, and the levels are scanned in order instead.

use std::cmp::Reverse;

use tracing::debug;

use super::{validate_outcome, ScenarioError};
use crate::models::{
    Difficulty, PlannedSkirmish, Rank, Ranking, ScenarioInput, ScenarioResult, TeamMap,
};

/// Search for the plan needing the fewest first-place finishes by the desired winner.
///
/// Returns `Err` only for an outcome that does not rank three distinct
/// teams. An unreachable outcome is a normal result with `is_possible`
/// unset and a `reason`.
pub fn solve_scenario(input: &ScenarioInput) -> Result<ScenarioResult, ScenarioError> {
    validate_outcome(&input.desired_outcome)?;

    let planner = Planner::new(input);
    let total = planner.total();

    if total == 0 {
        return Ok(planner.settled());
    }

    let effort = if planner.is_monotonic() {
        planner.search()
    } else {
        debug!("Uneven VP tables; scanning every effort level");
        planner.scan()
    };

    let Some(effort) = effort else {
        return Ok(planner.impossible());
    };

    debug!(
        "Outcome {} needs {} of {} first places",
        input.desired_outcome, effort, total
    );

    Ok(planner.plan(effort))
}

struct Planner<'a> {
    input: &'a ScenarioInput,

    /// Position of each remaining skirmish when sorted by first-place VP, descending
    priority: Vec<usize>,

    /// Finish when the desired winner takes the skirmish
    won: Ranking,

    /// Finish when the desired third team takes the skirmish instead
    diverted: Ranking,
}

impl<'a> Planner<'a> {
    fn new(input: &'a ScenarioInput) -> Self {
        let skirmishes = &input.remaining_skirmishes;

        let mut by_value: Vec<usize> = (0..skirmishes.len()).collect();
        by_value.sort_by_key(|&i| Reverse(skirmishes[i].vp_awards.first));

        let mut priority = vec![0; skirmishes.len()];
        for (position, &index) in by_value.iter().enumerate() {
            priority[index] = position;
        }

        let outcome = input.desired_outcome;
        Self {
            input,
            priority,
            won: outcome,
            diverted: Ranking::new(outcome.third, outcome.first, outcome.second),
        }
    }

    fn total(&self) -> usize {
        self.input.remaining_skirmishes.len()
    }

    /// Whether a win by the desired winner always gains at least as much on
    /// the runner-up as a diverted skirmish does.
    fn is_monotonic(&self) -> bool {
        self.input.remaining_skirmishes.iter().all(|s| {
            let table = &s.vp_awards;
            table.first as i64 - table.second as i64 >= table.second as i64 - table.third as i64
        })
    }

    /// Binary search for the smallest satisfying effort.
    fn search(&self) -> Option<usize> {
        let total = self.total();
        if !self.satisfies(total) {
            return None;
        }

        let (mut lo, mut hi) = (0, total);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.satisfies(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Some(lo)
    }

    /// Linear scan for the smallest satisfying effort.
    fn scan(&self) -> Option<usize> {
        (0..=self.total()).find(|&effort| self.satisfies(effort))
    }

    fn placements_for(&self, index: usize, effort: usize) -> TeamMap<Rank> {
        if self.priority[index] < effort {
            self.won.placements()
        } else {
            self.diverted.placements()
        }
    }

    fn final_vp(&self, effort: usize) -> TeamMap<u32> {
        let mut vp = self.input.current_vp;
        for (index, skirmish) in self.input.remaining_skirmishes.iter().enumerate() {
            let award = skirmish.vp_awards.award(&self.placements_for(index, effort));
            for (team, points) in award.iter() {
                vp[team] = vp[team].saturating_add(*points);
            }
        }
        vp
    }

    fn satisfies(&self, effort: usize) -> bool {
        meets_margin(
            &self.final_vp(effort),
            &self.input.desired_outcome,
            self.input.effective_margin(),
        )
    }

    fn margin(&self, vp: &TeamMap<u32>) -> i64 {
        let outcome = &self.input.desired_outcome;
        vp[outcome.first] as i64 - vp[outcome.second] as i64
    }

    fn plan(&self, effort: usize) -> ScenarioResult {
        let required_placements: Vec<PlannedSkirmish> = self
            .input
            .remaining_skirmishes
            .iter()
            .enumerate()
            .map(|(index, skirmish)| {
                let placements = self.placements_for(index, effort);
                PlannedSkirmish {
                    skirmish_id: skirmish.id,
                    start_time: skirmish.start_time,
                    end_time: skirmish.end_time,
                    vp_awarded: skirmish.vp_awards.award(&placements),
                    placements,
                }
            })
            .collect();

        let mut final_vp = self.input.current_vp;
        for planned in &required_placements {
            for (team, points) in planned.vp_awarded.iter() {
                final_vp[team] = final_vp[team].saturating_add(*points);
            }
        }

        let percentage = 100.0 * effort as f64 / self.total() as f64;

        ScenarioResult {
            is_possible: true,
            required_placements,
            margin: self.margin(&final_vp),
            final_vp,
            first_place_finishes: effort,
            total_skirmishes: self.total(),
            difficulty: Some(Difficulty::from_percentage(percentage)),
            reason: None,
        }
    }

    /// Result when no skirmishes remain: the standings are final.
    fn settled(&self) -> ScenarioResult {
        let vp = self.input.current_vp;
        let margin = self.input.effective_margin();
        let is_possible = meets_margin(&vp, &self.input.desired_outcome, margin);

        ScenarioResult {
            is_possible,
            required_placements: Vec::new(),
            final_vp: vp,
            margin: self.margin(&vp),
            first_place_finishes: 0,
            total_skirmishes: 0,
            difficulty: None,
            reason: (!is_possible).then(|| {
                format!(
                    "No skirmishes remain and the current standings ({}) do not give {} with a margin of {} VP",
                    describe_vp(&vp, &self.input.desired_outcome),
                    self.input.desired_outcome,
                    margin
                )
            }),
        }
    }

    /// Result when no effort level satisfies the outcome.
    fn impossible(&self) -> ScenarioResult {
        let total = self.total();
        let vp = self.final_vp(total);

        ScenarioResult {
            is_possible: false,
            required_placements: Vec::new(),
            final_vp: vp,
            margin: self.margin(&vp),
            first_place_finishes: total,
            total_skirmishes: total,
            difficulty: None,
            reason: Some(format!(
                "No split of the {1} remaining skirmishes gives {3} with a margin of {4} VP; with {0} winning all of them the final standings would be ({2})",
                self.input.desired_outcome.first,
                total,
                describe_vp(&vp, &self.input.desired_outcome),
                self.input.desired_outcome,
                self.input.effective_margin()
            )),
        }
    }
}

/// First leads second and second leads third, each by at least `min_margin`.
fn meets_margin(vp: &TeamMap<u32>, outcome: &Ranking, min_margin: u32) -> bool {
    let first = vp[outcome.first] as i64;
    let second = vp[outcome.second] as i64;
    let third = vp[outcome.third] as i64;
    let margin = min_margin as i64;

    first >= second + margin && second >= third + margin
}

fn describe_vp(vp: &TeamMap<u32>, outcome: &Ranking) -> String {
    [outcome.first, outcome.second, outcome.third]
        .iter()
        .map(|team| format!("{} {}", team, vp[*team]))
        .collect::<Vec<_>>()
        .join(", ")
}
