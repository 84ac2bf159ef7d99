//! Outcome planning engine.
//!
//! Pure computations over caller-supplied data:
//! - Time window classification of skirmish start times
//! - Historical placement aggregation per team and per window
//! - Minimum-effort scenario search for a desired final ranking
//! - Required-versus-historical performance assessment

pub mod history;
pub mod performance;
pub mod scenario;
pub mod window;

pub use history::{aggregate_history, aggregate_teams};
pub use performance::{evaluate_required_performance, evaluate_required_performance_with_margin};
pub use scenario::solve_scenario;
pub use window::time_window;

use thiserror::Error;

use crate::models::Ranking;

/// Errors reported before any planning work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Invalid outcome: {0} does not rank three distinct teams")]
    InvalidOutcome(Ranking),
}

/// Reject rankings that name a team more than once.
pub fn validate_outcome(outcome: &Ranking) -> Result<(), ScenarioError> {
    if outcome.is_bijection() {
        Ok(())
    } else {
        Err(ScenarioError::InvalidOutcome(*outcome))
    }
}
