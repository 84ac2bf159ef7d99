//! Core data models for the planning engine.

mod difficulty;
mod performance;
mod scenario;
mod skirmish;
mod stats;
mod team;
mod window;

pub use difficulty::*;
pub use performance::*;
pub use scenario::*;
pub use skirmish::*;
pub use stats::*;
pub use team::*;
pub use window::*;
