//! # VP Planner
//!
//! Victory-point outcome planning for three-team skirmish matches.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (teams, skirmishes, statistics, scenarios)
//! - **calculate**: History aggregation, scenario search and performance assessment
//! - **convert**: Upstream match records to ranked skirmish results
//! - **storage**: JSONL skirmish history files
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod convert;
pub mod models;
pub mod storage;

pub use models::*;
