//! # satori-cdcl
//!
//! Conflict-Driven Clause Learning (CDCL) core of the Satori SAT solver.
//!
//! Implements:
//! - Two-watched-literal unit propagation (BCP)
//! - 1-UIP conflict analysis with clause learning and backjumping
//! - Interchangeable decision heuristics (ORDERED, VSIDS, MINISAT with
//!   phase saving) over an indexed max-heap
//! - Geometric and Luby restart schedules

mod bcp;
pub mod clause_db;
mod conflict;
mod decision;
pub mod heap;
pub mod heuristics;
pub mod restart;
pub mod solver;
pub mod stats;
pub mod testing;
pub mod trail;
pub mod watch;

pub use heuristics::Decider;
pub use restart::RestartPolicy;
pub use solver::{CdclConfig, CdclSolver, SatResult};
pub use stats::SolverStats;
