//! Solve statistics and report rendering.

use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

/// Counters and timings collected over one solve.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    /// Path of the input formula, filled in by the driver.
    pub input_file: String,
    /// Final result string: `SAT`, `UNSAT` or `TIMEOUT`.
    pub result: String,
    /// Number of variables.
    pub num_vars: u32,
    /// Number of clauses declared in the input.
    pub num_orig_clauses: usize,
    /// Number of clauses stored after ingest filtering.
    pub num_stored_clauses: usize,
    /// Learned clauses synthesized from conflicts.
    pub num_learned_clauses: u64,
    /// Branching decisions made.
    pub num_decisions: u64,
    /// Implications made (including root-level units and asserted literals).
    pub num_implications: u64,
    /// Restarts performed.
    pub restarts: u64,

    /// Time spent reading the input.
    #[serde(with = "secs")]
    pub read_time: Duration,
    /// Total solve wall time.
    #[serde(with = "secs")]
    pub total_time: Duration,
    /// Time in unit propagation.
    #[serde(with = "secs")]
    pub bcp_time: Duration,
    /// Time in decision making.
    #[serde(with = "secs")]
    pub decide_time: Duration,
    /// Time in conflict analysis.
    #[serde(with = "secs")]
    pub analyze_time: Duration,
    /// Time in backtracking.
    #[serde(with = "secs")]
    pub backtrack_time: Duration,
}

mod secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

impl SolverStats {
    /// Renders the human-readable statistics report.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "============================ statistics ============================");
        let _ = writeln!(out, "Input file: {}", self.input_file);
        let _ = writeln!(
            out,
            "Vars: {}, Clauses: {}, Stored clauses: {}",
            self.num_vars, self.num_orig_clauses, self.num_stored_clauses
        );
        let _ = writeln!(out, "Read time: {:.6}s", self.read_time.as_secs_f64());
        let _ = writeln!(out, "--------------------------------------------------------------------");
        let _ = writeln!(out, "Restarts: {}", self.restarts);
        let _ = writeln!(out, "Learned clauses: {}", self.num_learned_clauses);
        let _ = writeln!(out, "Decisions: {}", self.num_decisions);
        let _ = writeln!(out, "Implications: {}", self.num_implications);
        let _ = writeln!(out, "Total time: {:.6}s", self.total_time.as_secs_f64());
        let _ = writeln!(out, "---------------------------- time breakup --------------------------");
        let _ = writeln!(out, "BCP time: {:.6}s", self.bcp_time.as_secs_f64());
        let _ = writeln!(out, "Decide time: {:.6}s", self.decide_time.as_secs_f64());
        let _ = writeln!(out, "Analyze time: {:.6}s", self.analyze_time.as_secs_f64());
        let _ = writeln!(out, "Backtrack time: {:.6}s", self.backtrack_time.as_secs_f64());
        let _ = writeln!(out, "--------------------------------------------------------------------");
        let _ = writeln!(out, "RESULT: {}", self.result);
        let _ = writeln!(out, "====================================================================");
        out
    }
}
