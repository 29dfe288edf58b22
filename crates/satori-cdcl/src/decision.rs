//! Branching.

use crate::solver::CdclSolver;
use crate::trail::Antecedent;
use satori_base::Var;

impl CdclSolver {
    /// Opens a new decision level and assigns the variable picked by the
    /// configured heuristic. Returns `None` when every variable is already
    /// assigned, which means the formula is satisfied.
    pub(crate) fn decide(&mut self) -> Option<Var> {
        let (var, value) = self.heuristic.pick(&self.trail)?;
        self.level += 1;
        self.trail
            .assign(var, value, self.level, Antecedent::Decision);
        self.heuristic.on_assign(var, value);
        self.stats.num_decisions += 1;
        tracing::debug!(var, value, level = self.level, "decision");
        Some(var)
    }
}
