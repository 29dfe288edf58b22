//! Conflict analysis.
//!
//! Derives a learned clause from a falsified clause by resolution along the
//! implication graph, stopping at the first unique implication point: the
//! resolvent keeps exactly one literal of the conflict level. Resolution
//! always targets the conflict-level literal assigned most recently
//! (largest trail index).

use crate::solver::CdclSolver;
use crate::trail::{Antecedent, TrailNode};
use satori_base::{Lit, Var};

/// Resolves two clauses over `var`: both polarities of `var` are dropped,
/// the rest is merged, sorted, and deduplicated.
fn resolve(left: &[Lit], right: &[Lit], var: Var, num_vars: u32) -> Vec<Lit> {
    let mut out: Vec<Lit> = left
        .iter()
        .chain(right.iter())
        .copied()
        .filter(|&lit| lit.var(num_vars) != var)
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

impl CdclSolver {
    /// Analyzes the conflict on `conflict_clause`. Returns `None` when the
    /// conflict is at the root level (the formula is unsatisfiable),
    /// otherwise the backjump level and the asserting assignment to push
    /// after backtracking.
    pub(crate) fn analyze(
        &mut self,
        conflict_clause: usize,
    ) -> Option<(u32, Var, bool, Antecedent)> {
        let nv = self.num_vars;
        let conflict_level = self.level;
        if conflict_level == 0 {
            return None;
        }

        let mut resolvent: Vec<Lit> = self.clauses.lits(conflict_clause).to_vec();

        loop {
            let mut at_conflict_level = 0usize;
            let mut latest: Option<TrailNode> = None;
            for &lit in &resolvent {
                let node = self
                    .trail
                    .node_for(lit.var(nv))
                    .expect("resolvent literal with unassigned variable");
                if node.level == conflict_level {
                    at_conflict_level += 1;
                    if latest.is_none_or(|n| node.index > n.index) {
                        latest = Some(node);
                    }
                }
            }
            if at_conflict_level == 1 {
                break;
            }

            let pivot = latest.expect("conflict clause without conflict-level literal");
            let reason = match pivot.antecedent {
                Antecedent::Clause(id) => id,
                Antecedent::Decision => {
                    unreachable!("resolution reached a decision before the first UIP")
                }
            };
            resolvent = resolve(&resolvent, self.clauses.lits(reason), pivot.var, nv);
        }

        if let [lit] = resolvent[..] {
            // The asserting assignment becomes a new root-level unit; the
            // clause itself carries no extra information.
            return Some((0, lit.var(nv), !lit.is_negative(nv), Antecedent::Decision));
        }

        let mut backjump = 0u32;
        let mut asserting = None;
        for &lit in &resolvent {
            let node = self
                .trail
                .node_for(lit.var(nv))
                .expect("learned literal with unassigned variable");
            if node.level == conflict_level {
                asserting = Some(lit);
            } else if node.level > backjump {
                backjump = node.level;
            }
        }
        let asserting = asserting.expect("learned clause without asserting literal");

        self.heuristic.bump_learned(&resolvent);
        self.stats.num_learned_clauses += 1;

        let (w1, w2) = (resolvent[0], resolvent[1]);
        let id = self.clauses.add_learned(resolvent);
        self.watches.attach(id, w1, w2);
        tracing::trace!(clause = id, backjump, "learned");

        Some((
            backjump,
            asserting.var(nv),
            !asserting.is_negative(nv),
            Antecedent::Clause(id),
        ))
    }
}
