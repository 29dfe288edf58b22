//! Boolean constraint propagation.
//!
//! Walks the trail from a cursor, and for each newly falsified literal
//! re-examines the clauses watching it. Watcher lists are traversed in
//! reverse so the most recently learned clauses are probed first; removal
//! mid-iteration is a swap-with-tail-then-pop, which is safe because the
//! swapped-in element lands at the index the cursor has already passed.

use crate::solver::CdclSolver;
use crate::trail::Antecedent;
use satori_base::Lit;

/// Outcome of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BcpStatus {
    /// Fixpoint reached without conflict.
    NoConflict,
    /// The clause with this ID is fully falsified.
    Conflict(usize),
    /// The restart limit fired while detecting a conflict; the conflict is
    /// abandoned and the driver restarts instead.
    Restart,
}

impl CdclSolver {
    /// Propagates all pending assignments. On the first call of a solve
    /// the cursor starts at position 0 so root-level units take effect;
    /// afterwards it starts at the newest trail entry.
    pub(crate) fn propagate(&mut self, first_call: bool) -> BcpStatus {
        let nv = self.num_vars;
        let mut cursor = if first_call {
            0
        } else {
            self.trail.len().saturating_sub(1)
        };

        while cursor < self.trail.len() {
            let node = self.trail.node(cursor);
            let falsified = if node.value {
                Lit::negative(node.var, nv)
            } else {
                Lit::positive(node.var)
            };

            let mut i = self.watches.by_lit[falsified.index()].len();
            while i > 0 {
                i -= 1;
                let clause_id = self.watches.by_lit[falsified.index()][i];
                let (w1, w2) = self.watches.pair[clause_id];
                let other = if w1 == falsified { w2 } else { w1 };

                // The clause is already satisfied through its other watcher.
                if self.trail.lit_value(other) == Some(true) {
                    continue;
                }

                let replacement = self
                    .clauses
                    .lits(clause_id)
                    .iter()
                    .copied()
                    .find(|&lit| {
                        lit != w1 && lit != w2 && self.trail.lit_value(lit) != Some(false)
                    });

                if let Some(new_watcher) = replacement {
                    self.watches.replace_in_pair(clause_id, falsified, new_watcher);
                    self.watches.by_lit[falsified.index()].swap_remove(i);
                    self.watches.by_lit[new_watcher.index()].push(clause_id);
                    continue;
                }

                match self.trail.lit_value(other) {
                    None => {
                        // Unit: the other watcher is forced.
                        let var = other.var(nv);
                        let value = !other.is_negative(nv);
                        self.trail
                            .assign(var, value, self.level, Antecedent::Clause(clause_id));
                        self.heuristic.on_assign(var, value);
                        self.stats.num_implications += 1;
                        tracing::trace!(var, value, clause = clause_id, "implied");
                    }
                    Some(_) => {
                        if self.restarts.on_conflict() {
                            return BcpStatus::Restart;
                        }
                        tracing::trace!(clause = clause_id, "conflict");
                        return BcpStatus::Conflict(clause_id);
                    }
                }
            }
            cursor += 1;
        }
        BcpStatus::NoConflict
    }
}
