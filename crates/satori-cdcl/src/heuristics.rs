//! Decision heuristics.
//!
//! Three interchangeable deciders share the solver's indexed heap:
//!
//! - **ORDERED**: first unassigned variable in natural order, always `true`
//! - **VSIDS**: per-literal activity; the popped literal fixes both the
//!   variable and the polarity
//! - **MINISAT**: per-variable activity with phase saving; the saved
//!   polarity is recorded on every assignment, decisions and implications
//!   alike
//!
//! Scores start from clause-occurrence counts and are bumped for every
//! literal (variable) of a learned clause. VSIDS grows its bump additively
//! (`increment += 0.75` per conflict); MINISAT divides by the decay factor,
//! which is equivalent to decaying all other scores.

use crate::heap::IndexedHeap;
use crate::trail::Trail;
use satori_base::{Lit, Var};

/// Which decision heuristic drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decider {
    /// First unassigned variable, assigned `true`.
    Ordered,
    /// Per-literal activity scores.
    #[default]
    Vsids,
    /// Per-variable activity scores with phase saving.
    Minisat,
}

impl std::str::FromStr for Decider {
    type Err = satori_base::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ORDERED" => Ok(Self::Ordered),
            "VSIDS" => Ok(Self::Vsids),
            "MINISAT" => Ok(Self::Minisat),
            _ => Err(satori_base::Error::InvalidConfiguration(format!(
                "unknown decider '{s}'"
            ))),
        }
    }
}

const INITIAL_INCREMENT: f64 = 1.0;
const VSIDS_INCREMENT_GROWTH: f64 = 0.75;
const MINISAT_DECAY: f64 = 0.85;

/// Heuristic state, tagged by decider.
#[derive(Debug)]
pub(crate) enum Heuristic {
    Ordered { num_vars: u32 },
    Vsids(VsidsState),
    Minisat(MinisatState),
}

#[derive(Debug)]
pub(crate) struct VsidsState {
    num_vars: u32,
    /// Literal code -> activity.
    scores: Vec<f64>,
    heap: IndexedHeap,
    increment: f64,
}

#[derive(Debug)]
pub(crate) struct MinisatState {
    num_vars: u32,
    /// Variable -> activity.
    scores: Vec<f64>,
    heap: IndexedHeap,
    /// Variable -> last assigned polarity.
    phase: Vec<bool>,
    increment: f64,
    decay: f64,
}

impl Heuristic {
    pub(crate) fn new(decider: Decider, num_vars: u32) -> Self {
        let n = num_vars as usize;
        match decider {
            Decider::Ordered => Self::Ordered { num_vars },
            Decider::Vsids => Self::Vsids(VsidsState {
                num_vars,
                scores: vec![0.0; 2 * n + 1],
                heap: IndexedHeap::with_max_key(2 * n),
                increment: INITIAL_INCREMENT,
            }),
            Decider::Minisat => Self::Minisat(MinisatState {
                num_vars,
                scores: vec![0.0; n + 1],
                heap: IndexedHeap::with_max_key(n),
                phase: vec![false; n + 1],
                increment: INITIAL_INCREMENT,
                decay: MINISAT_DECAY,
            }),
        }
    }

    /// Counts one clause occurrence of `lit` toward the initial scores.
    pub(crate) fn note_occurrence(&mut self, lit: Lit) {
        match self {
            Self::Ordered { .. } => {}
            Self::Vsids(state) => state.scores[lit.index()] += 1.0,
            Self::Minisat(state) => state.scores[lit.var(state.num_vars) as usize] += 1.0,
        }
    }

    /// Builds the decision queue from the initial scores, leaving out
    /// everything already assigned on the trail.
    pub(crate) fn build_queue(&mut self, trail: &Trail) {
        match self {
            Self::Ordered { .. } => {}
            Self::Vsids(state) => {
                state.heap.build(&state.scores);
                for node in trail.iter() {
                    state.heap.remove(node.var);
                    state.heap.remove(node.var + state.num_vars);
                }
            }
            Self::Minisat(state) => {
                state.heap.build(&state.scores);
                for node in trail.iter() {
                    state.heap.remove(node.var);
                }
            }
        }
    }

    /// Keeps the queue and phase memory in step with a new assignment.
    pub(crate) fn on_assign(&mut self, var: Var, value: bool) {
        match self {
            Self::Ordered { .. } => {}
            Self::Vsids(state) => {
                state.heap.remove(var);
                state.heap.remove(var + state.num_vars);
            }
            Self::Minisat(state) => {
                state.heap.remove(var);
                state.phase[var as usize] = value;
            }
        }
    }

    /// Reinserts an unassigned variable with its current score.
    pub(crate) fn on_unassign(&mut self, var: Var) {
        match self {
            Self::Ordered { .. } => {}
            Self::Vsids(state) => {
                let neg = var + state.num_vars;
                state.heap.insert(var, state.scores[var as usize]);
                state.heap.insert(neg, state.scores[neg as usize]);
            }
            Self::Minisat(state) => {
                state.heap.insert(var, state.scores[var as usize]);
            }
        }
    }

    /// Bumps every literal (variable) of a learned clause, then advances
    /// the bump increment.
    pub(crate) fn bump_learned(&mut self, lits: &[Lit]) {
        match self {
            Self::Ordered { .. } => {}
            Self::Vsids(state) => {
                for &lit in lits {
                    state.scores[lit.index()] += state.increment;
                    state.heap.increase(lit.code(), state.increment);
                }
                state.increment += VSIDS_INCREMENT_GROWTH;
            }
            Self::Minisat(state) => {
                for &lit in lits {
                    let var = lit.var(state.num_vars);
                    state.scores[var as usize] += state.increment;
                    state.heap.increase(var, state.increment);
                }
                state.increment /= state.decay;
            }
        }
    }

    /// Picks the next decision variable and polarity, `None` when every
    /// variable is assigned.
    pub(crate) fn pick(&mut self, trail: &Trail) -> Option<(Var, bool)> {
        match self {
            Self::Ordered { num_vars } => {
                (1..=*num_vars).find(|&v| !trail.is_assigned(v)).map(|v| (v, true))
            }
            Self::Vsids(state) => {
                let lit = Lit::from_code(state.heap.pop_top()?);
                let var = lit.var(state.num_vars);
                Some((var, !lit.is_negative(state.num_vars)))
            }
            Self::Minisat(state) => {
                let var = state.heap.pop_top()?;
                Some((var, state.phase[var as usize]))
            }
        }
    }

    /// Whether `var` currently sits in the decision queue. `None` for the
    /// ORDERED decider, which keeps no queue.
    pub(crate) fn queue_contains(&self, var: Var) -> Option<bool> {
        match self {
            Self::Ordered { .. } => None,
            Self::Vsids(state) => {
                Some(state.heap.contains(var) && state.heap.contains(var + state.num_vars))
            }
            Self::Minisat(state) => Some(state.heap.contains(var)),
        }
    }
}
