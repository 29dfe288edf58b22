//! Core CDCL solver: clause ingest, backtracking, and the search driver.

use crate::bcp::BcpStatus;
use crate::clause_db::ClauseDb;
use crate::heuristics::{Decider, Heuristic};
use crate::restart::{RestartController, RestartPolicy};
use crate::stats::SolverStats;
use crate::trail::{Antecedent, Trail};
use crate::watch::WatchIndex;
use satori_base::{Error, Lit, Result, Var};
use satori_format::{DimacsCnf, Model};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// The result of a SAT solve.
#[derive(Debug, Clone)]
pub enum SatResult {
    /// Satisfiable, with a total assignment.
    Sat(Model),
    /// Unsatisfiable.
    Unsat,
    /// Search gave up (timeout); the reason is carried along.
    Unknown(String),
}

/// Configuration for the CDCL solver.
#[derive(Debug, Clone)]
pub struct CdclConfig {
    /// Decision heuristic.
    pub decider: Decider,
    /// Restart strategy.
    pub restart: RestartPolicy,
    /// Maximum number of live learned clauses; the oldest are trimmed at
    /// restarts once the cap is exceeded.
    pub learned_cap: usize,
    /// Wall-clock budget, `None` for unbounded.
    pub timeout: Option<Duration>,
}

impl Default for CdclConfig {
    fn default() -> Self {
        Self {
            decider: Decider::default(),
            restart: RestartPolicy::default(),
            learned_cap: 5_000,
            timeout: None,
        }
    }
}

/// The main CDCL solver.
pub struct CdclSolver {
    pub(crate) num_vars: u32,
    pub(crate) clauses: ClauseDb,
    pub(crate) watches: WatchIndex,
    pub(crate) trail: Trail,
    pub(crate) heuristic: Heuristic,
    pub(crate) restarts: RestartController,
    /// Current decision level; 0 is the root.
    pub(crate) level: u32,
    pub(crate) stats: SolverStats,
    config: CdclConfig,
    /// Set when ingest already proved the formula unsatisfiable.
    ingest_unsat: bool,
}

impl CdclSolver {
    /// Creates a solver with default configuration.
    pub fn new(problem: &DimacsCnf) -> Result<Self> {
        Self::with_config(problem, CdclConfig::default())
    }

    /// Creates a solver, ingesting every clause of `problem`.
    pub fn with_config(problem: &DimacsCnf, config: CdclConfig) -> Result<Self> {
        let num_vars = problem.num_vars;
        let mut solver = Self {
            num_vars,
            clauses: ClauseDb::new(),
            watches: WatchIndex::new(num_vars),
            trail: Trail::new(num_vars),
            heuristic: Heuristic::new(config.decider, num_vars),
            restarts: RestartController::new(config.restart),
            level: 0,
            stats: SolverStats::default(),
            config,
            ingest_unsat: false,
        };

        for raw in &problem.clauses {
            if !solver.ingest_clause(raw)? {
                solver.ingest_unsat = true;
                break;
            }
        }
        solver.heuristic.build_queue(&solver.trail);

        solver.stats.num_vars = num_vars;
        solver.stats.num_orig_clauses = problem.num_clauses;
        solver.stats.num_stored_clauses = solver.clauses.len();
        Ok(solver)
    }

    /// Adds one raw DIMACS clause. Returns `false` when the clause makes
    /// the formula unsatisfiable on the spot (empty clause, or a unit
    /// contradicting an earlier root assignment).
    fn ingest_clause(&mut self, raw: &[i64]) -> Result<bool> {
        let nv = self.num_vars;
        let mut lits = Vec::with_capacity(raw.len());
        for &signed in raw {
            let var = signed.unsigned_abs();
            if var == 0 || var > u64::from(nv) {
                return Err(Error::MalformedInput(format!(
                    "literal {signed} out of range for {nv} variables"
                )));
            }
            lits.push(Lit::from_dimacs(signed, nv));
        }
        lits.sort_unstable();
        lits.dedup();

        // Tautologies contribute nothing.
        if lits
            .iter()
            .any(|&l| lits.binary_search(&l.negated(nv)).is_ok())
        {
            return Ok(true);
        }

        if lits.is_empty() {
            return Ok(false);
        }

        if let [lit] = lits[..] {
            let var = lit.var(nv);
            let value = !lit.is_negative(nv);
            return match self.trail.value_of(var) {
                None => {
                    self.trail.assign(var, value, 0, Antecedent::Decision);
                    self.heuristic.on_assign(var, value);
                    self.stats.num_implications += 1;
                    tracing::debug!(var, value, "root-level unit");
                    Ok(true)
                }
                Some(existing) => Ok(existing == value),
            };
        }

        for &lit in &lits {
            self.heuristic.note_occurrence(lit);
        }
        let (w1, w2) = (lits[0], lits[1]);
        let id = self.clauses.add_original(lits);
        self.watches.attach(id, w1, w2);
        Ok(true)
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> Result<SatResult> {
        let started = Instant::now();

        if self.ingest_unsat {
            return Ok(self.finish(started, SatResult::Unsat));
        }

        let mut first_call = true;
        let outcome = 'search: loop {
            loop {
                if self.timed_out(started) {
                    break 'search SatResult::Unknown("timeout".to_string());
                }

                let t = Instant::now();
                let status = self.propagate(first_call);
                self.stats.bcp_time += t.elapsed();
                first_call = false;

                match status {
                    BcpStatus::NoConflict => break,
                    BcpStatus::Restart => {
                        self.stats.restarts += 1;
                        let t = Instant::now();
                        self.backtrack(0, None);
                        self.stats.backtrack_time += t.elapsed();
                        self.trim_learned();
                        tracing::debug!(
                            next_limit = self.restarts.conflict_limit(),
                            "restarting"
                        );
                        break;
                    }
                    BcpStatus::Conflict(clause_id) => {
                        let t = Instant::now();
                        let analysis = self.analyze(clause_id);
                        self.stats.analyze_time += t.elapsed();
                        match analysis {
                            None => break 'search SatResult::Unsat,
                            Some((target, var, value, antecedent)) => {
                                let t = Instant::now();
                                self.backtrack(target, Some((var, value, antecedent)));
                                self.stats.backtrack_time += t.elapsed();
                            }
                        }
                    }
                }
            }

            #[cfg(debug_assertions)]
            self.assert_invariants();

            let t = Instant::now();
            let decision = self.decide();
            self.stats.decide_time += t.elapsed();
            if decision.is_none() {
                break SatResult::Sat(self.extract_model());
            }
        };

        Ok(self.finish(started, outcome))
    }

    fn finish(&mut self, started: Instant, outcome: SatResult) -> SatResult {
        self.stats.total_time = started.elapsed();
        self.stats.result = match &outcome {
            SatResult::Sat(_) => "SAT".to_string(),
            SatResult::Unsat => "UNSAT".to_string(),
            SatResult::Unknown(_) => "TIMEOUT".to_string(),
        };
        outcome
    }

    fn timed_out(&self, started: Instant) -> bool {
        self.config
            .timeout
            .is_some_and(|budget| started.elapsed() >= budget)
    }

    /// Pops the trail above `target`, reinserting unassigned variables into
    /// the decision queue, then optionally pushes the asserting assignment
    /// produced by conflict analysis.
    pub(crate) fn backtrack(
        &mut self,
        target: u32,
        asserting: Option<(Var, bool, Antecedent)>,
    ) {
        self.level = target;
        let heuristic = &mut self.heuristic;
        self.trail.backtrack_to(target, |var| heuristic.on_unassign(var));

        if let Some((var, value, antecedent)) = asserting {
            self.trail.assign(var, value, target, antecedent);
            self.heuristic.on_assign(var, value);
            self.stats.num_implications += 1;
        }
    }

    /// Trims the oldest learned clauses above the cap. Runs right after a
    /// restart, when only root-level assignments remain; clauses serving as
    /// root-level antecedents are kept.
    fn trim_learned(&mut self) {
        if self.clauses.num_learned_live() <= self.config.learned_cap {
            return;
        }
        let excess = self.clauses.num_learned_live() - self.config.learned_cap;
        let protected: HashSet<usize> = self
            .trail
            .iter()
            .filter_map(|n| match n.antecedent {
                Antecedent::Clause(id) => Some(id),
                Antecedent::Decision => None,
            })
            .collect();
        let victims: Vec<usize> = self
            .clauses
            .learned_ids()
            .filter(|id| !protected.contains(id))
            .take(excess)
            .collect();
        for id in victims {
            self.watches.detach(id);
            self.clauses.delete_learned(id);
        }
    }

    fn extract_model(&self) -> Model {
        Model::new(self.trail.iter().map(|n| (n.var, n.value)))
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Mutable statistics access (the driver fills in input metadata).
    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    /// Panics if solver state violates a structural invariant. Called at
    /// every loop boundary in debug builds; exposed for tests.
    pub fn assert_invariants(&self) {
        // Trail: each variable at most once, mirror table in step.
        let mut seen = HashSet::new();
        for (i, node) in self.trail.iter().enumerate() {
            assert!(seen.insert(node.var), "variable {} on trail twice", node.var);
            assert_eq!(node.index, i, "trail index out of step");
            let mirror = self
                .trail
                .node_for(node.var)
                .expect("trail node missing from mirror");
            assert_eq!(mirror.index, i);
            assert_eq!(mirror.value, node.value);
        }

        // Decision queue holds exactly the unassigned variables.
        for var in 1..=self.num_vars {
            if let Some(queued) = self.heuristic.queue_contains(var) {
                assert_eq!(
                    queued,
                    !self.trail.is_assigned(var),
                    "queue membership of variable {var} out of step with trail"
                );
            }
        }

        // Watchers: two distinct literals of the clause, lists agree.
        for id in 0..self.clauses.len() {
            let clause = self.clauses.clause(id);
            if clause.deleted || clause.lits.len() < 2 {
                continue;
            }
            let (w1, w2) = self.watches.watchers(id);
            assert_ne!(w1, w2, "clause {id} watched twice by one literal");
            for w in [w1, w2] {
                assert!(
                    clause.lits.binary_search(&w).is_ok(),
                    "watcher of clause {id} not in its literal set"
                );
                assert!(
                    self.watches.watched_by(w).contains(&id),
                    "watcher list missing clause {id}"
                );
            }
        }
        for code in 1..=2 * self.num_vars {
            let lit = Lit::from_code(code);
            for &id in self.watches.watched_by(lit) {
                let (w1, w2) = self.watches.watchers(id);
                assert!(
                    w1 == lit || w2 == lit,
                    "watcher list of {code} holds clause {id} it does not watch"
                );
                assert!(!self.clauses.clause(id).deleted, "trimmed clause {id} still watched");
            }
        }

        // Forced assignments: every other literal of the antecedent is
        // falsified by an earlier trail entry.
        for node in self.trail.iter() {
            let Antecedent::Clause(reason) = node.antecedent else {
                continue;
            };
            if node.level == 0 {
                continue;
            }
            for &lit in self.clauses.lits(reason) {
                if lit.var(self.num_vars) == node.var {
                    continue;
                }
                let other = self
                    .trail
                    .node_for(lit.var(self.num_vars))
                    .expect("antecedent literal unassigned");
                assert_eq!(
                    self.trail.lit_value(lit),
                    Some(false),
                    "antecedent of variable {} not unit at assignment",
                    node.var
                );
                assert!(other.index < node.index, "antecedent assigned after consequence");
            }
        }
    }
}
