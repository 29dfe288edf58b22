//! # satori-dpll
//!
//! Pure-DPLL baseline solvers bundled with Satori for pedagogical
//! comparison against the CDCL core. The search is the classic recursive
//! scheme: propagate units, branch on a variable chosen by a pluggable
//! heuristic, try `true` then `false`. No learning, no watched literals;
//! clauses are rescanned on every propagation pass.

use satori_base::utils::XorShift64;
use satori_base::{Error, Lit, Result, Var};
use satori_cdcl::SatResult;
use satori_format::{DimacsCnf, Model};
use std::time::{Duration, Instant};

/// Branching heuristic for the DPLL baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// First unassigned variable in natural order.
    #[default]
    First,
    /// Dynamic Largest Individual Sum: the literal occurring most often in
    /// unsatisfied clauses.
    Dlis,
    /// Dynamic Largest Combined Sum: the variable whose two literals
    /// together occur most often.
    Dlcs,
    /// Maximum Occurrences in clauses of Minimum size.
    Mom,
    /// Jeroslow-Wang: occurrences weighted by `2^-|clause|`.
    Jw,
    /// Uniformly random unassigned variable (fixed seed).
    Random,
}

/// Configuration for a DPLL baseline run.
#[derive(Debug, Clone)]
pub struct DpllConfig {
    /// Branching heuristic.
    pub selection: Selection,
    /// Wall-clock budget, `None` for unbounded.
    pub timeout: Option<Duration>,
    /// Seed for the RANDOM heuristic.
    pub seed: u64,
}

impl Default for DpllConfig {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            timeout: None,
            seed: 42,
        }
    }
}

/// Counters collected over one DPLL run.
#[derive(Debug, Clone, Default)]
pub struct DpllStats {
    /// Branching decisions made.
    pub decisions: u64,
    /// Backtracks taken.
    pub backtracks: u64,
    /// Deepest recursion reached.
    pub max_depth: u32,
}

enum Search {
    Sat,
    Unsat,
    Timeout,
}

/// A recursive DPLL solver.
pub struct DpllSolver {
    num_vars: u32,
    clauses: Vec<Vec<Lit>>,
    /// Variable -> value, `None` while unassigned.
    assignment: Vec<Option<bool>>,
    rng: XorShift64,
    config: DpllConfig,
    stats: DpllStats,
    deadline: Option<Instant>,
}

impl DpllSolver {
    /// Creates a solver over `problem`.
    pub fn new(problem: &DimacsCnf) -> Result<Self> {
        Self::with_config(problem, DpllConfig::default())
    }

    /// Creates a solver with the given configuration.
    pub fn with_config(problem: &DimacsCnf, config: DpllConfig) -> Result<Self> {
        let nv = problem.num_vars;
        let mut clauses = Vec::with_capacity(problem.clauses.len());
        for raw in &problem.clauses {
            let mut clause = Vec::with_capacity(raw.len());
            for &signed in raw {
                let var = signed.unsigned_abs();
                if var == 0 || var > u64::from(nv) {
                    return Err(Error::MalformedInput(format!(
                        "literal {signed} out of range for {nv} variables"
                    )));
                }
                clause.push(Lit::from_dimacs(signed, nv));
            }
            clauses.push(clause);
        }
        Ok(Self {
            num_vars: nv,
            clauses,
            assignment: vec![None; nv as usize + 1],
            rng: XorShift64::new(config.seed),
            config,
            stats: DpllStats::default(),
            deadline: None,
        })
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> SatResult {
        self.deadline = self.config.timeout.map(|t| Instant::now() + t);
        match self.search(0) {
            Search::Sat => SatResult::Sat(Model::new(
                (1..=self.num_vars)
                    .filter_map(|v| self.assignment[v as usize].map(|b| (v, b))),
            )),
            Search::Unsat => SatResult::Unsat,
            Search::Timeout => SatResult::Unknown("timeout".to_string()),
        }
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &DpllStats {
        &self.stats
    }

    fn search(&mut self, depth: u32) -> Search {
        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Search::Timeout;
        }

        if !self.unit_propagate() {
            self.stats.backtracks += 1;
            return Search::Unsat;
        }
        if self.all_satisfied() {
            return Search::Sat;
        }

        let Some(var) = self.choose_variable() else {
            self.stats.backtracks += 1;
            return Search::Unsat;
        };
        self.stats.decisions += 1;
        tracing::trace!(var, depth, "branching");

        let saved = self.assignment.clone();
        for value in [true, false] {
            self.assignment[var as usize] = Some(value);
            match self.search(depth + 1) {
                Search::Sat => return Search::Sat,
                Search::Timeout => return Search::Timeout,
                Search::Unsat => self.assignment.clone_from(&saved),
            }
        }
        self.stats.backtracks += 1;
        Search::Unsat
    }

    /// Applies unit clauses to fixpoint. Returns `false` on conflict.
    fn unit_propagate(&mut self) -> bool {
        let mut propagated = true;
        while propagated {
            propagated = false;
            for i in 0..self.clauses.len() {
                if self.clause_satisfied(&self.clauses[i]) {
                    continue;
                }
                let mut unassigned = None;
                let mut unassigned_count = 0;
                for &lit in &self.clauses[i] {
                    if self.lit_value(lit).is_none() {
                        unassigned = Some(lit);
                        unassigned_count += 1;
                    }
                }
                match (unassigned_count, unassigned) {
                    (0, _) => return false,
                    (1, Some(lit)) => {
                        let var = lit.var(self.num_vars);
                        self.assignment[var as usize] = Some(!lit.is_negative(self.num_vars));
                        propagated = true;
                    }
                    _ => {}
                }
            }
        }
        true
    }

    fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.var(self.num_vars) as usize]
            .map(|value| value != lit.is_negative(self.num_vars))
    }

    fn clause_satisfied(&self, clause: &[Lit]) -> bool {
        clause.iter().any(|&lit| self.lit_value(lit) == Some(true))
    }

    fn all_satisfied(&self) -> bool {
        self.clauses.iter().all(|c| self.clause_satisfied(c))
    }

    fn first_unassigned(&self) -> Option<Var> {
        (1..=self.num_vars).find(|&v| self.assignment[v as usize].is_none())
    }

    fn choose_variable(&mut self) -> Option<Var> {
        match self.config.selection {
            Selection::First => self.first_unassigned(),
            Selection::Dlis => self.choose_dlis(),
            Selection::Dlcs => self.choose_dlcs(),
            Selection::Mom => self.choose_mom(),
            Selection::Jw => self.choose_jw(),
            Selection::Random => self.choose_random(),
        }
    }

    /// Unassigned literals of every clause not yet satisfied, flattened.
    fn open_literals(&self) -> impl Iterator<Item = (usize, Lit)> + '_ {
        self.clauses
            .iter()
            .filter(|c| !self.clause_satisfied(c))
            .flat_map(move |c| {
                let open: Vec<Lit> = c
                    .iter()
                    .copied()
                    .filter(|&l| self.lit_value(l).is_none())
                    .collect();
                let len = open.len();
                open.into_iter().map(move |l| (len, l))
            })
    }

    fn choose_dlis(&self) -> Option<Var> {
        let mut counts = vec![0u32; 2 * self.num_vars as usize + 1];
        for (_, lit) in self.open_literals() {
            counts[lit.index()] += 1;
        }
        (1..counts.len())
            .filter(|&i| counts[i] > 0)
            .max_by_key(|&i| counts[i])
            .map(|i| Lit::from_code(i as u32).var(self.num_vars))
            .or_else(|| self.first_unassigned())
    }

    fn choose_dlcs(&self) -> Option<Var> {
        let mut counts = vec![0u32; self.num_vars as usize + 1];
        for (_, lit) in self.open_literals() {
            counts[lit.var(self.num_vars) as usize] += 1;
        }
        (1..counts.len())
            .filter(|&v| counts[v] > 0)
            .max_by_key(|&v| counts[v])
            .map(|v| v as Var)
            .or_else(|| self.first_unassigned())
    }

    fn choose_mom(&self) -> Option<Var> {
        let Some(min_size) = self.open_literals().map(|(len, _)| len).min() else {
            return self.first_unassigned();
        };
        let mut counts = vec![0u32; self.num_vars as usize + 1];
        for (len, lit) in self.open_literals() {
            if len == min_size {
                counts[lit.var(self.num_vars) as usize] += 1;
            }
        }
        (1..counts.len())
            .filter(|&v| counts[v] > 0)
            .max_by_key(|&v| counts[v])
            .map(|v| v as Var)
            .or_else(|| self.first_unassigned())
    }

    fn choose_jw(&self) -> Option<Var> {
        let mut scores = vec![0.0f64; self.num_vars as usize + 1];
        for (len, lit) in self.open_literals() {
            scores[lit.var(self.num_vars) as usize] += (2.0f64).powi(-(len as i32));
        }
        let mut best = None;
        let mut best_score = 0.0;
        for (var, &score) in scores.iter().enumerate().skip(1) {
            if score > best_score {
                best_score = score;
                best = Some(var as Var);
            }
        }
        best.or_else(|| self.first_unassigned())
    }

    fn choose_random(&mut self) -> Option<Var> {
        let open: Vec<Var> = (1..=self.num_vars)
            .filter(|&v| self.assignment[v as usize].is_none())
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[self.rng.next_below(open.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satori_cdcl::testing::{pigeonhole, random_3sat};
    use satori_cdcl::CdclSolver;
    use satori_format::check_model;

    const SELECTIONS: [Selection; 6] = [
        Selection::First,
        Selection::Dlis,
        Selection::Dlcs,
        Selection::Mom,
        Selection::Jw,
        Selection::Random,
    ];

    fn solve_with(cnf: &DimacsCnf, selection: Selection) -> SatResult {
        let config = DpllConfig {
            selection,
            ..DpllConfig::default()
        };
        DpllSolver::with_config(cnf, config).unwrap().solve()
    }

    #[test]
    fn test_simple_sat_all_selections() {
        let cnf = DimacsCnf::from_str("p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n").unwrap();
        for selection in SELECTIONS {
            match solve_with(&cnf, selection) {
                SatResult::Sat(model) => assert!(check_model(&cnf, &model)),
                other => panic!("{selection:?}: expected SAT, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_forcing_chain_unsat_all_selections() {
        let cnf = DimacsCnf::from_str("p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n").unwrap();
        for selection in SELECTIONS {
            assert!(matches!(solve_with(&cnf, selection), SatResult::Unsat));
        }
    }

    #[test]
    fn test_pigeonhole_unsat() {
        let cnf = pigeonhole(3, 2);
        for selection in SELECTIONS {
            assert!(matches!(solve_with(&cnf, selection), SatResult::Unsat));
        }
    }

    #[test]
    fn test_agrees_with_cdcl_on_random_instances() {
        for seed in [3, 8, 21] {
            let cnf = random_3sat(15, 60, seed);
            let cdcl_sat = matches!(
                CdclSolver::new(&cnf).unwrap().solve().unwrap(),
                SatResult::Sat(_)
            );
            for selection in SELECTIONS {
                let dpll_sat = match solve_with(&cnf, selection) {
                    SatResult::Sat(model) => {
                        assert!(check_model(&cnf, &model));
                        true
                    }
                    SatResult::Unsat => false,
                    SatResult::Unknown(reason) => panic!("gave up: {reason}"),
                };
                assert_eq!(cdcl_sat, dpll_sat, "seed {seed}, {selection:?}");
            }
        }
    }

    #[test]
    fn test_timeout_reports_unknown() {
        let cnf = pigeonhole(7, 6);
        let config = DpllConfig {
            selection: Selection::First,
            timeout: Some(Duration::ZERO),
            ..DpllConfig::default()
        };
        let result = DpllSolver::with_config(&cnf, config).unwrap().solve();
        assert!(matches!(result, SatResult::Unknown(_)));
    }

    #[test]
    fn test_counters_advance() {
        let cnf = random_3sat(12, 50, 4);
        let mut solver = DpllSolver::new(&cnf).unwrap();
        solver.solve();
        assert!(solver.stats().decisions > 0 || solver.stats().backtracks > 0);
    }
}
