//! End-to-end tests for the satori-cdcl solver.

use satori_cdcl::testing::{pigeonhole, random_3sat};
use satori_cdcl::{CdclConfig, CdclSolver, Decider, RestartPolicy, SatResult};
use satori_format::{check_model, DimacsCnf, Model};
use std::time::Duration;

const DECIDERS: [Decider; 3] = [Decider::Ordered, Decider::Vsids, Decider::Minisat];
const RESTARTS: [RestartPolicy; 3] = [
    RestartPolicy::Never,
    RestartPolicy::Geometric,
    RestartPolicy::Luby,
];

fn solve(cnf: &DimacsCnf, decider: Decider, restart: RestartPolicy) -> SatResult {
    let config = CdclConfig {
        decider,
        restart,
        ..CdclConfig::default()
    };
    let mut solver = CdclSolver::with_config(cnf, config).unwrap();
    let result = solver.solve().unwrap();
    solver.assert_invariants();
    result
}

fn expect_model(result: SatResult) -> Model {
    match result {
        SatResult::Sat(model) => model,
        other => panic!("expected SAT, got {other:?}"),
    }
}

fn expect_unsat(result: SatResult) {
    assert!(matches!(result, SatResult::Unsat), "expected UNSAT");
}

// =============================================================================
// Literal scenarios
// =============================================================================

#[test]
fn test_single_unit_clause() {
    let cnf = DimacsCnf::from_str("p cnf 1 1\n1 0\n").unwrap();
    for decider in DECIDERS {
        let model = expect_model(solve(&cnf, decider, RestartPolicy::Never));
        assert_eq!(model.get(1), Some(true));
        assert_eq!(model.len(), 1);
    }
}

#[test]
fn test_conflicting_units_unsat_at_ingest() {
    let cnf = DimacsCnf::from_str("p cnf 1 2\n1 0\n-1 0\n").unwrap();
    for decider in DECIDERS {
        expect_unsat(solve(&cnf, decider, RestartPolicy::Never));
    }
}

#[test]
fn test_three_variable_sat() {
    let cnf = DimacsCnf::from_str("p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n").unwrap();
    for decider in DECIDERS {
        for restart in RESTARTS {
            let model = expect_model(solve(&cnf, decider, restart));
            assert!(check_model(&cnf, &model));
        }
    }
}

#[test]
fn test_forcing_chain_unsat() {
    let cnf = DimacsCnf::from_str("p cnf 3 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n").unwrap();
    for decider in DECIDERS {
        for restart in RESTARTS {
            expect_unsat(solve(&cnf, decider, restart));
        }
    }
}

#[test]
fn test_pigeonhole_3_2_unsat() {
    let cnf = pigeonhole(3, 2);
    assert_eq!(cnf.num_vars, 6);
    assert_eq!(cnf.clauses.len(), 9);
    for decider in DECIDERS {
        for restart in RESTARTS {
            expect_unsat(solve(&cnf, decider, restart));
        }
    }
}

#[test]
fn test_random_3sat_at_ratio_4_2() {
    let cnf = random_3sat(50, 210, 20240117);
    let mut results = Vec::new();
    for decider in DECIDERS {
        match solve(&cnf, decider, RestartPolicy::Never) {
            SatResult::Sat(model) => {
                assert!(check_model(&cnf, &model));
                results.push(true);
            }
            SatResult::Unsat => results.push(false),
            SatResult::Unknown(reason) => panic!("solver gave up: {reason}"),
        }
    }
    // Every decider agrees on satisfiability.
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

// =============================================================================
// Soundness across configurations
// =============================================================================

#[test]
fn test_models_pass_independent_checker() {
    for seed in [1, 2, 3, 4, 5] {
        let cnf = random_3sat(30, 110, seed);
        for decider in DECIDERS {
            for restart in RESTARTS {
                if let SatResult::Sat(model) = solve(&cnf, decider, restart) {
                    assert!(
                        check_model(&cnf, &model),
                        "model fails checker (seed {seed}, {decider:?}, {restart:?})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_pigeonhole_4_3_unsat_with_learning() {
    let cnf = pigeonhole(4, 3);
    for decider in DECIDERS {
        let config = CdclConfig {
            decider,
            ..CdclConfig::default()
        };
        let mut solver = CdclSolver::with_config(&cnf, config).unwrap();
        match solver.solve().unwrap() {
            SatResult::Unsat => {}
            other => panic!("expected UNSAT, got {other:?}"),
        }
        assert!(solver.stats().num_learned_clauses > 0);
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_identical_runs_produce_identical_statistics() {
    let cnf = random_3sat(40, 168, 77);
    for decider in DECIDERS {
        for restart in RESTARTS {
            let run = || {
                let config = CdclConfig {
                    decider,
                    restart,
                    ..CdclConfig::default()
                };
                let mut solver = CdclSolver::with_config(&cnf, config).unwrap();
                solver.solve().unwrap();
                let stats = solver.stats();
                (
                    stats.num_decisions,
                    stats.num_implications,
                    stats.num_learned_clauses,
                    stats.restarts,
                )
            };
            assert_eq!(run(), run(), "{decider:?}/{restart:?} not deterministic");
        }
    }
}

// =============================================================================
// Restart neutrality
// =============================================================================

#[test]
fn test_restarts_do_not_change_satisfiability() {
    for seed in [11, 12, 13] {
        let cnf = random_3sat(35, 150, seed);
        let baseline = matches!(
            solve(&cnf, Decider::Vsids, RestartPolicy::Never),
            SatResult::Sat(_)
        );
        for restart in [RestartPolicy::Geometric, RestartPolicy::Luby] {
            let got = matches!(solve(&cnf, Decider::Vsids, restart), SatResult::Sat(_));
            assert_eq!(baseline, got, "restart policy changed the answer (seed {seed})");
        }
    }
}

// =============================================================================
// Ingest filtering
// =============================================================================

#[test]
fn test_tautology_and_duplicate_idempotence() {
    let plain = DimacsCnf::from_str("p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n").unwrap();
    // The same three clauses with literals repeated in place, plus two
    // tautologies; ingest filtering must make this indistinguishable.
    let noisy = DimacsCnf::from_str(
        "p cnf 3 5\n1 2 2 1 0\n-1 -1 3 0\n-2 -3 -2 0\n1 -1 2 0\n3 -3 0\n",
    )
    .unwrap();

    for decider in DECIDERS {
        let a = expect_model(solve(&plain, decider, RestartPolicy::Never));
        let b = expect_model(solve(&noisy, decider, RestartPolicy::Never));
        assert_eq!(a, b);
    }
}

#[test]
fn test_empty_clause_is_unsat() {
    let cnf = DimacsCnf {
        num_vars: 2,
        num_clauses: 2,
        clauses: vec![vec![1, 2], vec![]],
    };
    expect_unsat(solve(&cnf, Decider::Vsids, RestartPolicy::Never));
}

#[test]
fn test_repeated_consistent_units() {
    let cnf = DimacsCnf::from_str("p cnf 2 3\n1 0\n1 0\n-2 0\n").unwrap();
    let model = expect_model(solve(&cnf, Decider::Minisat, RestartPolicy::Never));
    assert_eq!(model.get(1), Some(true));
    assert_eq!(model.get(2), Some(false));
}

#[test]
fn test_out_of_range_literal_rejected() {
    let cnf = DimacsCnf {
        num_vars: 3,
        num_clauses: 1,
        clauses: vec![vec![1, 5]],
    };
    assert!(CdclSolver::new(&cnf).is_err());
}

// =============================================================================
// Resource limits
// =============================================================================

#[test]
fn test_zero_timeout_reports_unknown() {
    let cnf = random_3sat(30, 120, 5);
    let config = CdclConfig {
        timeout: Some(Duration::ZERO),
        ..CdclConfig::default()
    };
    let mut solver = CdclSolver::with_config(&cnf, config).unwrap();
    match solver.solve().unwrap() {
        SatResult::Unknown(reason) => assert_eq!(reason, "timeout"),
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(solver.stats().result, "TIMEOUT");
}

#[test]
fn test_total_assignment_on_sat() {
    let cnf = random_3sat(25, 60, 9);
    if let SatResult::Sat(model) = solve(&cnf, Decider::Vsids, RestartPolicy::Luby) {
        // Sparse formulas still end with every variable assigned.
        assert_eq!(model.len(), 25);
    }
}
