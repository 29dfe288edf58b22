//! Deterministic instance generators for tests and benchmarks.

use satori_base::utils::XorShift64;
use satori_format::DimacsCnf;

/// A random 3-SAT instance; the same seed always yields the same formula.
#[must_use]
pub fn random_3sat(num_vars: u32, num_clauses: usize, seed: u64) -> DimacsCnf {
    let mut rng = XorShift64::new(seed);
    let mut clauses = Vec::with_capacity(num_clauses);
    while clauses.len() < num_clauses {
        let mut vars: Vec<i64> = Vec::with_capacity(3);
        while vars.len() < 3 {
            let var = rng.next_below(num_vars as usize) as i64 + 1;
            if !vars.contains(&var) {
                vars.push(var);
            }
        }
        let clause: Vec<i64> = vars
            .into_iter()
            .map(|var| if rng.next() & 1 == 0 { var } else { -var })
            .collect();
        clauses.push(clause);
    }
    DimacsCnf {
        num_vars,
        num_clauses,
        clauses,
    }
}

/// The pigeonhole principle PHP(pigeons, holes): unsatisfiable whenever
/// `pigeons > holes`. Variable `(p-1)*holes + h` means pigeon `p` sits in
/// hole `h`.
#[must_use]
pub fn pigeonhole(pigeons: u32, holes: u32) -> DimacsCnf {
    let var = |p: u32, h: u32| i64::from((p - 1) * holes + h);
    let mut clauses: Vec<Vec<i64>> = Vec::new();
    for p in 1..=pigeons {
        clauses.push((1..=holes).map(|h| var(p, h)).collect());
    }
    for h in 1..=holes {
        for p1 in 1..=pigeons {
            for p2 in (p1 + 1)..=pigeons {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    DimacsCnf {
        num_vars: pigeons * holes,
        num_clauses: clauses.len(),
        clauses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_3sat_shape() {
        let cnf = random_3sat(50, 210, 99);
        assert_eq!(cnf.num_vars, 50);
        assert_eq!(cnf.clauses.len(), 210);
        assert!(cnf.clauses.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_random_3sat_reproducible() {
        assert_eq!(random_3sat(20, 80, 7).clauses, random_3sat(20, 80, 7).clauses);
    }

    #[test]
    fn test_pigeonhole_counts() {
        let cnf = pigeonhole(3, 2);
        assert_eq!(cnf.num_vars, 6);
        assert_eq!(cnf.clauses.len(), 9);
    }
}
