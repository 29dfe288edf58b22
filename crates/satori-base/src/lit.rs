//! Dense literal encoding.
//!
//! Variables are `1..=V`. A literal is a single integer in `1..=2V`: the
//! positive literal of variable `v` is `v`, the negative literal is `v + V`.
//! Negation therefore adds `V` to a positive code and subtracts it from a
//! negative one, and per-literal tables (watcher lists, activity scores) are
//! directly indexable by the code.

use serde::{Deserialize, Serialize};

/// A propositional variable, numbered from 1.
pub type Var = u32;

/// An encoded literal in `1..=2V`.
///
/// The encoding depends on the variable count of the formula it belongs to,
/// so operations that cross the polarity boundary take `num_vars` explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lit(u32);

impl Lit {
    /// The positive literal of `var`.
    #[must_use]
    pub const fn positive(var: Var) -> Self {
        Self(var)
    }

    /// The negative literal of `var`.
    #[must_use]
    pub const fn negative(var: Var, num_vars: u32) -> Self {
        Self(var + num_vars)
    }

    /// Wraps a raw encoded value (must lie in `1..=2V`).
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        Self(code)
    }

    /// Encodes a signed DIMACS literal (`-3` is the negative literal of 3).
    #[must_use]
    pub fn from_dimacs(lit: i64, num_vars: u32) -> Self {
        if lit < 0 {
            Self(lit.unsigned_abs() as u32 + num_vars)
        } else {
            Self(lit as u32)
        }
    }

    /// The raw encoded value in `1..=2V`.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// The encoded value as a table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is a negative literal.
    #[must_use]
    pub const fn is_negative(self, num_vars: u32) -> bool {
        self.0 > num_vars
    }

    /// The underlying variable.
    #[must_use]
    pub const fn var(self, num_vars: u32) -> Var {
        if self.0 > num_vars {
            self.0 - num_vars
        } else {
            self.0
        }
    }

    /// The literal of the same variable with opposite polarity.
    #[must_use]
    pub const fn negated(self, num_vars: u32) -> Self {
        if self.0 > num_vars {
            Self(self.0 - num_vars)
        } else {
            Self(self.0 + num_vars)
        }
    }

    /// Converts back to the signed DIMACS convention.
    #[must_use]
    pub const fn to_dimacs(self, num_vars: u32) -> i64 {
        if self.0 > num_vars {
            -((self.0 - num_vars) as i64)
        } else {
            self.0 as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_round_trip() {
        let num_vars = 7;
        for raw in [1i64, -1, 3, -7, 7] {
            let lit = Lit::from_dimacs(raw, num_vars);
            assert_eq!(lit.to_dimacs(num_vars), raw);
        }
    }

    #[test]
    fn test_polarity() {
        let num_vars = 5;
        let pos = Lit::positive(3);
        let neg = Lit::negative(3, num_vars);

        assert!(!pos.is_negative(num_vars));
        assert!(neg.is_negative(num_vars));
        assert_eq!(pos.var(num_vars), 3);
        assert_eq!(neg.var(num_vars), 3);
        assert_eq!(neg.code(), 8);
    }

    #[test]
    fn test_negation_is_involutive() {
        let num_vars = 9;
        for var in 1..=num_vars {
            let lit = Lit::positive(var);
            assert_eq!(lit.negated(num_vars).negated(num_vars), lit);
            assert_eq!(lit.negated(num_vars).code(), var + num_vars);
        }
    }
}
