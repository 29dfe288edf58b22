//! Watched-literal index.
//!
//! Every non-unit clause is watched by exactly two of its literals. The
//! index keeps both directions: for each literal, the IDs of the clauses it
//! watches, and for each clause, the pair of literals watching it. The
//! per-literal lists are indexed directly by literal code.

use satori_base::Lit;

/// Two-way watcher bookkeeping.
#[derive(Debug)]
pub struct WatchIndex {
    /// Literal code -> IDs of clauses watched by that literal.
    pub(crate) by_lit: Vec<Vec<usize>>,
    /// Clause ID -> the two literals watching it.
    pub(crate) pair: Vec<(Lit, Lit)>,
}

impl WatchIndex {
    /// Creates an empty index for literal codes `1..=2 * num_vars`.
    #[must_use]
    pub fn new(num_vars: u32) -> Self {
        Self {
            by_lit: vec![Vec::new(); 2 * num_vars as usize + 1],
            pair: Vec::new(),
        }
    }

    /// Registers `clause_id` as watched by `w1` and `w2`. Clauses must be
    /// attached in ID order.
    pub fn attach(&mut self, clause_id: usize, w1: Lit, w2: Lit) {
        debug_assert_eq!(clause_id, self.pair.len());
        debug_assert_ne!(w1, w2);
        self.pair.push((w1, w2));
        self.by_lit[w1.index()].push(clause_id);
        self.by_lit[w2.index()].push(clause_id);
    }

    /// The watcher pair of a clause.
    #[must_use]
    pub fn watchers(&self, clause_id: usize) -> (Lit, Lit) {
        self.pair[clause_id]
    }

    /// Replaces `old` with `new` in the watcher pair of `clause_id`.
    /// The per-literal lists are updated separately by the propagator.
    pub(crate) fn replace_in_pair(&mut self, clause_id: usize, old: Lit, new: Lit) {
        let pair = &mut self.pair[clause_id];
        if pair.0 == old {
            pair.0 = new;
        } else {
            debug_assert_eq!(pair.1, old);
            pair.1 = new;
        }
    }

    /// Unhooks a clause from both of its watchers (used when trimming
    /// learned clauses).
    pub fn detach(&mut self, clause_id: usize) {
        let (w1, w2) = self.pair[clause_id];
        for lit in [w1, w2] {
            let list = &mut self.by_lit[lit.index()];
            if let Some(at) = list.iter().position(|&id| id == clause_id) {
                list.swap_remove(at);
            }
        }
    }

    /// The clauses currently watched by `lit`.
    #[must_use]
    pub fn watched_by(&self, lit: Lit) -> &[usize] {
        &self.by_lit[lit.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_detach() {
        let mut index = WatchIndex::new(3);
        let a = Lit::positive(1);
        let b = Lit::negative(2, 3);
        index.attach(0, a, b);
        index.attach(1, a, Lit::positive(3));

        assert_eq!(index.watched_by(a), &[0, 1]);
        assert_eq!(index.watchers(0), (a, b));

        index.detach(0);
        assert_eq!(index.watched_by(a), &[1]);
        assert!(index.watched_by(b).is_empty());
    }
}
