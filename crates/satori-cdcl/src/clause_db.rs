//! Clause storage.
//!
//! Original and learned clauses share one arena and are addressed by index.
//! Clause IDs are stable for the lifetime of the solve; trimming a learned
//! clause leaves a tombstone so antecedent references never dangle.

use satori_base::Lit;

/// A stored clause.
#[derive(Debug, Clone)]
pub struct Clause {
    /// Literals, sorted by encoded value, duplicate-free.
    pub lits: Vec<Lit>,
    /// Whether this clause was learned from a conflict.
    pub learned: bool,
    /// Set when a learned clause has been trimmed from the database.
    pub deleted: bool,
}

/// Arena of clauses with a learned-clause count.
#[derive(Debug, Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
    num_original: usize,
    num_learned_live: usize,
}

impl ClauseDb {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an original clause and returns its ID.
    pub fn add_original(&mut self, lits: Vec<Lit>) -> usize {
        let id = self.clauses.len();
        self.clauses.push(Clause {
            lits,
            learned: false,
            deleted: false,
        });
        self.num_original += 1;
        id
    }

    /// Appends a learned clause and returns its ID.
    pub fn add_learned(&mut self, lits: Vec<Lit>) -> usize {
        let id = self.clauses.len();
        self.clauses.push(Clause {
            lits,
            learned: true,
            deleted: false,
        });
        self.num_learned_live += 1;
        id
    }

    /// Marks a learned clause as trimmed. Its slot (and ID) stay valid.
    pub fn delete_learned(&mut self, id: usize) {
        let clause = &mut self.clauses[id];
        debug_assert!(clause.learned && !clause.deleted);
        clause.deleted = true;
        clause.lits = Vec::new();
        self.num_learned_live -= 1;
    }

    /// The clause with the given ID.
    #[must_use]
    pub fn clause(&self, id: usize) -> &Clause {
        &self.clauses[id]
    }

    /// The literals of the clause with the given ID.
    #[must_use]
    pub fn lits(&self, id: usize) -> &[Lit] {
        &self.clauses[id].lits
    }

    /// IDs of live learned clauses, oldest first.
    pub fn learned_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| c.learned && !c.deleted)
            .map(|(id, _)| id)
    }

    /// Total number of stored clauses (including tombstones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the database holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of original clauses stored.
    #[must_use]
    pub fn num_original(&self) -> usize {
        self.num_original
    }

    /// Number of learned clauses currently live.
    #[must_use]
    pub fn num_learned_live(&self) -> usize {
        self.num_learned_live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable_across_trim() {
        let mut db = ClauseDb::new();
        let a = db.add_original(vec![Lit::positive(1), Lit::positive(2)]);
        let b = db.add_learned(vec![Lit::positive(3), Lit::positive(4)]);
        let c = db.add_learned(vec![Lit::positive(5), Lit::positive(6)]);

        db.delete_learned(b);

        assert_eq!(db.num_original(), 1);
        assert_eq!(db.num_learned_live(), 1);
        assert!(db.clause(b).deleted);
        assert!(!db.clause(a).deleted);
        assert_eq!(db.lits(c).len(), 2);
        assert_eq!(db.learned_ids().collect::<Vec<_>>(), vec![c]);
    }
}
