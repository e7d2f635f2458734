//! Folds over literal sequences: conjunction, disjunction and cardinality.
//!
//! Folds are built from the pairwise gates in [`gates`][crate::gates], so every step
//! costs a constant number of clauses and constants collapse along the way.
//!
//! # Cardinality
//!
//! At-most-one uses the pairwise encoding: it is the negation of the disjunction of
//! `xi ∧ xj` over all `i < j`. This costs O(n²) gates, which is fine for the short
//! vectors this crate targets but does not scale to thousands of literals.

use log::debug;

use crate::engine::{calc_value, Engine, SolverState};
use crate::error::Result;
use crate::lit::Lit;

impl SolverState {
    pub(crate) fn fold_all(&mut self, lits: &[Lit]) -> Lit {
        let mut res = Lit::TRUE;
        for &lit in lits {
            res = self.and(res, lit);
        }
        res
    }

    pub(crate) fn fold_any(&mut self, lits: &[Lit]) -> Lit {
        let mut res = Lit::FALSE;
        for &lit in lits {
            res = self.or(res, lit);
        }
        res
    }

    pub(crate) fn fold_amo(&mut self, lits: &[Lit]) -> Lit {
        let mut two = Lit::FALSE;
        for (i, &a) in lits.iter().enumerate() {
            for &b in &lits[i + 1..] {
                let both = self.and(a, b);
                two = self.or(two, both);
            }
        }
        -two
    }

    pub(crate) fn fold_one(&mut self, lits: &[Lit]) -> Lit {
        let amo = self.fold_amo(lits);
        let any = self.fold_any(lits);
        self.and(amo, any)
    }
}

fn count_true(lits: &[Lit]) -> Result<usize> {
    let mut count = 0;
    for &lit in lits {
        count += calc_value(lit)? as usize;
    }
    Ok(count)
}

impl Engine {
    /// Computes the conjunction of the literals. The empty conjunction is `TRUE`.
    pub fn fold_all(&self, lits: impl IntoIterator<Item = Lit>) -> Result<Lit> {
        let lits: Vec<Lit> = lits.into_iter().collect();
        debug!("fold_all(lits = {:?})", lits);
        match self.with_solver(lits.iter().copied(), |s| s.fold_all(&lits)) {
            Some(res) => res,
            None => Ok(Lit::from_bool(count_true(&lits)? == lits.len())),
        }
    }

    /// Computes the disjunction of the literals. The empty disjunction is `FALSE`.
    pub fn fold_any(&self, lits: impl IntoIterator<Item = Lit>) -> Result<Lit> {
        let lits: Vec<Lit> = lits.into_iter().collect();
        debug!("fold_any(lits = {:?})", lits);
        match self.with_solver(lits.iter().copied(), |s| s.fold_any(&lits)) {
            Some(res) => res,
            None => Ok(Lit::from_bool(count_true(&lits)? > 0)),
        }
    }

    /// Returns true if at most one of the literals is true.
    pub fn fold_amo(&self, lits: impl IntoIterator<Item = Lit>) -> Result<Lit> {
        let lits: Vec<Lit> = lits.into_iter().collect();
        debug!("fold_amo(lits = {:?})", lits);
        match self.with_solver(lits.iter().copied(), |s| s.fold_amo(&lits)) {
            Some(res) => res,
            None => Ok(Lit::from_bool(count_true(&lits)? <= 1)),
        }
    }

    /// Returns true if exactly one of the literals is true.
    pub fn fold_one(&self, lits: impl IntoIterator<Item = Lit>) -> Result<Lit> {
        let lits: Vec<Lit> = lits.into_iter().collect();
        debug!("fold_one(lits = {:?})", lits);
        match self.with_solver(lits.iter().copied(), |s| s.fold_one(&lits)) {
            Some(res) => res,
            None => Ok(Lit::from_bool(count_true(&lits)? == 1)),
        }
    }
}
