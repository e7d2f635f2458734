//! Comparison of literal sequences as little-endian binary numbers.
//!
//! Index 0 is the least significant digit, so `[TRUE, FALSE]` is 1 and
//! `[FALSE, TRUE]` is 2. Both sequences must have the same length.
//!
//! The ripple comparator walks from the most significant digit down, keeping
//! "equal so far" and "less so far":
//!
//! ```text
//! eq_i = eq_{i+1} ∧ (a_i ≡ b_i)
//! lt_i = lt_{i+1} ∨ (eq_{i+1} ∧ ¬a_i ∧ b_i)
//! ```
//!
//! starting from `eq = TRUE, lt = FALSE`. Every other relation is derived from
//! these two: `le = lt ∨ eq`, `ne = ¬eq`, `gt(a, b) = lt(b, a)`, `ge(a, b) = le(b, a)`.

use std::cmp::Ordering;

use log::debug;

use crate::engine::{calc_value, Engine, SolverState};
use crate::error::{Error, Result};
use crate::lit::Lit;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Relation {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
}

impl Relation {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Relation::Eq => ord == Ordering::Equal,
            Relation::Ne => ord != Ordering::Equal,
            Relation::Le => ord != Ordering::Greater,
            Relation::Lt => ord == Ordering::Less,
            Relation::Ge => ord != Ordering::Less,
            Relation::Gt => ord == Ordering::Greater,
        }
    }
}

impl SolverState {
    pub(crate) fn comp_eq(&mut self, a: &[Lit], b: &[Lit]) -> Lit {
        let mut eq = Lit::TRUE;
        for (&x, &y) in a.iter().zip(b) {
            let same = self.equ(x, y);
            eq = self.and(eq, same);
        }
        eq
    }

    /// Returns `(lt, eq)` of the two sequences.
    pub(crate) fn ripple(&mut self, a: &[Lit], b: &[Lit]) -> (Lit, Lit) {
        let mut eq = Lit::TRUE;
        let mut lt = Lit::FALSE;
        for (&x, &y) in a.iter().zip(b).rev() {
            let less = self.and(-x, y);
            let step = self.and(eq, less);
            lt = self.or(lt, step);
            let same = self.equ(x, y);
            eq = self.and(eq, same);
        }
        (lt, eq)
    }

    pub(crate) fn comp_lt(&mut self, a: &[Lit], b: &[Lit]) -> Lit {
        self.ripple(a, b).0
    }

    pub(crate) fn comp_le(&mut self, a: &[Lit], b: &[Lit]) -> Lit {
        let (lt, eq) = self.ripple(a, b);
        self.or(lt, eq)
    }

    fn compare(&mut self, rel: Relation, a: &[Lit], b: &[Lit]) -> Lit {
        match rel {
            Relation::Eq => self.comp_eq(a, b),
            Relation::Ne => -self.comp_eq(a, b),
            Relation::Lt => self.comp_lt(a, b),
            Relation::Le => self.comp_le(a, b),
            Relation::Gt => self.comp_lt(b, a),
            Relation::Ge => self.comp_le(b, a),
        }
    }
}

/// Compares two constant sequences, most significant digit first.
fn calc_ordering(a: &[Lit], b: &[Lit]) -> Result<Ordering> {
    let a = a.iter().map(|&lit| calc_value(lit)).collect::<Result<Vec<bool>>>()?;
    let b = b.iter().map(|&lit| calc_value(lit)).collect::<Result<Vec<bool>>>()?;
    Ok(a.iter().rev().cmp(b.iter().rev()))
}

impl Engine {
    pub(crate) fn compare(&self, rel: Relation, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        debug!("compare({:?}, lits0 = {:?}, lits1 = {:?})", rel, lits0, lits1);
        if lits0.len() != lits1.len() {
            return Err(Error::LengthMismatch {
                left: lits0.len(),
                right: lits1.len(),
            });
        }
        let lits = lits0.iter().chain(lits1).copied();
        match self.with_solver(lits, |s| s.compare(rel, lits0, lits1)) {
            Some(res) => res,
            None => Ok(Lit::from_bool(rel.holds(calc_ordering(lits0, lits1)?))),
        }
    }

    /// Returns true if the two sequences are equal.
    pub fn comp_eq(&self, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        self.compare(Relation::Eq, lits0, lits1)
    }

    /// Returns true if the two sequences are not equal.
    pub fn comp_ne(&self, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        self.compare(Relation::Ne, lits0, lits1)
    }

    /// Returns true if the first sequence is smaller than or equal to the second one.
    pub fn comp_le(&self, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        self.compare(Relation::Le, lits0, lits1)
    }

    /// Returns true if the first sequence is smaller than the second one.
    pub fn comp_lt(&self, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        self.compare(Relation::Lt, lits0, lits1)
    }

    /// Returns true if the first sequence is greater than or equal to the second one.
    pub fn comp_ge(&self, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        self.compare(Relation::Ge, lits0, lits1)
    }

    /// Returns true if the first sequence is greater than the second one.
    pub fn comp_gt(&self, lits0: &[Lit], lits1: &[Lit]) -> Result<Lit> {
        self.compare(Relation::Gt, lits0, lits1)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Value;

    type Comp = for<'a, 'b, 'c> fn(&'a Engine, &'b [Lit], &'c [Lit]) -> Result<Lit>;

    const COMPS: [(&str, Comp, fn(u32, u32) -> bool); 6] = [
        ("eq", Engine::comp_eq, |a, b| a == b),
        ("ne", Engine::comp_ne, |a, b| a != b),
        ("le", Engine::comp_le, |a, b| a <= b),
        ("lt", Engine::comp_lt, |a, b| a < b),
        ("ge", Engine::comp_ge, |a, b| a >= b),
        ("gt", Engine::comp_gt, |a, b| a > b),
    ];

    fn bits(value: u32, len: usize) -> Vec<Lit> {
        (0..len).map(|i| Lit::from_bool(value & (1 << i) != 0)).collect()
    }

    #[test]
    fn test_little_endian_scenario() {
        let engine = Engine::new().unwrap();
        let a = [Lit::FALSE, Lit::TRUE];
        let b = [Lit::TRUE, Lit::FALSE];
        assert_eq!(engine.comp_gt(&a, &b).unwrap(), Lit::TRUE);
        assert_eq!(engine.comp_lt(&a, &b).unwrap(), Lit::FALSE);
        assert_eq!(engine.comp_ge(&a, &b).unwrap(), Lit::TRUE);
        assert_eq!(engine.comp_le(&a, &b).unwrap(), Lit::FALSE);
        assert_eq!(engine.num_clauses(), 1);
    }

    #[test]
    fn test_calculator_exhaustive() {
        let calc = Engine::calculator();
        for len in 0..=4 {
            for a in 0..(1u32 << len) {
                for b in 0..(1u32 << len) {
                    for (name, comp, expected) in COMPS {
                        let res = comp(&calc, &bits(a, len), &bits(b, len)).unwrap();
                        assert_eq!(res, Lit::from_bool(expected(a, b)), "{} {} {}", a, name, b);
                    }
                }
            }
        }
    }

    #[test]
    fn test_solver_constants_exhaustive() {
        let engine = Engine::new().unwrap();
        for a in 0..16 {
            for b in 0..16 {
                for (name, comp, expected) in COMPS {
                    let res = comp(&engine, &bits(a, 4), &bits(b, 4)).unwrap();
                    assert_eq!(res, Lit::from_bool(expected(a, b)), "{} {} {}", a, name, b);
                }
            }
        }
        assert_eq!(engine.num_variables(), 1);
    }

    #[test]
    fn test_solver_variables_exhaustive() {
        let engine = Engine::new().unwrap();
        let x: Vec<Lit> = (0..4).map(|_| engine.add_variable().unwrap()).collect();
        let y: Vec<Lit> = (0..4).map(|_| engine.add_variable().unwrap()).collect();
        let results: Vec<Lit> = COMPS.iter().map(|(_, comp, _)| comp(&engine, &x, &y).unwrap()).collect();

        let fix = |vars: &[Lit], value: u32| -> Vec<Lit> {
            vars.iter()
                .enumerate()
                .map(|(i, &v)| if value & (1 << i) != 0 { v } else { -v })
                .collect()
        };

        for a in 0..16 {
            for b in 0..16 {
                let mut assumptions = fix(&x, a);
                assumptions.extend(fix(&y, b));
                assert!(engine.solve_with(&assumptions).unwrap());
                for ((name, _, expected), &res) in COMPS.iter().zip(&results) {
                    let value = engine.get_value(res).unwrap();
                    assert_eq!(value, Value::from(expected(a, b)), "{} {} {}", a, name, b);
                }
            }
        }
    }

    #[test]
    fn test_comparisons_are_linear() {
        let engine = Engine::new().unwrap();
        let x: Vec<Lit> = (0..32).map(|_| engine.add_variable().unwrap()).collect();
        let y: Vec<Lit> = (0..32).map(|_| engine.add_variable().unwrap()).collect();
        let before = engine.num_variables();
        engine.comp_lt(&x, &y).unwrap();
        assert!(engine.num_variables() - before <= 5 * 32);
    }

    #[test]
    fn test_length_mismatch() {
        let calc = Engine::calculator();
        let engine = Engine::new().unwrap();
        for e in [&calc, &engine] {
            assert!(matches!(
                e.comp_lt(&[Lit::TRUE], &[Lit::TRUE, Lit::FALSE]),
                Err(Error::LengthMismatch { left: 1, right: 2 })
            ));
        }
    }
}
