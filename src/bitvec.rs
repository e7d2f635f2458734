//! Literal vectors bound to an engine.
//!
//! A [`BitVec`] is an ordered sequence of literals sharing one [`Engine`]. It is a
//! cheap immutable value: every operation returns a new vector and leaves its
//! operands untouched. Vectors read as little-endian numbers (index 0 is the least
//! significant digit) wherever a numeric meaning is needed.
//!
//! Operands bound to different engines are combined via [`reconcile`], so vectors
//! from a calculator mix freely with vectors from a solver engine.
//!
//! # Examples
//!
//! ```
//! use cnf_rs::bitvec::BitVec;
//! use cnf_rs::engine::Engine;
//! use num_bigint::BigUint;
//!
//! let engine = Engine::new().unwrap();
//! let x = BitVec::variable(&engine, 4).unwrap();
//! let five = BitVec::from_unsigned(&engine, &BigUint::from(5u32), 4).unwrap();
//! x.comp_gt(&five).unwrap().ensure_all().unwrap();
//! x.comp_lt(&BitVec::from_unsigned(&engine, &BigUint::from(7u32), 4).unwrap())
//!     .unwrap()
//!     .ensure_all()
//!     .unwrap();
//!
//! assert!(engine.solve().unwrap());
//! let value = BitVec::decode_unsigned(&x.solution().unwrap()).unwrap();
//! assert_eq!(value, BigUint::from(6u32));
//! ```

use std::fmt::{Debug, Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Index, Not};

use num_bigint::BigUint;

use crate::engine::{reconcile, Engine};
use crate::error::{Error, Result};
use crate::lit::Lit;
use crate::types::Value;
use crate::utils::slice_indices;

#[derive(Clone)]
pub struct BitVec<'e> {
    engine: &'e Engine,
    lits: Vec<Lit>,
}

fn check_len(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::LengthMismatch { left, right });
    }
    Ok(())
}

impl<'e> BitVec<'e> {
    /// Creates a vector of the given literals, checking that each one belongs to `engine`.
    pub fn new(engine: &'e Engine, lits: impl IntoIterator<Item = Lit>) -> Result<Self> {
        let lits: Vec<Lit> = lits.into_iter().collect();
        for &lit in lits.iter() {
            engine.check(lit)?;
        }
        Ok(Self { engine, lits })
    }

    /// Creates a vector of `len` fresh variables.
    pub fn variable(engine: &'e Engine, len: usize) -> Result<Self> {
        let lits = (0..len).map(|_| engine.add_variable()).collect::<Result<Vec<Lit>>>()?;
        Ok(Self { engine, lits })
    }

    /// Creates a constant vector from booleans.
    pub fn lift(engine: &'e Engine, values: &[bool]) -> Self {
        let lits = values.iter().map(|&b| engine.bool_lift(b)).collect();
        Self { engine, lits }
    }

    /// Creates a vector of `len` copies of the same constant.
    pub fn constant(engine: &'e Engine, value: bool, len: usize) -> Self {
        Self {
            engine,
            lits: vec![engine.bool_lift(value); len],
        }
    }

    /// Creates a constant little-endian vector of `len` digits holding `value`.
    ///
    /// Fails with [`Error::LengthMismatch`] if `value` does not fit.
    pub fn from_unsigned(engine: &'e Engine, value: &BigUint, len: usize) -> Result<Self> {
        let bits = value.bits() as usize;
        if bits > len {
            return Err(Error::LengthMismatch { left: bits, right: len });
        }
        let lits = (0..len).map(|i| engine.bool_lift(value.bit(i as u64))).collect();
        Ok(Self { engine, lits })
    }

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Lit> {
        self.lits.get(index).copied()
    }

    pub fn literals(&self) -> &[Lit] {
        &self.lits
    }

    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.lits.iter().copied()
    }

    /// Selects the literals at `start:stop:step`, with negative indices counting from the end.
    ///
    /// # Panics
    ///
    /// Panics if `step == 0`.
    pub fn slice(&self, start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        let lits = slice_indices(self.len(), start, stop, step)
            .into_iter()
            .map(|i| self.lits[i])
            .collect();
        Self {
            engine: self.engine,
            lits,
        }
    }

    fn single(engine: &'e Engine, lit: Lit) -> Self {
        Self { engine, lits: vec![lit] }
    }

    fn zip_with(&self, other: &BitVec<'e>, f: impl Fn(&Engine, Lit, Lit) -> Result<Lit>) -> Result<Self> {
        check_len(self.len(), other.len())?;
        let engine = reconcile(self.engine, other.engine)?;
        let lits = self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| f(engine, a, b))
            .collect::<Result<Vec<Lit>>>()?;
        Ok(Self { engine, lits })
    }

    /// Elementwise negation. Never allocates.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        Self {
            engine: self.engine,
            lits: self.iter().map(|lit| self.engine.bool_not(lit)).collect(),
        }
    }

    pub fn and(&self, other: &BitVec<'e>) -> Result<Self> {
        self.zip_with(other, Engine::bool_and)
    }

    pub fn or(&self, other: &BitVec<'e>) -> Result<Self> {
        self.zip_with(other, Engine::bool_or)
    }

    pub fn xor(&self, other: &BitVec<'e>) -> Result<Self> {
        self.zip_with(other, Engine::bool_xor)
    }

    pub fn equ(&self, other: &BitVec<'e>) -> Result<Self> {
        self.zip_with(other, Engine::bool_equ)
    }

    pub fn imp(&self, other: &BitVec<'e>) -> Result<Self> {
        self.zip_with(other, Engine::bool_imp)
    }

    /// Elementwise if-then-else with `self` as the condition.
    pub fn iff(&self, then: &BitVec<'e>, els: &BitVec<'e>) -> Result<Self> {
        check_len(self.len(), then.len())?;
        check_len(self.len(), els.len())?;
        let engine = reconcile(reconcile(self.engine, then.engine)?, els.engine)?;
        let lits = self
            .iter()
            .zip(then.iter().zip(els.iter()))
            .map(|(c, (t, e))| engine.bool_iff(c, t, e))
            .collect::<Result<Vec<Lit>>>()?;
        Ok(Self { engine, lits })
    }

    fn compare(&self, other: &BitVec<'e>, f: impl Fn(&Engine, &[Lit], &[Lit]) -> Result<Lit>) -> Result<Self> {
        let engine = reconcile(self.engine, other.engine)?;
        let lit = f(engine, &self.lits, &other.lits)?;
        Ok(Self::single(engine, lit))
    }

    pub fn comp_eq(&self, other: &BitVec<'e>) -> Result<Self> {
        self.compare(other, Engine::comp_eq)
    }

    pub fn comp_ne(&self, other: &BitVec<'e>) -> Result<Self> {
        self.compare(other, Engine::comp_ne)
    }

    pub fn comp_le(&self, other: &BitVec<'e>) -> Result<Self> {
        self.compare(other, Engine::comp_le)
    }

    pub fn comp_lt(&self, other: &BitVec<'e>) -> Result<Self> {
        self.compare(other, Engine::comp_lt)
    }

    pub fn comp_ge(&self, other: &BitVec<'e>) -> Result<Self> {
        self.compare(other, Engine::comp_ge)
    }

    pub fn comp_gt(&self, other: &BitVec<'e>) -> Result<Self> {
        self.compare(other, Engine::comp_gt)
    }

    pub fn fold_all(&self) -> Result<Self> {
        Ok(Self::single(self.engine, self.engine.fold_all(self.iter())?))
    }

    pub fn fold_any(&self) -> Result<Self> {
        Ok(Self::single(self.engine, self.engine.fold_any(self.iter())?))
    }

    pub fn fold_amo(&self) -> Result<Self> {
        Ok(Self::single(self.engine, self.engine.fold_amo(self.iter())?))
    }

    pub fn fold_one(&self) -> Result<Self> {
        Ok(Self::single(self.engine, self.engine.fold_one(self.iter())?))
    }

    /// Asserts that all literals are true.
    ///
    /// On a calculator this is a check that fails with [`Error::ConstraintViolated`].
    pub fn ensure_all(&self) -> Result<()> {
        let lit = self.engine.fold_all(self.iter())?;
        self.engine.add_unit(lit)
    }

    /// Asserts that at least one literal is true.
    pub fn ensure_any(&self) -> Result<()> {
        let lit = self.engine.fold_any(self.iter())?;
        self.engine.add_unit(lit)
    }

    /// Asserts that at most one literal is true.
    pub fn ensure_amo(&self) -> Result<()> {
        let lit = self.engine.fold_amo(self.iter())?;
        self.engine.add_unit(lit)
    }

    /// Asserts that exactly one literal is true.
    pub fn ensure_one(&self) -> Result<()> {
        let lit = self.engine.fold_one(self.iter())?;
        self.engine.add_unit(lit)
    }

    /// Values of the literals in the last solution of the engine.
    pub fn solution(&self) -> Result<Vec<Value>> {
        self.iter().map(|lit| self.engine.get_value(lit)).collect()
    }

    /// The last solution as a constant vector bound to `calculator`.
    ///
    /// Unconstrained positions read as `FALSE`.
    pub fn solution_bits<'c>(&self, calculator: &'c Engine) -> Result<BitVec<'c>> {
        let values: Vec<bool> = self.solution()?.into_iter().map(Value::is_true).collect();
        Ok(BitVec::lift(calculator, &values))
    }

    /// Decodes a little-endian solution into an integer.
    ///
    /// Returns `None` if some position is [`Value::Unconstrained`].
    pub fn decode_unsigned(values: &[Value]) -> Option<BigUint> {
        let mut res = BigUint::default();
        for value in values.iter().rev() {
            res <<= 1usize;
            if value.to_bool()? {
                res += 1u32;
            }
        }
        Some(res)
    }
}

impl PartialEq for BitVec<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.engine.same(other.engine) && self.lits == other.lits
    }
}

impl Eq for BitVec<'_> {}

impl Debug for BitVec<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitVec")
            .field("calculator", &self.engine.is_calculator())
            .field("lits", &self.lits)
            .finish()
    }
}

impl Display for BitVec<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, "]")
    }
}

impl Index<usize> for BitVec<'_> {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}

impl<'a> IntoIterator for &'a BitVec<'_> {
    type Item = Lit;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter().copied()
    }
}

impl<'e> Not for &BitVec<'e> {
    type Output = BitVec<'e>;

    fn not(self) -> Self::Output {
        BitVec::not(self)
    }
}

impl<'e> BitAnd<&BitVec<'e>> for &BitVec<'e> {
    type Output = Result<BitVec<'e>>;

    fn bitand(self, rhs: &BitVec<'e>) -> Self::Output {
        self.and(rhs)
    }
}

impl<'e> BitOr<&BitVec<'e>> for &BitVec<'e> {
    type Output = Result<BitVec<'e>>;

    fn bitor(self, rhs: &BitVec<'e>) -> Self::Output {
        self.or(rhs)
    }
}

impl<'e> BitXor<&BitVec<'e>> for &BitVec<'e> {
    type Output = Result<BitVec<'e>>;

    fn bitxor(self, rhs: &BitVec<'e>) -> Self::Output {
        self.xor(rhs)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn lift<'e>(engine: &'e Engine, bits: &str) -> BitVec<'e> {
        let values: Vec<bool> = bits.chars().map(|c| c == '1').collect();
        BitVec::lift(engine, &values)
    }

    #[test]
    fn test_new_validates_literals() {
        let engine = Engine::new().unwrap();
        let x = engine.add_variable().unwrap();
        assert_eq!(BitVec::new(&engine, [x, -x, Lit::TRUE]).unwrap().len(), 3);
        assert!(matches!(
            BitVec::new(&engine, [x, Lit::from_dimacs(9).unwrap()]),
            Err(Error::InvalidLiteral(9))
        ));

        let calc = Engine::calculator();
        assert!(matches!(BitVec::new(&calc, [x]), Err(Error::InvalidCalculatorLiteral(2))));
        assert!(matches!(BitVec::variable(&calc, 3), Err(Error::InvalidCalculatorLiteral(0))));
        assert!(BitVec::variable(&calc, 0).unwrap().is_empty());
    }

    #[test]
    fn test_constant() {
        let engine = Engine::new().unwrap();
        let ones = BitVec::constant(&engine, true, 3);
        assert_eq!(ones.literals(), &[Lit::TRUE; 3]);
        assert!(ones.engine().same(&engine));
        assert!(BitVec::constant(&engine, false, 0).is_empty());
        assert_eq!(engine.num_variables(), 1);

        let calc = Engine::calculator();
        assert_eq!(BitVec::constant(&calc, false, 2), lift(&calc, "00"));
        assert!(BitVec::constant(&calc, true, 4).ensure_all().is_ok());
    }

    #[test]
    fn test_unsigned_conversion() {
        let calc = Engine::calculator();
        let v = BitVec::from_unsigned(&calc, &BigUint::from(6u32), 4).unwrap();
        assert_eq!(v, lift(&calc, "0110"));
        assert_eq!(v.to_string(), "[FALSE, TRUE, TRUE, FALSE]");

        let values = v.solution().unwrap();
        assert_eq!(BitVec::decode_unsigned(&values), Some(BigUint::from(6u32)));
        assert_eq!(BitVec::decode_unsigned(&[]), Some(BigUint::default()));
        assert_eq!(BitVec::decode_unsigned(&[Value::True, Value::Unconstrained]), None);

        assert!(matches!(
            BitVec::from_unsigned(&calc, &BigUint::from(16u32), 4),
            Err(Error::LengthMismatch { left: 5, right: 4 })
        ));
    }

    #[test]
    fn test_slice() {
        let engine = Engine::new().unwrap();
        let v = BitVec::variable(&engine, 5).unwrap();
        let lits = v.literals().to_vec();
        assert_eq!(v.slice(Some(1), Some(3), 1).literals(), &lits[1..3]);
        assert_eq!(v.slice(Some(-2), None, 1).literals(), &lits[3..]);
        assert_eq!(v.slice(None, None, 2).literals(), &[lits[0], lits[2], lits[4]]);
        assert_eq!(v.slice(None, None, -1).literals(), &[lits[4], lits[3], lits[2], lits[1], lits[0]]);
        assert_eq!(v.get(4), Some(lits[4]));
        assert_eq!(v.get(5), None);
        assert_eq!(v[0], lits[0]);
    }

    #[test]
    fn test_elementwise_calculator() {
        let calc = Engine::calculator();
        let a = lift(&calc, "0011");
        let b = lift(&calc, "0101");
        assert_eq!(!&a, lift(&calc, "1100"));
        assert_eq!((&a & &b).unwrap(), lift(&calc, "0001"));
        assert_eq!((&a | &b).unwrap(), lift(&calc, "0111"));
        assert_eq!((&a ^ &b).unwrap(), lift(&calc, "0110"));
        assert_eq!(a.equ(&b).unwrap(), lift(&calc, "1001"));
        assert_eq!(a.imp(&b).unwrap(), lift(&calc, "1101"));

        let c = lift(&calc, "0110");
        assert_eq!(c.iff(&a, &b).unwrap(), lift(&calc, "0011"));
    }

    #[test]
    fn test_length_mismatch() {
        let calc = Engine::calculator();
        let a = lift(&calc, "01");
        let b = lift(&calc, "011");
        assert!(matches!(a.and(&b), Err(Error::LengthMismatch { left: 2, right: 3 })));
        assert!(matches!(a.comp_le(&b), Err(Error::LengthMismatch { left: 2, right: 3 })));
        assert!(matches!(a.iff(&a, &b), Err(Error::LengthMismatch { left: 2, right: 3 })));
    }

    #[test]
    fn test_engine_reconciliation() {
        let calc = Engine::calculator();
        let solver1 = Engine::new().unwrap();
        let solver2 = Engine::new().unwrap();
        let c = lift(&calc, "01");
        let x = BitVec::variable(&solver1, 2).unwrap();
        let y = BitVec::variable(&solver2, 2).unwrap();

        assert!((&c & &x).unwrap().engine().same(&solver1));
        assert!((&x | &c).unwrap().engine().same(&solver1));
        assert!(c.comp_eq(&y).unwrap().engine().same(&solver2));
        assert!(matches!(&x ^ &y, Err(Error::ConflictingEngines)));
        assert!(matches!(x.comp_lt(&y), Err(Error::ConflictingEngines)));
    }

    #[test]
    fn test_ensure_on_calculator() {
        let calc = Engine::calculator();
        assert!(lift(&calc, "0100").ensure_one().is_ok());
        assert!(lift(&calc, "0000").ensure_amo().is_ok());
        assert!(matches!(lift(&calc, "0000").ensure_any(), Err(Error::ConstraintViolated(_))));
        assert!(matches!(lift(&calc, "0110").ensure_amo(), Err(Error::ConstraintViolated(_))));
        assert!(matches!(lift(&calc, "1101").ensure_all(), Err(Error::ConstraintViolated(_))));
    }

    #[test]
    fn test_folds_return_single_literal() {
        let calc = Engine::calculator();
        let v = lift(&calc, "0110");
        assert_eq!(v.fold_any().unwrap(), lift(&calc, "1"));
        assert_eq!(v.fold_all().unwrap(), lift(&calc, "0"));
        assert_eq!(v.fold_amo().unwrap(), lift(&calc, "0"));
        assert_eq!(v.fold_one().unwrap(), lift(&calc, "0"));
        assert_eq!(v.comp_gt(&lift(&calc, "1010")).unwrap(), lift(&calc, "1"));
    }

    #[test]
    fn test_solution_roundtrip() {
        let engine = Engine::new().unwrap();
        let x = BitVec::variable(&engine, 4).unwrap();
        let y = BitVec::variable(&engine, 4).unwrap();
        assert!(matches!(x.solution(), Err(Error::StaleSolutionAccess)));

        x.comp_eq(&y).unwrap().ensure_all().unwrap();
        let eleven = BitVec::from_unsigned(&engine, &BigUint::from(11u32), 4).unwrap();
        y.comp_eq(&eleven).unwrap().ensure_all().unwrap();

        assert!(engine.solve().unwrap());
        assert_eq!(x.solution().unwrap(), y.solution().unwrap());
        assert_eq!(BitVec::decode_unsigned(&x.solution().unwrap()), Some(BigUint::from(11u32)));

        let calc = Engine::calculator();
        let bits = x.solution_bits(&calc).unwrap();
        assert!(bits.engine().is_calculator());
        assert_eq!(bits, lift(&calc, "1101"));
    }

    #[test]
    fn test_solution_bits_unconstrained() {
        let engine = Engine::new().unwrap();
        let x = BitVec::variable(&engine, 2).unwrap();
        engine.add_unit(x[0]).unwrap();
        assert!(engine.solve().unwrap());

        let z = BitVec::variable(&engine, 1).unwrap();
        assert_eq!(z.solution().unwrap(), vec![Value::Unconstrained]);
        assert_eq!(BitVec::decode_unsigned(&z.solution().unwrap()), None);

        let calc = Engine::calculator();
        assert_eq!(z.solution_bits(&calc).unwrap(), lift(&calc, "0"));

        // x[1] was allocated before the solve but never used.
        assert_eq!(x.solution().unwrap(), vec![Value::True, Value::Unconstrained]);
        assert_eq!(x.solution_bits(&calc).unwrap(), lift(&calc, "10"));
    }
}
