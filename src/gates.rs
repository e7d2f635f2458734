//! Boolean gates over literals.
//!
//! Each gate first tries to simplify: constant operands, equal operands and
//! complementary operands never allocate a variable. Otherwise a fresh variable `z`
//! is allocated and defined by the complete Tseitin clause set of `z ⇔ op(inputs)`.
//!
//! | Gate | Clauses |
//! |------|---------|
//! | OR   | `(¬a ∨ z) (¬b ∨ z) (a ∨ b ∨ ¬z)` |
//! | AND  | OR by De Morgan: `(a ∨ ¬z) (b ∨ ¬z) (¬a ∨ ¬b ∨ z)` |
//! | XOR  | `(¬a ∨ b ∨ z) (a ∨ ¬b ∨ z) (a ∨ b ∨ ¬z) (¬a ∨ ¬b ∨ ¬z)` |
//! | MAJ  | three clauses per polarity of `z` |
//! | ITE  | `(¬c ∨ ¬t ∨ z) (¬c ∨ t ∨ ¬z) (c ∨ ¬e ∨ z) (c ∨ e ∨ ¬z)` |

use log::{debug, trace};

use crate::engine::{calc_value, Engine, SolverState};
use crate::error::Result;
use crate::lit::Lit;

const T: Lit = Lit::TRUE;
const F: Lit = Lit::FALSE;

impl SolverState {
    pub(crate) fn or(&mut self, a: Lit, b: Lit) -> Lit {
        if a == T || b == T || a == -b {
            trace!("or({},{}) => 1", a, b);
            T
        } else if a == F || a == b {
            b
        } else if b == F {
            a
        } else {
            let z = self.new_var();
            self.emit(&[-a, z]);
            self.emit(&[-b, z]);
            self.emit(&[a, b, -z]);
            z
        }
    }

    pub(crate) fn and(&mut self, a: Lit, b: Lit) -> Lit {
        -self.or(-a, -b)
    }

    pub(crate) fn imp(&mut self, a: Lit, b: Lit) -> Lit {
        self.or(-a, b)
    }

    pub(crate) fn xor(&mut self, a: Lit, b: Lit) -> Lit {
        if a == F {
            b
        } else if a == T {
            -b
        } else if b == F {
            a
        } else if b == T {
            -a
        } else if a == b {
            F
        } else if a == -b {
            T
        } else {
            let z = self.new_var();
            self.emit(&[-a, b, z]);
            self.emit(&[a, -b, z]);
            self.emit(&[a, b, -z]);
            self.emit(&[-a, -b, -z]);
            z
        }
    }

    pub(crate) fn equ(&mut self, a: Lit, b: Lit) -> Lit {
        self.xor(-a, b)
    }

    pub(crate) fn maj(&mut self, a: Lit, b: Lit, c: Lit) -> Lit {
        if a == b || a == c || b == -c {
            a
        } else if b == c || a == -c {
            b
        } else if a == -b {
            c
        } else if a == F {
            self.and(b, c)
        } else if a == T {
            self.or(b, c)
        } else if b == F {
            self.and(a, c)
        } else if b == T {
            self.or(a, c)
        } else if c == F {
            self.and(a, b)
        } else if c == T {
            self.or(a, b)
        } else {
            let z = self.new_var();
            self.emit(&[a, b, -z]);
            self.emit(&[a, c, -z]);
            self.emit(&[b, c, -z]);
            self.emit(&[-a, -b, z]);
            self.emit(&[-a, -c, z]);
            self.emit(&[-b, -c, z]);
            z
        }
    }

    pub(crate) fn ite(&mut self, c: Lit, t: Lit, e: Lit) -> Lit {
        if t == e || c == T {
            t
        } else if c == F {
            e
        } else if t == -e {
            self.xor(c, e)
        } else if c == t || t == T {
            self.or(c, e)
        } else if c == -t || t == F {
            self.and(-c, e)
        } else if c == -e || e == T {
            self.or(-c, t)
        } else if c == e || e == F {
            self.and(c, t)
        } else {
            let z = self.new_var();
            self.emit(&[-c, -t, z]);
            self.emit(&[-c, t, -z]);
            self.emit(&[c, -e, z]);
            self.emit(&[c, e, -z]);
            z
        }
    }
}

impl Engine {
    /// Returns the negated literal.
    pub fn bool_not(&self, lit: Lit) -> Lit {
        -lit
    }

    /// Returns the always true or always false literal.
    pub fn bool_lift(&self, value: bool) -> Lit {
        Lit::from_bool(value)
    }

    /// Returns the disjunction of two literals.
    pub fn bool_or(&self, a: Lit, b: Lit) -> Result<Lit> {
        debug!("bool_or(a = {}, b = {})", a, b);
        match self.with_solver([a, b], |s| s.or(a, b)) {
            Some(res) => res,
            None => {
                let (a, b) = (calc_value(a)?, calc_value(b)?);
                Ok(Lit::from_bool(a || b))
            }
        }
    }

    /// Returns the conjunction of two literals.
    pub fn bool_and(&self, a: Lit, b: Lit) -> Result<Lit> {
        debug!("bool_and(a = {}, b = {})", a, b);
        match self.with_solver([a, b], |s| s.and(a, b)) {
            Some(res) => res,
            None => {
                let (a, b) = (calc_value(a)?, calc_value(b)?);
                Ok(Lit::from_bool(a && b))
            }
        }
    }

    /// Returns the implication `a → b`.
    pub fn bool_imp(&self, a: Lit, b: Lit) -> Result<Lit> {
        debug!("bool_imp(a = {}, b = {})", a, b);
        match self.with_solver([a, b], |s| s.imp(a, b)) {
            Some(res) => res,
            None => {
                let (a, b) = (calc_value(a)?, calc_value(b)?);
                Ok(Lit::from_bool(!a || b))
            }
        }
    }

    /// Returns the exclusive or of two literals.
    pub fn bool_xor(&self, a: Lit, b: Lit) -> Result<Lit> {
        debug!("bool_xor(a = {}, b = {})", a, b);
        match self.with_solver([a, b], |s| s.xor(a, b)) {
            Some(res) => res,
            None => {
                let (a, b) = (calc_value(a)?, calc_value(b)?);
                Ok(Lit::from_bool(a ^ b))
            }
        }
    }

    /// Returns the equivalence of two literals.
    pub fn bool_equ(&self, a: Lit, b: Lit) -> Result<Lit> {
        debug!("bool_equ(a = {}, b = {})", a, b);
        match self.with_solver([a, b], |s| s.equ(a, b)) {
            Some(res) => res,
            None => {
                let (a, b) = (calc_value(a)?, calc_value(b)?);
                Ok(Lit::from_bool(a == b))
            }
        }
    }

    /// Returns the majority of three literals.
    pub fn bool_maj(&self, a: Lit, b: Lit, c: Lit) -> Result<Lit> {
        debug!("bool_maj(a = {}, b = {}, c = {})", a, b, c);
        match self.with_solver([a, b, c], |s| s.maj(a, b, c)) {
            Some(res) => res,
            None => {
                let (a, b, c) = (calc_value(a)?, calc_value(b)?, calc_value(c)?);
                Ok(Lit::from_bool((a as u8 + b as u8 + c as u8) >= 2))
            }
        }
    }

    /// Returns `then` if `cond` is true, otherwise `els`.
    pub fn bool_iff(&self, cond: Lit, then: Lit, els: Lit) -> Result<Lit> {
        debug!("bool_iff(cond = {}, then = {}, else = {})", cond, then, els);
        match self.with_solver([cond, then, els], |s| s.ite(cond, then, els)) {
            Some(res) => res,
            None => {
                let (c, t, e) = (calc_value(cond)?, calc_value(then)?, calc_value(els)?);
                Ok(Lit::from_bool(if c { t } else { e }))
            }
        }
    }
}
