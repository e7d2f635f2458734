//! Literals and variables in the DIMACS convention.
//!
//! A literal is a signed non-zero integer: its magnitude is the variable id and
//! its sign is the polarity. Literal `0` is never valid.
use std::fmt::{Display, Formatter};
use std::ops::Neg;

use crate::error::{Error, Result};

/// A variable identifier (1-indexed).
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is the DIMACS clause terminator)
/// - Variable 1 is reserved for the constant [`Lit::TRUE`]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`. Variables must be 1-indexed.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Returns the positive literal of this variable.
    pub fn pos(self) -> Lit {
        Lit(self.0 as i32)
    }

    /// Returns the negative literal of this variable.
    pub fn neg(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A literal: a variable together with its polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(i32);

impl Lit {
    /// The always true literal (variable 1, asserted by every solver engine).
    pub const TRUE: Lit = Lit(1);

    /// The always false literal.
    pub const FALSE: Lit = Lit(-1);

    /// Creates a literal from its DIMACS representation.
    pub fn from_dimacs(value: i32) -> Result<Self> {
        if value == 0 || value == i32::MIN {
            return Err(Error::InvalidLiteral(value));
        }
        Ok(Self(value))
    }

    /// Returns the constant literal for the given boolean.
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Return the DIMACS representation of the literal.
    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    /// Returns `true` for [`Lit::TRUE`] and [`Lit::FALSE`].
    pub const fn is_const(self) -> bool {
        self.0 == 1 || self.0 == -1
    }

    /// Returns the boolean value of a constant literal, `None` otherwise.
    pub const fn as_bool(self) -> Option<bool> {
        match self.0 {
            1 => Some(true),
            -1 => Some(false),
            _ => None,
        }
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_bool() {
            Some(true) => write!(f, "TRUE"),
            Some(false) => write!(f, "FALSE"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.0
    }
}

impl TryFrom<i32> for Lit {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Lit::from_dimacs(value)
    }
}
