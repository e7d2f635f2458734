//! Value types reported by the solver.
use std::fmt;

/// The value of a literal in a solution.
///
/// A literal whose value does not influence the found solution is
/// [`Value::Unconstrained`], which is distinct from both `True` and `False`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Value {
    False,
    True,
    Unconstrained,
}

impl Value {
    /// Returns the boolean value, or `None` for [`Value::Unconstrained`].
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Value::False => Some(false),
            Value::True => Some(true),
            Value::Unconstrained => None,
        }
    }

    pub fn is_true(self) -> bool {
        self == Value::True
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<Option<bool>> for Value {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(b) => b.into(),
            None => Value::Unconstrained,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::False => write!(f, "0"),
            Value::True => write!(f, "1"),
            Value::Unconstrained => write!(f, "?"),
        }
    }
}

/// The verdict of the last completed solve.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Status {
    /// No solve has completed (or the last one was aborted).
    #[default]
    Unknown,
    Sat,
    Unsat,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unknown => write!(f, "UNKNOWN"),
            Status::Sat => write!(f, "SAT"),
            Status::Unsat => write!(f, "UNSAT"),
        }
    }
}
