//! The incremental SAT solver behind a solver-mode [`Engine`][crate::engine::Engine].
//!
//! The engine talks to the solver only through the [`Backend`] trait, using raw
//! DIMACS integers. [`CadicalBackend`] is the default implementation, built on the
//! [CaDiCaL](https://github.com/arminbiere/cadical) solver.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{Error, Result};
use crate::types::Value;

/// Outcome of a single solver call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// Terminated (time limit, interrupt, resource exhaustion) without a verdict.
    Aborted,
}

/// Pre-defined configurations of the backend's internal options.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Profile {
    /// Default advanced internal options.
    #[default]
    Default,
    /// All internal preprocessing disabled.
    Plain,
    /// Tuned for satisfiable instances.
    Sat,
    /// Tuned for unsatisfiable instances.
    Unsat,
}

impl Profile {
    pub const ALL: [Profile; 4] = [Profile::Default, Profile::Plain, Profile::Sat, Profile::Unsat];

    pub fn name(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Plain => "plain",
            Profile::Sat => "sat",
            Profile::Unsat => "unsat",
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::Backend(format!("unknown profile '{}'", s)))
    }
}

/// Resource limits applied to every solve of an engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Limits {
    /// Wall-clock limit for one solve call.
    pub time_limit: Option<Duration>,
}

impl Limits {
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
        }
    }
}

/// Handle for aborting a running solve, possibly from another thread.
///
/// An interrupt is consumed by the solve call it aborts.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle(Arc<AtomicBool>);

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination of the current (or next) solve.
    pub fn interrupt(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_interrupted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Interface of an incremental SAT solver.
///
/// Literals are non-zero DIMACS integers. Variables are allocated by the caller;
/// the backend must accept any variable on first use.
pub trait Backend: Send {
    /// Name and version of the underlying solver.
    fn signature(&self) -> String;

    /// Adds a clause. The empty clause makes the formula unsatisfiable.
    fn add_clause(&mut self, clause: &[i32]);

    /// Solves the formula under the given assumptions.
    fn solve_with(
        &mut self,
        assumptions: &[i32],
        limits: &Limits,
        interrupt: &InterruptHandle,
    ) -> SolveResult;

    /// Returns the value of the literal in the last solution.
    /// Valid only right after a solve returned [`SolveResult::Sat`].
    fn value(&self, lit: i32) -> Value;

    /// Number of clauses known to the solver.
    fn num_clauses(&self) -> usize;
}

/// Terminate callback: polls the interrupt flag and the deadline.
struct Terminator {
    interrupt: InterruptHandle,
    deadline: Option<Instant>,
}

impl cadical::Callbacks for Terminator {
    fn terminate(&mut self) -> bool {
        if self.interrupt.is_interrupted() {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// The CaDiCaL incremental SAT solver.
pub struct CadicalBackend {
    solver: cadical::Solver<Terminator>,
}

impl CadicalBackend {
    pub fn new(profile: Profile) -> Result<Self> {
        debug!("CadicalBackend::new(profile = {})", profile);
        let solver: cadical::Solver<Terminator> =
            cadical::Solver::with_config(profile.name()).map_err(|e| Error::Backend(e.msg))?;
        Ok(Self { solver })
    }
}

impl Backend for CadicalBackend {
    fn signature(&self) -> String {
        self.solver.signature().to_string()
    }

    fn add_clause(&mut self, clause: &[i32]) {
        self.solver.add_clause(clause.iter().copied());
    }

    fn solve_with(
        &mut self,
        assumptions: &[i32],
        limits: &Limits,
        interrupt: &InterruptHandle,
    ) -> SolveResult {
        let terminator = Terminator {
            interrupt: interrupt.clone(),
            deadline: limits.time_limit.map(|limit| Instant::now() + limit),
        };
        self.solver.set_callbacks(Some(terminator));
        match self.solver.solve_with(assumptions.iter().copied()) {
            Some(true) => SolveResult::Sat,
            Some(false) => SolveResult::Unsat,
            None => SolveResult::Aborted,
        }
    }

    fn value(&self, lit: i32) -> Value {
        self.solver.value(lit).into()
    }

    fn num_clauses(&self) -> usize {
        self.solver.num_clauses()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_profile_names() {
        for profile in Profile::ALL {
            assert_eq!(profile.name().parse::<Profile>().unwrap(), profile);
        }
        assert_eq!(Profile::default(), Profile::Default);
        assert!("fast".parse::<Profile>().is_err());
    }

    #[test]
    fn test_all_profiles_construct() {
        for profile in Profile::ALL {
            let backend = CadicalBackend::new(profile).unwrap();
            assert!(backend.signature().starts_with("cadical"));
        }
    }

    #[test]
    fn test_cadical_solve() {
        let mut backend = CadicalBackend::new(Profile::Default).unwrap();
        let limits = Limits::default();
        let interrupt = InterruptHandle::new();

        // (x1 ∨ x2) ∧ (¬x1 ∨ x3) ∧ ¬x3
        backend.add_clause(&[1, 2]);
        assert!(backend.num_clauses() >= 1);
        backend.add_clause(&[-1, 3]);
        backend.add_clause(&[-3]);
        assert_eq!(backend.solve_with(&[], &limits, &interrupt), SolveResult::Sat);
        assert_eq!(backend.value(1), Value::False);
        assert_eq!(backend.value(2), Value::True);
        assert_eq!(backend.value(-3), Value::True);

        assert_eq!(backend.solve_with(&[1], &limits, &interrupt), SolveResult::Unsat);
    }

    #[test]
    fn test_interrupt_handle() {
        let handle = InterruptHandle::new();
        let other = handle.clone();
        assert!(!handle.is_interrupted());
        other.interrupt();
        assert!(handle.is_interrupted());
        handle.clear();
        assert!(!other.is_interrupted());
    }
}
