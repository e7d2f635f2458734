//! The literal algebra engine.
//!
//! An [`Engine`] is either **solver-backed** or a **calculator**:
//!
//! - A solver engine allocates variables, stores the emitted clauses and forwards
//!   them to a [`Backend`]. Derived operations (see the [`gates`][crate::gates],
//!   [`fold`][crate::fold] and [`compare`][crate::compare] modules) introduce one
//!   auxiliary variable per non-trivial gate, defined by its Tseitin clauses.
//! - A calculator has no variables besides the constants. Every literal it sees must
//!   be [`Lit::TRUE`] or [`Lit::FALSE`], and every operation is evaluated directly.
//!
//! Both variants expose the same operations, so encoding code runs unchanged in
//! either mode. The mode is matched once at the entry of each operation.
//!
//! All operations take `&self`: the solver state lives in a [`RefCell`], so an
//! engine can be shared by many [`BitVec`][crate::bitvec::BitVec]s. An engine can
//! be moved to another thread, but not shared between threads.

use std::cell::RefCell;
use std::fmt::Debug;

use log::{debug, info, trace};

use crate::backend::{Backend, CadicalBackend, InterruptHandle, Limits, Profile, SolveResult};
use crate::error::{Error, Result};
use crate::lit::{Lit, Var};
use crate::types::{Status, Value};

pub(crate) enum Mode {
    Solver(RefCell<SolverState>),
    Calculator,
}

pub(crate) struct SolverState {
    backend: Box<dyn Backend>,
    num_vars: u32,
    /// All emitted clauses, each terminated by `0`.
    clauses: Vec<i32>,
    num_clauses: usize,
    status: Status,
    /// Number of variables covered by the current model, `None` if there is no readable model.
    model_vars: Option<u32>,
    /// Indexed by variable id: whether the variable occurred in a clause or an assumption.
    occurs: Vec<bool>,
    limits: Limits,
    interrupt: InterruptHandle,
}

impl SolverState {
    fn new(backend: Box<dyn Backend>) -> Self {
        let mut state = Self {
            backend,
            num_vars: 1,
            clauses: Vec::new(),
            num_clauses: 0,
            status: Status::Unknown,
            model_vars: None,
            occurs: vec![false; 2],
            limits: Limits::default(),
            interrupt: InterruptHandle::new(),
        };
        // Variable 1 is the constant TRUE.
        state.emit(&[Lit::TRUE]);
        state
    }

    pub(crate) fn check(&self, lit: Lit) -> Result<()> {
        if lit.var().id() > self.num_vars {
            return Err(Error::InvalidLiteral(lit.get()));
        }
        Ok(())
    }

    pub(crate) fn new_var(&mut self) -> Lit {
        self.num_vars += 1;
        self.occurs.push(false);
        Var::new(self.num_vars).pos()
    }

    pub(crate) fn emit(&mut self, clause: &[Lit]) {
        trace!("emit({:?})", clause);
        let start = self.clauses.len();
        for lit in clause {
            self.occurs[lit.var().id() as usize] = true;
        }
        self.clauses.extend(clause.iter().map(|lit| lit.get()));
        self.backend.add_clause(&self.clauses[start..]);
        self.clauses.push(0);
        self.num_clauses += 1;
        self.model_vars = None;
    }

    pub(crate) fn clauses(&self) -> impl Iterator<Item = &[i32]> {
        self.clauses.split(|&x| x == 0).take(self.num_clauses)
    }

    pub(crate) fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub(crate) fn num_clauses(&self) -> usize {
        self.num_clauses
    }
}

/// Returns the value of a calculator literal.
pub(crate) fn calc_value(lit: Lit) -> Result<bool> {
    if !lit.is_const() {
        return Err(Error::InvalidCalculatorLiteral(lit.get()));
    }
    Ok(lit == Lit::TRUE)
}

pub struct Engine {
    pub(crate) mode: Mode,
}

impl Engine {
    /// Creates a solver engine over CaDiCaL with the default profile.
    ///
    /// The literal [`Lit::TRUE`] is asserted right away.
    pub fn new() -> Result<Self> {
        Engine::with_profile(Profile::Default)
    }

    /// Creates a solver engine over CaDiCaL with the given option profile.
    pub fn with_profile(profile: Profile) -> Result<Self> {
        let backend = CadicalBackend::new(profile)?;
        Ok(Engine::with_backend(Box::new(backend)))
    }

    /// Creates a solver engine over an arbitrary backend.
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        debug!("Engine::with_backend(signature = {})", backend.signature());
        Self {
            mode: Mode::Solver(RefCell::new(SolverState::new(backend))),
        }
    }

    /// Creates a calculator engine.
    pub const fn calculator() -> Self {
        Self {
            mode: Mode::Calculator,
        }
    }

    pub fn is_calculator(&self) -> bool {
        matches!(self.mode, Mode::Calculator)
    }

    /// Returns `true` if both references point to the same engine.
    pub fn same(&self, other: &Engine) -> bool {
        std::ptr::eq(self, other)
    }

    /// Name and version of the backend.
    pub fn signature(&self) -> String {
        match &self.mode {
            Mode::Solver(state) => state.borrow().backend.signature(),
            Mode::Calculator => "calculator".to_string(),
        }
    }

    /// Number of allocated variables, including the constant variable.
    pub fn num_variables(&self) -> usize {
        match &self.mode {
            Mode::Solver(state) => state.borrow().num_vars() as usize,
            Mode::Calculator => 1,
        }
    }

    /// Number of emitted clauses, including the unit clause of [`Lit::TRUE`].
    pub fn num_clauses(&self) -> usize {
        match &self.mode {
            Mode::Solver(state) => state.borrow().num_clauses(),
            Mode::Calculator => 0,
        }
    }

    /// Checks that the literal belongs to this engine.
    pub fn check(&self, lit: Lit) -> Result<()> {
        match &self.mode {
            Mode::Solver(state) => state.borrow().check(lit),
            Mode::Calculator => calc_value(lit).map(|_| ()),
        }
    }

    /// Allocates a fresh variable and returns its positive literal.
    pub fn add_variable(&self) -> Result<Lit> {
        match &self.mode {
            Mode::Solver(state) => {
                let lit = state.borrow_mut().new_var();
                debug!("add_variable() -> {}", lit);
                Ok(lit)
            }
            Mode::Calculator => Err(Error::InvalidCalculatorLiteral(0)),
        }
    }

    /// Adds a clause.
    ///
    /// A calculator evaluates the clause instead and fails with
    /// [`Error::ConstraintViolated`] if it is false.
    pub fn add_clause(&self, lits: impl IntoIterator<Item = Lit>) -> Result<()> {
        match &self.mode {
            Mode::Solver(state) => {
                let clause: Vec<Lit> = lits.into_iter().collect();
                debug!("add_clause({:?})", clause);
                let mut state = state.borrow_mut();
                for &lit in clause.iter() {
                    state.check(lit)?;
                }
                state.emit(&clause);
                Ok(())
            }
            Mode::Calculator => {
                let mut value = false;
                for lit in lits {
                    value |= calc_value(lit)?;
                }
                if value {
                    Ok(())
                } else {
                    Err(Error::ConstraintViolated("clause is false"))
                }
            }
        }
    }

    /// Asserts the literal as a unit clause.
    pub fn add_unit(&self, lit: Lit) -> Result<()> {
        self.add_clause([lit])
    }

    pub fn limits(&self) -> Limits {
        match &self.mode {
            Mode::Solver(state) => state.borrow().limits,
            Mode::Calculator => Limits::default(),
        }
    }

    /// Sets the resource limits used by the following solves.
    pub fn set_limits(&self, limits: Limits) {
        if let Mode::Solver(state) = &self.mode {
            state.borrow_mut().limits = limits;
        }
    }

    /// Returns a handle that aborts the running (or next) solve of this engine.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        match &self.mode {
            Mode::Solver(state) => state.borrow().interrupt.clone(),
            Mode::Calculator => InterruptHandle::new(),
        }
    }

    /// Solves the formula defined by the added clauses.
    ///
    /// Returns `Ok(true)` if satisfiable, `Ok(false)` if unsatisfiable, and
    /// [`Error::SolveAborted`] if the backend gave up without a verdict.
    pub fn solve(&self) -> Result<bool> {
        self.solve_with(&[])
    }

    /// Solves the formula under the given assumptions.
    pub fn solve_with(&self, assumptions: &[Lit]) -> Result<bool> {
        debug!("solve_with(assumptions = {:?})", assumptions);
        match &self.mode {
            Mode::Solver(state) => {
                let mut state = state.borrow_mut();
                for &lit in assumptions {
                    state.check(lit)?;
                }
                for &lit in assumptions {
                    state.occurs[lit.var().id() as usize] = true;
                }

                let result = if state.interrupt.is_interrupted() {
                    SolveResult::Aborted
                } else {
                    let assumptions: Vec<i32> = assumptions.iter().map(|lit| lit.get()).collect();
                    let SolverState {
                        backend,
                        limits,
                        interrupt,
                        ..
                    } = &mut *state;
                    backend.solve_with(&assumptions, limits, interrupt)
                };
                info!(
                    "solve: {:?} (variables = {}, clauses = {})",
                    result, state.num_vars, state.num_clauses
                );

                match result {
                    SolveResult::Sat => {
                        state.status = Status::Sat;
                        state.model_vars = Some(state.num_vars);
                        Ok(true)
                    }
                    SolveResult::Unsat => {
                        state.status = Status::Unsat;
                        state.model_vars = None;
                        Ok(false)
                    }
                    SolveResult::Aborted => {
                        state.interrupt.clear();
                        state.status = Status::Unknown;
                        state.model_vars = None;
                        Err(Error::SolveAborted)
                    }
                }
            }
            Mode::Calculator => {
                for &lit in assumptions {
                    if !calc_value(lit)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// The verdict of the last completed solve. A calculator is always [`Status::Sat`].
    pub fn status(&self) -> Status {
        match &self.mode {
            Mode::Solver(state) => state.borrow().status,
            Mode::Calculator => Status::Sat,
        }
    }

    /// Returns the value of the literal in the last solution.
    ///
    /// Fails with [`Error::StaleSolutionAccess`] unless the last solve was satisfiable
    /// and no clause was added since. Variables that never occurred in a clause or an
    /// assumption (in particular those allocated after that solve) are
    /// [`Value::Unconstrained`].
    pub fn get_value(&self, lit: Lit) -> Result<Value> {
        match &self.mode {
            Mode::Solver(state) => {
                let state = state.borrow();
                state.check(lit)?;
                match state.model_vars {
                    None => Err(Error::StaleSolutionAccess),
                    Some(n) if lit.var().id() > n => Ok(Value::Unconstrained),
                    Some(_) if !state.occurs[lit.var().id() as usize] => Ok(Value::Unconstrained),
                    Some(_) => Ok(state.backend.value(lit.get())),
                }
            }
            Mode::Calculator => calc_value(lit).map(Value::from),
        }
    }

    /// Runs `f` on the solver state after validating the literals, or returns `None`
    /// for a calculator.
    pub(crate) fn with_solver<T>(
        &self,
        lits: impl IntoIterator<Item = Lit>,
        f: impl FnOnce(&mut SolverState) -> T,
    ) -> Option<Result<T>> {
        match &self.mode {
            Mode::Solver(state) => {
                let mut state = state.borrow_mut();
                for lit in lits {
                    if let Err(e) = state.check(lit) {
                        return Some(Err(e));
                    }
                }
                Some(Ok(f(&mut state)))
            }
            Mode::Calculator => None,
        }
    }

    pub(crate) fn with_state<T>(&self, f: impl FnOnce(&SolverState) -> T) -> Option<T> {
        match &self.mode {
            Mode::Solver(state) => Some(f(&state.borrow())),
            Mode::Calculator => None,
        }
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.mode {
            Mode::Solver(state) => {
                let state = state.borrow();
                f.debug_struct("Engine")
                    .field("num_vars", &state.num_vars)
                    .field("num_clauses", &state.num_clauses)
                    .field("status", &state.status)
                    .finish()
            }
            Mode::Calculator => f.debug_struct("Engine").field("calculator", &true).finish(),
        }
    }
}

/// Picks the engine that can represent operands from both `a` and `b`.
///
/// A calculator yields to the other engine, since its constants are valid in
/// every engine. Two distinct solver engines cannot be combined.
pub fn reconcile<'e>(a: &'e Engine, b: &'e Engine) -> Result<&'e Engine> {
    if a.same(b) || b.is_calculator() {
        Ok(a)
    } else if a.is_calculator() {
        Ok(b)
    } else {
        Err(Error::ConflictingEngines)
    }
}
