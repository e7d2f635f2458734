//! # cnf-rs: Boolean literal algebra over an incremental SAT solver
//!
//! **`cnf-rs`** lets you write boolean constraints as ordinary expressions over literals and
//! literal vectors, and turns them into CNF clauses for a SAT solver via the Tseitin encoding.
//!
//! ## Two Kinds of Engines
//!
//! Every operation goes through an [`Engine`][crate::engine::Engine]:
//!
//! - A **solver engine** allocates variables and emits clauses to a backend
//!   (CaDiCaL by default). After [`solve`][crate::engine::Engine::solve], the values of all
//!   literals can be read back.
//! - A **calculator** only knows the constants [`Lit::TRUE`][crate::lit::Lit::TRUE] and
//!   [`Lit::FALSE`][crate::lit::Lit::FALSE] and evaluates every operation directly.
//!
//! Both expose the same operations, so the same encoding code can build a formula or check a
//! concrete solution.
//!
//! ## Basic Usage
//!
//! ```rust
//! use cnf_rs::engine::Engine;
//! use cnf_rs::types::Value;
//!
//! // 1. Create a solver engine
//! let engine = Engine::new().unwrap();
//!
//! // 2. Allocate variables
//! let x = engine.add_variable().unwrap();
//! let y = engine.add_variable().unwrap();
//!
//! // 3. Build f = x AND (NOT y) and assert it
//! let f = engine.bool_and(x, engine.bool_not(y)).unwrap();
//! engine.add_unit(f).unwrap();
//!
//! // 4. Solve and read the model
//! assert!(engine.solve().unwrap());
//! assert_eq!(engine.get_value(x).unwrap(), Value::True);
//! assert_eq!(engine.get_value(y).unwrap(), Value::False);
//! ```
//!
//! ## Core Components
//!
//! - **[`lit`]**: Literals and variables in the DIMACS convention.
//! - **[`engine`]**: The [`Engine`][crate::engine::Engine], solving and model access.
//! - **[`gates`]**, **[`fold`]**, **[`compare`]**: Gate, cardinality and comparator encodings.
//! - **[`bitvec`]**: Literal vectors with elementwise operations and integer conversions.
//! - **[`backend`]**: The boundary to the SAT solver.
//! - **[`dimacs`]**: Export of the clause set.

pub mod backend;
pub mod bitvec;
pub mod compare;
pub mod dimacs;
pub mod engine;
pub mod error;
pub mod fold;
pub mod gates;
pub mod lit;
pub mod types;
pub mod utils;

pub use bitvec::BitVec;
pub use engine::{reconcile, Engine};
pub use error::{Error, Result};
pub use lit::{Lit, Var};
pub use types::{Status, Value};
