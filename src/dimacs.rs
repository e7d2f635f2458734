//! Export of the stored clause set in DIMACS CNF format.
//!
//! ```text
//! p cnf <variables> <clauses>
//! 1 0
//! -2 3 0
//! ...
//! ```
//!
//! The unit clause of the constant `TRUE` comes first, so the dump is
//! self-contained and can be fed to any external solver.

use std::io::Write;

use log::debug;

use crate::engine::Engine;
use crate::error::Result;

impl Engine {
    /// Writes all clauses emitted so far in DIMACS CNF format.
    ///
    /// A calculator has no clauses and writes the header `p cnf 0 0`.
    pub fn write_dimacs<W: Write>(&self, mut writer: W) -> Result<()> {
        debug!("write_dimacs()");
        let res = self.with_state(|state| -> Result<()> {
            writeln!(writer, "p cnf {} {}", state.num_vars(), state.num_clauses())?;
            for clause in state.clauses() {
                for lit in clause {
                    write!(writer, "{} ", lit)?;
                }
                writeln!(writer, "0")?;
            }
            Ok(())
        });
        match res {
            Some(res) => res,
            None => {
                writeln!(writer, "p cnf 0 0")?;
                Ok(())
            }
        }
    }

    /// Returns the DIMACS CNF dump as a string.
    pub fn to_dimacs(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_dimacs(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::lit::Lit;

    #[test]
    fn test_dimacs_header_and_clauses() {
        let engine = Engine::new().unwrap();
        let x = engine.add_variable().unwrap();
        let y = engine.add_variable().unwrap();
        engine.add_clause([-x, y]).unwrap();
        engine.add_clause(Vec::<Lit>::new()).unwrap();

        let dimacs = engine.to_dimacs().unwrap();
        assert_eq!(dimacs, "p cnf 3 3\n1 0\n-2 3 0\n0\n");
    }

    #[test]
    fn test_dimacs_gate_clauses() {
        let engine = Engine::new().unwrap();
        let x = engine.add_variable().unwrap();
        let y = engine.add_variable().unwrap();
        let z = engine.bool_or(x, y).unwrap();
        assert_eq!(z.get(), 4);

        let dimacs = engine.to_dimacs().unwrap();
        let lines: Vec<&str> = dimacs.lines().collect();
        assert_eq!(lines[0], "p cnf 4 4");
        assert_eq!(&lines[1..], ["1 0", "-2 4 0", "-3 4 0", "2 3 -4 0"]);
    }

    #[test]
    fn test_dimacs_calculator() {
        let calc = Engine::calculator();
        assert_eq!(calc.to_dimacs().unwrap(), "p cnf 0 0\n");
    }
}
