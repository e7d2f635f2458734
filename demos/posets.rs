use std::time::Duration;

use clap::Parser;
use log::info;

use cnf_rs::backend::{Limits, Profile};
use cnf_rs::{BitVec, Engine, Lit, Value};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of elements.
    #[arg(value_name = "INT", default_value = "4")]
    n: usize,

    /// Solver option profile.
    #[clap(long, value_name = "PROFILE", default_value = "default")]
    profile: Profile,

    /// Time limit per solve, in seconds.
    #[clap(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Write the final CNF to this file.
    #[clap(long, value_name = "FILE")]
    dimacs: Option<std::path::PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let engine = Engine::with_profile(args.profile)?;
    if let Some(secs) = args.timeout {
        engine.set_limits(Limits::with_time_limit(Duration::from_secs(secs)));
    }
    println!("engine = {:?} ({})", engine, engine.signature());

    // Encode partial orders on n labeled elements:
    // - reflexive: x <= x
    // - antisymmetric: x <= y and y <= x imply x = y
    // - transitive: x <= y and y <= z imply x <= z
    let n = args.n;
    println!("Encoding posets with n = {}", n);
    let table = BitVec::variable(&engine, n * n)?;
    let rel = |i: usize, j: usize| table[i * n + j];

    let diag = BitVec::new(&engine, (0..n).map(|i| rel(i, i)))?;
    diag.ensure_all()?;

    for i in 0..n {
        for j in (i + 1)..n {
            engine.add_clause([-rel(i, j), -rel(j, i)])?;
        }
    }

    for i in 0..n {
        for k in 0..n {
            let row = BitVec::new(&engine, (0..n).map(|j| rel(i, j)))?;
            let col = BitVec::new(&engine, (0..n).map(|j| rel(j, k)))?;
            let composed = (&row & &col)?.fold_any()?;
            engine.add_clause([-composed[0], rel(i, k)])?;
        }
    }
    info!(
        "Encoded with {} variables and {} clauses",
        engine.num_variables(),
        engine.num_clauses()
    );

    let mut count = 0usize;
    while engine.solve()? {
        count += 1;
        let block: Vec<Lit> = table
            .iter()
            .zip(table.solution()?)
            .map(|(lit, value)| if value == Value::True { -lit } else { lit })
            .collect();
        engine.add_clause(block)?;
    }
    println!("Found {} posets on {} labeled elements", count, n);

    if let Some(path) = &args.dimacs {
        let file = std::fs::File::create(path)?;
        engine.write_dimacs(std::io::BufWriter::new(file))?;
        println!("Wrote CNF to {}", path.display());
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
