//! Reads cases from stdin and prints the minimum overtakes of each.
//!
//! Logs go to stderr. The filter comes from `OVERTAKE_LOG`, then
//! `RUST_LOG`, and defaults to `warn`.

use std::env;

use anyhow::Context;
use io::ByteSource;
use solve::Solver;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let directives = env::var("OVERTAKE_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut source = ByteSource::new(std::io::stdin().lock());
    let mut solver = Solver::new();
    let res = solver.run(&mut source);

    // completed cases are printed even if a later one failed
    let mut stdout = std::io::stdout().lock();
    solver.flush(&mut stdout).context("failed to write answers")?;

    if let Err(e) = &res {
        error!(error = %e, cases = solver.cases(), "aborting");
    }
    res.map(|_| ()).context("failed to solve input")
}
