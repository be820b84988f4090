use std::{io, process::ExitCode};

use phi_sweep::{report, run_sweep, CanteraPhase, SweepConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the result lines.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = SweepConfig::default();
    let mut out = io::stdout().lock();

    let result = run_sweep(CanteraPhase::from_file, config, &mut out);
    report(result, &mut out)
}
