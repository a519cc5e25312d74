//! CLI entry point for the two-proportion sample-size calculator

use clap::Parser;
use samplesize::io::cli::{Cli, SizingRun, init_tracing};

fn main() -> samplesize::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = SizingRun::new(cli)?.run()?;
    emit(&report);
    Ok(())
}

// The report is the program's output
#[allow(clippy::print_stdout)]
fn emit(report: &str) {
    print!("{report}");
}
