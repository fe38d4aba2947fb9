#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use pyty_cli::args::{CliArgs, OutputFormat};
use pyty_cli::{driver, reporter::Reporter};

const EXIT_SUCCESS: i32 = 0;
/// At least one query disagreed with its `expect`.
const EXIT_EXPECTATION_FAILED: i32 = 1;

fn main() -> Result<()> {
    // Only active when PYTY_LOG or RUST_LOG is set
    pyty_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let outcomes = driver::run(&args)?;

    match args.format {
        OutputFormat::Json => {
            let json = Reporter::render_json(&outcomes).context("failed to serialize results")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let reporter = Reporter::new(color);
            if !outcomes.is_empty() {
                println!("{}", reporter.render(&outcomes));
            }
            eprintln!("{}", reporter.summary(&outcomes));
        }
    }

    let failed = outcomes.iter().any(|outcome| !outcome.passed());
    std::process::exit(if failed {
        EXIT_EXPECTATION_FAILED
    } else {
        EXIT_SUCCESS
    });
}
