use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the pyty binary.
#[derive(Parser, Debug)]
#[command(
    name = "pyty",
    version,
    about = "Check whether Python types are compatible"
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["queries", "expected"])
))]
pub struct CliArgs {
    /// Stub manifests to install on top of the builtin classes.
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub stubs: Vec<PathBuf>,

    /// JSON file holding an array of `{"expected", "actual", "expect"}` queries.
    #[arg(long, value_name = "FILE")]
    pub queries: Option<PathBuf>,

    /// Expected type of a single query: a JSON type expression or a class name.
    #[arg(long, value_name = "TYPE", requires = "actual")]
    pub expected: Option<String>,

    /// Actual type of a single query: a JSON type expression or a class name.
    #[arg(long, value_name = "TYPE", requires = "expected")]
    pub actual: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod tests;
