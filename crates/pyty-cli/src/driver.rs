//! Query driver: builds the stub universe and runs match queries against it.

use anyhow::{Context, Result};
use pyty_solver::{StubManifest, StubUniverse, TypeExpr, TypeFormatter, match_types};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::args::CliArgs;

/// One compatibility question, optionally with the answer the caller expects.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Query {
    #[serde(default)]
    pub expected: TypeExpr,
    #[serde(default)]
    pub actual: TypeExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<bool>,
}

/// Result of one query, with both types rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub expected: String,
    pub actual: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect: Option<bool>,
}

impl QueryOutcome {
    /// False only when the query carried an expectation and the result disagrees.
    pub fn passed(&self) -> bool {
        self.expect.is_none_or(|expect| expect == self.matched)
    }
}

/// Builtins plus every manifest in `stubs`, installed in order.
pub fn load_universe(stubs: &[PathBuf]) -> Result<StubUniverse> {
    let mut universe = StubUniverse::with_builtins().context("failed to install builtin stubs")?;
    for path in stubs {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read stub manifest {}", path.display()))?;
        let manifest = StubManifest::from_json(&text)
            .with_context(|| format!("failed to parse stub manifest {}", path.display()))?;
        universe
            .install(&manifest)
            .with_context(|| format!("failed to install stub manifest {}", path.display()))?;
        info!(path = %path.display(), classes = manifest.classes.len(), "loaded stubs");
    }
    Ok(universe)
}

pub fn load_queries(path: &Path) -> Result<Vec<Query>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read queries {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse queries {}", path.display()))
}

/// Parse a type given on the command line.
///
/// Anything that is not valid JSON is taken as a bare class name, so
/// `--expected float` and `--expected '"float"'` mean the same.
pub fn parse_type_arg(text: &str) -> TypeExpr {
    serde_json::from_str(text).unwrap_or_else(|_| TypeExpr::Class(text.to_string()))
}

/// Queries named by the arguments: the queries file, or the single
/// `--expected`/`--actual` pair.
pub fn queries_from_args(args: &CliArgs) -> Result<Vec<Query>> {
    if let Some(path) = &args.queries {
        return load_queries(path);
    }
    match (&args.expected, &args.actual) {
        (Some(expected), Some(actual)) => Ok(vec![Query {
            expected: parse_type_arg(expected),
            actual: parse_type_arg(actual),
            expect: None,
        }]),
        _ => anyhow::bail!("either --queries or both --expected and --actual are required"),
    }
}

pub fn run_queries(universe: &StubUniverse, queries: &[Query]) -> Result<Vec<QueryOutcome>> {
    let ctx = universe.context();
    let formatter = TypeFormatter::new(universe.interner());

    queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let expected = universe
                .lower(&query.expected)
                .with_context(|| format!("query {index}: invalid expected type"))?;
            let actual = universe
                .lower(&query.actual)
                .with_context(|| format!("query {index}: invalid actual type"))?;
            let matched = match_types(expected, actual, &ctx);
            debug!(index, matched, "query");
            Ok(QueryOutcome {
                expected: formatter.format(expected),
                actual: formatter.format(actual),
                matched,
                expect: query.expect,
            })
        })
        .collect()
}

/// Load everything the arguments name and answer every query.
pub fn run(args: &CliArgs) -> Result<Vec<QueryOutcome>> {
    let universe = load_universe(&args.stubs)?;
    let queries = queries_from_args(args)?;
    run_queries(&universe, &queries)
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
