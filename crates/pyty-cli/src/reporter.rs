use colored::Colorize;

use crate::driver::QueryOutcome;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, outcomes: &[QueryOutcome]) -> String {
        outcomes
            .iter()
            .map(|outcome| self.format_outcome(outcome))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `match: float <- int`, with a note when the result disagrees with
    /// the query's expectation.
    pub fn format_outcome(&self, outcome: &QueryOutcome) -> String {
        let mut output = format!(
            "{}: {} <- {}",
            self.format_verdict(outcome.matched),
            outcome.expected,
            outcome.actual
        );
        if !outcome.passed() {
            let wanted = if outcome.matched { "mismatch" } else { "match" };
            let note = format!("(expected {wanted})");
            output.push(' ');
            if self.color {
                output.push_str(&note.yellow().bold().to_string());
            } else {
                output.push_str(&note);
            }
        }
        output
    }

    pub fn summary(&self, outcomes: &[QueryOutcome]) -> String {
        let failed = outcomes.iter().filter(|outcome| !outcome.passed()).count();
        let queries = if outcomes.len() == 1 { "query" } else { "queries" };
        let line = format!("{} {queries}, {failed} failed", outcomes.len());
        if self.color && failed > 0 {
            line.red().to_string()
        } else {
            line
        }
    }

    pub fn render_json(outcomes: &[QueryOutcome]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(outcomes)
    }

    fn format_verdict(&self, matched: bool) -> String {
        let verdict = if matched { "match" } else { "mismatch" };
        if !self.color {
            return verdict.to_string();
        }
        if matched {
            verdict.green().to_string()
        } else {
            verdict.red().to_string()
        }
    }
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod tests;
