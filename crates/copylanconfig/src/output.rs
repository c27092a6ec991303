//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders the run summary in the format selected by `--output`. Table
//! uses `tabled`, structured formats use serde, plain emits one
//! tab-separated outcome per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use copylan_core::{ActionOutcome, RunSummary, Status};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Structured view ──────────────────────────────────────────────────

/// Serialized shape of a run: the summary plus its counters.
#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    destination: &'a str,
    dry_run: bool,
    created: usize,
    updated: usize,
    failed: usize,
    outcomes: &'a [ActionOutcome],
}

impl<'a> From<&'a RunSummary> for Report<'a> {
    fn from(s: &'a RunSummary) -> Self {
        Self {
            source: &s.source,
            destination: &s.destination,
            dry_run: s.dry_run,
            created: s.created(),
            updated: s.updated(),
            failed: s.failed(),
            outcomes: &s.outcomes,
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Action")]
    operation: String,
    #[tabled(rename = "Name")]
    key: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&ActionOutcome> for OutcomeRow {
    fn from(o: &ActionOutcome) -> Self {
        Self {
            resource: o.resource.to_string(),
            operation: o.operation.to_string(),
            key: o.key.clone(),
            status: o.status.label().into(),
            detail: match &o.status {
                Status::Failed { message } => message.clone(),
                _ => String::new(),
            },
        }
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a run summary in the chosen format.
pub fn render_summary(format: &OutputFormat, summary: &RunSummary, color: bool) -> String {
    match format {
        OutputFormat::Table => render_table(summary, color),
        OutputFormat::Json => render_json(&Report::from(summary), false),
        OutputFormat::JsonCompact => render_json(&Report::from(summary), true),
        OutputFormat::Yaml => render_yaml(&Report::from(summary)),
        OutputFormat::Plain => summary
            .outcomes
            .iter()
            .map(|o| format!("{}\t{}\t{}\t{}", o.status.label(), o.resource, o.operation, o.key))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table(summary: &RunSummary, color: bool) -> String {
    let heading = format!(
        "{} -> {}{}",
        summary.source,
        summary.destination,
        if summary.dry_run { " (dry run)" } else { "" }
    );

    if summary.outcomes.is_empty() {
        return format!("{heading}\nNothing to copy.");
    }

    let rows: Vec<OutcomeRow> = summary.outcomes.iter().map(OutcomeRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();

    format!("{heading}\n{table}\n{}", totals_line(summary, color))
}

fn totals_line(summary: &RunSummary, color: bool) -> String {
    let created = format!("{} created", summary.created());
    let updated = format!("{} updated", summary.updated());
    let failed = format!("{} failed", summary.failed());

    if !color {
        return format!("{created}, {updated}, {failed}");
    }
    let failed = if summary.has_failures() {
        failed.red().bold().to_string()
    } else {
        failed.dimmed().to_string()
    };
    format!("{}, {}, {failed}", created.green(), updated.cyan())
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        serde_json::to_string(data).expect("serialization should not fail")
    } else {
        serde_json::to_string_pretty(data).expect("serialization should not fail")
    }
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use copylan_core::{Operation, Resource};

    use super::*;

    fn sample() -> RunSummary {
        let mut s = RunSummary::new("branch-a", "branch-b", false);
        s.record(Resource::Interface, Operation::Update, "vlan10", Status::Applied);
        s.record(
            Resource::StaticRoute,
            Operation::Create,
            "10.0.0.0/8",
            Status::Failed {
                message: "invalid nexthop".into(),
            },
        );
        s
    }

    #[test]
    fn json_report_includes_counters() {
        let out = render_summary(&OutputFormat::Json, &sample(), false);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["updated"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["outcomes"][1]["message"], "invalid nexthop");
    }

    #[test]
    fn plain_is_one_line_per_outcome() {
        let out = render_summary(&OutputFormat::Plain, &sample(), false);
        assert_eq!(
            out,
            "applied\tinterface\tupdate\tvlan10\nfailed\tstatic_route\tcreate\t10.0.0.0/8"
        );
    }

    #[test]
    fn table_lists_failure_detail_and_totals() {
        let out = render_summary(&OutputFormat::Table, &sample(), false);
        assert!(out.starts_with("branch-a -> branch-b"));
        assert!(out.contains("invalid nexthop"));
        assert!(out.ends_with("0 created, 1 updated, 1 failed"));
    }

    #[test]
    fn empty_run_says_so() {
        let out = render_summary(&OutputFormat::Table, &RunSummary::new("a", "b", true), false);
        assert_eq!(out, "a -> b (dry run)\nNothing to copy.");
    }
}
