// ── Run summary ──
//
// Every write the run attempts (or plans, in a dry run) is recorded here
// instead of being printed and forgotten.

use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Interface,
    ParentTrunk,
    StaticRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
}

/// Result of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Applied,
    Planned,
    Failed { message: String },
}

impl Status {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label for tabular output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Planned => "planned",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub resource: Resource,
    pub operation: Operation,
    /// Natural key: interface name or route prefix.
    pub key: String,
    #[serde(flatten)]
    pub status: Status,
}

/// Everything a run did, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub source: String,
    pub destination: String,
    pub dry_run: bool,
    pub outcomes: Vec<ActionOutcome>,
}

impl RunSummary {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, dry_run: bool) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            dry_run,
            outcomes: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        resource: Resource,
        operation: Operation,
        key: impl Into<String>,
        status: Status,
    ) {
        self.outcomes.push(ActionOutcome {
            resource,
            operation,
            key: key.into(),
            status,
        });
    }

    fn count_succeeded(&self, op: Operation) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.operation == op && !o.status.is_failed())
            .count()
    }

    /// Creates that were applied (or planned, in a dry run).
    pub fn created(&self) -> usize {
        self.count_succeeded(Operation::Create)
    }

    /// Updates that were applied (or planned, in a dry run).
    pub fn updated(&self) -> usize {
        self.count_succeeded(Operation::Update)
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status.is_failed())
    }
}
