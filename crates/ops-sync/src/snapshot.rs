//! Extraction of task counts from `WORKFLOW.md`.
//!
//! The document is generated by the sync workflow and edited by hand, so the
//! parser is lenient: every counter is looked up on its own and a missing or
//! unreadable counter is reported as zero. Only ASCII digits count, and
//! values above `i32::MAX` are treated as unreadable.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::WorkflowSnapshot;

static OPEN_TASKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Open Tasks: ([0-9]+)").unwrap());
static CLOSED_TASKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Closed Tasks: ([0-9]+)").unwrap());
static OVERDUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Overdue: ([0-9]+)").unwrap());

/// Parse the task counters out of a workflow status document.
#[must_use]
pub fn parse_workflow_snapshot(content: &str) -> WorkflowSnapshot {
    WorkflowSnapshot {
        open_tasks: first_count(&OPEN_TASKS, content),
        closed_tasks: first_count(&CLOSED_TASKS, content),
        overdue_tasks: first_count(&OVERDUE, content),
    }
}

/// Value of the first match, or 0 if absent or out of range.
fn first_count(pattern: &Regex, content: &str) -> u32 {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}
