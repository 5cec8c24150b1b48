use super::leave::LeaveEntry;
use super::session::WorkSession;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The durable, date-keyed snapshot produced by reconciliation. Created on
/// the first save of a date, merged on every later one. A stale writer can
/// never overwrite it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub sessions: Vec<WorkSession>,

    #[serde(default)]
    pub quantities: BTreeMap<String, i64>,

    #[serde(default)]
    pub confirmed_zero_tasks: BTreeSet<String>,

    #[serde(default)]
    pub leave_entries: Vec<LeaveEntry>,

    #[serde(default)]
    pub temporary_workers: Vec<String>,
}

impl HistoryEntry {
    /// Total recorded minutes per task across this entry's sessions.
    pub fn duration_by_task(&self) -> BTreeMap<String, i64> {
        let mut out: BTreeMap<String, i64> = BTreeMap::new();
        for s in &self.sessions {
            *out.entry(s.task.clone()).or_insert(0) += s.duration.unwrap_or(0);
        }
        out
    }
}
