use super::ids::{GroupId, SessionId};
use super::leave::LeaveEntry;
use super::session::WorkSession;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The live, per-day aggregate: today's board. Loaded wholesale at startup,
/// mutated continuously through the state-machine operations, written back
/// wholesale (last full write wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLedger {
    #[serde(default)]
    pub sessions: Vec<WorkSession>,

    /// Items processed per task type; entered separately from time tracking.
    #[serde(default)]
    pub quantities: BTreeMap<String, i64>,

    /// Tasks whose zero quantity was explicitly acknowledged as correct.
    #[serde(default)]
    pub confirmed_zero_tasks: BTreeSet<String>,

    #[serde(default)]
    pub daily_leave_entries: Vec<LeaveEntry>,

    #[serde(default)]
    pub temporary_workers: Vec<String>,

    /// Scheduler idempotency flags; reset only on shift-end with reset.
    #[serde(default)]
    pub lunch_pause_executed: bool,
    #[serde(default)]
    pub lunch_resume_executed: bool,

    /// Single sequence minting both session and group ids.
    #[serde(default)]
    pub next_id: u64,
}

impl DailyLedger {
    fn mint(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn mint_session_id(&mut self) -> SessionId {
        SessionId(self.mint())
    }

    pub fn mint_group_id(&mut self) -> GroupId {
        GroupId(self.mint())
    }

    pub fn session(&self, id: SessionId) -> Option<&WorkSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut WorkSession> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn group_exists(&self, group_id: GroupId) -> bool {
        self.sessions.iter().any(|s| s.group_id == group_id)
    }

    pub fn add_quantity(&mut self, task: &str, amount: i64) {
        *self.quantities.entry(task.to_string()).or_insert(0) += amount;
    }
}
