use super::ids::{GroupId, SessionId};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Why a pause was recorded. The scheduler only ever closes pauses it opened
/// itself, so the kind must survive persistence round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseKind {
    Break,
    Lunch,
}

/// One recorded break inside a session. `end` is unset while the pause is
/// still open; insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseInterval {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
    pub kind: PauseKind,
}

impl PauseInterval {
    pub fn open(start: NaiveTime, kind: PauseKind) -> Self {
        Self {
            start,
            end: None,
            kind,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Ongoing,
    Paused,
    Completed,
}

/// One member's timed participation in one task instance.
///
/// Invariants kept by the state machine:
/// - at most one open pause, and only while `status == Paused`
/// - `end_time`/`duration` are set iff `status == Completed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: SessionId,
    pub member: String,
    pub task: String,
    pub group_id: GroupId,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    /// Net minutes, computed once at completion.
    pub duration: Option<i64>,
    pub status: SessionStatus,
    pub pauses: Vec<PauseInterval>,
}

impl WorkSession {
    pub fn begin(
        id: SessionId,
        group_id: GroupId,
        member: &str,
        task: &str,
        start_time: NaiveTime,
    ) -> Self {
        Self {
            id,
            member: member.to_string(),
            task: task.to_string(),
            group_id,
            start_time,
            end_time: None,
            duration: None,
            status: SessionStatus::Ongoing,
            pauses: Vec::new(),
        }
    }

    /// Still on the board: not yet completed.
    pub fn is_live(&self) -> bool {
        matches!(self.status, SessionStatus::Ongoing | SessionStatus::Paused)
    }

    pub fn open_pause(&self) -> Option<&PauseInterval> {
        self.pauses.last().filter(|p| p.is_open())
    }

    pub fn open_pause_mut(&mut self) -> Option<&mut PauseInterval> {
        self.pauses.last_mut().filter(|p| p.is_open())
    }
}
