use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of leave recorded on the daily board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    /// Left before the end of the shift (kept by the pre-cutoff reset).
    EarlyLeave,
    /// Stepped out during the day.
    Outing,
    Vacation,
}

impl LeaveKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "early-leave" | "early" => Some(Self::EarlyLeave),
            "outing" | "out" => Some(Self::Outing),
            "vacation" => Some(Self::Vacation),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EarlyLeave => "early-leave",
            Self::Outing => "outing",
            Self::Vacation => "vacation",
        }
    }
}

impl fmt::Display for LeaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub member: String,
    pub kind: LeaveKind,
}
