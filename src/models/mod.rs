pub mod history;
pub mod ids;
pub mod leave;
pub mod ledger;
pub mod session;

pub use history::HistoryEntry;
pub use ids::{GroupId, SessionId};
pub use leave::{LeaveEntry, LeaveKind};
pub use ledger::DailyLedger;
pub use session::{PauseInterval, PauseKind, SessionStatus, WorkSession};
