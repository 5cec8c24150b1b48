//! Shift-end: close out the day, reconcile it into history, and optionally
//! reset the board for the next one.

use crate::core::machine;
use crate::core::reconcile;
use crate::errors::AppResult;
use crate::models::{DailyLedger, HistoryEntry, LeaveKind};
use crate::store::Store;
use chrono::{NaiveDate, NaiveTime};

/// Force-complete every still-running session. Returns how many were closed.
pub fn force_complete_all(ledger: &mut DailyLedger, now: NaiveTime) -> usize {
    let live: Vec<_> = ledger
        .sessions
        .iter()
        .filter(|s| s.is_live())
        .map(|s| s.id)
        .collect();
    let mut n = 0;
    for id in live {
        if machine::stop_session(ledger, id, now).changed() {
            n += 1;
        }
    }
    n
}

/// Leave-entry cutoff applied by a reset: before the cutoff only early-leave
/// entries are carried over, at or after it the daily list is cleared.
pub fn apply_leave_cutoff(ledger: &mut DailyLedger, cutoff: NaiveTime, now: NaiveTime) {
    if now < cutoff {
        ledger
            .daily_leave_entries
            .retain(|e| e.kind == LeaveKind::EarlyLeave);
    } else {
        ledger.daily_leave_entries.clear();
    }
}

/// End the shift: complete everything, reconcile unconditionally, empty the
/// board, and when `should_reset` also zero quantities, clear the
/// confirmed-zero set and temp roster, reset the scheduler flags, and apply
/// the leave cutoff. The caller persists the ledger immediately afterwards.
pub fn close_shift(
    store: &mut Store,
    namespace: &str,
    date: NaiveDate,
    ledger: &mut DailyLedger,
    should_reset: bool,
    cutoff: NaiveTime,
    now: NaiveTime,
) -> AppResult<HistoryEntry> {
    force_complete_all(ledger, now);

    let entry = reconcile::reconcile(store, namespace, date, ledger, now)?;

    // today's board is emptied regardless of reset mode
    ledger.sessions.clear();

    if should_reset {
        for qty in ledger.quantities.values_mut() {
            *qty = 0;
        }
        ledger.confirmed_zero_tasks.clear();
        ledger.temporary_workers.clear();
        ledger.lunch_pause_executed = false;
        ledger.lunch_resume_executed = false;
        apply_leave_cutoff(ledger, cutoff, now);
    }

    Ok(entry)
}
