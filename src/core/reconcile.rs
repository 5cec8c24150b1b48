//! History reconciliation: fold the live ledger into the durable per-day
//! entry without losing what an earlier (or concurrent) save already wrote.

use crate::core::accountant::elapsed_minutes;
use crate::errors::AppResult;
use crate::models::{DailyLedger, HistoryEntry, SessionId, SessionStatus, WorkSession};
use crate::store::Store;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// Point-in-time copy of the live session list. Completed sessions pass
/// through unchanged; running ones are cloned with end/duration resolved to
/// `now` so the durable snapshot is consistent while the originals keep
/// running untouched.
pub fn snapshot_sessions(sessions: &[WorkSession], now: NaiveTime) -> Vec<WorkSession> {
    sessions
        .iter()
        .map(|s| {
            if s.status == SessionStatus::Completed {
                return s.clone();
            }
            let mut frozen = s.clone();
            if let Some(open) = frozen.open_pause_mut() {
                open.end = Some(now);
            }
            frozen.status = SessionStatus::Completed;
            frozen.end_time = Some(now);
            frozen.duration = Some(elapsed_minutes(frozen.start_time, now, &frozen.pauses));
            frozen
        })
        .collect()
}

/// Merge the live ledger into an existing history entry.
///
/// Sessions merge by id with the freshly computed version winning; ids
/// unique to either side are kept. Quantities merge by key union with live
/// values overriding. The confirmed-zero set, leave entries, and temp-worker
/// roster are overwritten with the live values.
pub fn merge_entry(
    existing: Option<HistoryEntry>,
    ledger: &DailyLedger,
    now: NaiveTime,
) -> HistoryEntry {
    let existing = existing.unwrap_or_default();

    let mut by_id: BTreeMap<SessionId, WorkSession> = BTreeMap::new();
    for s in existing.sessions {
        by_id.insert(s.id, s);
    }
    for s in snapshot_sessions(&ledger.sessions, now) {
        by_id.insert(s.id, s);
    }

    let mut quantities = existing.quantities;
    for (task, qty) in &ledger.quantities {
        quantities.insert(task.clone(), *qty);
    }

    HistoryEntry {
        sessions: by_id.into_values().collect(),
        quantities,
        confirmed_zero_tasks: ledger.confirmed_zero_tasks.clone(),
        leave_entries: ledger.daily_leave_entries.clone(),
        temporary_workers: ledger.temporary_workers.clone(),
    }
}

/// Read-merge-write against the history document, atomic per date via the
/// store's transaction. Callers clear their dirty flag only when this
/// returns Ok.
pub fn reconcile(
    store: &mut Store,
    namespace: &str,
    date: NaiveDate,
    ledger: &DailyLedger,
    now: NaiveTime,
) -> AppResult<HistoryEntry> {
    store.update_history(namespace, date, |existing| merge_entry(existing, ledger, now))
}

/// Tasks that were worked on but have no recorded quantity: flagged iff the
/// task accumulated duration, is a tracked quantity task, has quantity <= 0,
/// and its zero was not explicitly confirmed. Warning display only; never
/// blocks a save.
pub fn missing_quantities(entry: &HistoryEntry, tracked: &[String]) -> Vec<String> {
    let worked = entry.duration_by_task();
    tracked
        .iter()
        .filter(|task| worked.get(*task).copied().unwrap_or(0) > 0)
        .filter(|task| entry.quantities.get(*task).copied().unwrap_or(0) <= 0)
        .filter(|task| !entry.confirmed_zero_tasks.contains(*task))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::machine::{pause_group, start_group, stop_session};
    use chrono::NaiveTime;

    fn t(s: &str) -> NaiveTime {
        crate::utils::time::parse_time(s).unwrap()
    }

    fn board(members: &[&str]) -> DailyLedger {
        let mut ledger = DailyLedger::default();
        let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
        start_group(&mut ledger, &members, "Pack", t("09:00")).unwrap();
        ledger
    }

    #[test]
    fn snapshot_freezes_live_sessions_without_mutating_them() {
        let mut ledger = board(&["A"]);
        let g = ledger.sessions[0].group_id;
        pause_group(&mut ledger, g, t("10:00"));

        let snap = snapshot_sessions(&ledger.sessions, t("10:30"));
        assert_eq!(snap[0].status, SessionStatus::Completed);
        assert_eq!(snap[0].end_time, Some(t("10:30")));
        assert_eq!(snap[0].duration, Some(60)); // 90 span - 30 paused

        // the live session is untouched
        assert_eq!(ledger.sessions[0].status, SessionStatus::Paused);
        assert!(ledger.sessions[0].end_time.is_none());
        assert!(ledger.sessions[0].open_pause().is_some());
    }

    #[test]
    fn merge_keeps_union_of_ids_and_prefers_live_versions() {
        let mut ledger = board(&["A", "B"]);
        let a = ledger.sessions[0].id;
        stop_session(&mut ledger, a, t("11:00"));

        // first save at 11:05
        let first = merge_entry(None, &ledger, t("11:05"));
        assert_eq!(first.sessions.len(), 2);

        // a session finished earlier is dropped from the live board,
        // and a new group starts
        ledger.sessions.retain(|s| s.id != a);
        start_group(&mut ledger, &["C".to_string()], "Label", t("11:10")).unwrap();

        let second = merge_entry(Some(first), &ledger, t("12:00"));
        // union: A (from history), B (live wins), C (new)
        assert_eq!(second.sessions.len(), 3);

        let b = second
            .sessions
            .iter()
            .find(|s| s.member == "B")
            .unwrap();
        // B's version is the fresh snapshot, frozen at 12:00
        assert_eq!(b.end_time, Some(t("12:00")));

        let a_kept = second.sessions.iter().find(|s| s.member == "A").unwrap();
        assert_eq!(a_kept.end_time, Some(t("11:00")));
    }

    #[test]
    fn quantity_merge_is_key_union_with_live_override() {
        let mut existing = HistoryEntry::default();
        existing.quantities.insert("Pack".into(), 10);
        existing.quantities.insert("Label".into(), 7);

        let mut ledger = DailyLedger::default();
        ledger.quantities.insert("Pack".into(), 25);
        ledger.quantities.insert("Pick".into(), 3);

        let merged = merge_entry(Some(existing), &ledger, t("12:00"));
        assert_eq!(merged.quantities.get("Pack"), Some(&25));
        assert_eq!(merged.quantities.get("Label"), Some(&7));
        assert_eq!(merged.quantities.get("Pick"), Some(&3));
    }

    #[test]
    fn roster_and_confirmed_zero_are_overwritten_not_merged() {
        let mut existing = HistoryEntry::default();
        existing.confirmed_zero_tasks.insert("Pack".into());
        existing.temporary_workers.push("Old".into());

        let mut ledger = DailyLedger::default();
        ledger.temporary_workers.push("New".into());

        let merged = merge_entry(Some(existing), &ledger, t("12:00"));
        assert!(merged.confirmed_zero_tasks.is_empty());
        assert_eq!(merged.temporary_workers, vec!["New".to_string()]);
    }

    #[test]
    fn missing_quantities_rule() {
        let mut ledger = board(&["A"]);
        let a = ledger.sessions[0].id;
        stop_session(&mut ledger, a, t("11:00"));
        let entry = merge_entry(None, &ledger, t("11:00"));

        let tracked = vec!["Pack".to_string(), "Label".to_string()];

        // worked, tracked, no quantity, not confirmed -> flagged
        assert_eq!(missing_quantities(&entry, &tracked), vec!["Pack"]);

        // quantity recorded -> clear
        let mut with_qty = entry.clone();
        with_qty.quantities.insert("Pack".into(), 12);
        assert!(missing_quantities(&with_qty, &tracked).is_empty());

        // confirmed zero -> clear
        let mut confirmed = entry.clone();
        confirmed.confirmed_zero_tasks.insert("Pack".into());
        assert!(missing_quantities(&confirmed, &tracked).is_empty());

        // untracked task never flagged
        assert!(missing_quantities(&entry, &["Pick".to_string()]).is_empty());

        // no recorded duration -> not flagged even when tracked
        let idle = HistoryEntry::default();
        assert!(missing_quantities(&idle, &tracked).is_empty());
    }
}
