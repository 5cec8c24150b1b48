//! Session state machine.
//!
//! Every mutation of the board's session list goes through here so the
//! session invariants stay enforceable in one place. Transitions:
//! `Ongoing → Paused → Ongoing → … → Completed`, no way out of `Completed`.
//!
//! Targeting an id or group that matches nothing eligible is reported as
//! `NothingChanged`, never as an error: duplicate or late invocations are
//! expected and harmless.

use crate::core::accountant::elapsed_minutes;
use crate::errors::{AppError, AppResult};
use crate::models::{
    DailyLedger, GroupId, PauseInterval, PauseKind, SessionId, SessionStatus, WorkSession,
};
use chrono::NaiveTime;

/// Explicit result of a state-machine operation, so callers and tests can
/// assert on outcomes without a notification side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Number of sessions actually mutated.
    Changed(usize),
    NothingChanged,
}

impl Outcome {
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Changed(_))
    }

    fn from_count(n: usize) -> Self {
        if n == 0 {
            Outcome::NothingChanged
        } else {
            Outcome::Changed(n)
        }
    }
}

/// Create one `Ongoing` session per member, all sharing a fresh group id.
pub fn start_group(
    ledger: &mut DailyLedger,
    members: &[String],
    task: &str,
    now: NaiveTime,
) -> AppResult<GroupId> {
    if members.is_empty() {
        return Err(AppError::Validation(
            "cannot start a task with no members".into(),
        ));
    }

    let group_id = ledger.mint_group_id();
    for member in members {
        let id = ledger.mint_session_id();
        ledger
            .sessions
            .push(WorkSession::begin(id, group_id, member, task, now));
    }
    Ok(group_id)
}

/// Attach additional members to an existing group. New joiners start
/// `Ongoing` even if their siblings are currently paused.
pub fn add_members(
    ledger: &mut DailyLedger,
    members: &[String],
    task: &str,
    group_id: GroupId,
    now: NaiveTime,
) -> Outcome {
    if members.is_empty() || !ledger.group_exists(group_id) {
        return Outcome::NothingChanged;
    }

    for member in members {
        let id = ledger.mint_session_id();
        ledger
            .sessions
            .push(WorkSession::begin(id, group_id, member, task, now));
    }
    Outcome::Changed(members.len())
}

fn pause_one(session: &mut WorkSession, now: NaiveTime, kind: PauseKind) -> bool {
    if session.status != SessionStatus::Ongoing {
        return false;
    }
    session.pauses.push(PauseInterval::open(now, kind));
    session.status = SessionStatus::Paused;
    true
}

/// A manual resume closes the last open pause whatever its kind: explicit
/// user intent outranks the lunch scheduler.
fn resume_one(session: &mut WorkSession, now: NaiveTime) -> bool {
    if session.status != SessionStatus::Paused {
        return false;
    }
    if let Some(open) = session.open_pause_mut() {
        open.end = Some(now);
    }
    session.status = SessionStatus::Ongoing;
    true
}

fn stop_one(session: &mut WorkSession, now: NaiveTime) -> bool {
    if !session.is_live() {
        return false;
    }
    if let Some(open) = session.open_pause_mut() {
        open.end = Some(now);
    }
    session.status = SessionStatus::Completed;
    session.end_time = Some(now);
    session.duration = Some(elapsed_minutes(session.start_time, now, &session.pauses));
    true
}

pub fn pause_session(ledger: &mut DailyLedger, id: SessionId, now: NaiveTime) -> Outcome {
    match ledger.session_mut(id) {
        Some(s) => {
            if pause_one(s, now, PauseKind::Break) {
                Outcome::Changed(1)
            } else {
                Outcome::NothingChanged
            }
        }
        None => Outcome::NothingChanged,
    }
}

pub fn pause_group(ledger: &mut DailyLedger, group_id: GroupId, now: NaiveTime) -> Outcome {
    let mut n = 0;
    for s in ledger
        .sessions
        .iter_mut()
        .filter(|s| s.group_id == group_id)
    {
        if pause_one(s, now, PauseKind::Break) {
            n += 1;
        }
    }
    Outcome::from_count(n)
}

pub fn resume_session(ledger: &mut DailyLedger, id: SessionId, now: NaiveTime) -> Outcome {
    match ledger.session_mut(id) {
        Some(s) => {
            if resume_one(s, now) {
                Outcome::Changed(1)
            } else {
                Outcome::NothingChanged
            }
        }
        None => Outcome::NothingChanged,
    }
}

pub fn resume_group(ledger: &mut DailyLedger, group_id: GroupId, now: NaiveTime) -> Outcome {
    let mut n = 0;
    for s in ledger
        .sessions
        .iter_mut()
        .filter(|s| s.group_id == group_id)
    {
        if resume_one(s, now) {
            n += 1;
        }
    }
    Outcome::from_count(n)
}

pub fn stop_session(ledger: &mut DailyLedger, id: SessionId, now: NaiveTime) -> Outcome {
    match ledger.session_mut(id) {
        Some(s) => {
            if stop_one(s, now) {
                Outcome::Changed(1)
            } else {
                Outcome::NothingChanged
            }
        }
        None => Outcome::NothingChanged,
    }
}

/// Stop every live member of a group. An optional quantity is credited to
/// the group's task once per stop action, not once per session.
pub fn stop_group(
    ledger: &mut DailyLedger,
    group_id: GroupId,
    now: NaiveTime,
    quantity: Option<i64>,
) -> Outcome {
    let mut task: Option<String> = None;
    let mut n = 0;
    for s in ledger
        .sessions
        .iter_mut()
        .filter(|s| s.group_id == group_id)
    {
        if stop_one(s, now) {
            task.get_or_insert_with(|| s.task.clone());
            n += 1;
        }
    }

    if let (Some(qty), Some(task)) = (quantity, task.as_deref()) {
        let task = task.to_string();
        ledger.add_quantity(&task, qty);
    }
    Outcome::from_count(n)
}

/// Correct the recorded times of a completed session. Rejected before any
/// mutation when the resulting end would not be after the start.
pub fn edit_times(
    ledger: &mut DailyLedger,
    id: SessionId,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> AppResult<Outcome> {
    let Some(session) = ledger.session_mut(id) else {
        return Ok(Outcome::NothingChanged);
    };
    if start.is_none() && end.is_none() {
        return Ok(Outcome::NothingChanged);
    }
    if session.status != SessionStatus::Completed {
        return Err(AppError::Validation(format!(
            "session {} is still running; stop it before editing times",
            id
        )));
    }

    let new_start = start.unwrap_or(session.start_time);
    let new_end = end.or(session.end_time);
    match new_end {
        Some(e) if e > new_start => {
            session.start_time = new_start;
            session.end_time = Some(e);
            session.duration = Some(elapsed_minutes(new_start, e, &session.pauses));
            Ok(Outcome::Changed(1))
        }
        _ => Err(AppError::Validation(
            "end time must be later than start time".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        crate::utils::time::parse_time(s).unwrap()
    }

    fn board_with_group(members: &[&str]) -> (DailyLedger, GroupId) {
        let mut ledger = DailyLedger::default();
        let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
        let g = start_group(&mut ledger, &members, "Pack", t("09:00")).unwrap();
        (ledger, g)
    }

    #[test]
    fn start_creates_one_ongoing_session_per_member() {
        let (ledger, g) = board_with_group(&["A", "B"]);
        assert_eq!(ledger.sessions.len(), 2);
        for s in &ledger.sessions {
            assert_eq!(s.group_id, g);
            assert_eq!(s.status, SessionStatus::Ongoing);
            assert!(s.pauses.is_empty());
            assert_eq!(s.task, "Pack");
        }
        assert_ne!(ledger.sessions[0].id, ledger.sessions[1].id);
    }

    #[test]
    fn start_rejects_empty_member_list() {
        let mut ledger = DailyLedger::default();
        assert!(start_group(&mut ledger, &[], "Pack", t("09:00")).is_err());
    }

    #[test]
    fn joiners_start_ongoing_even_when_group_is_paused() {
        let (mut ledger, g) = board_with_group(&["A"]);
        pause_group(&mut ledger, g, t("10:00"));
        let out = add_members(&mut ledger, &["C".to_string()], "Pack", g, t("10:05"));
        assert_eq!(out, Outcome::Changed(1));
        let joiner = ledger.sessions.last().unwrap();
        assert_eq!(joiner.status, SessionStatus::Ongoing);
        assert_eq!(joiner.group_id, g);
    }

    #[test]
    fn add_members_to_unknown_group_is_a_no_op() {
        let (mut ledger, _) = board_with_group(&["A"]);
        let out = add_members(&mut ledger, &["C".to_string()], "Pack", GroupId(999), t("10:00"));
        assert_eq!(out, Outcome::NothingChanged);
        assert_eq!(ledger.sessions.len(), 1);
    }

    #[test]
    fn pause_group_only_touches_ongoing_members() {
        let (mut ledger, g) = board_with_group(&["A", "B", "C"]);
        let c = ledger.sessions[2].id;
        stop_session(&mut ledger, c, t("09:30"));

        let out = pause_group(&mut ledger, g, t("10:00"));
        assert_eq!(out, Outcome::Changed(2));

        for s in &ledger.sessions[..2] {
            assert_eq!(s.status, SessionStatus::Paused);
            assert_eq!(s.pauses.len(), 1);
            assert!(s.pauses[0].is_open());
            assert_eq!(s.pauses[0].kind, PauseKind::Break);
        }
        assert_eq!(ledger.sessions[2].status, SessionStatus::Completed);
        assert!(ledger.sessions[2].pauses.is_empty());

        // re-invocation is idempotent
        assert_eq!(pause_group(&mut ledger, g, t("10:01")), Outcome::NothingChanged);
        assert_eq!(ledger.sessions[0].pauses.len(), 1);
    }

    #[test]
    fn resume_group_closes_exactly_the_open_pause() {
        let (mut ledger, g) = board_with_group(&["A", "B"]);
        pause_group(&mut ledger, g, t("10:00"));
        let out = resume_group(&mut ledger, g, t("10:15"));
        assert_eq!(out, Outcome::Changed(2));
        for s in &ledger.sessions {
            assert_eq!(s.status, SessionStatus::Ongoing);
            assert_eq!(s.pauses.len(), 1);
            assert_eq!(s.pauses[0].end, Some(t("10:15")));
        }
        // nothing paused -> no-op
        assert_eq!(resume_group(&mut ledger, g, t("10:16")), Outcome::NothingChanged);
    }

    #[test]
    fn stop_is_idempotent_and_freezes_duration() {
        let (mut ledger, _) = board_with_group(&["A"]);
        let id = ledger.sessions[0].id;

        assert_eq!(stop_session(&mut ledger, id, t("12:00")), Outcome::Changed(1));
        assert_eq!(ledger.sessions[0].duration, Some(180));

        assert_eq!(stop_session(&mut ledger, id, t("15:00")), Outcome::NothingChanged);
        assert_eq!(ledger.sessions[0].duration, Some(180));
        assert_eq!(ledger.sessions[0].end_time, Some(t("12:00")));
    }

    #[test]
    fn stop_unknown_id_is_a_no_op() {
        let (mut ledger, _) = board_with_group(&["A"]);
        assert_eq!(
            stop_session(&mut ledger, SessionId(42), t("12:00")),
            Outcome::NothingChanged
        );
    }

    #[test]
    fn group_run_with_pause_accounts_165_minutes() {
        let (mut ledger, g) = board_with_group(&["A", "B"]);
        pause_group(&mut ledger, g, t("10:00"));
        resume_group(&mut ledger, g, t("10:15"));
        stop_group(&mut ledger, g, t("12:00"), None);

        for s in &ledger.sessions {
            assert_eq!(s.status, SessionStatus::Completed);
            assert_eq!(s.end_time, Some(t("12:00")));
            assert_eq!(s.duration, Some(165));
        }
    }

    #[test]
    fn stop_group_credits_quantity_once_per_action() {
        let (mut ledger, g) = board_with_group(&["A", "B", "C"]);
        stop_group(&mut ledger, g, t("12:00"), Some(40));
        assert_eq!(ledger.quantities.get("Pack"), Some(&40));

        // second stop finds no live member and must not credit again
        stop_group(&mut ledger, g, t("12:05"), Some(40));
        assert_eq!(ledger.quantities.get("Pack"), Some(&40));
    }

    #[test]
    fn individual_stop_leaves_group_siblings_alone() {
        let (mut ledger, _) = board_with_group(&["A", "B"]);
        let a = ledger.sessions[0].id;
        stop_session(&mut ledger, a, t("11:00"));
        assert_eq!(ledger.sessions[0].status, SessionStatus::Completed);
        assert_eq!(ledger.sessions[1].status, SessionStatus::Ongoing);
    }

    #[test]
    fn edit_rejects_end_before_start_without_mutating() {
        let (mut ledger, _) = board_with_group(&["A"]);
        let id = ledger.sessions[0].id;
        stop_session(&mut ledger, id, t("12:00"));

        let err = edit_times(&mut ledger, id, None, Some(t("08:00")));
        assert!(err.is_err());
        assert_eq!(ledger.sessions[0].end_time, Some(t("12:00")));
        assert_eq!(ledger.sessions[0].duration, Some(180));
    }

    #[test]
    fn edit_recomputes_duration() {
        let (mut ledger, _) = board_with_group(&["A"]);
        let id = ledger.sessions[0].id;
        stop_session(&mut ledger, id, t("12:00"));

        let out = edit_times(&mut ledger, id, None, Some(t("13:00"))).unwrap();
        assert_eq!(out, Outcome::Changed(1));
        assert_eq!(ledger.sessions[0].duration, Some(240));
    }
}
