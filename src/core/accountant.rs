//! Pure elapsed-time computation over a session's pause list.

use crate::models::{PauseInterval, WorkSession};
use crate::utils::time::minutes_between;
use chrono::NaiveTime;

/// Minutes between `start` and `end`, minus every *closed* pause span.
///
/// Callers must resolve any still-open pause to a concrete end instant
/// before calling; this function performs no resolution. Minute
/// granularity, same-day 24-hour clock, clamped at zero.
pub fn elapsed_minutes(start: NaiveTime, end: NaiveTime, pauses: &[PauseInterval]) -> i64 {
    let span = minutes_between(start, end);
    let paused: i64 = pauses
        .iter()
        .filter_map(|p| p.end.map(|e| minutes_between(p.start, e)))
        .sum();
    (span - paused).max(0)
}

/// Elapsed minutes of a session as of `now`, for live display: an open
/// pause is resolved to `now`, a completed session uses its recorded end.
pub fn live_elapsed(session: &WorkSession, now: NaiveTime) -> i64 {
    let end = session.end_time.unwrap_or(now);
    let mut pauses = session.pauses.clone();
    if let Some(open) = pauses.last_mut().filter(|p| p.is_open()) {
        open.end = Some(now);
    }
    elapsed_minutes(session.start_time, end, &pauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, PauseKind, SessionId};

    fn t(s: &str) -> NaiveTime {
        crate::utils::time::parse_time(s).unwrap()
    }

    fn closed(start: &str, end: &str) -> PauseInterval {
        PauseInterval {
            start: t(start),
            end: Some(t(end)),
            kind: PauseKind::Break,
        }
    }

    #[test]
    fn no_pauses_is_plain_span() {
        assert_eq!(elapsed_minutes(t("09:00"), t("12:00"), &[]), 180);
    }

    #[test]
    fn closed_pauses_are_subtracted() {
        let pauses = vec![closed("10:00", "10:15"), closed("11:00", "11:30")];
        assert_eq!(elapsed_minutes(t("09:00"), t("12:00"), &pauses), 135);
    }

    #[test]
    fn open_pause_is_ignored() {
        let open = PauseInterval::open(t("10:00"), PauseKind::Break);
        assert_eq!(elapsed_minutes(t("09:00"), t("12:00"), &[open]), 180);
    }

    #[test]
    fn never_negative() {
        let pauses = vec![closed("09:00", "13:00")];
        assert_eq!(elapsed_minutes(t("09:00"), t("10:00"), &pauses), 0);
    }

    #[test]
    fn live_elapsed_resolves_open_pause_to_now() {
        let mut s = WorkSession::begin(SessionId(1), GroupId(2), "A", "Pack", t("09:00"));
        s.pauses.push(PauseInterval::open(t("10:00"), PauseKind::Break));
        s.status = crate::models::SessionStatus::Paused;
        // paused since 10:00, read at 10:20 -> 60 worked minutes
        assert_eq!(live_elapsed(&s, t("10:20")), 60);
    }
}
