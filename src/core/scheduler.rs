//! Automatic lunch-break pause/resume.
//!
//! Driven by a periodic tick against two wall-clock thresholds. The check is
//! "has the threshold passed" rather than an equality on the exact minute,
//! so a skipped tick around the threshold cannot lose the transition. The
//! per-day flags stored in the ledger make each transition fire exactly once
//! per day no matter how often the tick runs.

use crate::models::{DailyLedger, PauseInterval, PauseKind, SessionStatus};
use chrono::NaiveTime;

pub struct LunchScheduler {
    pub pause_at: NaiveTime,
    pub resume_at: NaiveTime,
}

/// What a tick did, so callers know whether the ledger needs persisting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEffect {
    pub paused: usize,
    pub resumed: usize,
    pub flags_changed: bool,
}

impl TickEffect {
    pub fn changed(&self) -> bool {
        self.paused > 0 || self.resumed > 0 || self.flags_changed
    }
}

impl LunchScheduler {
    pub fn new(pause_at: NaiveTime, resume_at: NaiveTime) -> Self {
        Self { pause_at, resume_at }
    }

    pub fn tick(&self, ledger: &mut DailyLedger, now: NaiveTime) -> TickEffect {
        let mut effect = TickEffect::default();

        // First tick after the whole lunch window already passed (client
        // started late): mark both transitions done without fabricating a
        // zero-width lunch pause on every session.
        if now >= self.resume_at
            && !ledger.lunch_pause_executed
            && !ledger.lunch_resume_executed
        {
            ledger.lunch_pause_executed = true;
            ledger.lunch_resume_executed = true;
            effect.flags_changed = true;
            return effect;
        }

        if now >= self.pause_at && !ledger.lunch_pause_executed {
            ledger.lunch_pause_executed = true;
            effect.flags_changed = true;
            for s in ledger
                .sessions
                .iter_mut()
                .filter(|s| s.status == SessionStatus::Ongoing)
            {
                s.pauses.push(PauseInterval::open(now, PauseKind::Lunch));
                s.status = SessionStatus::Paused;
                effect.paused += 1;
            }
        }

        if now >= self.resume_at && !ledger.lunch_resume_executed {
            ledger.lunch_resume_executed = true;
            effect.flags_changed = true;
            for s in ledger
                .sessions
                .iter_mut()
                .filter(|s| s.status == SessionStatus::Paused)
            {
                // Only close a pause the scheduler opened itself: matched by
                // kind, not merely by position. Manual breaks stay open.
                match s.open_pause_mut() {
                    Some(p) if p.kind == PauseKind::Lunch => {
                        p.end = Some(now);
                        s.status = SessionStatus::Ongoing;
                        effect.resumed += 1;
                    }
                    _ => {}
                }
            }
        }

        effect
    }
}
