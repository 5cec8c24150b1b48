//! Persistence coordination: when to write the live ledger, and when the
//! periodic auto-save should run a reconciliation.
//!
//! Session-lifecycle mutations are written immediately; high-frequency edits
//! (quantity fields) are coalesced with a trailing-edge debounce modelled as
//! a single cancel-and-restart deadline. A dirty flag tracks "the ledger ran
//! ahead of history" and gates the auto-save so quiet periods never trigger
//! redundant history writes.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Write the whole ledger right after the mutation.
    Immediate,
    /// Coalesce: restart the debounce window, write once it elapses.
    Debounced,
}

#[derive(Debug)]
pub struct PersistenceCoordinator {
    debounce: Duration,
    autosave_every: Duration,
    pending: Option<Instant>,
    dirty: bool,
    last_autosave: Instant,
}

impl PersistenceCoordinator {
    pub fn new(debounce: Duration, autosave_every: Duration, now: Instant) -> Self {
        Self {
            debounce,
            autosave_every,
            pending: None,
            dirty: false,
            last_autosave: now,
        }
    }

    /// Record a mutation. Returns `true` when the caller should write the
    /// ledger now; a debounced mutation instead (re)arms the single pending
    /// deadline, superseding the data of any write already pending.
    pub fn note_mutation(&mut self, policy: WritePolicy, now: Instant) -> bool {
        match policy {
            WritePolicy::Immediate => true,
            WritePolicy::Debounced => {
                self.pending = Some(now + self.debounce);
                false
            }
        }
    }

    /// Consume the pending write if its window has elapsed.
    pub fn take_due_write(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Consume any pending write regardless of its deadline. One-shot
    /// commands call this before exiting so a burst of edits is not lost.
    pub fn take_pending_write(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Every attempted ledger write marks history as stale.
    pub fn note_ledger_written(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Auto-save gate: fires only when the period elapsed *and* something
    /// was written since the last successful reconciliation.
    pub fn autosave_due(&mut self, now: Instant) -> bool {
        if !self.dirty {
            return false;
        }
        if now.duration_since(self.last_autosave) >= self.autosave_every {
            self.last_autosave = now;
            return true;
        }
        false
    }

    /// A reconciliation succeeded; history has caught up.
    pub fn note_reconciled(&mut self) {
        self.dirty = false;
    }
}
