use super::{load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::coordinator::{PersistenceCoordinator, WritePolicy};
use crate::core::reconcile;
use crate::errors::AppResult;
use crate::models::DailyLedger;
use crate::ui::messages::{info, success, warning};
use crate::utils::{date, time};
use std::time::{Duration, Instant};

/// Long-running driver: one scheduler tick per interval, plus the gated
/// periodic auto-save. The ledger is re-read every tick so edits made by
/// other invocations against the same store are picked up (whole-document
/// read, last full write wins).
///
/// Session transitions are written immediately; a tick that only touched the
/// daily lunch flags is held back through the debounce window and flushed
/// once it elapses.
pub fn handle(_cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Watch { interval } = cmd else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let scheduler = super::tick::scheduler_from(cfg)?;

    let mut coordinator = PersistenceCoordinator::new(
        Duration::from_millis(cfg.debounce_ms),
        Duration::from_secs(cfg.autosave_minutes * 60),
        Instant::now(),
    );

    info(format!(
        "Watching the board (tick every {}s, auto-save every {} min).",
        interval, cfg.autosave_minutes
    ));

    // flags-only mutation waiting out its debounce window
    let mut deferred: Option<DailyLedger> = None;
    let mut last_seen = String::new();
    loop {
        std::thread::sleep(Duration::from_secs(*interval));

        let today = date::today();
        let now = time::now_minute();
        let tick_instant = Instant::now();

        if coordinator.take_due_write(tick_instant)
            && let Some(flushed) = deferred.take()
        {
            persist(
                &store,
                cfg,
                today,
                &flushed,
                "tick",
                "scheduler",
                "lunch flags recorded",
            )?;
            coordinator.note_ledger_written();
            if let Ok(doc) = serde_json::to_string(&flushed) {
                last_seen = doc;
            }
        }

        // an unflushed deferred copy is fresher than the stored document
        let mut ledger = match deferred.clone() {
            Some(l) => l,
            None => match load_ledger(&store, cfg, today) {
                Ok(l) => l,
                Err(e) => {
                    warning(format!("Could not load the board: {}", e));
                    continue;
                }
            },
        };

        // writes from other processes also leave history stale
        if let Ok(doc) = serde_json::to_string(&ledger) {
            if !last_seen.is_empty() && doc != last_seen {
                coordinator.note_ledger_written();
            }
            last_seen = doc;
        }

        let effect = scheduler.tick(&mut ledger, now);
        if effect.paused > 0 || effect.resumed > 0 {
            if coordinator.note_mutation(WritePolicy::Immediate, tick_instant) {
                deferred = None;
                persist(
                    &store,
                    cfg,
                    today,
                    &ledger,
                    "tick",
                    "scheduler",
                    &format!("paused {}, resumed {}", effect.paused, effect.resumed),
                )?;
                coordinator.note_ledger_written();
                if let Ok(doc) = serde_json::to_string(&ledger) {
                    last_seen = doc;
                }
                if effect.paused > 0 {
                    success(format!("Lunch break: paused {} session(s).", effect.paused));
                }
                if effect.resumed > 0 {
                    success(format!("Lunch over: resumed {} session(s).", effect.resumed));
                }
            }
        } else if effect.flags_changed {
            // a tick that only recorded the daily flags can coalesce instead
            // of writing a whole document right away
            coordinator.note_mutation(WritePolicy::Debounced, tick_instant);
            deferred = Some(ledger.clone());
        }

        if coordinator.autosave_due(tick_instant) {
            match reconcile::reconcile(&mut store, &cfg.namespace, today, &ledger, now) {
                Ok(entry) => {
                    coordinator.note_reconciled();
                    info(format!(
                        "Auto-saved {} session(s) into history.",
                        entry.sessions.len()
                    ));
                }
                Err(e) => {
                    // dirty flag stays set; the next period retries
                    warning(format!("Auto-save failed: {}", e));
                }
            }
        }
    }
}
