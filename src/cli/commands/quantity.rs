use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::coordinator::{PersistenceCoordinator, WritePolicy};
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::time::{Duration, Instant};

/// Quantity edits are the high-frequency mutation of the board, so they go
/// through the debounced write policy: inside a long-running driver a burst
/// of edits collapses into one write; a one-shot invocation flushes the
/// pending write before exiting.
pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let mut store = open_store(cfg)?;

    // A quantity entered for a past date corrects the reconciled history
    // entry directly, through the store's field-level partial write.
    if let Commands::Qty { task, count } = cmd
        && day.date < crate::utils::date::today()
    {
        if store.merge_history_quantity(&cfg.namespace, day.date, task, *count)? {
            // a still-stored ledger for that date must carry the correction
            // too, or the next reconciliation of the date would put the old
            // value back (live quantities win the merge)
            if let Some(mut stale) = store.load_ledger(&cfg.namespace, day.date)? {
                stale.quantities.insert(task.clone(), *count);
                store.save_ledger(&cfg.namespace, day.date, &stale)?;
            }
            success(format!(
                "Corrected quantity for '{}' on {} to {}.",
                task, day.date, count
            ));
        } else {
            crate::ui::messages::warning(format!("No history entry for {}.", day.date));
        }
        return Ok(());
    }

    let mut ledger = load_ledger(&store, cfg, day.date)?;

    let now = Instant::now();
    let mut coordinator = PersistenceCoordinator::new(
        Duration::from_millis(cfg.debounce_ms),
        Duration::from_secs(cfg.autosave_minutes * 60),
        now,
    );

    let (operation, target, message) = match cmd {
        Commands::Qty { task, count } => {
            ledger.quantities.insert(task.clone(), *count);
            coordinator.note_mutation(WritePolicy::Debounced, now);
            success(format!("Quantity for '{}' set to {}.", task, count));
            ("qty", task.clone(), format!("quantity set to {}", count))
        }
        Commands::ConfirmZero { task } => {
            ledger.confirmed_zero_tasks.insert(task.clone());
            coordinator.note_mutation(WritePolicy::Debounced, now);
            success(format!("Zero quantity for '{}' confirmed.", task));
            ("confirm-zero", task.clone(), "zero confirmed".to_string())
        }
        _ => return Ok(()),
    };

    // one-shot process: the debounce window cannot elapse on its own
    if coordinator.take_pending_write() {
        persist(&store, cfg, day.date, &ledger, operation, &target, &message)?;
        coordinator.note_ledger_written();
    }

    Ok(())
}
