use super::{day_context, load_ledger, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::reconcile::{self, missing_quantities};
use crate::errors::AppResult;
use crate::store::log::oplog;
use crate::ui::messages::{info, success, warning};

/// `save` reconciles the live board into the date's history entry;
/// `missing` previews the missing-quantity warnings without writing.
pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let mut store = open_store(cfg)?;
    let ledger = load_ledger(&store, cfg, day.date)?;

    match cmd {
        Commands::Save => {
            let entry =
                reconcile::reconcile(&mut store, &cfg.namespace, day.date, &ledger, day.now)?;

            if let Err(e) = oplog(
                &store.conn,
                &cfg.namespace,
                Some(day.date),
                "save",
                &format!("reconciled {} session(s)", entry.sessions.len()),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }

            success(format!(
                "Saved {}: {} session(s) in history.",
                day.date,
                entry.sessions.len()
            ));

            for task in missing_quantities(&entry, &cfg.quantity_tasks) {
                warning(format!("Missing quantity for '{}'.", task));
            }
        }
        Commands::Missing => {
            // merge in memory only: same view a save would produce
            let existing = store.load_history(&cfg.namespace, day.date)?;
            let entry = reconcile::merge_entry(existing, &ledger, day.now);

            let missing = missing_quantities(&entry, &cfg.quantity_tasks);
            if missing.is_empty() {
                info("No missing quantities.");
            } else {
                for task in missing {
                    warning(format!("Missing quantity for '{}'.", task));
                }
            }
        }
        _ => {}
    }

    Ok(())
}
