use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::reconcile::missing_quantities;
use crate::core::shift;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::time::parse_time;

pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::ShiftEnd { reset } = cmd else {
        return Ok(());
    };

    let day = day_context(cli)?;
    let mut store = open_store(cfg)?;
    let mut ledger = load_ledger(&store, cfg, day.date)?;

    let cutoff = parse_time(&cfg.leave_cutoff_at)
        .ok_or_else(|| AppError::Config(format!("bad leave_cutoff_at: {}", cfg.leave_cutoff_at)))?;

    let entry = shift::close_shift(
        &mut store,
        &cfg.namespace,
        day.date,
        &mut ledger,
        *reset,
        cutoff,
        day.now,
    )?;

    // the cleared/reset board is written immediately, never debounced
    persist(
        &store,
        cfg,
        day.date,
        &ledger,
        "shift-end",
        &day.date.to_string(),
        if *reset {
            "shift ended with reset"
        } else {
            "shift ended"
        },
    )?;

    success(format!(
        "Shift ended for {}: {} session(s) reconciled into history{}.",
        day.date,
        entry.sessions.len(),
        if *reset { ", board reset" } else { "" }
    ));

    for task in missing_quantities(&entry, &cfg.quantity_tasks) {
        warning(format!("Missing quantity for '{}'.", task));
    }

    Ok(())
}
