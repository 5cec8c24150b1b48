pub mod board;
pub mod config;
pub mod edit;
pub mod history;
pub mod init;
pub mod quantity;
pub mod roster;
pub mod save;
pub mod shift_end;
pub mod start;
pub mod tick;
pub mod transition;
pub mod watch;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::DailyLedger;
use crate::store::{Store, log::oplog};
use crate::ui::messages::warning;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};

/// Resolved clock context for one command invocation: the target date and
/// the wall-clock time-of-day, both overridable from the command line so
/// scripted runs and tests are deterministic.
pub struct Day {
    pub date: NaiveDate,
    pub now: NaiveTime,
}

pub fn day_context(cli: &Cli) -> AppResult<Day> {
    let date = match &cli.date {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => date::today(),
    };
    let now = match &cli.at {
        Some(s) => time::parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?,
        None => time::now_minute(),
    };
    Ok(Day { date, now })
}

pub fn open_store(cfg: &Config) -> AppResult<Store> {
    Store::open(&cfg.database)
}

/// Load the live ledger for the date, or start a fresh one.
pub fn load_ledger(store: &Store, cfg: &Config, date: NaiveDate) -> AppResult<DailyLedger> {
    Ok(store.load_ledger(&cfg.namespace, date)?.unwrap_or_default())
}

/// Persist the ledger and record the operation in the internal log.
///
/// A persistence failure is surfaced as a warning, never as a hard error:
/// the board stays available and the next write retries.
pub fn persist(
    store: &Store,
    cfg: &Config,
    date: NaiveDate,
    ledger: &DailyLedger,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    if let Err(e) = store.save_ledger(&cfg.namespace, date, ledger) {
        warning(format!("Could not persist the board: {}", e));
        return Ok(());
    }
    if let Err(e) = oplog(
        &store.conn,
        &cfg.namespace,
        Some(date),
        operation,
        &format!("{}: {}", target, message),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }
    Ok(())
}
