use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{LeaveEntry, LeaveKind};
use crate::ui::messages::{info, success};

pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let store = open_store(cfg)?;
    let mut ledger = load_ledger(&store, cfg, day.date)?;

    match cmd {
        Commands::Leave { member, kind } => {
            let kind = LeaveKind::from_code(kind)
                .ok_or_else(|| AppError::InvalidLeaveKind(kind.clone()))?;
            ledger.daily_leave_entries.push(LeaveEntry {
                member: member.clone(),
                kind,
            });

            persist(
                &store,
                cfg,
                day.date,
                &ledger,
                "leave",
                member,
                &format!("recorded {}", kind),
            )?;
            success(format!("Recorded {} for {}.", kind, member));
        }
        Commands::Temp { add, remove } => {
            if let Some(name) = add {
                if ledger.temporary_workers.iter().any(|w| w == name) {
                    info(format!("{} is already on the roster.", name));
                    return Ok(());
                }
                ledger.temporary_workers.push(name.clone());
                persist(
                    &store,
                    cfg,
                    day.date,
                    &ledger,
                    "temp",
                    name,
                    "added to roster",
                )?;
                success(format!("Added temporary worker {}.", name));
            } else if let Some(name) = remove {
                let before = ledger.temporary_workers.len();
                ledger.temporary_workers.retain(|w| w != name);
                if ledger.temporary_workers.len() == before {
                    info(format!("{} is not on the roster.", name));
                    return Ok(());
                }
                persist(
                    &store,
                    cfg,
                    day.date,
                    &ledger,
                    "temp",
                    name,
                    "removed from roster",
                )?;
                success(format!("Removed temporary worker {}.", name));
            } else if ledger.temporary_workers.is_empty() {
                info("No temporary workers on the roster.");
            } else {
                info(format!("Roster: {}", ledger.temporary_workers.join(", ")));
            }
        }
        _ => {}
    }

    Ok(())
}
