use super::{day_context, load_ledger, open_store};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::accountant::live_elapsed;
use crate::errors::AppResult;
use crate::models::SessionStatus;
use crate::ui::messages::{info, section};
use crate::utils::formatting::{mins2readable, pad_display};
use crate::utils::time::format_time;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let store = open_store(cfg)?;
    let ledger = load_ledger(&store, cfg, day.date)?;

    section(&format!(
        "Board for {} (as of {})",
        day.date,
        format_time(day.now)
    ));

    if ledger.sessions.is_empty() {
        info("No sessions on the board.");
    } else {
        println!(
            "{} {} {} {} {} {} {}",
            pad_display("ID", 4),
            pad_display("MEMBER", 12),
            pad_display("TASK", 12),
            pad_display("GROUP", 6),
            pad_display("START", 6),
            pad_display("STATE", 10),
            "ELAPSED"
        );

        for s in &ledger.sessions {
            let state = match s.status {
                SessionStatus::Ongoing => "ongoing",
                SessionStatus::Paused => "paused",
                SessionStatus::Completed => "completed",
            };
            println!(
                "{} {} {} {} {} {} {}",
                pad_display(&s.id.to_string(), 4),
                pad_display(&s.member, 12),
                pad_display(&s.task, 12),
                pad_display(&s.group_id.to_string(), 6),
                pad_display(&format_time(s.start_time), 6),
                pad_display(state, 10),
                mins2readable(live_elapsed(s, day.now), true)
            );
        }
    }

    if !ledger.quantities.is_empty() {
        println!();
        section("Quantities");
        for (task, qty) in &ledger.quantities {
            let confirmed = if *qty == 0 && ledger.confirmed_zero_tasks.contains(task) {
                " (zero confirmed)"
            } else {
                ""
            };
            println!("  {} {}{}", pad_display(task, 12), qty, confirmed);
        }
    }

    if !ledger.daily_leave_entries.is_empty() {
        println!();
        section("Leave");
        for e in &ledger.daily_leave_entries {
            println!("  {} {}", pad_display(&e.member, 12), e.kind);
        }
    }

    if !ledger.temporary_workers.is_empty() {
        println!();
        section("Temporary workers");
        println!("  {}", ledger.temporary_workers.join(", "));
    }

    Ok(())
}
