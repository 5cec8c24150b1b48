use super::{day_context, open_store};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, section};
use crate::utils::formatting::{mins2readable, pad_display};
use crate::utils::time::format_time;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let store = open_store(cfg)?;

    let Some(entry) = store.load_history(&cfg.namespace, day.date)? else {
        info(format!("No history entry for {}.", day.date));
        return Ok(());
    };

    section(&format!("History for {}", day.date));
    println!(
        "{} {} {} {} {} {}",
        pad_display("ID", 4),
        pad_display("MEMBER", 12),
        pad_display("TASK", 12),
        pad_display("START", 6),
        pad_display("END", 6),
        "NET"
    );
    for s in &entry.sessions {
        println!(
            "{} {} {} {} {} {}",
            pad_display(&s.id.to_string(), 4),
            pad_display(&s.member, 12),
            pad_display(&s.task, 12),
            pad_display(&format_time(s.start_time), 6),
            pad_display(&s.end_time.map(format_time).unwrap_or_default(), 6),
            mins2readable(s.duration.unwrap_or(0), true)
        );
    }

    println!();
    section("Minutes by task");
    for (task, mins) in entry.duration_by_task() {
        println!("  {} {}", pad_display(&task, 12), mins2readable(mins, false));
    }

    if !entry.quantities.is_empty() {
        println!();
        section("Quantities");
        for (task, qty) in &entry.quantities {
            println!("  {} {}", pad_display(task, 12), qty);
        }
    }

    if !entry.leave_entries.is_empty() {
        println!();
        section("Leave");
        for e in &entry.leave_entries {
            println!("  {} {}", pad_display(&e.member, 12), e.kind);
        }
    }

    if !entry.temporary_workers.is_empty() {
        println!();
        section("Temporary workers");
        println!("  {}", entry.temporary_workers.join(", "));
    }

    Ok(())
}
