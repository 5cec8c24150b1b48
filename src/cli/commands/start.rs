use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::machine;
use crate::errors::AppResult;
use crate::models::GroupId;
use crate::ui::messages::{success, warning};
use crate::utils::time::format_time;

pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let store = open_store(cfg)?;
    let mut ledger = load_ledger(&store, cfg, day.date)?;

    match cmd {
        Commands::Start { task, members } => {
            let group = machine::start_group(&mut ledger, members, task, day.now)?;

            persist(
                &store,
                cfg,
                day.date,
                &ledger,
                "start",
                &group.to_string(),
                &format!("{} member(s) started '{}'", members.len(), task),
            )?;

            success(format!(
                "Group {} started on '{}' at {}: {}",
                group,
                task,
                format_time(day.now),
                members.join(", ")
            ));
        }
        Commands::Join {
            group,
            task,
            members,
        } => {
            let group = GroupId(*group);
            let outcome = machine::add_members(&mut ledger, members, task, group, day.now);

            if !outcome.changed() {
                warning(format!("Group {} not found; nothing changed.", group));
                return Ok(());
            }

            persist(
                &store,
                cfg,
                day.date,
                &ledger,
                "join",
                &group.to_string(),
                &format!("{} member(s) joined '{}'", members.len(), task),
            )?;

            success(format!(
                "Added to group {} at {}: {}",
                group,
                format_time(day.now),
                members.join(", ")
            ));
        }
        _ => {}
    }

    Ok(())
}
