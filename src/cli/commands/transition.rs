use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::machine::{self, Outcome};
use crate::errors::{AppError, AppResult};
use crate::models::{GroupId, SessionId};
use crate::ui::messages::{info, success};
use crate::utils::time::format_time;

/// Shared handler for pause / resume / stop: same target resolution, same
/// persistence policy (immediate write after the mutation).
pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let store = open_store(cfg)?;
    let mut ledger = load_ledger(&store, cfg, day.date)?;

    let (verb, id, group, qty) = match cmd {
        Commands::Pause { id, group } => ("pause", id, group, &None),
        Commands::Resume { id, group } => ("resume", id, group, &None),
        Commands::Stop { id, group, qty } => ("stop", id, group, qty),
        _ => return Ok(()),
    };

    let (outcome, target) = match (id, group) {
        (Some(id), None) => {
            let id = SessionId(*id);
            let out = match verb {
                "pause" => machine::pause_session(&mut ledger, id, day.now),
                "resume" => machine::resume_session(&mut ledger, id, day.now),
                _ => machine::stop_session(&mut ledger, id, day.now),
            };
            (out, format!("session {}", id))
        }
        (None, Some(g)) => {
            let g = GroupId(*g);
            let out = match verb {
                "pause" => machine::pause_group(&mut ledger, g, day.now),
                "resume" => machine::resume_group(&mut ledger, g, day.now),
                _ => machine::stop_group(&mut ledger, g, day.now, *qty),
            };
            (out, format!("group {}", g))
        }
        _ => {
            return Err(AppError::Validation(
                "specify exactly one of --id or --group".into(),
            ));
        }
    };

    match outcome {
        Outcome::NothingChanged => {
            info(format!("Nothing to {} for {}.", verb, target));
            Ok(())
        }
        Outcome::Changed(n) => {
            persist(
                &store,
                cfg,
                day.date,
                &ledger,
                verb,
                &target,
                &format!("{} session(s) at {}", n, format_time(day.now)),
            )?;
            success(format!(
                "{} {} session(s) in {} at {}.",
                past_tense(verb),
                n,
                target,
                format_time(day.now)
            ));
            Ok(())
        }
    }
}

fn past_tense(verb: &str) -> &'static str {
    match verb {
        "pause" => "Paused",
        "resume" => "Resumed",
        _ => "Stopped",
    }
}
