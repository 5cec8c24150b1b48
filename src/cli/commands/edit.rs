use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::machine;
use crate::errors::AppResult;
use crate::models::SessionId;
use crate::ui::messages::{info, success};
use crate::utils::time::parse_optional_time;

pub fn handle(cli: &Cli, cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Edit { id, start, end } = cmd else {
        return Ok(());
    };

    let day = day_context(cli)?;
    let store = open_store(cfg)?;
    let mut ledger = load_ledger(&store, cfg, day.date)?;

    let start = parse_optional_time(start.as_ref())?;
    let end = parse_optional_time(end.as_ref())?;
    let id = SessionId(*id);

    let outcome = machine::edit_times(&mut ledger, id, start, end)?;
    if !outcome.changed() {
        info(format!("Session {} not found; nothing changed.", id));
        return Ok(());
    }

    persist(
        &store,
        cfg,
        day.date,
        &ledger,
        "edit",
        &id.to_string(),
        "session times corrected",
    )?;

    let s = ledger.session(id).and_then(|s| s.duration);
    success(format!(
        "Session {} updated ({} net minutes).",
        id,
        s.unwrap_or(0)
    ));
    Ok(())
}
