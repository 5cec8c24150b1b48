use super::{day_context, load_ledger, open_store, persist};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::scheduler::LunchScheduler;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::time::{format_time, parse_time};

pub fn scheduler_from(cfg: &Config) -> AppResult<LunchScheduler> {
    let pause_at = parse_time(&cfg.lunch_pause_at)
        .ok_or_else(|| AppError::Config(format!("bad lunch_pause_at: {}", cfg.lunch_pause_at)))?;
    let resume_at = parse_time(&cfg.lunch_resume_at)
        .ok_or_else(|| AppError::Config(format!("bad lunch_resume_at: {}", cfg.lunch_resume_at)))?;
    if pause_at >= resume_at {
        return Err(AppError::Config(
            "lunch_pause_at must be earlier than lunch_resume_at".into(),
        ));
    }
    Ok(LunchScheduler::new(pause_at, resume_at))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let day = day_context(cli)?;
    let store = open_store(cfg)?;
    let mut ledger = load_ledger(&store, cfg, day.date)?;

    let scheduler = scheduler_from(cfg)?;
    let effect = scheduler.tick(&mut ledger, day.now);

    if !effect.changed() {
        info(format!("Tick at {}: nothing due.", format_time(day.now)));
        return Ok(());
    }

    persist(
        &store,
        cfg,
        day.date,
        &ledger,
        "tick",
        "scheduler",
        &format!("paused {}, resumed {}", effect.paused, effect.resumed),
    )?;

    if effect.paused > 0 {
        success(format!(
            "Lunch break: paused {} session(s) at {}.",
            effect.paused,
            format_time(day.now)
        ));
    }
    if effect.resumed > 0 {
        success(format!(
            "Lunch over: resumed {} session(s) at {}.",
            effect.resumed,
            format_time(day.now)
        ));
    }
    if effect.paused == 0 && effect.resumed == 0 {
        info("Lunch window already passed; flags recorded.");
    }

    Ok(())
}
