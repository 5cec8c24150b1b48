use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd
        && *print_config
    {
        info(format!("Config file: {}", Config::config_file().display()));
        println!("database:         {}", cfg.database);
        println!("namespace:        {}", cfg.namespace);
        println!("lunch_pause_at:   {}", cfg.lunch_pause_at);
        println!("lunch_resume_at:  {}", cfg.lunch_resume_at);
        println!("leave_cutoff_at:  {}", cfg.leave_cutoff_at);
        println!("debounce_ms:      {}", cfg.debounce_ms);
        println!("autosave_minutes: {}", cfg.autosave_minutes);
        println!("quantity_tasks:   {}", cfg.quantity_tasks.join(", "));
    }
    Ok(())
}
