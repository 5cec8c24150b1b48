use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{Store, log::oplog};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending schema migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
    } else {
        Config::init_all(None, cli.test)?;
    }

    let path = Config::config_file();
    let mut cfg = Config::load();
    if let Some(custom) = &cli.db {
        cfg.database = custom.clone();
    }

    println!("⚙️  Initializing shiftboard…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &cfg.database);

    // opening the store runs all pending migrations
    let store = Store::open(&cfg.database)?;

    println!("✅ Database initialized at {}", &cfg.database);

    if let Err(e) = oplog(
        &store.conn,
        &cfg.namespace,
        None,
        "init",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 shiftboard initialization completed!");
    Ok(())
}
