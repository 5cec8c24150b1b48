use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftboard
/// CLI application to run a shift team's daily work-session board with SQLite
#[derive(Parser)]
#[command(
    name = "shiftboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "A work-session board for shift teams: start/pause/stop task sessions, track quantities, reconcile daily history",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Operate on a specific date instead of today (YYYY-MM-DD)
    #[arg(global = true, long = "date")]
    pub date: Option<String>,

    /// Override the wall clock (HH:MM); defaults to the local time
    #[arg(global = true, long = "at")]
    pub at: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Start a task session for one or more members (they form a group)
    Start {
        /// Task type being worked on
        #[arg(long = "task")]
        task: String,

        /// Member names
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Add members to an already running group
    Join {
        /// Group id to join
        #[arg(long = "group")]
        group: u64,

        /// Task type for the new sessions
        #[arg(long = "task")]
        task: String,

        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Pause a session or a whole group
    Pause {
        #[arg(long = "id", conflicts_with = "group")]
        id: Option<u64>,

        #[arg(long = "group")]
        group: Option<u64>,
    },

    /// Resume a paused session or group
    Resume {
        #[arg(long = "id", conflicts_with = "group")]
        id: Option<u64>,

        #[arg(long = "group")]
        group: Option<u64>,
    },

    /// Stop a session or group and record its duration
    Stop {
        #[arg(long = "id", conflicts_with = "group")]
        id: Option<u64>,

        #[arg(long = "group")]
        group: Option<u64>,

        /// Quantity processed, credited once to the group's task
        #[arg(long = "qty", requires = "group")]
        qty: Option<i64>,
    },

    /// Correct the recorded times of a completed session
    Edit {
        #[arg(long = "id")]
        id: u64,

        /// New start time (HH:MM)
        #[arg(long = "start")]
        start: Option<String>,

        /// New end time (HH:MM)
        #[arg(long = "end")]
        end: Option<String>,
    },

    /// Record the processed quantity for a task
    Qty {
        task: String,
        count: i64,
    },

    /// Acknowledge that a task's zero quantity is correct
    ConfirmZero {
        task: String,
    },

    /// Record a leave entry for a member
    Leave {
        member: String,

        /// Leave kind: early-leave, outing, vacation
        #[arg(long = "kind")]
        kind: String,
    },

    /// Manage the temporary-worker roster
    Temp {
        #[arg(long = "add", conflicts_with = "remove")]
        add: Option<String>,

        #[arg(long = "remove")]
        remove: Option<String>,
    },

    /// Show today's board
    Board,

    /// Run one scheduler tick (automatic lunch pause/resume)
    Tick,

    /// Save progress: reconcile the live board into history now
    Save,

    /// End the shift: complete everything, reconcile, clear the board
    ShiftEnd {
        /// Also reset quantities, rosters, flags and apply the leave cutoff
        #[arg(long = "reset")]
        reset: bool,
    },

    /// Show the reconciled history entry for a date
    History,

    /// List tasks with recorded work but no quantity entered
    Missing,

    /// Run the live driver: periodic scheduler ticks and gated auto-save
    Watch {
        /// Tick interval in seconds
        #[arg(long = "interval", default_value_t = 60)]
        interval: u64,
    },
}
