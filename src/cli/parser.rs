use crate::models::epoch::EpochKind;
use crate::models::view::ViewType;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rtasks
/// CLI planner: schedule tasks on a day or a week and keep them in sync
#[derive(Parser)]
#[command(
    name = "rtasks",
    version = env!("CARGO_PKG_VERSION"),
    about = "A task planner CLI: schedule tasks by day or week against a GraphQL backend, with a local SQLite cache",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the GraphQL endpoint URL
    #[arg(global = true, long = "endpoint")]
    pub endpoint: Option<String>,

    /// Write debug-level diagnostics to the log files
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the local database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log in and store the session token
    Login {
        /// Account name
        username: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show or change the active epoch (ALL, a day, or a week)
    Epoch {
        /// Set the epoch from a token: ALL, DATE.YYYY-MM-DD, WEEK.YYYY-MM-DD
        #[arg(long = "set", conflicts_with_all = ["next", "prev", "kind", "date"])]
        set: Option<String>,

        /// Move to the following day or week
        #[arg(long = "next", conflicts_with = "prev")]
        next: bool,

        /// Move to the previous day or week
        #[arg(long = "prev")]
        prev: bool,

        /// Switch kind: ALL, DATE (today), WEEK (week of the current date)
        #[arg(long = "kind")]
        kind: Option<EpochKind>,

        /// Pick a date (YYYY-MM-DD) inside the current kind
        #[arg(long = "date")]
        date: Option<String>,
    },

    /// List tasks of the active epoch
    List {
        /// Epoch token to list instead of the active one
        #[arg(long = "epoch")]
        epoch: Option<String>,

        /// SCHEDULED (inside the epoch) or PLANNED (on a wider epoch covering it)
        #[arg(long = "view", default_value = "SCHEDULED")]
        view: ViewType,

        /// Bypass the local cache
        #[arg(long = "refresh")]
        refresh: bool,
    },

    /// Show the planning board: planned tasks of the active epoch by schedule kind
    Plan {
        /// Epoch token to plan instead of the active one
        #[arg(long = "epoch")]
        epoch: Option<String>,

        /// Bypass the local cache
        #[arg(long = "refresh")]
        refresh: bool,
    },

    /// Move a task to another board column (DATE, WEEK or ALL)
    Move {
        /// Task id or unique prefix
        id: String,

        /// Target column: the day or week of the active epoch, or ALL
        #[arg(long = "to")]
        to: EpochKind,

        /// Epoch token anchoring the move instead of the active one
        #[arg(long = "epoch")]
        epoch: Option<String>,
    },

    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Estimated cost
        #[arg(long = "cost")]
        cost: Option<String>,

        /// Schedule kind: ALL, DATE or WEEK (default: the active epoch)
        #[arg(long = "schedule")]
        schedule: Option<EpochKind>,

        /// Schedule date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: Option<String>,

        /// Repeat every N weeks
        #[arg(long = "every")]
        every: Option<String>,
    },

    /// Change title, cost or schedule of a task
    Edit {
        /// Task id or unique prefix
        id: String,

        #[arg(long = "title")]
        title: Option<String>,

        /// New cost, or `none` to clear it
        #[arg(long = "cost")]
        cost: Option<String>,

        /// Schedule kind: ALL, DATE or WEEK
        #[arg(long = "schedule")]
        schedule: Option<EpochKind>,

        /// Schedule date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: Option<String>,
    },

    /// Mark a task as completed (or reopen it with --undo)
    Done {
        /// Task id or unique prefix
        id: String,

        /// Completion date (YYYY-MM-DD, default: today)
        #[arg(long = "date", conflicts_with = "undo")]
        date: Option<String>,

        #[arg(long = "undo", help = "Reopen the task")]
        undo: bool,
    },

    /// Delete a task
    Del {
        /// Task id or unique prefix
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Inspect or clear the local query cache
    Cache {
        #[arg(long = "info", help = "Show cached task lists")]
        info: bool,

        #[arg(long = "clear", help = "Drop every cached result")]
        clear: bool,
    },
}
