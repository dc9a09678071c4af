use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for eventalert
#[derive(Parser)]
#[command(
    name = "eventalert",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep dated events in SQLite and get an alarm when one is due",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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

    /// Manage the configuration file (view, complete or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Add keys missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create an event
    Add {
        /// Day of the event (YYYY-MM-DD)
        date: String,

        /// Time of the event (HH:MM)
        time: String,

        #[arg(long, help = "Event name")]
        name: String,

        #[arg(long = "desc", help = "Event description")]
        description: Option<String>,

        #[arg(long, help = "Ring an alarm when the event is due")]
        remind: bool,
    },

    /// Change an existing event
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(long, help = "New day (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "New time (HH:MM)")]
        time: Option<String>,

        #[arg(long, conflicts_with = "no_remind")]
        remind: bool,

        #[arg(long = "no-remind")]
        no_remind: bool,
    },

    /// Delete an event by id
    Del {
        id: i64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// List the events of a day, or a single event
    List {
        #[arg(long, help = "Day to show (YYYY-MM-DD, default today)")]
        day: Option<String>,

        #[arg(long, conflicts_with = "day", help = "Show one event by id")]
        id: Option<i64>,
    },

    /// Month grid marking the days that have events
    Calendar {
        #[arg(long, value_name = "YYYY-MM", help = "Month to show (default current)")]
        month: Option<String>,
    },

    /// View or change the alert settings
    Settings {
        #[arg(long = "print", help = "Print the current settings")]
        print: bool,

        #[arg(long, value_name = "HH:MM", help = "Lead time before an event (min 00:15)")]
        lead: Option<String>,

        #[arg(long, value_name = "HH:MM", help = "Time at which a ringing alarm stops")]
        stop: Option<String>,

        #[arg(long = "stop-enabled", value_name = "BOOL", help = "Stop ringing automatically")]
        stop_enabled: Option<bool>,

        #[arg(long, value_name = "NAME", help = "Alarm sound")]
        sound: Option<String>,
    },

    /// Run one reminder check now
    Check {
        #[arg(long, value_name = "DATETIME", help = "Pretend the current time is this")]
        at: Option<String>,

        #[arg(long = "no-alarm", help = "Only notify, do not ring")]
        no_alarm: bool,
    },

    /// Check for due events periodically until Ctrl+C
    Watch,

    /// Ring the alarm for an event now
    Ring { id: i64 },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export events
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (e.g. 2024-01:2024-03)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
