use crate::export::ExportFormat;
use crate::models::datum_kind::DatumKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rdatalogger
#[derive(Parser)]
#[command(
    name = "rdatalogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Define data points, log values against them and view weekly timelines using SQLite",
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

    /// Define, list or delete data points
    Datum {
        #[command(subcommand)]
        action: DatumAction,
    },

    /// Log a value against a data point
    Add {
        /// Slug of the data point
        slug: String,

        /// Value to log (omit for TIMESTAMP data points)
        value: Option<String>,

        /// Instant of the value (YYYY-MM-DD HH:MM[:SS]), default now
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// List values logged for a data point
    List {
        /// Slug of the data point
        slug: String,

        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (start:end)"
        )]
        period: Option<String>,
    },

    /// Show the weekly timeline of a TIMESTAMP data point
    Week {
        /// Slug of the data point (default: `default_datum` from config)
        slug: Option<String>,

        /// ISO week number (default: current week)
        #[arg(long, short = 'w')]
        week: Option<u32>,

        /// ISO year of the week (default: current year)
        #[arg(long, short = 'y')]
        year: Option<i32>,

        /// Reference instant for in-progress spans (YYYY-MM-DD HH:MM[:SS]), default now
        #[arg(long = "now")]
        now: Option<String>,

        #[arg(long = "titles", help = "Print the span titles under the grid")]
        titles: bool,

        #[arg(long = "json", help = "Print the week as JSON instead of a grid")]
        json: bool,
    },

    /// Export the weekly timeline of a TIMESTAMP data point
    Export {
        /// Slug of the data point
        slug: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'w')]
        week: Option<u32>,

        #[arg(long, short = 'y')]
        year: Option<i32>,

        #[arg(long = "now")]
        now: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DatumAction {
    /// Define a new data point
    Add {
        /// Display name (max 20 characters)
        name: String,

        #[arg(long, value_enum, default_value = "string")]
        kind: DatumKind,

        #[arg(long)]
        unit: Option<String>,

        /// Display color (#RRGGBB), default from config
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        comment: Option<String>,
    },

    /// List defined data points
    List,

    /// Delete a data point and all its values
    Del {
        slug: String,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },
}
