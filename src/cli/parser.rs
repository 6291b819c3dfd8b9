use clap::{Parser, Subcommand};

/// Command-line interface definition for catwmigrate
/// CLI application to mirror the catw MySQL database into SQLite
#[derive(Parser)]
#[command(
    name = "catwmigrate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mirror the catw MySQL timesheet database into a local SQLite replica",
    long_about = None
)]
pub struct Cli {
    /// Use an alternate configuration file
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Override the replica path (useful for tests or a scratch copy)
    #[arg(global = true, long = "replica")]
    pub replica: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config directory and a starter configuration file
    Init,

    /// Inspect the loaded configuration
    Config {
        #[arg(long = "print", help = "Print the loaded configuration as YAML")]
        print_config: bool,
    },

    /// Delete the replica file and recreate the empty schema
    Rebuild,

    /// Copy every row of the catw tables from the source into the replica
    Migrate,

    /// Show replica file, row counts and the covered timesheet range
    Status,
}
