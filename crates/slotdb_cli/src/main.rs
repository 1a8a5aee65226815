//! SlotDB CLI
//!
//! Command-line driver for SlotDB stores.
//!
//! # Commands
//!
//! - `create` - Build a store from `<NAME>.csv`
//! - `get`, `add`, `update`, `delete` - Single record operations
//! - `report` - Print the first records of the sorted file
//! - `inspect` - Display store metadata
//! - `shell` - Interactive numbered menu

mod commands;

use clap::{Parser, Subcommand};
use commands::record::RecordArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SlotDB command-line tools.
#[derive(Parser)]
#[command(name = "slotdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a store from NAME.csv
    Create {
        /// Store base name, without extension
        name: PathBuf,
    },

    /// Display the record with the given id
    Get {
        /// Store base name, without extension
        name: PathBuf,

        /// Record id
        id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add a record to the overflow file
    Add(RecordArgs),

    /// Replace the fields of an existing record
    Update(RecordArgs),

    /// Delete the record with the given id
    Delete {
        /// Store base name, without extension
        name: PathBuf,

        /// Record id
        id: String,
    },

    /// Print the first records of the sorted file
    Report {
        /// Store base name, without extension
        name: PathBuf,

        /// Maximum number of records (defaults to 10)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display store metadata
    Inspect {
        /// Store base name, without extension
        name: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run the interactive menu
    Shell,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create { name } => commands::create::run(&name)?,
        Commands::Get { name, id, format } => commands::record::get(&name, &id, &format)?,
        Commands::Add(args) => commands::record::add(&args)?,
        Commands::Update(args) => commands::record::update(&args)?,
        Commands::Delete { name, id } => commands::record::delete(&name, &id)?,
        Commands::Report {
            name,
            limit,
            format,
        } => commands::report::run(&name, limit, &format)?,
        Commands::Inspect { name, format } => commands::inspect::run(&name, &format)?,
        Commands::Shell => commands::shell::run()?,
        Commands::Version => {
            println!("SlotDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("SlotDB Core v{}", slotdb_core::VERSION);
        }
    }

    Ok(())
}
