//! # safari-ld CLI Module
//!
//! This module implements the CLI interface for safari-ld.
//!
//! ## Available Commands
//!
//! - `compose` - Compose the linked-data document for a page
//! - `breadcrumbs` - Resolve the breadcrumb chain for a route
//! - `check` - Compose a page and report diagnostics only
//! - `hash` - Compute the BLAKE3 checksum of a page's document
//! - `config` - Print the effective site configuration

mod commands;

use crate::settings::{DEFAULT_CONFIG_PATH, load_settings};
use clap::{Parser, Subcommand};
use safari_ld_core::SchemaError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// safari-ld - structured metadata for the tour operator site
///
/// Turns page content into schema.org linked-data documents for search and
/// indexing agents.
#[derive(Parser, Debug)]
#[command(name = "safari-ld")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress status messages; only warnings and errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the site settings file
    #[arg(short = 'c', long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose the linked-data document for a page
    Compose {
        /// Page content file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Resolve the breadcrumb chain for a route
    Breadcrumbs {
        /// Site-relative route, e.g. /destinations/northern-serengeti
        #[arg(short, long)]
        path: String,

        /// Title of the page, appended as the final crumb
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Compose a page and report its diagnostics without emitting it
    Check {
        /// Page content file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compute BLAKE3 checksum of a page's document
    Hash {
        /// Page content file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the effective site configuration
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), SchemaError> {
    let config = load_settings(&cli.config)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Compose {
            input,
            output,
            compact,
        } => cmd_compose(&config, json_mode, cli.quiet, &input, output.as_deref(), compact),
        Commands::Breadcrumbs { path, title } => {
            cmd_breadcrumbs(&config, json_mode, &path, title.as_deref())
        }
        Commands::Check { input } => cmd_check(&config, json_mode, &input),
        Commands::Hash { input } => cmd_hash(&config, json_mode, &input),
        Commands::Config => cmd_config(&config, json_mode),
    }
}
