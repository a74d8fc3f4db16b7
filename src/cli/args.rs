//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render the PG Portal site from category data files
#[derive(Parser, Debug)]
#[command(name = "pgportal")]
#[command(about = "Render the PG Portal site from category data files")]
#[command(version)]
pub struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load every category and write the static site
    Build {
        /// Data source: directory, http(s) URL, or file:// URL
        source: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tab shown when the page opens
        #[arg(long)]
        tab: Option<String>,

        /// Do not copy data/*.json into the output
        #[arg(long)]
        no_copy_data: bool,
    },

    /// Load every category and report what would render
    Check {
        /// Data source: directory, http(s) URL, or file:// URL
        source: Option<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Search card text across all categories
    Search {
        /// Case-insensitive search term
        term: String,

        /// Data source: directory, http(s) URL, or file:// URL
        source: Option<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Serve a directory over HTTP
    Serve {
        /// Path to the generated site or data root
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Show version information
    Version,
}
