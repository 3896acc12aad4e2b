//! Command line argument parsing for the synsearch CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// synsearch - synonym-aware document search
#[derive(Parser, Debug, Clone)]
#[command(name = "synsearch")]
#[command(about = "Index JSON documents with synonym expansion and search them interactively")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SynsearchArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Synonym dictionary (JSON)
    #[arg(short, long, value_name = "SYNONYMS_FILE", env = "SYNSEARCH_SYNONYMS", global = true)]
    pub synonyms: Option<PathBuf>,

    /// Disable English stemming
    #[arg(long, global = true)]
    pub no_stem: bool,

    /// Output format for command summaries
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SynsearchArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3+=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from a JSON array of documents
    Index(IndexArgs),

    /// Search an index interactively
    Search(SearchArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// JSON file holding an array of documents
    #[arg(value_name = "SOURCE_JSON")]
    pub source: PathBuf,

    /// Directory to write the index into
    #[arg(value_name = "INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Replace an existing index
    #[arg(long)]
    pub force: bool,
}

/// Arguments for an interactive search session
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index directory created by `synsearch index`
    #[arg(value_name = "INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Results per page
    #[arg(short = 'n', long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Pages worth of results fetched by the first search
    #[arg(long, value_name = "FACTOR")]
    pub overfetch: Option<usize>,

    /// Stored field to show for each hit (repeatable, first one heads the line)
    #[arg(short = 'd', long = "display-field", value_name = "FIELD")]
    pub display_fields: Vec<String>,

    /// Expand synonyms in queries as well as in documents
    #[arg(long)]
    pub expand_queries: bool,

    /// Stop browsing on unparsable navigation input instead of asking again
    #[arg(long)]
    pub quit_on_invalid: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
