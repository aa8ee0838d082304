//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PhenoKG - Convert cohort definitions into RDF knowledge graphs.
#[derive(Debug, Parser)]
#[command(name = "phenokg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PHENOKG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ontology class index (core_base.json)
    #[arg(long, global = true, env = "PHENOKG_ONTOLOGY")]
    pub ontology: Option<PathBuf>,

    /// Log filter, e.g. `info` or `phenokg_extractor=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert one cohort record to Turtle
    Convert(ConvertArgs),

    /// Check a cohort record's required fields without converting it
    Validate(ValidateArgs),

    /// Convert every record in a directory
    Batch(BatchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the convert command.
#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Cohort record (JSON)
    pub input: PathBuf,

    /// Output file (default: input with a .ttl extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the document to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Omit full-text literals and clinical rules
    #[arg(long)]
    pub minimal: bool,

    /// Base IRI bound to the empty prefix
    #[arg(long)]
    pub base: Option<String>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Cohort record (JSON)
    pub input: PathBuf,

    /// Use the strict validation preset
    #[arg(long, conflicts_with = "permissive")]
    pub strict: bool,

    /// Use the permissive validation preset
    #[arg(long)]
    pub permissive: bool,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// Directory (or single file) of cohort records
    pub input: PathBuf,

    /// Directory outputs are written to
    pub output: PathBuf,

    /// Maximum number of files converted at once
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// How deep to descend into the input directory
    #[arg(long)]
    pub depth: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Action to perform
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
