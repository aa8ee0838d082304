//! PhenoKG CLI - Command-line interface for converting cohort definitions
//! into RDF/Turtle knowledge graphs.
//!
//! # Commands
//!
//! - `convert` - convert one cohort record to a Turtle document
//! - `validate` - report on a record's required fields without converting it
//! - `batch` - convert every record in a directory concurrently
//! - `config` - show, locate or initialize the configuration file
//!
//! Exit codes: 2 when an input does not exist, 3 when a record is missing
//! or has an invalid `id`/`name`, 1 for other fatal errors.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
