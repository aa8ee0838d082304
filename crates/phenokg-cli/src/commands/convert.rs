//! Convert command implementation.

use super::{build_extractor, load_ontology};
use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use phenokg_extractor::ExtractorConfig;
use std::path::{Path, PathBuf};
use tracing::error;

/// Execute the convert command.
///
/// A missing input or a critically invalid record is an error. Any other
/// conversion failure is logged and the command still succeeds, with no
/// output written.
pub async fn execute_convert(
    args: ConvertArgs,
    config: &Config,
    ontology: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    if !args.input.is_file() {
        return Err(CliError::NotFound(args.input));
    }

    let mut extractor_config = if args.minimal {
        ExtractorConfig {
            base_namespace: config.extractor.base_namespace.clone(),
            max_field_length: config.extractor.max_field_length,
            ..ExtractorConfig::minimal()
        }
    } else {
        config.extractor.clone()
    };
    if let Some(base) = args.base {
        extractor_config.base_namespace = base;
    }

    let extractor = build_extractor(
        extractor_config,
        config.validation.clone(),
        load_ontology(ontology, config),
    )?;

    let written = if args.stdout {
        None
    } else {
        Some(args.output.clone().unwrap_or_else(|| default_output(&args.input)))
    };

    let result = match &written {
        Some(output) => extractor.extract_file_to(&args.input, output),
        None => extractor.extract_file(&args.input),
    };

    match result {
        Ok(output) => {
            if written.is_none() {
                print!("{}", output.document.turtle);
            } else {
                let rendered = formatter.format_conversion(&output, written.as_deref())?;
                if !rendered.is_empty() {
                    println!("{}", rendered);
                }
            }
            Ok(())
        }
        Err(e) if e.is_critical() => Err(e.into()),
        Err(e) => {
            error!(file = %args.input.display(), "No output written: {}", e);
            eprintln!("{}", formatter.error(&format!("{}: {}", args.input.display(), e)));
            Ok(())
        }
    }
}

/// Output path next to the input, with a `.ttl` extension
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("ttl")
}
