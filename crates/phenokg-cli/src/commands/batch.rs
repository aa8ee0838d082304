//! Batch command implementation.

use super::{build_extractor, load_ontology};
use crate::cli::BatchArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use phenokg_batch::BatchRunner;
use std::path::Path;

/// Execute the batch command.
///
/// Per-file failures are reported but do not fail the command.
pub async fn execute_batch(
    args: BatchArgs,
    config: &Config,
    ontology: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    if !args.input.exists() {
        return Err(CliError::NotFound(args.input));
    }

    let mut batch_config = config.batch.clone();
    if let Some(jobs) = args.jobs {
        batch_config.max_concurrency = jobs;
    }
    if let Some(depth) = args.depth {
        batch_config.max_depth = depth;
    }

    let extractor = build_extractor(
        config.extractor.clone(),
        config.validation.clone(),
        load_ontology(ontology, config),
    )?;
    let runner = BatchRunner::new(extractor, batch_config)?;

    let report = runner.run(&args.input, &args.output).await?;

    let rendered = formatter.format_batch(&report)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_batch_missing_input() {
        let dir = TempDir::new().unwrap();
        let args = BatchArgs {
            input: dir.path().join("missing"),
            output: dir.path().join("out"),
            jobs: None,
            depth: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let err = execute_batch(args, &Config::default(), None, &formatter)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_batch_rejects_zero_jobs() {
        let dir = TempDir::new().unwrap();
        let args = BatchArgs {
            input: dir.path().to_path_buf(),
            output: dir.path().join("out"),
            jobs: Some(0),
            depth: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        assert!(execute_batch(args, &Config::default(), None, &formatter).await.is_err());
    }

    #[tokio::test]
    async fn test_batch_converts_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{"id": 1, "name": "Earliest event of asthma", "concept_sets": []}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("b.json"), "{ broken").unwrap();
        let args = BatchArgs {
            input: dir.path().to_path_buf(),
            output: dir.path().join("out"),
            jobs: Some(2),
            depth: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_batch(args, &Config::default(), None, &formatter)
            .await
            .unwrap();
        assert!(dir.path().join("out").join("a.ttl").exists());
        assert!(!dir.path().join("out").join("b.ttl").exists());
    }
}
