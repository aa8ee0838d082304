//! Concurrent conversion of a directory of cohort records

use crate::{BatchConfig, BatchError, BatchMetrics};
use phenokg_domain::ClassLookup;
use phenokg_extractor::{output_path, Extractor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Outcome of one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Input file
    pub input: PathBuf,

    /// Output file, present only when it was written
    pub output: Option<PathBuf>,

    /// Failure message
    pub error: Option<String>,
}

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Aggregate counters
    pub metrics: BatchMetrics,

    /// Per-file outcomes, sorted by input path
    pub files: Vec<FileOutcome>,
}

/// Runs the extractor over many files
///
/// The extractor is shared read-only between workers. A failure or panic
/// while converting one file is counted and never stops the others.
///
/// # Examples
///
/// ```no_run
/// use phenokg_batch::{BatchConfig, BatchRunner};
/// use phenokg_extractor::{Extractor, ExtractorConfig};
/// use phenokg_gatekeeper::ValidationConfig;
/// use phenokg_ontology::OntologyIndex;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ontology = Arc::new(OntologyIndex::load_or_empty("core_base.json"));
///     let extractor = Extractor::new(ExtractorConfig::default(), ValidationConfig::default(), ontology)?;
///     let runner = BatchRunner::new(extractor, BatchConfig::default())?;
///
///     let report = runner.run(Path::new("cohorts"), Path::new("out")).await?;
///     println!("{}", report.metrics.summary());
///     Ok(())
/// }
/// ```
pub struct BatchRunner<O: ClassLookup + 'static> {
    extractor: Arc<Extractor<O>>,
    config: BatchConfig,
}

impl<O: ClassLookup + 'static> BatchRunner<O> {
    /// Create a new runner
    pub fn new(extractor: Extractor<O>, config: BatchConfig) -> Result<Self, BatchError> {
        Self::shared(Arc::new(extractor), config)
    }

    /// Create a runner around an extractor that is already shared
    pub fn shared(extractor: Arc<Extractor<O>>, config: BatchConfig) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::Config)?;
        Ok(Self { extractor, config })
    }

    /// The runner configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Input files under `input`, sorted by path
    ///
    /// A file path is returned as-is; a directory is walked up to
    /// `max_depth` levels for files with the configured extension.
    /// Entries that cannot be read are logged and skipped.
    pub fn discover(&self, input: &Path) -> Result<Vec<PathBuf>, BatchError> {
        if !input.exists() {
            return Err(BatchError::InputNotFound(input.to_path_buf()));
        }
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(input)
            .max_depth(self.config.max_depth)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!(file = %path, "Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Output path for `file`, mirroring its location under `root`
    ///
    /// Files in different subdirectories never share an output.
    pub fn output_for(&self, root: &Path, file: &Path, output_dir: &Path) -> PathBuf {
        let dir = file
            .strip_prefix(root)
            .ok()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| output_dir.join(p))
            .unwrap_or_else(|| output_dir.to_path_buf());
        output_path(file, &dir, &self.config.output_suffix)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.config.extension))
            .unwrap_or(false)
    }

    /// Convert every input file, writing outputs into `output_dir`
    ///
    /// Subdirectories of `input` are recreated under `output_dir`.
    pub async fn run(&self, input: &Path, output_dir: &Path) -> Result<BatchReport, BatchError> {
        let started = Instant::now();
        let files = self.discover(input)?;
        std::fs::create_dir_all(output_dir)?;

        info!(
            "Batch started: {} files, concurrency {}",
            files.len(),
            self.config.max_concurrency
        );

        let mut metrics = BatchMetrics::new();
        metrics.total_files = files.len();

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut tasks = JoinSet::new();

        for file in files {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| BatchError::Worker(e.to_string()))?;
            let extractor = Arc::clone(&self.extractor);
            let output = self.output_for(input, &file, output_dir);

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let result = extractor.extract_file_to(&file, &output);
                (file, output, result)
            });
        }

        let mut outcomes = Vec::with_capacity(metrics.total_files);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((input, output, result)) => {
                    metrics.record(&result);
                    outcomes.push(match result {
                        Ok(_) => FileOutcome {
                            input,
                            output: Some(output),
                            error: None,
                        },
                        Err(e) => {
                            error!(file = %input.display(), "Conversion failed: {}", e);
                            FileOutcome {
                                input,
                                output: None,
                                error: Some(e.to_string()),
                            }
                        }
                    });
                }
                Err(e) => {
                    error!("Worker failed: {}", e);
                    metrics.record_panic();
                }
            }
        }

        outcomes.sort_by(|a, b| a.input.cmp(&b.input));
        metrics.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!("Batch finished:\n{}", metrics.summary());

        Ok(BatchReport {
            metrics,
            files: outcomes,
        })
    }
}
