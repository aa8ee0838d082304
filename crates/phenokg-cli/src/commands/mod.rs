//! Command implementations.

pub mod batch;
pub mod config;
pub mod convert;
pub mod validate;

pub use self::batch::execute_batch;
pub use self::config::execute_config;
pub use self::convert::execute_convert;
pub use self::validate::execute_validate;

use crate::config::Config;
use crate::error::Result;
use phenokg_extractor::{Extractor, ExtractorConfig};
use phenokg_gatekeeper::ValidationConfig;
use phenokg_ontology::OntologyIndex;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Load the ontology class index
///
/// `--ontology` wins over the configured path. Without either, every class
/// check fails and ontology-gated clinical matches are skipped.
pub fn load_ontology(cli_path: Option<&Path>, config: &Config) -> Arc<OntologyIndex> {
    match cli_path.or(config.settings.ontology_path.as_deref()) {
        Some(path) => Arc::new(OntologyIndex::load_or_empty(path)),
        None => {
            warn!("No ontology index configured, class checks will fail");
            Arc::new(OntologyIndex::empty())
        }
    }
}

/// Build an extractor from the loaded configuration
pub fn build_extractor(
    extractor: ExtractorConfig,
    validation: ValidationConfig,
    ontology: Arc<OntologyIndex>,
) -> Result<Extractor<OntologyIndex>> {
    Ok(Extractor::new(extractor, validation, ontology)?)
}
