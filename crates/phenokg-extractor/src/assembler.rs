//! Assemble section findings into a Turtle document

use crate::types::{Document, Extraction};
use indexmap::IndexSet;
use phenokg_domain::prefix_block;
use tracing::{debug, warn};

/// Render extractions into a single Turtle document
///
/// Extractions are ordered by section before rendering. Triples are written
/// one per line; exact duplicate lines keep their first occurrence.
pub fn assemble(cohort_id: &str, base_namespace: &str, mut extractions: Vec<Extraction>) -> Document {
    extractions.sort_by_key(Extraction::section);

    let mut lines: IndexSet<String> = IndexSet::new();
    let mut duplicates_dropped = 0;
    for extraction in &extractions {
        for triple in extraction.triples() {
            if !lines.insert(triple.to_string()) {
                duplicates_dropped += 1;
            }
        }
    }

    let mut turtle = prefix_block(base_namespace);
    for line in &lines {
        if has_unterminated_literal(line) {
            warn!(cohort_id = %cohort_id, "Unterminated literal in line: {}", line);
        }
        turtle.push_str(line);
        turtle.push('\n');
    }

    debug!(
        cohort_id = %cohort_id,
        "Assembled {} triples ({} duplicates dropped)",
        lines.len(),
        duplicates_dropped
    );

    Document {
        turtle,
        triple_count: lines.len(),
        duplicates_dropped,
    }
}

/// Whether a line has an odd number of unescaped double quotes
pub fn has_unterminated_literal(line: &str) -> bool {
    let mut quotes = 0usize;
    let mut escaped = false;
    for c in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => quotes += 1,
            _ => {}
        }
    }
    quotes % 2 == 1
}
