use crate::error::HarvestError;
use rdf_harvest_extract::{ExtractOptions, Extraction, Extractor, StatementIndex};
use rdf_harvest_ingest::{read_statements, ParseStats, ReaderOptions};
use rdf_harvest_reconcile::write_records;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Options for all stages of [extract_reader].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestOptions {
    pub reader: ReaderOptions,
    pub extract: ExtractOptions,
}

/// The result of extracting one document.
#[derive(Clone, Debug, Default)]
pub struct Harvest {
    pub parse: ParseStats,
    pub extraction: Extraction,
}

/// Parses a statement dump, indexes it and extracts its records.
pub fn extract_reader(
    reader: impl BufRead,
    options: &HarvestOptions,
) -> Result<Harvest, HarvestError> {
    let document = read_statements(reader, &options.reader)?;
    let index = StatementIndex::build(document.statements);
    info!(
        statements = index.len(),
        subjects = index.subjects().len(),
        blank_nodes = index.blank_node_count(),
        "Indexed statements"
    );
    let extraction = Extractor::new(&index, options.extract).run();
    Ok(Harvest {
        parse: document.stats,
        extraction,
    })
}

/// [extract_reader] over a file.
pub fn extract_file(path: &Path, options: &HarvestOptions) -> Result<Harvest, HarvestError> {
    let file = File::open(path).map_err(|error| HarvestError::Open {
        path: path.to_owned(),
        error,
    })?;
    info!(path = %path.display(), "Reading statements");
    extract_reader(BufReader::new(file), options)
}

/// Extracts the records of `input` and writes them to `output` as a JSON array.
///
/// The output is only written once the whole input has been processed.
pub fn extract_to_file(
    input: &Path,
    output: &Path,
    options: &HarvestOptions,
) -> Result<Harvest, HarvestError> {
    let harvest = extract_file(input, options)?;
    write_records(output, &harvest.extraction.records)?;
    info!(
        path = %output.display(),
        records = harvest.extraction.records.len(),
        "Wrote records"
    );
    Ok(harvest)
}
