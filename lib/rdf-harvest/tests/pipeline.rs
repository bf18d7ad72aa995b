#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use assert_fs::prelude::*;
use assert_fs::TempDir;
use rdf_harvest::model::RecordSource;
use rdf_harvest::{extract_file, extract_to_file, HarvestError, HarvestOptions};
use serde_json::{json, Value};
use std::error::Error;

#[allow(clippy::non_ascii_literal)]
const DUMP: &str = r#"<https://example.com/page> <http://schema.org/mainEntity> _:r <https://example.com/page> .
_:r <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Restaurant> <https://example.com/page> .
_:r <http://schema.org/name> "Pizzeria Étoile" <https://example.com/page> .
_:r <http://schema.org/servesCuisine> "Pizza" <https://example.com/page> .
_:r <http://schema.org/servesCuisine> "Pasta" <https://example.com/page> .
this line is broken
_:s <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Restaurant> .
_:s <http://schema.org/name> "Lonely Diner" .
"#;

#[test]
fn extracts_records_from_file() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let input = dir.child("dump.nq");
    input.write_str(DUMP)?;

    let harvest = extract_file(input.path(), &HarvestOptions::default())?;

    assert_eq!(harvest.parse.statements, 7);
    assert_eq!(harvest.parse.failed, 1);
    let records: Vec<_> = harvest
        .extraction
        .records
        .iter()
        .map(|record| (record.id.as_str(), record.source))
        .collect();
    assert_eq!(
        records,
        vec![
            ("https://example.com/page", RecordSource::Parent),
            ("_:s", RecordSource::Standalone),
        ]
    );
    Ok(())
}

#[test]
fn writes_records_as_json_array() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let input = dir.child("dump.nq");
    input.write_str(DUMP)?;
    let output = dir.child("records.json");

    extract_to_file(input.path(), output.path(), &HarvestOptions::default())?;

    let written: Value = serde_json::from_str(&std::fs::read_to_string(output.path())?)?;
    assert_eq!(
        written,
        json!([
            {
                "id": "https://example.com/page",
                "type": "Restaurant",
                "source": "parent",
                "mainEntity": {
                    "type": "Restaurant",
                    "name": "Pizzeria \u{c9}toile",
                    "servesCuisine": ["Pizza", "Pasta"]
                }
            },
            {
                "id": "_:s",
                "type": "Restaurant",
                "source": "standalone",
                "name": "Lonely Diner"
            }
        ])
    );
    Ok(())
}

#[test]
fn missing_input_is_reported() {
    let result = extract_file(
        std::path::Path::new("/nonexistent/dump.nq"),
        &HarvestOptions::default(),
    );
    assert!(matches!(result, Err(HarvestError::Open { .. })));
}
