#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use rdf_harvest_extract::{
    extract_entities, CyclePolicy, ExtractOptions, Extraction, ResolverOptions, StatementIndex,
};
use rdf_harvest_ingest::{read_statements, ReaderOptions};
use rdf_harvest_model::{PropertyValue, RecordSource};
use serde_json::json;
use std::error::Error;
use std::io::Cursor;

fn extract(dump: &str, options: ExtractOptions) -> Result<Extraction, Box<dyn Error>> {
    let document = read_statements(Cursor::new(dump), &ReaderOptions::default())?;
    let index = StatementIndex::build(document.statements);
    Ok(extract_entities(&index, options))
}

#[test]
fn direct_record_has_only_header_fields() -> Result<(), Box<dyn Error>> {
    let extraction = extract(
        "<http://ex/r1> <http://schema.org/type> <http://schema.org/Restaurant> .\n",
        ExtractOptions::default(),
    )?;

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(
        serde_json::to_string(&extraction.records[0])?,
        r#"{"id":"http://ex/r1","type":"Restaurant","source":"direct"}"#
    );
    assert_eq!(extraction.report.direct, 1);
    assert_eq!(extraction.report.total(), 1);
    Ok(())
}

#[test]
fn referenced_restaurant_is_nested_into_parent() -> Result<(), Box<dyn Error>> {
    let dump = r#"_:b1 <http://schema.org/type> <http://schema.org/Restaurant> .
_:b1 <http://schema.org/name> "Da Mario" .
<http://ex/p1> <http://schema.org/hasMenu> _:b1 .
"#;
    let extraction = extract(dump, ExtractOptions::default())?;

    assert_eq!(extraction.records.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.id, "http://ex/p1");
    assert_eq!(record.source, RecordSource::Parent);
    assert_eq!(
        serde_json::to_value(record)?,
        json!({
            "id": "http://ex/p1",
            "type": "Restaurant",
            "source": "parent",
            "hasMenu": {"type": "Restaurant", "name": "Da Mario"}
        })
    );
    assert_eq!(extraction.report.standalone, 0);
    assert_eq!(extraction.report.consumed_blank_nodes, 1);
    Ok(())
}

#[test]
fn blank_node_with_only_blank_parents_stays_standalone() -> Result<(), Box<dyn Error>> {
    let dump = r#"_:outer <http://schema.org/contains> _:r .
_:r <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/FastFoodRestaurant> .
_:r <http://schema.org/name> "Burger Barn" .
_:r <http://schema.org/address> _:addr .
_:addr <http://schema.org/streetAddress> "Main St 1" .
_:addr <http://schema.org/geo> _:geo .
_:geo <http://schema.org/latitude> "47.1" .
"#;
    let extraction = extract(dump, ExtractOptions::default())?;

    assert_eq!(extraction.records.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.id, "_:r");
    assert_eq!(record.source, RecordSource::Standalone);
    // Only one level of nesting is expanded for standalone records.
    assert_eq!(
        serde_json::to_value(record)?,
        json!({
            "id": "_:r",
            "type": "Restaurant",
            "source": "standalone",
            "name": "Burger Barn",
            "address": {"streetAddress": "Main St 1", "geo": "_:geo"}
        })
    );
    Ok(())
}

#[test]
fn item_property_yields_item_record() -> Result<(), Box<dyn Error>> {
    let dump = r#"<http://ex/list> <http://schema.org/type> <http://schema.org/ListItem> .
<http://ex/list> <http://schema.org/item> _:i .
_:i <http://schema.org/type> <http://schema.org/Restaurant> .
_:i <http://schema.org/name> "Osteria" .
<http://ex/other> <http://schema.org/item> _:x .
_:x <http://schema.org/type> <http://schema.org/Hotel> .
"#;
    let extraction = extract(dump, ExtractOptions::default())?;

    let ids: Vec<_> = extraction
        .records
        .iter()
        .map(|record| (record.id.as_str(), record.source))
        .collect();
    // `_:i` has a top-level parent and is therefore also reported by the parent strategy.
    assert_eq!(
        ids,
        vec![
            ("http://ex/list", RecordSource::Parent),
            ("http://ex/list#item", RecordSource::Item),
        ]
    );
    assert_eq!(
        extraction.records[1].properties.get("name"),
        Some(&PropertyValue::scalar("Osteria"))
    );
    Ok(())
}

#[test]
fn earlier_strategies_win_conflicting_ids() -> Result<(), Box<dyn Error>> {
    let dump = r#"<http://ex/r> <http://schema.org/type> <http://schema.org/Restaurant> .
<http://ex/r> <http://schema.org/department> _:d .
_:d <http://schema.org/type> <http://schema.org/Restaurant> .
_:d <http://schema.org/name> "Bar" .
<http://ex/s> <http://schema.org/type> <http://schema.org/Restaurant> .
"#;
    let extraction = extract(dump, ExtractOptions::default())?;

    let ids: Vec<_> = extraction
        .records
        .iter()
        .map(|record| (record.id.as_str(), record.source))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("http://ex/r", RecordSource::Parent),
            ("http://ex/s", RecordSource::Direct),
        ]
    );
    assert_eq!(extraction.report.duplicates, 1);
    Ok(())
}

#[test]
fn no_restaurants_reports_observed_types() -> Result<(), Box<dyn Error>> {
    let dump = r#"<http://ex/a> <http://schema.org/type> <http://schema.org/Hotel> .
<http://ex/b> <http://schema.org/type> <http://schema.org/Hotel> .
<http://ex/c> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Bakery> .
"#;
    let extraction = extract(dump, ExtractOptions::default())?;

    assert!(extraction.records.is_empty());
    assert_eq!(
        extraction.report.observed_types,
        vec![("Hotel".to_owned(), 2), ("Bakery".to_owned(), 1)]
    );
    Ok(())
}

#[test]
fn cyclic_entities_are_skipped_or_truncated() -> Result<(), Box<dyn Error>> {
    let dump = r#"<http://ex/r> <http://schema.org/type> <http://schema.org/Restaurant> .
<http://ex/r> <http://schema.org/knows> _:a .
_:a <http://schema.org/knows> _:b .
_:b <http://schema.org/knows> _:a .
"#;
    let rejected = extract(dump, ExtractOptions::default())?;
    assert!(rejected.records.is_empty());
    assert_eq!(rejected.report.skipped_entities, 1);

    let options = ExtractOptions {
        resolver: ResolverOptions {
            cycle_policy: CyclePolicy::Truncate,
            ..ResolverOptions::default()
        },
        ..ExtractOptions::default()
    };
    let truncated = extract(dump, options)?;
    assert_eq!(truncated.records.len(), 1);
    assert_eq!(truncated.report.skipped_entities, 0);
    Ok(())
}

#[test]
fn repeated_values_become_lists() -> Result<(), Box<dyn Error>> {
    let dump = r#"<http://ex/r> <http://schema.org/type> <http://schema.org/Restaurant> .
<http://ex/r> <http://schema.org/servesCuisine> "Italian" .
<http://ex/r> <http://schema.org/servesCuisine> "Pizza" .
"#;
    let extraction = extract(dump, ExtractOptions::default())?;

    assert_eq!(
        serde_json::to_value(&extraction.records[0])?["servesCuisine"],
        json!(["Italian", "Pizza"])
    );
    Ok(())
}
