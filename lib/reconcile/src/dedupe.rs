use crate::record::{JsonRecord, URL_FIELD};
use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::debug;

/// Keeps the first record for every distinct key.
///
/// Records for which `key` returns [None] have no comparable identity and are always kept. The
/// relative order of the kept records is unchanged, which makes the operation idempotent.
pub fn dedupe_by_key<T>(records: Vec<T>, mut key: impl FnMut(&T) -> Option<String>) -> Vec<T> {
    let input = records.len();
    let mut seen = FxHashSet::default();
    let kept: Vec<T> = records
        .into_iter()
        .filter(|record| key(record).map_or(true, |key| seen.insert(key)))
        .collect();
    debug!(input, kept = kept.len(), "Deduplicated records");
    kept
}

/// Deduplicates by the value of a top-level field, see [field_key].
pub fn dedupe_by_field(records: Vec<JsonRecord>, field: &str) -> Vec<JsonRecord> {
    dedupe_by_key(records, |record| field_key(record, field))
}

/// Deduplicates by the `url` field.
pub fn dedupe_by_url(records: Vec<JsonRecord>) -> Vec<JsonRecord> {
    dedupe_by_field(records, URL_FIELD)
}

/// The comparable value of a field as compact JSON text, so `1` and `"1"` are different keys.
/// Missing and `null` fields have no key.
pub fn field_key(record: &JsonRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Null => None,
        value => Some(value.to_string()),
    }
}
