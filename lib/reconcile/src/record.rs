use serde_json::{Map, Value};

/// A record as read back from a record file. Field order is the order of the file.
pub type JsonRecord = Map<String, Value>;

pub const URL_FIELD: &str = "url";
pub const SAME_AS_FIELD: &str = "sameAs";
pub const SOURCE_FIELD: &str = "source";
pub const ITEM_FIELD: &str = "item";

/// The string value of a field, if the field is a string.
pub fn string_field<'record>(record: &'record JsonRecord, field: &str) -> Option<&'record str> {
    record.get(field).and_then(Value::as_str)
}

/// The `sameAs` URLs of a record. The field may hold a single string or an array of strings;
/// anything else is ignored.
pub fn same_as_urls(record: &JsonRecord) -> Vec<&str> {
    match record.get(SAME_AS_FIELD) {
        Some(Value::String(url)) => vec![url.as_str()],
        Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
