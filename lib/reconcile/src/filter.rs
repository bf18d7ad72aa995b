use crate::canonical::{host_matches, host_of};
use crate::dedupe::dedupe_by_key;
use crate::record::{same_as_urls, string_field, JsonRecord, ITEM_FIELD, SOURCE_FIELD};
use itertools::Itertools;
use serde_json::Value;
use tracing::info;

/// The `source` marker of records produced by the parent strategy.
const PARENT_SOURCE: &str = "parent";

/// Which records survive [filter_by_hosts].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOptions {
    /// Lower-case host names. Subdomains of an allowed host are allowed as well.
    pub allowed_hosts: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            allowed_hosts: vec!["tripadvisor.com".to_owned()],
        }
    }
}

impl FilterOptions {
    pub fn allows_host(&self, host: &str) -> bool {
        self.allowed_hosts
            .iter()
            .any(|allowed| host_matches(host, allowed))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub input: usize,
    /// Parent records whose `item` was merged into the root.
    pub flattened: usize,
    /// Records without a URL on an allowed host.
    pub rejected: usize,
    pub duplicates: usize,
    pub kept: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOutcome {
    pub records: Vec<JsonRecord>,
    pub stats: FilterStats,
}

/// Flattens parent records, keeps those that belong to an allowed host and removes duplicates by
/// their [composite_key].
pub fn filter_by_hosts(records: Vec<JsonRecord>, options: &FilterOptions) -> FilterOutcome {
    let mut stats = FilterStats {
        input: records.len(),
        ..FilterStats::default()
    };

    let allowed: Vec<JsonRecord> = records
        .into_iter()
        .map(|record| {
            let (record, flattened) = flatten_parent_item(record);
            stats.flattened += usize::from(flattened);
            record
        })
        .filter(|record| is_from_allowed_host(record, options))
        .collect();
    stats.rejected = stats.input - allowed.len();

    let records = dedupe_by_key(allowed, composite_key);
    stats.kept = records.len();
    stats.duplicates = stats.input - stats.rejected - stats.kept;

    info!(
        input = stats.input,
        flattened = stats.flattened,
        rejected = stats.rejected,
        duplicates = stats.duplicates,
        kept = stats.kept,
        "Filtered records"
    );
    FilterOutcome { records, stats }
}

/// Merges the `item` object of a parent record into the record itself.
///
/// Fields already present on the root win. The `item` field is removed. Other records are
/// returned unchanged. The flag tells whether the record was flattened.
pub fn flatten_parent_item(mut record: JsonRecord) -> (JsonRecord, bool) {
    if string_field(&record, SOURCE_FIELD) != Some(PARENT_SOURCE)
        || !record.get(ITEM_FIELD).is_some_and(Value::is_object)
    {
        return (record, false);
    }
    let Some(Value::Object(item)) = record.shift_remove(ITEM_FIELD) else {
        return (record, false);
    };
    for (key, value) in item {
        record.entry(key).or_insert(value);
    }
    (record, true)
}

/// Whether the `source` URL or any `sameAs` URL of a record is on an allowed host.
pub fn is_from_allowed_host(record: &JsonRecord, options: &FilterOptions) -> bool {
    string_field(record, SOURCE_FIELD)
        .into_iter()
        .chain(same_as_urls(record))
        .filter_map(host_of)
        .any(|host| options.allows_host(&host))
}

/// The sorted, distinct `sameAs` URLs joined by `|`.
///
/// Records without `sameAs` URLs have no composite key and are never considered duplicates.
pub fn composite_key(record: &JsonRecord) -> Option<String> {
    let urls = same_as_urls(record);
    if urls.is_empty() {
        return None;
    }
    Some(urls.into_iter().sorted().dedup().join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> JsonRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parent_item_is_flattened_with_root_precedence() {
        let (flattened, changed) = flatten_parent_item(record(json!({
            "id": "https://example.com/list",
            "source": "parent",
            "name": "Root",
            "item": {"name": "Item", "telephone": "123"}
        })));
        assert!(changed);
        assert_eq!(
            flattened,
            record(json!({
                "id": "https://example.com/list",
                "source": "parent",
                "name": "Root",
                "telephone": "123"
            }))
        );
    }

    #[test]
    fn only_parent_records_are_flattened() {
        let direct = record(json!({"source": "direct", "item": {"name": "x"}}));
        assert_eq!(flatten_parent_item(direct.clone()), (direct, false));
        let scalar_item = record(json!({"source": "parent", "item": "x"}));
        assert_eq!(flatten_parent_item(scalar_item.clone()), (scalar_item, false));
    }

    #[test]
    fn composite_key_is_order_independent() {
        let a = record(json!({"sameAs": ["https://b.example/", "https://a.example/"]}));
        let b = record(json!({"sameAs": ["https://a.example/", "https://b.example/", "https://a.example/"]}));
        assert_eq!(composite_key(&a), composite_key(&b));
        assert_eq!(
            composite_key(&a).as_deref(),
            Some("https://a.example/|https://b.example/")
        );
        assert_eq!(composite_key(&record(json!({"name": "x"}))), None);
    }

    #[test]
    fn keeps_records_on_allowed_hosts() {
        let options = FilterOptions::default();
        assert!(is_from_allowed_host(
            &record(json!({"sameAs": ["https://facebook.com/x", "https://www.tripadvisor.com/R"]})),
            &options
        ));
        assert!(is_from_allowed_host(
            &record(json!({"source": "https://tripadvisor.com/R"})),
            &options
        ));
        assert!(!is_from_allowed_host(
            &record(json!({"source": "parent", "sameAs": "https://yelp.com/x"})),
            &options
        ));
    }

    #[test]
    fn filters_and_deduplicates() {
        let outcome = filter_by_hosts(
            vec![
                record(json!({"name": "a", "sameAs": "https://www.tripadvisor.com/A"})),
                record(json!({"name": "b", "sameAs": "https://yelp.com/B"})),
                record(json!({"name": "a2", "sameAs": ["https://www.tripadvisor.com/A"]})),
                record(json!({"name": "c", "source": "https://www.tripadvisor.com/C"})),
                record(json!({"name": "d", "source": "https://www.tripadvisor.com/D"})),
            ],
            &FilterOptions::default(),
        );
        let names: Vec<_> = outcome
            .records
            .iter()
            .filter_map(|record| string_field(record, "name"))
            .collect();
        assert_eq!(names, vec!["a", "c", "d"]);
        assert_eq!(
            outcome.stats,
            FilterStats {
                input: 5,
                flattened: 0,
                rejected: 1,
                duplicates: 1,
                kept: 3,
            }
        );
    }
}
