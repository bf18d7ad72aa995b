use crate::canonical::{canonical_url, host_of, CanonicalHosts};
use crate::record::{same_as_urls, string_field, JsonRecord, URL_FIELD};
use rustc_hash::FxHashMap;
use tracing::info;

/// Fields taken from the crawled record when it has a non-null value for them.
pub const CRAWL_FIELDS: [&str; 3] = ["aggregateRating", "address", "priceRange"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOptions {
    pub hosts: CanonicalHosts,
    /// Parsed-only records with a `sameAs` URL on this host are reported as missing a crawl.
    pub target_host: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        let hosts = CanonicalHosts::default();
        Self {
            target_host: hosts.preferred.clone(),
            hosts,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub parsed: usize,
    pub crawled: usize,
    pub merged: usize,
    pub crawl_only: usize,
    pub parsed_only: usize,
    pub missing_crawl: usize,
}

/// The four partitions produced by [merge_sources].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
    /// One record per crawled record that matched a parsed record.
    pub merged: Vec<JsonRecord>,
    /// Crawled records without a matching parsed record.
    pub crawl_only: Vec<JsonRecord>,
    /// Parsed records that no crawled record matched.
    pub parsed_only: Vec<JsonRecord>,
    /// The parsed-only records that point at the target host.
    pub missing_crawl: Vec<JsonRecord>,
    pub stats: MergeStats,
}

/// Joins parsed records with crawled records.
///
/// Parsed records are indexed by the canonical form of each of their `sameAs` URLs; if several
/// parsed records share a URL, the first one wins. A crawled record matches by the canonical form
/// of its `url`. The merged record is the parsed record with the [CRAWL_FIELDS] of the crawled
/// record applied on top.
pub fn merge_sources(
    parsed: Vec<JsonRecord>,
    crawled: Vec<JsonRecord>,
    options: &MergeOptions,
) -> MergeOutcome {
    let mut stats = MergeStats {
        parsed: parsed.len(),
        crawled: crawled.len(),
        ..MergeStats::default()
    };

    let mut by_same_as: FxHashMap<String, usize> = FxHashMap::default();
    for (position, record) in parsed.iter().enumerate() {
        for url in same_as_urls(record) {
            if let Some(key) = canonical_url(url, &options.hosts) {
                by_same_as.entry(key).or_insert(position);
            }
        }
    }

    let mut matched = vec![false; parsed.len()];
    let mut merged = Vec::new();
    let mut crawl_only = Vec::new();
    for crawl in crawled {
        let base = string_field(&crawl, URL_FIELD)
            .and_then(|url| canonical_url(url, &options.hosts))
            .and_then(|key| by_same_as.get(&key).copied())
            .and_then(|position| Some((position, parsed.get(position)?)));
        match base {
            Some((position, base)) => {
                if let Some(flag) = matched.get_mut(position) {
                    *flag = true;
                }
                merged.push(merge_record(base, &crawl));
            }
            None => crawl_only.push(crawl),
        }
    }

    let parsed_only: Vec<JsonRecord> = parsed
        .into_iter()
        .zip(matched)
        .filter_map(|(record, matched)| (!matched).then_some(record))
        .collect();
    let missing_crawl: Vec<JsonRecord> = parsed_only
        .iter()
        .filter(|record| points_at_host(record, &options.target_host, &options.hosts))
        .cloned()
        .collect();

    stats.merged = merged.len();
    stats.crawl_only = crawl_only.len();
    stats.parsed_only = parsed_only.len();
    stats.missing_crawl = missing_crawl.len();
    info!(
        parsed = stats.parsed,
        crawled = stats.crawled,
        merged = stats.merged,
        crawl_only = stats.crawl_only,
        parsed_only = stats.parsed_only,
        missing_crawl = stats.missing_crawl,
        "Merged sources"
    );
    MergeOutcome {
        merged,
        crawl_only,
        parsed_only,
        missing_crawl,
        stats,
    }
}

/// The parsed record with the non-null [CRAWL_FIELDS] of the crawled record.
pub fn merge_record(parsed: &JsonRecord, crawl: &JsonRecord) -> JsonRecord {
    let mut merged = parsed.clone();
    for field in CRAWL_FIELDS {
        if let Some(value) = crawl.get(field).filter(|value| !value.is_null()) {
            merged.insert(field.to_owned(), value.clone());
        }
    }
    merged
}

fn points_at_host(record: &JsonRecord, target_host: &str, hosts: &CanonicalHosts) -> bool {
    let target = hosts.canonical_host(target_host);
    same_as_urls(record)
        .into_iter()
        .filter_map(host_of)
        .any(|host| hosts.canonical_host(&host).eq_ignore_ascii_case(target))
}
