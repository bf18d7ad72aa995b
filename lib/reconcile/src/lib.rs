//! Post-processing of extracted records.
//!
//! Every stage is a function from an owned list of records to a new list: [dedupe_by_key] keeps
//! the first record per identity, [filter_by_hosts] keeps records belonging to a set of sites and
//! [merge_sources] joins records parsed from dumps with records crawled from the site itself.
//! Records are plain JSON objects ([JsonRecord]) as read back from record files.

mod canonical;
mod dedupe;
mod error;
mod filter;
mod io;
mod merge;
mod record;

pub use canonical::{canonical_url, host_matches, host_of, CanonicalHosts};
pub use dedupe::{dedupe_by_field, dedupe_by_key, dedupe_by_url, field_key};
pub use error::ReconcileError;
pub use filter::{
    composite_key, filter_by_hosts, flatten_parent_item, is_from_allowed_host, FilterOptions,
    FilterOutcome, FilterStats,
};
pub use io::{read_records, write_records};
pub use merge::{merge_record, merge_sources, MergeOptions, MergeOutcome, MergeStats, CRAWL_FIELDS};
pub use record::{
    same_as_urls, string_field, JsonRecord, ITEM_FIELD, SAME_AS_FIELD, SOURCE_FIELD, URL_FIELD,
};
