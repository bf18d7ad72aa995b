use crate::resolver::plain_value;
use crate::{ResolveError, Resolver, ResolverOptions, StatementIndex};
use rdf_harvest_model::vocab::{
    is_restaurant_type, is_type_property, local_name, ITEM_PROPERTY, TYPE_PROPERTY,
};
use rdf_harvest_model::{BusinessRecord, ObjectValue, PropertyBag, PropertyValue, RecordSource};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The order in which the discovery strategies run. Earlier strategies win conflicting ids.
pub const STRATEGY_ORDER: [RecordSource; 4] = [
    RecordSource::Parent,
    RecordSource::Standalone,
    RecordSource::Item,
    RecordSource::Direct,
];

/// How many observed type values are listed when nothing was found.
const LISTED_TYPES: usize = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Log progress every time this many records have been accepted. `0` disables progress logs.
    pub progress_interval: usize,
    pub resolver: ResolverOptions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            progress_interval: 10_000,
            resolver: ResolverOptions::default(),
        }
    }
}

/// Counters describing one extraction run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub parent: usize,
    pub standalone: usize,
    pub item: usize,
    pub direct: usize,
    /// Candidates dropped because an earlier strategy already produced a record with that id.
    pub duplicates: usize,
    /// Restaurant blank nodes that were nested into a parent record.
    pub consumed_blank_nodes: usize,
    /// Entities that could not be resolved (cycles, excessive nesting).
    pub skipped_entities: usize,
    /// All values of type properties with their number of occurrences, most frequent first.
    pub observed_types: Vec<(String, usize)>,
}

impl ExtractionReport {
    pub fn total(&self) -> usize {
        self.parent + self.standalone + self.item + self.direct
    }

    pub fn count(&self, source: RecordSource) -> usize {
        match source {
            RecordSource::Parent => self.parent,
            RecordSource::Standalone => self.standalone,
            RecordSource::Item => self.item,
            RecordSource::Direct => self.direct,
        }
    }

    fn add(&mut self, source: RecordSource, accepted: usize) {
        let counter = match source {
            RecordSource::Parent => &mut self.parent,
            RecordSource::Standalone => &mut self.standalone,
            RecordSource::Item => &mut self.item,
            RecordSource::Direct => &mut self.direct,
        };
        *counter += accepted;
    }
}

/// The records found in one document.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// Records in strategy order, then discovery order.
    pub records: Vec<BusinessRecord>,
    pub report: ExtractionReport,
}

/// Runs all strategies over an index with a fresh resolver.
pub fn extract_entities(index: &StatementIndex, options: ExtractOptions) -> Extraction {
    Extractor::new(index, options).run()
}

/// Finds restaurant-like entities in an indexed document.
///
/// Four strategies run in [STRATEGY_ORDER]:
/// 1. `parent`: a top-level subject referencing a restaurant-typed blank node gets a record that
///    nests the restaurant under the referencing predicate. Such blank nodes are consumed.
/// 2. `standalone`: every restaurant-typed blank node that was not consumed. Nested blank nodes
///    are only expanded one level.
/// 3. `item`: a top-level entity whose `item` property is a restaurant-typed bag yields a record
///    `<id>#item` with the properties of that bag.
/// 4. `direct`: a restaurant-typed top-level subject.
///
/// Candidates are folded into an insertion-ordered set where the first record for an id wins.
pub struct Extractor<'index> {
    resolver: Resolver<'index>,
    options: ExtractOptions,
    top_level: Vec<(String, PropertyBag)>,
    restaurant_blank_nodes: Vec<String>,
    consumed: FxHashSet<String>,
    report: ExtractionReport,
}

impl<'index> Extractor<'index> {
    pub fn new(index: &'index StatementIndex, options: ExtractOptions) -> Self {
        Self {
            resolver: Resolver::new(index, options.resolver),
            options,
            top_level: Vec::new(),
            restaurant_blank_nodes: Vec::new(),
            consumed: FxHashSet::default(),
            report: ExtractionReport::default(),
        }
    }

    pub fn run(mut self) -> Extraction {
        let index = self.resolver.index();
        self.resolve_top_level();
        self.restaurant_blank_nodes = restaurant_blank_nodes(index);
        debug!(
            top_level = self.top_level.len(),
            restaurant_blank_nodes = self.restaurant_blank_nodes.len(),
            "Prepared extraction"
        );

        let mut records = RecordSet::new(self.options.progress_interval);
        for source in STRATEGY_ORDER {
            let candidates = self.discover(source);
            let found = candidates.len();
            let accepted = candidates
                .into_iter()
                .map(|record| records.offer(record))
                .filter(|accepted| *accepted)
                .count();
            self.report.duplicates += found - accepted;
            self.report.add(source, accepted);
            debug!(strategy = %source, found, accepted, "Strategy finished");
        }
        self.report.consumed_blank_nodes = self.consumed.len();
        self.report.observed_types = observed_types(index);

        if records.is_empty() {
            let listed: Vec<String> = self
                .report
                .observed_types
                .iter()
                .take(LISTED_TYPES)
                .map(|(name, count)| format!("{name} ({count})"))
                .collect();
            warn!(
                statements = index.len(),
                types = %listed.join(", "),
                "No restaurant entities found"
            );
        }
        info!(
            records = records.len(),
            parent = self.report.parent,
            standalone = self.report.standalone,
            item = self.report.item,
            direct = self.report.direct,
            "Finished extraction"
        );
        Extraction {
            records: records.into_records(),
            report: self.report,
        }
    }

    fn resolve_top_level(&mut self) {
        let index = self.resolver.index();
        for subject in index.top_level_subjects() {
            match self.resolver.resolve_subject(subject) {
                Ok(bag) => self.top_level.push((subject.to_owned(), bag)),
                Err(error) => skip_entity(&mut self.report, subject, &error),
            }
        }
    }

    fn discover(&mut self, source: RecordSource) -> Vec<BusinessRecord> {
        match source {
            RecordSource::Parent => self.parent_records(),
            RecordSource::Standalone => self.standalone_records(),
            RecordSource::Item => self.item_records(),
            RecordSource::Direct => self.direct_records(),
        }
    }

    fn parent_records(&mut self) -> Vec<BusinessRecord> {
        let index = self.resolver.index();
        let mut records = Vec::new();
        for label in &self.restaurant_blank_nodes {
            let parents: Vec<_> = index
                .parents_of(label)
                .filter(|statement| !statement.subject.is_blank_node())
                .collect();
            if parents.is_empty() {
                continue;
            }
            self.consumed.insert(label.clone());

            let restaurant = match self.resolver.resolve_blank_node(label) {
                Ok(bag) => bag,
                Err(error) => {
                    skip_entity(&mut self.report, label, &error);
                    continue;
                }
            };
            for parent in parents {
                let mut properties = PropertyBag::new();
                properties.append(
                    local_name(&parent.predicate),
                    PropertyValue::Nested(Arc::clone(&restaurant)),
                );
                records.push(BusinessRecord::new(
                    parent.subject.as_str(),
                    RecordSource::Parent,
                    properties,
                ));
            }
        }
        records
    }

    fn standalone_records(&self) -> Vec<BusinessRecord> {
        let index = self.resolver.index();
        self.restaurant_blank_nodes
            .iter()
            .filter(|label| !self.consumed.contains(*label))
            .map(|label| {
                BusinessRecord::new(
                    label.as_str(),
                    RecordSource::Standalone,
                    shallow_bag(index, label),
                )
            })
            .collect()
    }

    fn item_records(&self) -> Vec<BusinessRecord> {
        self.top_level
            .iter()
            .filter_map(|(id, bag)| {
                let item = bag.get(ITEM_PROPERTY)?.as_nested()?;
                has_restaurant_type(item).then(|| {
                    BusinessRecord::new(format!("{id}#item"), RecordSource::Item, item.clone())
                })
            })
            .collect()
    }

    fn direct_records(&mut self) -> Vec<BusinessRecord> {
        // Last strategy, the resolved bags are not needed afterwards.
        std::mem::take(&mut self.top_level)
            .into_iter()
            .filter(|(_, bag)| has_restaurant_type(bag))
            .map(|(id, bag)| BusinessRecord::new(id, RecordSource::Direct, bag))
            .collect()
    }
}

/// Insertion-ordered records where the first record offered for an id wins.
struct RecordSet {
    records: Vec<BusinessRecord>,
    ids: FxHashSet<String>,
    progress_interval: usize,
}

impl RecordSet {
    fn new(progress_interval: usize) -> Self {
        Self {
            records: Vec::new(),
            ids: FxHashSet::default(),
            progress_interval,
        }
    }

    fn offer(&mut self, record: BusinessRecord) -> bool {
        if !self.ids.insert(record.id.clone()) {
            return false;
        }
        self.records.push(record);
        if self.progress_interval > 0 && self.records.len() % self.progress_interval == 0 {
            info!(records = self.records.len(), "Extraction progress");
        }
        true
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn into_records(self) -> Vec<BusinessRecord> {
        self.records
    }
}

fn skip_entity(report: &mut ExtractionReport, entity: &str, error: &ResolveError) {
    warn!(entity, %error, "Skipping unresolvable entity");
    report.skipped_entities += 1;
}

/// Restaurant-typed blank nodes in order of their first type statement.
fn restaurant_blank_nodes(index: &StatementIndex) -> Vec<String> {
    let mut seen = FxHashSet::default();
    index
        .statements()
        .iter()
        .filter(|statement| {
            statement.subject.is_blank_node()
                && is_type_property(local_name(&statement.predicate))
                && is_restaurant_type(statement.object.as_str())
        })
        .filter(|statement| seen.insert(statement.subject.as_str()))
        .map(|statement| statement.subject.as_str().to_owned())
        .collect()
}

/// The properties of a subject with blank-node objects expanded exactly one level deep.
fn shallow_bag(index: &StatementIndex, subject: &str) -> PropertyBag {
    let mut bag = PropertyBag::new();
    for statement in index.by_subject(subject) {
        let name = local_name(&statement.predicate);
        let value = match &statement.object {
            ObjectValue::BlankNode(child) => PropertyValue::nested(
                index
                    .by_subject(child)
                    .map(|nested| {
                        let nested_name = local_name(&nested.predicate);
                        (nested_name, plain_value(nested_name, &nested.object))
                    })
                    .collect(),
            ),
            other => plain_value(name, other),
        };
        bag.append(name, value);
    }
    bag
}

fn has_restaurant_type(bag: &PropertyBag) -> bool {
    bag.get(TYPE_PROPERTY)
        .is_some_and(|types| types.scalars().any(is_restaurant_type))
}

fn observed_types(index: &StatementIndex) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for statement in index.statements() {
        if is_type_property(local_name(&statement.predicate)) {
            *counts.entry(local_name(statement.object.as_str())).or_default() += 1;
        }
    }
    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| (name.to_owned(), count))
        .collect();
    counts.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });
    counts
}
