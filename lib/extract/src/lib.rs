//! Reconstruction of restaurant entities from a flat list of statements.
//!
//! The statements are first indexed ([StatementIndex]), then blank-node references are resolved
//! into nested property bags ([Resolver]) and finally the [Extractor] runs its discovery
//! strategies over the resolved graph.

mod error;
mod extractor;
mod index;
mod resolver;

pub use error::ResolveError;
pub use extractor::{
    extract_entities, Extraction, ExtractionReport, ExtractOptions, Extractor, STRATEGY_ORDER,
};
pub use index::{BlankNodeId, StatementIndex};
pub use resolver::{CyclePolicy, Resolver, ResolverOptions};
