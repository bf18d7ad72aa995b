use crate::{BlankNodeId, ResolveError, StatementIndex};
use rdf_harvest_model::vocab::{local_name, shortens_uri_values};
use rdf_harvest_model::{ObjectValue, PropertyBag, PropertyValue};
use std::sync::Arc;
use tracing::warn;

/// What to do when a blank node (transitively) references itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CyclePolicy {
    /// Abort the resolution of the affected entity with [ResolveError::Cycle].
    #[default]
    Reject,
    /// Replace the back-reference with the blank-node token as a plain value.
    Truncate,
}

/// Bounds for resolving possibly malformed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    pub cycle_policy: CyclePolicy,
    /// The maximum number of nested blank nodes below a resolved subject.
    pub max_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::default(),
            max_depth: 256,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Unresolved,
    InProgress,
    Resolved(Arc<PropertyBag>),
}

/// Turns blank-node references into nested property bags.
///
/// Resolved bags are memoized in an arena indexed by [BlankNodeId]. A blank node that is
/// referenced from several parents is therefore resolved once and every reference shares the very
/// same bag. The arena also tracks which nodes are currently being resolved, which is how cycles
/// are detected.
#[derive(Debug)]
pub struct Resolver<'index> {
    index: &'index StatementIndex,
    options: ResolverOptions,
    slots: Vec<Slot>,
}

impl<'index> Resolver<'index> {
    pub fn new(index: &'index StatementIndex, options: ResolverOptions) -> Self {
        Self {
            index,
            options,
            slots: vec![Slot::Unresolved; index.blank_node_count()],
        }
    }

    pub fn index(&self) -> &'index StatementIndex {
        self.index
    }

    /// Builds the property bag of any subject, resolving nested blank nodes recursively.
    pub fn resolve_subject(&mut self, subject: &str) -> Result<PropertyBag, ResolveError> {
        self.build_bag(subject, 0)
    }

    /// Resolves the object of a statement whose predicate has the given local name.
    ///
    /// Literals resolve to themselves, as do URIs, except that the objects of type-like predicates
    /// are shortened to their local name. Blank nodes resolve to their (shared) property bag.
    pub fn resolve(
        &mut self,
        predicate_local_name: &str,
        object: &ObjectValue,
    ) -> Result<PropertyValue, ResolveError> {
        self.resolve_at(predicate_local_name, object, 0)
    }

    /// Resolves a blank node to its memoized property bag.
    pub fn resolve_blank_node(&mut self, label: &str) -> Result<Arc<PropertyBag>, ResolveError> {
        match self.resolve_blank_node_at(label, 0)? {
            PropertyValue::Nested(bag) => Ok(bag),
            _ => Err(ResolveError::Cycle {
                blank_node: label.to_owned(),
            }),
        }
    }

    fn resolve_at(
        &mut self,
        predicate_local_name: &str,
        object: &ObjectValue,
        depth: usize,
    ) -> Result<PropertyValue, ResolveError> {
        match object {
            ObjectValue::BlankNode(label) => self.resolve_blank_node_at(label, depth),
            other => Ok(plain_value(predicate_local_name, other)),
        }
    }

    fn resolve_blank_node_at(
        &mut self,
        label: &str,
        depth: usize,
    ) -> Result<PropertyValue, ResolveError> {
        let Some(id) = self.index.blank_node_id(label) else {
            return Ok(PropertyValue::nested(PropertyBag::new()));
        };
        match self.slot(id) {
            Slot::Resolved(bag) => return Ok(PropertyValue::Nested(Arc::clone(bag))),
            Slot::InProgress => return self.on_cycle(label),
            Slot::Unresolved => {}
        }
        if depth > self.options.max_depth {
            return Err(ResolveError::DepthExceeded {
                blank_node: label.to_owned(),
                max_depth: self.options.max_depth,
            });
        }

        self.set_slot(id, Slot::InProgress);
        match self.build_bag(label, depth) {
            Ok(bag) => {
                let bag = Arc::new(bag);
                self.set_slot(id, Slot::Resolved(Arc::clone(&bag)));
                Ok(PropertyValue::Nested(bag))
            }
            Err(error) => {
                self.set_slot(id, Slot::Unresolved);
                Err(error)
            }
        }
    }

    fn build_bag(&mut self, subject: &str, depth: usize) -> Result<PropertyBag, ResolveError> {
        let index = self.index;
        let mut bag = PropertyBag::new();
        for statement in index.by_subject(subject) {
            let name = local_name(&statement.predicate);
            let value = self.resolve_at(name, &statement.object, depth + 1)?;
            bag.append(name, value);
        }
        Ok(bag)
    }

    fn on_cycle(&self, label: &str) -> Result<PropertyValue, ResolveError> {
        match self.options.cycle_policy {
            CyclePolicy::Reject => Err(ResolveError::Cycle {
                blank_node: label.to_owned(),
            }),
            CyclePolicy::Truncate => {
                warn!(blank_node = label, "Truncating cyclic blank node reference");
                Ok(PropertyValue::scalar(label))
            }
        }
    }

    fn slot(&self, id: BlankNodeId) -> &Slot {
        self.slots.get(id.as_usize()).unwrap_or(&Slot::Unresolved)
    }

    fn set_slot(&mut self, id: BlankNodeId, slot: Slot) {
        if let Some(target) = self.slots.get_mut(id.as_usize()) {
            *target = slot;
        }
    }
}

/// The value of a non-blank object.
pub(crate) fn plain_value(predicate_local_name: &str, object: &ObjectValue) -> PropertyValue {
    match object {
        ObjectValue::Iri(iri) if shortens_uri_values(predicate_local_name) => {
            PropertyValue::scalar(local_name(iri))
        }
        other => PropertyValue::scalar(other.as_str()),
    }
}
