use rdf_harvest_model::{NodeRef, Statement};
use rustc_hash::FxHashMap;

/// A stable handle for a blank node, assigned in order of first appearance during indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNodeId(u32);

impl BlankNodeId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Lookup structures over a fully materialized statement list.
///
/// The index is built in a single pass and read-only afterwards. It answers the two questions the
/// resolver and the extractor ask over and over again in O(1):
/// - which statements have subject `X` (`by_subject`),
/// - which statements point to blank node `B` (`by_blank_object`), i.e. the parents of `B`.
///
/// Statement lists preserve input order, which determines the order of repeated property values.
#[derive(Debug, Default)]
pub struct StatementIndex {
    statements: Vec<Statement>,
    by_subject: FxHashMap<String, Vec<usize>>,
    by_blank_object: FxHashMap<String, Vec<usize>>,
    /// Subjects in order of first appearance.
    subjects: Vec<NodeRef>,
    blank_nodes: FxHashMap<String, BlankNodeId>,
    blank_labels: Vec<String>,
}

impl StatementIndex {
    /// Indexes the given statements.
    pub fn build(statements: Vec<Statement>) -> Self {
        let mut index = Self {
            statements: Vec::new(),
            by_subject: FxHashMap::default(),
            by_blank_object: FxHashMap::default(),
            subjects: Vec::new(),
            blank_nodes: FxHashMap::default(),
            blank_labels: Vec::new(),
        };
        for (position, statement) in statements.iter().enumerate() {
            let subject_key = statement.subject.as_str();
            match index.by_subject.get_mut(subject_key) {
                Some(positions) => positions.push(position),
                None => {
                    index.by_subject.insert(subject_key.to_owned(), vec![position]);
                    index.subjects.push(statement.subject.clone());
                }
            }
            if statement.subject.is_blank_node() {
                index.register_blank_node(subject_key);
            }
            if let Some(label) = statement.object.as_blank_node() {
                index
                    .by_blank_object
                    .entry(label.to_owned())
                    .or_default()
                    .push(position);
                index.register_blank_node(label);
            }
        }
        index.statements = statements;
        index
    }

    fn register_blank_node(&mut self, label: &str) {
        if self.blank_nodes.contains_key(label) {
            return;
        }
        let id = BlankNodeId(u32::try_from(self.blank_labels.len()).unwrap_or(u32::MAX));
        self.blank_nodes.insert(label.to_owned(), id);
        self.blank_labels.push(label.to_owned());
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns all statements with the given subject key, in input order.
    pub fn by_subject<'index>(
        &'index self,
        subject: &str,
    ) -> impl Iterator<Item = &'index Statement> + 'index {
        self.lookup(self.by_subject.get(subject))
    }

    /// Returns all statements whose object is the given blank node, in input order.
    pub fn parents_of<'index>(
        &'index self,
        blank_node: &str,
    ) -> impl Iterator<Item = &'index Statement> + 'index {
        self.lookup(self.by_blank_object.get(blank_node))
    }

    fn lookup<'index>(
        &'index self,
        positions: Option<&'index Vec<usize>>,
    ) -> impl Iterator<Item = &'index Statement> + 'index {
        positions
            .into_iter()
            .flatten()
            .filter_map(|position| self.statements.get(*position))
    }

    /// Returns all subjects in order of first appearance.
    pub fn subjects(&self) -> &[NodeRef] {
        &self.subjects
    }

    /// Returns the URI subjects (the top-level entities) in order of first appearance.
    pub fn top_level_subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects
            .iter()
            .filter(|subject| !subject.is_blank_node())
            .map(NodeRef::as_str)
    }

    pub fn blank_node_id(&self, label: &str) -> Option<BlankNodeId> {
        self.blank_nodes.get(label).copied()
    }

    pub fn blank_node_label(&self, id: BlankNodeId) -> Option<&str> {
        self.blank_labels.get(id.as_usize()).map(String::as_str)
    }

    pub fn blank_node_count(&self) -> usize {
        self.blank_labels.len()
    }
}
