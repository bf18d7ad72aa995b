use crate::{NodeRef, ObjectValue, BLANK_NODE_PREFIX};
use std::fmt::{Display, Formatter};

/// A single subject-predicate-object fact, optionally tagged with the graph it was published in.
///
/// Statements are created once per input line and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Statement {
    pub subject: NodeRef,
    /// The predicate URI without angle brackets.
    pub predicate: String,
    pub object: ObjectValue,
    /// The named graph, passed through untouched.
    pub graph: Option<String>,
}

impl Statement {
    pub fn new(subject: NodeRef, predicate: impl Into<String>, object: ObjectValue) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            graph: None,
        }
    }

    #[must_use]
    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    pub fn object_is_blank(&self) -> bool {
        self.object.is_blank_node()
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {}", self.subject, self.predicate, self.object)?;
        match &self.graph {
            Some(graph) if graph.starts_with(BLANK_NODE_PREFIX) => write!(f, " {graph}")?,
            Some(graph) => write!(f, " <{graph}>")?,
            None => {}
        }
        f.write_str(" .")
    }
}
