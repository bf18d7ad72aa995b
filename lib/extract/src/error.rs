use thiserror::Error;

/// A blank-node structure that cannot be turned into a finite tree.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("The blank node {blank_node} is part of a reference cycle.")]
    Cycle { blank_node: String },
    #[error("Resolving the blank node {blank_node} exceeded the maximum nesting depth of {max_depth}.")]
    DepthExceeded { blank_node: String, max_depth: usize },
}
