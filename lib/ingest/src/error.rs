use thiserror::Error;

/// A line that could not be turned into a statement.
///
/// Parse errors are never fatal: the reader counts them and continues with the next line.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseError {
    #[error("Expected at least 3 terms, found {found}.")]
    TooFewTerms { found: usize },
    #[error("The subject {0} is neither a URI nor a blank node.")]
    InvalidSubject(String),
    #[error("The predicate {0} is not a URI.")]
    InvalidPredicate(String),
    #[error("The literal {0} is not terminated.")]
    UnterminatedLiteral(String),
    #[error("Invalid escape sequence \\{0}.")]
    InvalidEscape(String),
}
