use std::fmt::{Display, Formatter, Write};

/// The prefix every blank-node token carries in the line format.
pub const BLANK_NODE_PREFIX: &str = "_:";

/// A subject position in a statement: either a URI or a document-local blank node.
///
/// Both variants store the textual key that is used by the statement index. For URIs this is the
/// URI without angle brackets, for blank nodes the full token including the `_:` prefix.
#[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum NodeRef {
    Iri(String),
    BlankNode(String),
}

impl NodeRef {
    /// Creates a [NodeRef] from a raw key, deciding the variant by the blank-node prefix.
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.starts_with(BLANK_NODE_PREFIX) {
            NodeRef::BlankNode(key)
        } else {
            NodeRef::Iri(key)
        }
    }

    /// Returns the key used for indexing this node.
    pub fn as_str(&self) -> &str {
        match self {
            NodeRef::Iri(value) | NodeRef::BlankNode(value) => value,
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, NodeRef::BlankNode(_))
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Iri(iri) => write!(f, "<{iri}>"),
            NodeRef::BlankNode(label) => f.write_str(label),
        }
    }
}

/// The object position of a statement.
///
/// Literals only retain their unescaped lexical value. Language tags and datatypes are accepted by
/// the parser but are not needed by any downstream consumer.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum ObjectValue {
    Iri(String),
    BlankNode(String),
    Literal(String),
}

impl ObjectValue {
    /// Returns the textual content of the object (URI, blank-node token or literal value).
    pub fn as_str(&self) -> &str {
        match self {
            ObjectValue::Iri(value)
            | ObjectValue::BlankNode(value)
            | ObjectValue::Literal(value) => value,
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, ObjectValue::BlankNode(_))
    }

    /// Returns the blank-node token if this object references a blank node.
    pub fn as_blank_node(&self) -> Option<&str> {
        match self {
            ObjectValue::BlankNode(label) => Some(label),
            _ => None,
        }
    }
}

impl From<NodeRef> for ObjectValue {
    fn from(node: NodeRef) -> Self {
        match node {
            NodeRef::Iri(iri) => ObjectValue::Iri(iri),
            NodeRef::BlankNode(label) => ObjectValue::BlankNode(label),
        }
    }
}

impl Display for ObjectValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectValue::Iri(iri) => write!(f, "<{iri}>"),
            ObjectValue::BlankNode(label) => f.write_str(label),
            ObjectValue::Literal(value) => {
                f.write_char('"')?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        c => f.write_char(c)?,
                    }
                }
                f.write_char('"')
            }
        }
    }
}
