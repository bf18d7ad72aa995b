use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// A resolved property value.
///
/// A property starts out as a single [PropertyValue::Scalar] or [PropertyValue::Nested] value and
/// is promoted to a [PropertyValue::List] once the same subject provides a second value for it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PropertyValue {
    /// A literal value or a URI.
    Scalar(String),
    /// The resolved property bag of a blank node. Shared between all references to that node.
    Nested(Arc<PropertyBag>),
    /// All values of a repeated predicate, in the order they were observed.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        PropertyValue::Scalar(value.into())
    }

    pub fn nested(bag: PropertyBag) -> Self {
        PropertyValue::Nested(Arc::new(bag))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            PropertyValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&PropertyBag> {
        match self {
            PropertyValue::Nested(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    /// Returns all scalar values, looking one level into lists.
    pub fn scalars(&self) -> impl Iterator<Item = &str> {
        let values: &[PropertyValue] = match self {
            PropertyValue::List(values) => values,
            other => std::slice::from_ref(other),
        };
        values.iter().filter_map(PropertyValue::as_scalar)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Scalar(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<PropertyBag> for PropertyValue {
    fn from(bag: PropertyBag) -> Self {
        PropertyValue::nested(bag)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Scalar(value) => serializer.serialize_str(value),
            PropertyValue::Nested(bag) => PropertyBag::serialize(bag, serializer),
            PropertyValue::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

/// An insertion-ordered mapping from local property names to resolved values.
///
/// Bags are small (a handful of properties per node), so lookups scan the entries.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Adds a value for `key`, applying the scalar-to-list promotion rule.
    ///
    /// The first value is stored as is. A second value turns the property into a list holding both
    /// values, further values are appended to that list.
    pub fn append(&mut self, key: impl Into<String>, value: PropertyValue) {
        let key = key.into();
        let Some(existing) = self.get_mut(&key) else {
            self.entries.push((key, value));
            return;
        };
        match existing {
            PropertyValue::List(values) => values.push(value),
            single => {
                let first = std::mem::replace(single, PropertyValue::List(Vec::new()));
                *single = PropertyValue::List(vec![first, value]);
            }
        }
    }

    /// Sets `key` to `value`, replacing any existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.entries
            .iter_mut()
            .find_map(|(name, value)| (name == key).then_some(value))
    }
}

impl<K: Into<String>> FromIterator<(K, PropertyValue)> for PropertyBag {
    fn from_iter<T: IntoIterator<Item = (K, PropertyValue)>>(iter: T) -> Self {
        let mut bag = PropertyBag::new();
        for (key, value) in iter {
            bag.append(key, value);
        }
        bag
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, PropertyValue);
    type IntoIter = std::vec::IntoIter<(String, PropertyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
