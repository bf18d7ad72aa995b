use crate::{vocab, PropertyBag};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// The extraction strategy that produced a [BusinessRecord].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// A top-level subject that references a restaurant-typed blank node.
    Parent,
    /// A restaurant-typed blank node without a top-level parent.
    Standalone,
    /// The `item` property of a top-level entity.
    Item,
    /// A top-level subject that is itself restaurant-typed.
    Direct,
}

impl RecordSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordSource::Parent => "parent",
            RecordSource::Standalone => "standalone",
            RecordSource::Item => "item",
            RecordSource::Direct => "direct",
        }
    }
}

impl Display for RecordSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restaurant-like entity reconstructed from the statement graph.
///
/// The `id` is the subject key (or blank-node token, or `<entity>#item`) and is only stable within
/// one extraction run. When serialized, the header fields `id`, `type` and `source` come first and
/// cannot be overridden by properties of the same name.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BusinessRecord {
    pub id: String,
    pub source: RecordSource,
    pub properties: PropertyBag,
}

impl BusinessRecord {
    pub fn new(id: impl Into<String>, source: RecordSource, properties: PropertyBag) -> Self {
        Self {
            id: id.into(),
            source,
            properties,
        }
    }

    pub fn record_type(&self) -> &'static str {
        vocab::RECORD_TYPE
    }
}

const HEADER_FIELDS: [&str; 3] = ["id", "type", "source"];

impl Serialize for BusinessRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", self.record_type())?;
        map.serialize_entry("source", &self.source)?;
        for (key, value) in self.properties.iter() {
            if !HEADER_FIELDS.contains(&key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyValue;
    use serde_json::json;

    #[test]
    fn header_fields_come_first_and_win() {
        let mut properties = PropertyBag::new();
        properties.append("name", "Chez Nous".into());
        properties.append("type", "FoodEstablishment".into());
        properties.append("id", "should not leak".into());
        let record = BusinessRecord::new("http://ex/r1", RecordSource::Direct, properties);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"id": "http://ex/r1", "type": "Restaurant", "source": "direct", "name": "Chez Nous"})
        );
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"http://ex/r1","type":"Restaurant","source":"direct","name":"Chez Nous"}"#
        );
    }

    #[test]
    fn nested_properties_are_serialized() {
        let mut menu = PropertyBag::new();
        menu.append("name", "Lunch".into());
        let mut properties = PropertyBag::new();
        properties.append("hasMenu", PropertyValue::nested(menu));
        let record = BusinessRecord::new("http://ex/p1", RecordSource::Parent, properties);

        assert_eq!(
            serde_json::to_value(&record).unwrap()["hasMenu"],
            json!({"name": "Lunch"})
        );
    }
}
