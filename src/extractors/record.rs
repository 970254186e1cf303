// src/extractors/record.rs
use crate::extractors::attribute::{TypedAttribute, TypedValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Final metadata mapping handed to the caller.
///
/// Keys keep the order pdfinfo printed them in. A duplicate key overwrites the
/// earlier value but keeps the earlier position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: IndexMap<String, TypedValue>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypedValue)> {
        self.fields.iter()
    }

    pub fn insert(&mut self, attribute: TypedAttribute) -> Option<TypedValue> {
        self.fields.insert(attribute.name, attribute.value)
    }
}

/// Folds attributes left to right; the last value for a name wins.
pub fn build<I>(attributes: I) -> MetadataRecord
where
    I: IntoIterator<Item = TypedAttribute>,
{
    let mut record = MetadataRecord::new();
    for attribute in attributes {
        if let Some(previous) = record.insert(attribute) {
            tracing::trace!("Overwrote duplicate attribute value {:?}", previous);
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn attr(name: &str, n: i64) -> TypedAttribute {
        TypedAttribute {
            name: name.to_string(),
            value: TypedValue::Number(Number::from(n)),
        }
    }

    #[test]
    fn last_write_wins() {
        let record = build(vec![attr("a", 1), attr("b", 2), attr("a", 3)]);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a").and_then(TypedValue::as_i64), Some(3));
        assert_eq!(record.get("b").and_then(TypedValue::as_i64), Some(2));
    }

    #[test]
    fn empty_input_builds_empty_record() {
        let record = build(Vec::new());
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }

    #[test]
    fn serializes_in_first_seen_order() {
        let record = build(vec![attr("pages", 1), attr("title", 2), attr("pages", 5)]);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"pages":5,"title":2}"#);
    }
}
