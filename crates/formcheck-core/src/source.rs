//! Field sources
//!
//! A field source hands the validation session the current state of a named
//! field. Anything that can map names to [`FieldDescriptor`]s can act as
//! one; [`FieldSet`] is the ordered, serde-backed implementation used for
//! records loaded from JSON or YAML.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::types::{FieldDescriptor, FieldKind};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Lookup of field descriptors by name
pub trait FieldSource {
    /// The field with this name, if the record has one
    fn field(&self, name: &str) -> Option<&FieldDescriptor>;
}

impl FieldSource for HashMap<String, FieldDescriptor> {
    fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.get(name)
    }
}

impl FieldSource for BTreeMap<String, FieldDescriptor> {
    fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.get(name)
    }
}

impl<S: FieldSource + ?Sized> FieldSource for &S {
    fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        (**self).field(name)
    }
}

/// An ordered collection of fields, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<FieldDescriptor>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing an existing field of the same name in place
    pub fn insert(&mut self, field: FieldDescriptor) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn with(mut self, field: FieldDescriptor) -> Self {
        self.insert(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a field set from a JSON object
    ///
    /// Values may be a string (text field), a number (text field holding its
    /// decimal form), a bool (checkbox), `null` (text field without a value)
    /// or a descriptor object `{ "kind", "value", "checked" }`.
    pub fn from_json(value: &Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

impl FieldSource for FieldSet {
    fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.get(name)
    }
}

impl FromIterator<FieldDescriptor> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Accepted shapes for one record entry
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldEntry {
    Checked(bool),
    Number(serde_json::Number),
    Text(String),
    Detailed(FieldBody),
    Empty(()),
}

#[derive(Deserialize)]
struct FieldBody {
    #[serde(default)]
    kind: FieldKind,
    #[serde(default)]
    value: Option<Scalar>,
    #[serde(default)]
    checked: Option<bool>,
}

/// Descriptor values may be written as numbers in hand-edited records
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl FieldEntry {
    fn into_descriptor(self, name: String) -> FieldDescriptor {
        match self {
            FieldEntry::Checked(checked) => FieldDescriptor::checkbox(name, checked),
            FieldEntry::Number(n) => FieldDescriptor::text(name, n.to_string()),
            FieldEntry::Text(value) => FieldDescriptor::text(name, value),
            FieldEntry::Empty(()) => FieldDescriptor::new(name, FieldKind::Text),
            FieldEntry::Detailed(body) => FieldDescriptor {
                name,
                kind: body.kind,
                value: body.value.map(|v| match v {
                    Scalar::Text(s) => s,
                    Scalar::Number(n) => n.to_string(),
                }),
                checked: body.checked,
            },
        }
    }
}

impl<'de> Deserialize<'de> for FieldSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldSetVisitor;

        impl<'de> Visitor<'de> for FieldSetVisitor {
            type Value = FieldSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to values or field descriptors")
            }

            fn visit_map<A>(self, mut map: A) -> Result<FieldSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = FieldSet::new();
                while let Some(name) = map.next_key::<String>()? {
                    let entry: FieldEntry = map.next_value().map_err(|_| {
                        de::Error::custom(format!("invalid value for field \"{}\"", name))
                    })?;
                    set.insert(entry.into_descriptor(name));
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(FieldSetVisitor)
    }
}

impl Serialize for FieldSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(
                &field.name,
                &SerializedBody {
                    kind: field.kind,
                    value: field.value.as_deref(),
                    checked: field.checked,
                },
            )?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct SerializedBody<'a> {
    kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_shorthand_values() {
        let set = FieldSet::from_json(&json!({
            "name": "Ada",
            "age": 36,
            "terms": true,
            "nickname": null
        }))
        .unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.get("name"), Some(&FieldDescriptor::text("name", "Ada")));
        assert_eq!(set.get("age"), Some(&FieldDescriptor::text("age", "36")));
        assert_eq!(set.get("terms"), Some(&FieldDescriptor::checkbox("terms", true)));
        assert_eq!(
            set.get("nickname"),
            Some(&FieldDescriptor::new("nickname", FieldKind::Text))
        );
    }

    #[test]
    fn test_from_json_descriptor_objects() {
        let set = FieldSet::from_json(&json!({
            "plan": {"kind": "radio", "checked": false},
            "avatar": {"kind": "file", "value": "me.png"},
            "zip": {"value": 8000}
        }))
        .unwrap();

        assert_eq!(set.get("plan"), Some(&FieldDescriptor::radio("plan", false)));
        assert_eq!(set.get("avatar"), Some(&FieldDescriptor::file("avatar", "me.png")));
        assert_eq!(set.get("zip"), Some(&FieldDescriptor::text("zip", "8000")));
    }

    #[test]
    fn test_from_json_collects_every_field() {
        let set = FieldSet::from_json(&json!({"b": "1", "a": "2"})).unwrap();
        let names: Vec<_> = set.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a") && names.contains(&"b"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(FieldSet::from_json(&json!(["a", "b"])).is_err());
        assert!(FieldSet::from_json(&json!("name")).is_err());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut set = FieldSet::new()
            .with(FieldDescriptor::text("a", "1"))
            .with(FieldDescriptor::text("b", "2"));
        set.insert(FieldDescriptor::text("a", "3"));

        let values: Vec<_> = set.iter().map(|f| f.value_or_empty()).collect();
        assert_eq!(values, vec!["3", "2"]);
    }

    #[test]
    fn test_field_source_impls() {
        let mut map = HashMap::new();
        map.insert("email".to_string(), FieldDescriptor::text("email", "a@b"));
        assert_eq!(map.field("email").unwrap().value_or_empty(), "a@b");
        assert!(map.field("missing").is_none());

        let set: FieldSet = vec![FieldDescriptor::checkbox("terms", true)].into_iter().collect();
        let by_ref: &dyn FieldSource = &set;
        assert!(by_ref.field("terms").unwrap().is_checked());
    }

    #[test]
    fn test_serialize_round_trip() {
        let set = FieldSet::new()
            .with(FieldDescriptor::text("name", "Ada"))
            .with(FieldDescriptor::checkbox("terms", false));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["name"]["kind"], "text");
        assert_eq!(json["terms"]["checked"], false);

        let back: FieldSet = serde_json::from_value(json).unwrap();
        assert_eq!(back.get("name"), set.get("name"));
        assert_eq!(back.get("terms"), set.get("terms"));
    }
}
