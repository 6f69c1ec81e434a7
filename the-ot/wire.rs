//! JSON representation of operations.
//!
//! An operation is an array whose elements are either a positive integer
//! (skip), a non-empty string (insert) or a single-key object `{"d": ...}`
//! holding a count or the deleted text (delete):
//!
//! ```text
//! [3, "hi", 5, {"d": 8}, {"d": "gone"}]
//! ```
//!
//! Decoding only checks the shape of each element. Structural rules (merged
//! skips, no trailing skip, no empty components) are left to
//! [`TextOp::validate`] so raw operations can still be normalized.

use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer,
  de,
  ser::SerializeMap,
};
use serde_json::Value;

use crate::{
  Component,
  Deletion,
  OtError,
  Result,
  Snapshot,
  TextOp,
};

impl TextOp {
  /// Decode an operation from its JSON form.
  pub fn from_value(value: &Value) -> Result<Self> {
    let Value::Array(items) = value else {
      return Err(OtError::MalformedOp);
    };

    items
      .iter()
      .enumerate()
      .map(|(index, item)| component_from_value(index, item))
      .collect::<Result<Vec<_>>>()
      .map(TextOp::from_components)
  }

  pub fn to_value(&self) -> Value {
    Value::Array(self.components().iter().map(component_to_value).collect())
  }
}

fn component_from_value(index: usize, value: &Value) -> Result<Component> {
  decode_component(value).map_err(|reason| OtError::InvalidComponent { index, reason })
}

/// Decode a single component, failing with the reason it was rejected.
fn decode_component(value: &Value) -> std::result::Result<Component, &'static str> {
  let count = |value: &Value, reason: &'static str| {
    value
      .as_u64()
      .and_then(|n| usize::try_from(n).ok())
      .ok_or(reason)
  };

  match value {
    Value::Number(_) => {
      count(value, "skip components must be non-negative integers").map(Component::Skip)
    },
    Value::String(s) => Ok(Component::Insert(s.as_str().into())),
    Value::Object(map) if map.len() == 1 => match map.get("d") {
      Some(Value::String(s)) => Ok(Component::Delete(Deletion::Text(s.as_str().into()))),
      Some(n @ Value::Number(_)) => count(n, "delete counts must be non-negative integers")
        .map(|n| Component::Delete(Deletion::Count(n))),
      _ => Err("delete must be number or string"),
    },
    _ => Err("components must be a number, a string or {d: ...}"),
  }
}

fn component_to_value(component: &Component) -> Value {
  match component {
    Component::Skip(n) => Value::from(*n),
    Component::Insert(s) => Value::from(s.as_str()),
    Component::Delete(Deletion::Count(n)) => serde_json::json!({ "d": n }),
    Component::Delete(Deletion::Text(s)) => serde_json::json!({ "d": s.as_str() }),
  }
}

impl Serialize for Component {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match self {
      Component::Skip(n) => serializer.serialize_u64(*n as u64),
      Component::Insert(s) => serializer.serialize_str(s),
      Component::Delete(deletion) => {
        let mut map = serializer.serialize_map(Some(1))?;
        match deletion {
          Deletion::Count(n) => map.serialize_entry("d", n)?,
          Deletion::Text(s) => map.serialize_entry("d", s.as_str())?,
        }
        map.end()
      },
    }
  }
}

impl<'de> Deserialize<'de> for Component {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    decode_component(&value).map_err(de::Error::custom)
  }
}

impl Serialize for TextOp {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(self.components())
  }
}

impl<'de> Deserialize<'de> for TextOp {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    TextOp::from_value(&value).map_err(de::Error::custom)
  }
}

/// Create a snapshot from initial JSON data. `null` gives an empty document.
pub fn snapshot_from_value<S: Snapshot>(value: &Value) -> Result<S> {
  match value {
    Value::Null => Ok(S::create("")),
    Value::String(s) => Ok(S::create(s)),
    other => {
      Err(OtError::InvalidSnapshot {
        found: value_kind(other),
      })
    },
  }
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

#[cfg(test)]
pub(crate) fn parse(value: Value) -> TextOp {
  TextOp::from_value(&value).expect("test operation should decode")
}
