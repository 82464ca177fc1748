/*
  Best-effort mapping of literals to native scalars. Only numeric
  datatypes are recognised; everything else, including booleans,
  dates and language-tagged strings, is kept as the raw lexical form.
*/

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
  Integer(i64),
  Float(f64),
  String(String),
  List(Vec<PropertyValue>),
}
impl From<&str> for PropertyValue {
  fn from(s: &str) -> Self {
    PropertyValue::String(s.to_string())
  }
}
impl From<i64> for PropertyValue {
  fn from(i: i64) -> Self {
    PropertyValue::Integer(i)
  }
}
impl From<f64> for PropertyValue {
  fn from(f: f64) -> Self {
    PropertyValue::Float(f)
  }
}

/* Datatype matching is by substring on the full datatype IRI.
  A failed parse falls back to the raw value and is never an error. */
pub fn coerce_literal(value: &str, datatype: Option<&str>) -> PropertyValue {
  match datatype {
    Some(dt) if dt.contains("integer") || dt.contains("int") => {
      match value.trim().parse::<i64>() {
        Ok(i) => PropertyValue::Integer(i),
        Err(_) => PropertyValue::String(value.to_string()),
      }
    },
    Some(dt) if dt.contains("float") || dt.contains("double") => {
      /* NaN and the infinities have no json number form */
      match value.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => PropertyValue::Float(f),
        _ => PropertyValue::String(value.to_string()),
      }
    },
    _ => PropertyValue::String(value.to_string()),
  }
}
