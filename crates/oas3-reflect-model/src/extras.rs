use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key/value bag merged flat into a schema's JSON object.
///
/// A key that the schema already writes through one of its own fields is
/// left out of the merged object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras(IndexMap<String, Value>);

impl Extras {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `value` under `key`.
  ///
  /// The first write stores a scalar. A second write to the same key promotes
  /// the stored value to a sequence and every later write appends to it.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    let value = value.into();
    match self.0.entry(key.into()) {
      indexmap::map::Entry::Vacant(entry) => {
        entry.insert(value);
      }
      indexmap::map::Entry::Occupied(mut entry) => match entry.get_mut() {
        Value::Array(values) => values.push(value),
        existing => {
          let previous = existing.take();
          *existing = Value::Array(vec![previous, value]);
        }
      },
    }
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.0.iter()
  }
}

impl<K, V> FromIterator<(K, V)> for Extras
where
  K: Into<String>,
  V: Into<Value>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut extras = Self::new();
    for (key, value) in iter {
      extras.insert(key, value);
    }
    extras
  }
}
