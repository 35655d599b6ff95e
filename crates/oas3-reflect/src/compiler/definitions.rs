use indexmap::{IndexMap, map::IntoIter};
use oas3_reflect_model::Schema;
use serde::Serialize;

/// Named schemas collected during compilation, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Definitions(IndexMap<String, Schema>);

impl Definitions {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Schema> {
    self.0.get(name)
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  /// Stores `schema` under `name`, replacing any previous definition in place.
  pub fn insert(&mut self, name: impl Into<String>, schema: Schema) {
    self.0.insert(name.into(), schema);
  }

  pub fn remove(&mut self, name: &str) -> Option<Schema> {
    self.0.shift_remove(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
    self.0.iter()
  }

  /// Follows a `$ref` node to its definition.
  ///
  /// Returns `None` for inline nodes and for references to unknown names.
  #[must_use]
  pub fn resolve(&self, schema: &Schema) -> Option<&Schema> {
    schema.ref_name().and_then(|name| self.0.get(name))
  }

  /// Copies every definition of `other` into `self`; entries of `other` win on collision.
  pub fn merge(&mut self, other: Definitions) {
    self.0.extend(other.0);
  }

  #[must_use]
  pub fn into_inner(self) -> IndexMap<String, Schema> {
    self.0
  }
}

impl IntoIterator for Definitions {
  type Item = (String, Schema);
  type IntoIter = IntoIter<String, Schema>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}
