use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::Error as _};
use serde_json::{Number, Value};
use strum::{AsRefStr, Display, EnumString};

use crate::{document::ExternalDocs, extras::Extras};

/// Prefix of every internal schema reference.
pub const REF_PREFIX: &str = "#/components/schemas/";

/// Extracts the definition name from an internal `#/components/schemas/` reference.
///
/// Returns `None` for external references and for any other component family.
#[must_use]
pub fn parse_ref(ref_path: &str) -> Option<&str> {
  ref_path.strip_prefix(REF_PREFIX).filter(|name| !name.is_empty())
}

/// JSON Schema value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
  Null,
  Boolean,
  Object,
  Array,
  Number,
  String,
  Integer,
}

impl SchemaType {
  #[must_use]
  pub const fn is_numeric(self) -> bool {
    matches!(self, Self::Number | Self::Integer)
  }
}

/// XML presentation hints for a property.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xml {
  pub name: Option<String>,
  pub namespace: Option<String>,
  pub prefix: Option<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub attribute: bool,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub wrapped: bool,
}

/// One JSON-Schema fragment.
///
/// A node with a `$ref` carries no structural content; the compiler only emits
/// a reference once the referenced definition has been registered.
///
/// [`Extras`] are merged into the same JSON object. On a key collision the
/// structural field wins; extras whose key no field writes are kept.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Schema {
  #[serde(rename = "$ref")]
  pub reference: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  #[serde(rename = "type")]
  pub schema_type: Option<SchemaType>,
  pub format: Option<String>,
  #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<Value>,

  pub multiple_of: Option<Number>,
  pub maximum: Option<Number>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub exclusive_maximum: bool,
  pub minimum: Option<Number>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub exclusive_minimum: bool,

  pub max_length: Option<u64>,
  pub min_length: Option<u64>,
  pub pattern: Option<String>,

  pub max_items: Option<u64>,
  pub min_items: Option<u64>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub unique_items: bool,
  pub items: Option<Box<Schema>>,

  pub max_properties: Option<u64>,
  pub min_properties: Option<u64>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub properties: IndexMap<String, Schema>,
  pub additional_properties: Option<bool>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub pattern_properties: IndexMap<String, Schema>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub all_of: Vec<Schema>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub one_of: Vec<Schema>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub any_of: Vec<Schema>,
  pub not: Option<Box<Schema>>,

  pub default: Option<Value>,
  pub example: Option<Value>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub examples: Vec<Value>,
  pub xml: Option<Xml>,
  pub external_docs: Option<ExternalDocs>,

  pub media: Option<Box<Schema>>,
  pub binary_encoding: Option<String>,

  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub nullable: bool,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub read_only: bool,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub write_only: bool,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub deprecated: bool,

  /// Rust identifier of the field this node was compiled from.
  #[serialize_always]
  #[serde(skip)]
  pub field_name: Option<String>,
  /// Raw `param_in` location of that field.
  #[serialize_always]
  #[serde(skip)]
  pub field_location: Option<String>,
  #[serde(flatten)]
  pub extras: Extras,
}

impl Serialize for Schema {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    if self.extras.is_empty() {
      return Schema::serialize(self, serializer);
    }

    let structural = Schema {
      extras: Extras::default(),
      ..self.clone()
    };
    let mut node = Schema::serialize(&structural, serde_json::value::Serializer).map_err(S::Error::custom)?;
    if let Value::Object(fields) = &mut node {
      for (key, value) in self.extras.iter() {
        fields.entry(key.as_str()).or_insert_with(|| value.clone());
      }
    }
    node.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Schema {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Schema::deserialize(deserializer)
  }
}

impl Schema {
  /// Creates a bare node of the given type.
  #[must_use]
  pub fn typed(schema_type: SchemaType) -> Self {
    Self {
      schema_type: Some(schema_type),
      ..Default::default()
    }
  }

  /// Creates `{"type": "null"}`.
  #[must_use]
  pub fn null() -> Self {
    Self::typed(SchemaType::Null)
  }

  /// Creates a `$ref` pointing at a named definition.
  #[must_use]
  pub fn reference(name: &str) -> Self {
    Self {
      reference: Some(format!("{REF_PREFIX}{name}")),
      ..Default::default()
    }
  }

  /// Creates an object accepting any additional property.
  #[must_use]
  pub fn permissive() -> Self {
    Self {
      additional_properties: Some(true),
      ..Default::default()
    }
  }

  /// Returns `true` if this node is a `$ref`.
  #[must_use]
  pub fn is_reference(&self) -> bool {
    self.reference.as_deref().is_some_and(|r| !r.is_empty())
  }

  /// Returns the definition name this node references, if any.
  #[must_use]
  pub fn ref_name(&self) -> Option<&str> {
    self.reference.as_deref().and_then(parse_ref)
  }

  #[must_use]
  pub fn is_type(&self, schema_type: SchemaType) -> bool {
    self.schema_type == Some(schema_type)
  }

  /// Wraps the node as `{"oneOf": [self, {"type": "null"}]}`.
  #[must_use]
  pub fn into_nullable(self) -> Self {
    Self {
      one_of: vec![self, Self::null()],
      ..Default::default()
    }
  }

  /// Returns the `oneOf` entry titled `title`, creating it when absent.
  pub fn one_of_group_mut(&mut self, title: &str) -> &mut Schema {
    let index = match self.one_of.iter().position(|group| group.title.as_deref() == Some(title)) {
      Some(index) => index,
      None => {
        self.one_of.push(Self {
          title: Some(title.to_string()),
          ..Default::default()
        });
        self.one_of.len() - 1
      }
    };
    &mut self.one_of[index]
  }

  /// Appends `name` to `required` unless it is already listed.
  pub fn require(&mut self, name: &str) {
    if !self.required.iter().any(|existing| existing == name) {
      self.required.push(name.to_string());
    }
  }
}
