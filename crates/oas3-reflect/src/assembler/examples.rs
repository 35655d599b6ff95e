use oas3_reflect_model::Schema;
use serde_json::{Map, Value};
use tracing::trace;

/// Re-keys a serialized example by the property names of `schema`.
///
/// Each property is looked up by its property name, then by the field name it
/// was compiled from. Properties missing from the value are left out. Values
/// of non-object schemas are returned unchanged.
pub(crate) fn shape_example(schema: &Schema, value: &Value) -> Value {
  let Value::Object(source) = value else {
    return value.clone();
  };
  if schema.properties.is_empty() {
    return value.clone();
  }

  let mut shaped = Map::new();
  for (name, property) in &schema.properties {
    match lookup(source, name, property) {
      Some(found) => {
        shaped.insert(name.clone(), found.clone());
      }
      None => trace!(property = name, "example has no value for property"),
    }
  }
  Value::Object(shaped)
}

/// The example value of a single property.
pub(crate) fn property_example(value: &Value, name: &str, property: &Schema) -> Option<Value> {
  let Value::Object(source) = value else {
    return None;
  };
  lookup(source, name, property).cloned()
}

fn lookup<'v>(source: &'v Map<String, Value>, name: &str, property: &Schema) -> Option<&'v Value> {
  source
    .get(name)
    .or_else(|| property.field_name.as_deref().and_then(|field| source.get(field)))
}
