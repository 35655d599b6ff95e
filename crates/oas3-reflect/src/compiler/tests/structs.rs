use serde_json::json;

use super::fixtures::{Author, Contact, Document, Envelope, Holder, Invoice, Looped, Node, Person};
use crate::{
  compiler::{CompileError, Definitions, SchemaCompiler},
  descriptor::{Describe, FieldDescriptor, TypeDescriptor},
};

struct Applicant;

impl Describe for Applicant {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([
      FieldDescriptor::of::<String>("Name").schema("required,minLen=1,maxLen=20"),
      FieldDescriptor::of::<i64>("Age").schema("gt=18,lt=120"),
    ])
  }
}

#[test]
fn test_struct_is_registered_and_referenced() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Person>()?;

  assert_eq!(
    serde_json::to_value(&compilation.schema)?,
    json!({"$ref": "#/components/schemas/Person"})
  );
  assert_eq!(
    serde_json::to_value(&compilation.definitions)?,
    json!({
      "Person": {
        "type": "object",
        "title": "Person",
        "additionalProperties": false,
        "properties": {
          "name": {"type": "string"},
          "age": {"type": "integer", "minimum": 0, "maximum": 255}
        },
        "required": ["name"]
      }
    })
  );
  Ok(())
}

#[test]
fn test_constrained_fields_compile_into_one_definition() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Applicant>()?;

  assert_eq!(
    serde_json::to_value(&compilation.schema)?,
    json!({"$ref": "#/components/schemas/Applicant"})
  );
  assert_eq!(
    serde_json::to_value(&compilation.definitions)?,
    json!({
      "Applicant": {
        "type": "object",
        "title": "Applicant",
        "additionalProperties": false,
        "properties": {
          "Name": {"type": "string", "minLength": 1, "maxLength": 20},
          "Age": {
            "type": "integer",
            "minimum": 18,
            "exclusiveMinimum": true,
            "maximum": 120,
            "exclusiveMaximum": true
          }
        },
        "required": ["Name", "Age"]
      }
    })
  );
  Ok(())
}

#[test]
fn test_compilation_is_idempotent_over_a_shared_table() -> anyhow::Result<()> {
  let compiler = SchemaCompiler::default();
  let mut definitions = Definitions::new();

  let first = compiler.compile_into(&Invoice::describe(), &mut definitions)?;
  let snapshot = definitions.clone();
  let second = compiler.compile_into(&Invoice::describe(), &mut definitions)?;

  assert_eq!(first, second);
  assert_eq!(definitions, snapshot);
  assert_eq!(definitions.names().collect::<Vec<_>>(), vec!["Invoice", "Money"]);
  Ok(())
}

#[test]
fn test_self_reference_terminates() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Node>()?;
  let node = compilation.resolved();

  assert_eq!(
    serde_json::to_value(&node.properties["next"])?,
    json!({"$ref": "#/components/schemas/Node"})
  );
  assert_eq!(node.required, vec!["value"]);
  assert_eq!(compilation.definitions.len(), 1);
  Ok(())
}

#[test]
fn test_mutual_recursion_registers_both_types() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Author>()?;
  let definitions = serde_json::to_value(&compilation.definitions)?;

  assert_eq!(
    definitions["Author"]["properties"]["books"],
    json!({"type": "array", "items": {"$ref": "#/components/schemas/Book"}})
  );
  assert_eq!(
    definitions["Book"]["properties"]["author"],
    json!({"$ref": "#/components/schemas/Author"})
  );
  Ok(())
}

#[test]
fn test_embedded_and_ignored_fields() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Document>()?;
  let document = compilation.resolved();

  assert_eq!(
    document.properties.keys().map(String::as_str).collect::<Vec<_>>(),
    vec!["id", "createdBy", "updatedBy", "name", "age"]
  );
  assert_eq!(document.required, vec!["id", "createdBy", "name"]);
  assert_eq!(compilation.definitions.names().collect::<Vec<_>>(), vec!["Document"]);
  Ok(())
}

#[test]
fn test_recursive_embedding_is_cut() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Looped>()?;
  let looped = compilation.resolved();

  assert_eq!(looped.properties.keys().collect::<Vec<_>>(), vec!["label"]);
  assert_eq!(looped.required, vec!["label"]);
  Ok(())
}

#[test]
fn test_property_annotations() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Contact>()?;

  assert_eq!(
    serde_json::to_value(compilation.resolved())?,
    json!({
      "type": "object",
      "title": "Contact",
      "additionalProperties": false,
      "properties": {
        "email": {"type": "string", "format": "email"},
        "phone": {"type": "string", "pattern": "^[0-9+]+$"},
        "nickname": {"oneOf": [{"type": "string", "maxLength": 16}, {"type": "null"}]},
        "priority": {
          "type": "integer",
          "minimum": i32::MIN,
          "maximum": i32::MAX,
          "x-order": "1",
          "x-tag": ["a", "b"]
        }
      },
      "required": ["priority"],
      "oneOf": [
        {"title": "by_email", "required": ["email"]},
        {"title": "by_phone", "required": ["phone"]}
      ]
    })
  );
  Ok(())
}

#[test]
fn test_field_name_is_recorded_on_properties() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Contact>()?;
  let contact = compilation.resolved();

  assert_eq!(contact.properties["nickname"].field_name.as_deref(), Some("nickname"));
  assert_eq!(contact.properties["priority"].field_name.as_deref(), Some("priority"));
  Ok(())
}

#[test]
fn test_capabilities() -> anyhow::Result<()> {
  let compilation = SchemaCompiler::default().compile::<Invoice>()?;
  let definitions = serde_json::to_value(&compilation.definitions)?;

  assert_eq!(
    definitions["Money"],
    json!({"type": "string", "pattern": r"^\d+\.\d{2}$"})
  );
  assert_eq!(
    definitions["Invoice"]["properties"],
    json!({
      "total": {"$ref": "#/components/schemas/Money", "description": "Amount due"},
      "status": {
        "description": "Lifecycle state",
        "oneOf": [
          {"type": "string", "enum": ["active", "suspended"]},
          {"type": "integer", "enum": [1, 2]}
        ]
      },
      "lines": {
        "type": "object",
        "patternProperties": {".*": {"$ref": "#/components/schemas/Money"}}
      }
    })
  );
  assert_eq!(definitions["Invoice"]["required"], json!(["total", "status"]));
  Ok(())
}

#[test]
fn test_unsupported_type_reports_its_path() {
  let direct = SchemaCompiler::default().compile::<Holder>();
  assert!(matches!(
    direct,
    Err(CompileError::UnsupportedType { ref path, .. }) if path == "Holder.pair"
  ));

  let nested = SchemaCompiler::default().compile::<Envelope>();
  match nested {
    Err(CompileError::UnsupportedType { type_name, path }) => {
      assert_eq!(path, "Envelope.holders.Holder.pair");
      assert!(type_name.starts_with("(i32"), "unexpected type name {type_name}");
    }
    other => panic!("expected unsupported type, got {other:?}"),
  }
}

#[test]
fn test_unsupported_root_uses_type_name_as_path() {
  let result = SchemaCompiler::default().compile::<(u8, u8)>();
  assert!(matches!(
    result,
    Err(CompileError::UnsupportedType { ref path, .. }) if path == "(u8, u8)"
  ));
}
