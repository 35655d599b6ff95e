use std::{collections::BTreeMap, sync::Arc};

use oas3_reflect_model::ParameterIn;
use serde::Serialize;
use serde_json::json;

use crate::{
  assembler::{OperationAssembler, Payload, Route},
  compiler::{CompilerOptions, SchemaCompiler},
  descriptor::{Describe, FieldDescriptor, TypeDescriptor},
};

#[derive(Serialize)]
struct HelloParams {
  name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  greeting: Option<String>,
}

impl Describe for HelloParams {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([
      FieldDescriptor::of::<String>("name").serde("name").param_in("path"),
      FieldDescriptor::of::<Option<String>>("greeting")
        .serde("greeting,omitempty")
        .doc("Word used to greet"),
    ])
  }
}

#[derive(Serialize)]
struct HelloResponse {
  message: String,
}

impl Describe for HelloResponse {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([FieldDescriptor::of::<String>("message").serde("message")])
  }
}

struct Paging;

impl Describe for Paging {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([
      FieldDescriptor::of::<u32>("limit").serde("limit,omitempty").schema("lte=100"),
      FieldDescriptor::of::<String>("cursor")
        .serde("cursor,omitempty")
        .param_in("header"),
    ])
  }
}

struct SearchParams;

impl Describe for SearchParams {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([
      FieldDescriptor::of::<String>("tenant").serde("tenant,omitempty").param_in("path"),
      FieldDescriptor::of::<String>("session").serde("session").param_in("cookie"),
      FieldDescriptor::of::<String>("q").serde("q").param_in("body"),
      FieldDescriptor::flatten::<Paging>("Paging"),
    ])
  }
}

#[test]
fn test_hello_route() -> anyhow::Result<()> {
  let route = Route::builder()
    .path("/hello/{name}")
    .params(Payload::of(&HelloParams {
      name: "world".to_string(),
      greeting: None,
    }))
    .responses(BTreeMap::from([(200, Payload::of(&HelloResponse {
      message: "hello world".to_string(),
    }))]))
    .build();

  let compiler = SchemaCompiler::default();
  let bundle = OperationAssembler::new(&compiler).assemble(&route)?;

  assert_eq!(
    serde_json::to_value(&bundle.parameters)?,
    json!([
      {
        "name": "name",
        "in": "path",
        "required": true,
        "schema": {"type": "string"},
        "example": "world"
      },
      {
        "name": "greeting",
        "in": "query",
        "description": "Word used to greet",
        "schema": {"type": "string", "description": "Word used to greet"}
      }
    ])
  );
  assert_eq!(
    serde_json::to_value(&bundle.responses["200"])?,
    json!({
      "description": "OK",
      "content": {
        "application/json": {
          "schema": {"$ref": "#/components/schemas/HelloResponse"},
          "example": {"message": "hello world"}
        }
      }
    })
  );
  assert_eq!(bundle.definitions.names().collect::<Vec<_>>(), vec!["HelloResponse"]);
  Ok(())
}

#[test]
fn test_parameter_locations() -> anyhow::Result<()> {
  let route = Route::builder()
    .path("/{tenant}/search")
    .params(Payload::schema_only::<SearchParams>())
    .build();
  let compiler = SchemaCompiler::default();
  let bundle = OperationAssembler::new(&compiler).assemble(&route)?;

  let summary: Vec<_> = bundle
    .parameters
    .iter()
    .map(|parameter| (parameter.name.as_str(), parameter.location, parameter.required))
    .collect();
  assert_eq!(summary, vec![
    ("tenant", ParameterIn::Path, true),
    ("session", ParameterIn::Cookie, true),
    ("q", ParameterIn::Query, true),
    ("limit", ParameterIn::Query, false),
    ("cursor", ParameterIn::Header, false),
  ]);

  let limit = bundle.parameters[3]
    .schema
    .as_ref()
    .and_then(|schema| schema.maximum.clone());
  assert_eq!(limit, Some(100.into()));
  Ok(())
}

#[test]
fn test_synthetic_parameter_locations() -> anyhow::Result<()> {
  let options = CompilerOptions::builder()
    .synthetic_fields(Arc::new(|descriptor: &TypeDescriptor| {
      if descriptor.is::<HelloParams>() {
        vec![
          FieldDescriptor::of::<String>("trace_id")
            .serde("X-Trace-Id")
            .param_in("header"),
        ]
      } else {
        vec![]
      }
    }))
    .build();
  let compiler = SchemaCompiler::new(options);
  let route = Route::builder()
    .path("/hello/{name}")
    .params(Payload::schema_only::<HelloParams>())
    .build();
  let bundle = OperationAssembler::new(&compiler).assemble(&route)?;

  let trace = bundle
    .parameters
    .iter()
    .find(|parameter| parameter.name == "X-Trace-Id")
    .ok_or_else(|| anyhow::anyhow!("missing synthetic parameter"))?;
  assert_eq!(trace.location, ParameterIn::Header);
  assert!(trace.required);
  Ok(())
}

struct Window;

impl Describe for Window {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([FieldDescriptor::of::<u32>("id").serde("page_id").param_in("query")])
  }
}

struct ItemPageParams;

impl Describe for ItemPageParams {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([
      FieldDescriptor::of::<String>("id").serde("id").param_in("path"),
      FieldDescriptor::flatten::<Window>("Window"),
    ])
  }
}

#[test]
fn test_embedded_field_keeps_its_own_location() -> anyhow::Result<()> {
  let route = Route::builder()
    .path("/items/{id}")
    .params(Payload::schema_only::<ItemPageParams>())
    .build();
  let compiler = SchemaCompiler::default();
  let bundle = OperationAssembler::new(&compiler).assemble(&route)?;

  let summary: Vec<_> = bundle
    .parameters
    .iter()
    .map(|parameter| (parameter.name.as_str(), parameter.location))
    .collect();
  assert_eq!(summary, vec![("id", ParameterIn::Path), ("page_id", ParameterIn::Query)]);
  Ok(())
}
