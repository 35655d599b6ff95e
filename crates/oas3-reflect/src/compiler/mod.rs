//! Compiles [`TypeDescriptor`]s into schema nodes plus a table of named definitions.
//!
//! Named aggregates are registered in [`Definitions`] and referenced with
//! `$ref`. A placeholder is registered before an aggregate's fields are
//! visited, so recursive types terminate with a reference to themselves.

mod definitions;
mod error;
mod fields;
mod options;

#[cfg(test)]
mod tests;

use std::any::TypeId;

pub use definitions::Definitions;
pub use error::CompileError;
use oas3_reflect_model::{Schema, SchemaType};
pub use options::{CompilerOptions, SyntheticFields, TypeMapper, TypeNamer};
use serde_json::{Number, Value};
use tracing::{debug, trace};

use crate::descriptor::{Describe, Kind, KnownShape, TypeDescriptor};

/// A compiled root node together with the definitions it references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
  pub schema: Schema,
  pub definitions: Definitions,
}

impl Compilation {
  /// The root node with one level of `$ref` followed.
  #[must_use]
  pub fn resolved(&self) -> &Schema {
    self.definitions.resolve(&self.schema).unwrap_or(&self.schema)
  }
}

#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
  options: CompilerOptions,
}

impl SchemaCompiler {
  #[must_use]
  pub fn new(options: CompilerOptions) -> Self {
    Self { options }
  }

  #[must_use]
  pub fn options(&self) -> &CompilerOptions {
    &self.options
  }

  /// Compiles `T` against a fresh definition table.
  pub fn compile<T: Describe + ?Sized>(&self) -> Result<Compilation, CompileError> {
    self.compile_descriptor(&T::describe())
  }

  pub fn compile_descriptor(&self, descriptor: &TypeDescriptor) -> Result<Compilation, CompileError> {
    let mut definitions = Definitions::new();
    let schema = self.compile_into(descriptor, &mut definitions)?;
    Ok(Compilation { schema, definitions })
  }

  /// Compiles `descriptor`, registering named aggregates into `definitions`.
  ///
  /// Types already present in `definitions` are referenced without being
  /// visited again.
  pub fn compile_into(&self, descriptor: &TypeDescriptor, definitions: &mut Definitions) -> Result<Schema, CompileError> {
    debug!(type_name = descriptor.rust_name(), known = definitions.len(), "compiling type");
    let mut walk = Walk::new(self, definitions);
    if self.options.expand_top_level_inline {
      walk.compile_root_inline(descriptor)
    } else {
      walk.compile(descriptor)
    }
  }

  /// Expands the fields of a struct descriptor into `aggregate`.
  ///
  /// Embedded fields are promoted and nested types are registered into
  /// `definitions`; the struct itself is not registered.
  pub fn expand_fields_into(
    &self,
    descriptor: &TypeDescriptor,
    aggregate: &mut Schema,
    definitions: &mut Definitions,
  ) -> Result<(), CompileError> {
    Walk::new(self, definitions).expand_fields(aggregate, descriptor)
  }

  /// Name under which `descriptor` is registered as a definition.
  #[must_use]
  pub fn definition_name(&self, descriptor: &TypeDescriptor) -> String {
    if let Some(namer) = &self.options.type_namer
      && let Some(name) = namer(descriptor)
    {
      return name;
    }
    if self.options.fully_qualify_names {
      descriptor.qualified_name()
    } else {
      descriptor.name().to_string()
    }
  }
}

/// State of a single compilation pass.
pub(crate) struct Walk<'c, 'd> {
  compiler: &'c SchemaCompiler,
  definitions: &'d mut Definitions,
  /// Names of aggregates whose fields are currently being visited.
  expanding: Vec<String>,
  /// Types whose fields are currently being promoted through embedding.
  embedding: Vec<TypeId>,
  path: Vec<String>,
}

impl<'c, 'd> Walk<'c, 'd> {
  fn new(compiler: &'c SchemaCompiler, definitions: &'d mut Definitions) -> Self {
    Self {
      compiler,
      definitions,
      expanding: vec![],
      embedding: vec![],
      path: vec![],
    }
  }

  fn options(&self) -> &'c CompilerOptions {
    &self.compiler.options
  }

  pub(crate) fn compile(&mut self, descriptor: &TypeDescriptor) -> Result<Schema, CompileError> {
    let name = self.compiler.definition_name(descriptor);

    if !name.is_empty()
      && let Some(existing) = self.definitions.get(&name)
    {
      if !self.options().suppress_references || self.expanding.contains(&name) {
        return Ok(Schema::reference(&name));
      }
      return Ok(existing.clone());
    }

    if let Some(mapper) = &self.options().type_mapper
      && let Some(schema) = mapper(descriptor)
    {
      return Ok(schema);
    }

    let capabilities = descriptor.capabilities();
    if let Some(custom) = capabilities.schema {
      return Ok(self.register(&name, custom()));
    }

    if let Some(variants) = capabilities.enum_variants {
      if matches!(descriptor.kind(), Kind::Int(_)) {
        return Ok(enum_schema(variants()));
      }
      trace!(name, "ignoring enum variants on a non-integer type");
    }

    match descriptor.kind() {
      Kind::Struct(_) => self.compile_struct(descriptor, name),
      Kind::Map { key, value } => self.compile_map(&key(), &value()),
      Kind::Seq { element, len, unique } => self.compile_seq(&element(), *len, *unique),
      Kind::Optional(inner) | Kind::Pointer(inner) => self.compile(&inner()),
      Kind::Any => Ok(Schema::permissive()),
      Kind::Bool => Ok(Schema::typed(SchemaType::Boolean)),
      Kind::String => Ok(Schema::typed(SchemaType::String)),
      Kind::Int(int) => {
        let (minimum, maximum) = int.bounds();
        Ok(Schema {
          minimum: Some(minimum),
          maximum: Some(maximum),
          ..Schema::typed(SchemaType::Integer)
        })
      }
      Kind::Float(float) => {
        let magnitude = float.max_magnitude();
        Ok(Schema {
          minimum: Number::from_f64(-magnitude),
          maximum: Number::from_f64(magnitude),
          ..Schema::typed(SchemaType::Number)
        })
      }
      Kind::Known(shape) => Ok(known_shape(*shape)),
      Kind::Tuple(_) => Err(self.unsupported(descriptor)),
    }
  }

  /// Expands a root struct in place instead of returning a reference to it.
  ///
  /// The root only becomes a definition if one of its fields refers back to it.
  fn compile_root_inline(&mut self, descriptor: &TypeDescriptor) -> Result<Schema, CompileError> {
    let root = descriptor.unwrap_indirect();
    let name = self.compiler.definition_name(&root);
    let inline = matches!(root.kind(), Kind::Struct(_))
      && root.capabilities().schema.is_none()
      && !self.options().is_ignored(&root)
      && !self.definitions.contains(&name)
      && self
        .options()
        .type_mapper
        .as_ref()
        .is_none_or(|mapper| mapper(&root).is_none());

    if !inline {
      return self.compile(descriptor);
    }

    let mut aggregate = self.object_shell(&name);
    self.path.push(name);
    let expanded = self.expand_fields(&mut aggregate, &root);
    self.path.pop();
    expanded?;
    Ok(aggregate)
  }

  fn compile_struct(&mut self, descriptor: &TypeDescriptor, name: String) -> Result<Schema, CompileError> {
    if self.options().is_ignored(descriptor) {
      trace!(name, "compiling ignored type as a permissive object");
      let schema = Schema {
        additional_properties: Some(true),
        ..Schema::typed(SchemaType::Object)
      };
      return Ok(self.register(&name, schema));
    }

    let mut aggregate = self.object_shell(&name);
    if name.is_empty() {
      self.expand_fields(&mut aggregate, descriptor)?;
      return Ok(aggregate);
    }

    self.definitions.insert(name.clone(), aggregate.clone());
    self.expanding.push(name.clone());
    self.path.push(name.clone());
    let expanded = self.expand_fields(&mut aggregate, descriptor);
    self.path.pop();
    self.expanding.pop();
    expanded?;

    Ok(self.register(&name, aggregate))
  }

  fn compile_map(&mut self, key: &TypeDescriptor, value: &TypeDescriptor) -> Result<Schema, CompileError> {
    let value_schema = self.compile(value)?;
    let integer_keys = matches!(key.unwrap_indirect().kind(), Kind::Int(_));
    let pattern = if integer_keys { "^[0-9]+$" } else { ".*" };

    Ok(Schema {
      pattern_properties: [(pattern.to_string(), value_schema)].into_iter().collect(),
      additional_properties: integer_keys.then_some(false),
      ..Schema::typed(SchemaType::Object)
    })
  }

  fn compile_seq(&mut self, element: &TypeDescriptor, len: Option<usize>, unique: bool) -> Result<Schema, CompileError> {
    if len.is_none() && element.is::<u8>() {
      return Ok(Schema {
        media: Some(Box::new(Schema {
          binary_encoding: Some("base64".to_string()),
          ..Default::default()
        })),
        ..Schema::typed(SchemaType::String)
      });
    }

    let items = self.compile(element)?;
    let count = len.map(|len| len as u64);
    Ok(Schema {
      items: Some(Box::new(items)),
      min_items: count,
      max_items: count,
      unique_items: unique,
      ..Schema::typed(SchemaType::Array)
    })
  }

  fn object_shell(&self, name: &str) -> Schema {
    Schema {
      title: (!name.is_empty()).then(|| name.to_string()),
      additional_properties: Some(self.options().allow_additional_properties),
      ..Schema::typed(SchemaType::Object)
    }
  }

  /// Stores `schema` as the definition `name` and returns the node that stands for it.
  fn register(&mut self, name: &str, schema: Schema) -> Schema {
    if name.is_empty() {
      return schema;
    }
    self.definitions.insert(name, schema.clone());
    if self.options().suppress_references {
      schema
    } else {
      Schema::reference(name)
    }
  }

  fn unsupported(&self, descriptor: &TypeDescriptor) -> CompileError {
    let path = if self.path.is_empty() {
      descriptor.rust_name().to_string()
    } else {
      self.path.join(".")
    };
    CompileError::UnsupportedType {
      type_name: descriptor.rust_name().to_string(),
      path,
    }
  }
}

fn known_shape(shape: KnownShape) -> Schema {
  let formatted = |format: &str| Schema {
    format: Some(format.to_string()),
    ..Schema::typed(SchemaType::String)
  };
  match shape {
    KnownShape::Timestamp => formatted("date-time"),
    KnownShape::Uri => formatted("uri"),
    KnownShape::Ipv4 => formatted("ipv4"),
    KnownShape::Ipv6 => formatted("ipv6"),
    KnownShape::RawJson => Schema::permissive(),
  }
}

/// An integer enum accepts either its variant names or its values.
fn enum_schema(variants: Vec<(String, i64)>) -> Schema {
  let (names, values): (Vec<Value>, Vec<Value>) = variants
    .into_iter()
    .map(|(name, value)| (Value::String(name), Value::from(value)))
    .unzip();

  Schema {
    one_of: vec![
      Schema {
        enum_values: names,
        ..Schema::typed(SchemaType::String)
      },
      Schema {
        enum_values: values,
        ..Schema::typed(SchemaType::Integer)
      },
    ],
    ..Default::default()
  }
}
