use std::{any::TypeId, collections::HashSet, fmt, sync::Arc};

use oas3_reflect_model::Schema;

use crate::descriptor::{Describe, FieldDescriptor, TypeDescriptor};

/// Supplies a complete schema for a type, bypassing every other rule.
pub type TypeMapper = Arc<dyn Fn(&TypeDescriptor) -> Option<Schema> + Send + Sync>;

/// Chooses the definition name of a type. Returning `None` keeps the default.
pub type TypeNamer = Arc<dyn Fn(&TypeDescriptor) -> Option<String> + Send + Sync>;

/// Appends extra fields after a struct's declared fields.
pub type SyntheticFields = Arc<dyn Fn(&TypeDescriptor) -> Vec<FieldDescriptor> + Send + Sync>;

/// Switches and hooks that alter how types are compiled.
#[derive(Clone, Default, bon::Builder)]
pub struct CompilerOptions {
  /// Emit `additionalProperties: true` on structs instead of `false`.
  #[builder(default)]
  pub allow_additional_properties: bool,
  /// Only a `required` token in the schema channel makes a field required.
  #[builder(default)]
  pub require_from_schema_annotation_only: bool,
  /// Read field names from the yaml channel even when a serde entry exists.
  #[builder(default)]
  pub prefer_alternate_naming_channel: bool,
  /// Give embedded fields their own lowercased property instead of inlining them.
  #[builder(default)]
  pub alternate_embedded_structs: bool,
  /// Inline the root struct instead of returning a reference to it.
  #[builder(default)]
  pub expand_top_level_inline: bool,
  /// Inline named types instead of emitting `$ref` nodes. Types already being
  /// expanded are still referenced.
  #[builder(default)]
  pub suppress_references: bool,
  /// Name definitions by module path and type name.
  #[builder(default)]
  pub fully_qualify_names: bool,
  /// Structs compiled as permissive objects without visiting their fields.
  #[builder(default)]
  pub ignored_types: HashSet<TypeId>,
  pub type_mapper: Option<TypeMapper>,
  pub type_namer: Option<TypeNamer>,
  pub synthetic_fields: Option<SyntheticFields>,
}

impl CompilerOptions {
  /// Adds `T` to the ignore list.
  #[must_use]
  pub fn ignoring<T: Describe + ?Sized>(mut self) -> Self {
    self.ignored_types.insert(TypeId::of::<T>());
    self
  }

  #[must_use]
  pub fn is_ignored(&self, descriptor: &TypeDescriptor) -> bool {
    self.ignored_types.contains(&descriptor.id())
  }
}

impl fmt::Debug for CompilerOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompilerOptions")
      .field("allow_additional_properties", &self.allow_additional_properties)
      .field(
        "require_from_schema_annotation_only",
        &self.require_from_schema_annotation_only,
      )
      .field("prefer_alternate_naming_channel", &self.prefer_alternate_naming_channel)
      .field("alternate_embedded_structs", &self.alternate_embedded_structs)
      .field("expand_top_level_inline", &self.expand_top_level_inline)
      .field("suppress_references", &self.suppress_references)
      .field("fully_qualify_names", &self.fully_qualify_names)
      .field("ignored_types", &self.ignored_types.len())
      .field("type_mapper", &self.type_mapper.is_some())
      .field("type_namer", &self.type_namer.is_some())
      .field("synthetic_fields", &self.synthetic_fields.is_some())
      .finish()
  }
}
