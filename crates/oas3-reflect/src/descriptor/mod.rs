//! Type descriptions consumed by the schema compiler.
//!
//! Rust has no runtime reflection, so every type that takes part in schema
//! generation implements [`Describe`] and hands the compiler a
//! [`TypeDescriptor`]: its structural [`Kind`], its fields with their
//! metadata channels, and the optional capabilities it supplies.
//!
//! Child types are referenced through [`TypeRef`] function pointers and are
//! only materialized when the compiler walks into them, which keeps
//! self-referential types describable.
//!
//! ```
//! use oas3_reflect::descriptor::{Describe, FieldDescriptor, TypeDescriptor};
//!
//! struct Node {
//!   value: i32,
//!   next: Option<Box<Node>>,
//! }
//!
//! impl Describe for Node {
//!   fn describe() -> TypeDescriptor {
//!     TypeDescriptor::structure::<Self>([
//!       FieldDescriptor::of::<i32>("value").serde("value"),
//!       FieldDescriptor::of::<Option<Box<Node>>>("next").serde("next,omitempty"),
//!     ])
//!   }
//! }
//! ```

mod field;
mod impls;
pub(crate) mod naming;

#[cfg(test)]
mod tests;

use std::{
  any::{TypeId, type_name},
  fmt,
};

pub use field::FieldDescriptor;
use oas3_reflect_model::{ContentType, Schema};
use serde_json::Number;

/// Lazily evaluated descriptor of a child type.
pub type TypeRef = fn() -> TypeDescriptor;

/// Implemented by every type that can be compiled into a schema.
pub trait Describe: 'static {
  fn describe() -> TypeDescriptor;
}

/// The type provides its complete schema and bypasses structural compilation.
pub trait SuppliesSchema {
  fn schema() -> Schema;
}

/// The type provides per-field descriptions that override `desc=` annotations.
pub trait SuppliesFieldDocs {
  fn field_doc(ident: &str) -> Option<String>;
}

/// The type is an integer enum that accepts either its variant names or values.
pub trait DescribesEnum {
  fn variants() -> Vec<(String, i64)>;
}

/// The type is carried under a media type other than `application/json`.
pub trait SuppliesContentType {
  fn content_type() -> ContentType;
}

/// Integer widths and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
  I8,
  I16,
  I32,
  I64,
  Isize,
  U8,
  U16,
  U32,
  U64,
  Usize,
}

impl IntKind {
  /// Returns the exact `(minimum, maximum)` representable by this width.
  #[must_use]
  pub fn bounds(self) -> (Number, Number) {
    match self {
      Self::I8 => (i64::from(i8::MIN).into(), i64::from(i8::MAX).into()),
      Self::I16 => (i64::from(i16::MIN).into(), i64::from(i16::MAX).into()),
      Self::I32 => (i64::from(i32::MIN).into(), i64::from(i32::MAX).into()),
      Self::I64 => (i64::MIN.into(), i64::MAX.into()),
      Self::Isize => ((isize::MIN as i64).into(), (isize::MAX as i64).into()),
      Self::U8 => (0u64.into(), u64::from(u8::MAX).into()),
      Self::U16 => (0u64.into(), u64::from(u16::MAX).into()),
      Self::U32 => (0u64.into(), u64::from(u32::MAX).into()),
      Self::U64 => (0u64.into(), u64::MAX.into()),
      Self::Usize => (0u64.into(), (usize::MAX as u64).into()),
    }
  }
}

/// Floating point widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
  F32,
  F64,
}

impl FloatKind {
  /// Largest finite magnitude of this width.
  #[must_use]
  pub fn max_magnitude(self) -> f64 {
    match self {
      Self::F32 => f64::from(f32::MAX),
      Self::F64 => f64::MAX,
    }
  }
}

/// Types recognized by identity rather than by structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownShape {
  Timestamp,
  Uri,
  Ipv4,
  Ipv6,
  /// Pre-serialized JSON of any shape.
  RawJson,
}

/// Structural classification of a type.
#[derive(Debug, Clone)]
pub enum Kind {
  Bool,
  Int(IntKind),
  Float(FloatKind),
  String,
  Struct(Vec<FieldDescriptor>),
  Map {
    key: TypeRef,
    value: TypeRef,
  },
  Seq {
    element: TypeRef,
    len: Option<usize>,
    unique: bool,
  },
  /// A value that may be absent (`Option<T>`).
  Optional(TypeRef),
  /// An owning or shared pointer (`Box<T>`, `Arc<T>`, ...).
  Pointer(TypeRef),
  /// Any JSON value.
  Any,
  Known(KnownShape),
  Tuple(Vec<TypeRef>),
}

/// Optional behaviors a type supplies to the compiler and assembler.
#[derive(Clone, Copy, Default)]
pub struct Capabilities {
  pub schema: Option<fn() -> Schema>,
  pub field_docs: Option<fn(&str) -> Option<String>>,
  pub enum_variants: Option<fn() -> Vec<(String, i64)>>,
  pub content_type: Option<fn() -> ContentType>,
}

impl fmt::Debug for Capabilities {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Capabilities")
      .field("schema", &self.schema.is_some())
      .field("field_docs", &self.field_docs.is_some())
      .field("enum_variants", &self.enum_variants.is_some())
      .field("content_type", &self.content_type.is_some())
      .finish()
  }
}

/// Everything the compiler needs to know about one type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
  id: TypeId,
  rust_name: &'static str,
  name: String,
  module_path: String,
  kind: Kind,
  capabilities: Capabilities,
}

impl TypeDescriptor {
  /// Describes `T` with the given kind.
  ///
  /// The definition name and module path are derived from
  /// [`std::any::type_name`]: `my_app::models::Page<my_app::models::User>`
  /// becomes name `Page_User` in module `my_app::models`.
  #[must_use]
  pub fn new<T: ?Sized + 'static>(kind: Kind) -> Self {
    let rust_name = type_name::<T>();
    let (module_path, name) = naming::split_type_name(rust_name);
    Self {
      id: TypeId::of::<T>(),
      rust_name,
      name,
      module_path,
      kind,
      capabilities: Capabilities::default(),
    }
  }

  /// Describes `T` as a named aggregate with the given fields in declaration order.
  #[must_use]
  pub fn structure<T: ?Sized + 'static>(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
    Self::new::<T>(Kind::Struct(fields.into_iter().collect()))
  }

  /// Replaces the derived definition name.
  #[must_use]
  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  #[must_use]
  pub fn with_schema<T: SuppliesSchema>(mut self) -> Self {
    self.capabilities.schema = Some(T::schema);
    self
  }

  #[must_use]
  pub fn with_field_docs<T: SuppliesFieldDocs>(mut self) -> Self {
    self.capabilities.field_docs = Some(T::field_doc);
    self
  }

  #[must_use]
  pub fn with_enum_variants<T: DescribesEnum>(mut self) -> Self {
    self.capabilities.enum_variants = Some(T::variants);
    self
  }

  #[must_use]
  pub fn with_content_type<T: SuppliesContentType>(mut self) -> Self {
    self.capabilities.content_type = Some(T::content_type);
    self
  }

  #[must_use]
  pub fn id(&self) -> TypeId {
    self.id
  }

  /// Full Rust path of the described type, as reported by the compiler.
  #[must_use]
  pub fn rust_name(&self) -> &'static str {
    self.rust_name
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub fn module_path(&self) -> &str {
    &self.module_path
  }

  /// Name qualified by its module, e.g. `my_app.models.User`.
  #[must_use]
  pub fn qualified_name(&self) -> String {
    if self.module_path.is_empty() {
      self.name.clone()
    } else {
      format!("{}.{}", self.module_path.replace("::", "."), self.name)
    }
  }

  #[must_use]
  pub fn kind(&self) -> &Kind {
    &self.kind
  }

  #[must_use]
  pub fn capabilities(&self) -> &Capabilities {
    &self.capabilities
  }

  /// Declared fields, empty unless this is a struct.
  #[must_use]
  pub fn fields(&self) -> &[FieldDescriptor] {
    match &self.kind {
      Kind::Struct(fields) => fields,
      _ => &[],
    }
  }

  #[must_use]
  pub fn is<T: ?Sized + 'static>(&self) -> bool {
    self.id == TypeId::of::<T>()
  }

  /// Follows `Optional` and `Pointer` kinds down to the held type.
  #[must_use]
  pub fn unwrap_indirect(&self) -> Self {
    let mut current = self.clone();
    while let Kind::Optional(inner) | Kind::Pointer(inner) = current.kind {
      current = inner();
    }
    current
  }
}
