use std::borrow::Cow;

use super::{Describe, TypeDescriptor, TypeRef};

/// One field of a described struct, with its metadata channels.
///
/// The channels carry the same mini-languages a field's serialization
/// attributes would:
///
/// - `serde`: `"name,omitempty"` naming entry, `"-"` to ignore the field.
/// - `yaml`: alternate naming entry, `"inline"` embeds the field.
/// - `schema`: comma-separated schema keywords (`"required,minLen=3"`).
/// - `extras`: comma-separated `key=value` pairs merged into the node.
/// - `param_in`: parameter location when the owning struct carries parameters.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
  ident: Cow<'static, str>,
  ty: TypeRef,
  embedded: bool,
  serde: Option<Cow<'static, str>>,
  yaml: Option<Cow<'static, str>>,
  schema: Cow<'static, str>,
  doc: Option<Cow<'static, str>>,
  extras: Cow<'static, str>,
  param_in: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
  /// A named field of type `T`.
  #[must_use]
  pub fn of<T: Describe + ?Sized>(ident: impl Into<Cow<'static, str>>) -> Self {
    Self {
      ident: ident.into(),
      ty: T::describe,
      embedded: false,
      serde: None,
      yaml: None,
      schema: Cow::Borrowed(""),
      doc: None,
      extras: Cow::Borrowed(""),
      param_in: None,
    }
  }

  /// An embedded field of type `T` whose fields are promoted into the enclosing struct.
  #[must_use]
  pub fn flatten<T: Describe + ?Sized>(ident: impl Into<Cow<'static, str>>) -> Self {
    Self {
      embedded: true,
      ..Self::of::<T>(ident)
    }
  }

  #[must_use]
  pub fn serde(mut self, annotation: impl Into<Cow<'static, str>>) -> Self {
    self.serde = Some(annotation.into());
    self
  }

  #[must_use]
  pub fn yaml(mut self, annotation: impl Into<Cow<'static, str>>) -> Self {
    self.yaml = Some(annotation.into());
    self
  }

  #[must_use]
  pub fn schema(mut self, annotation: impl Into<Cow<'static, str>>) -> Self {
    self.schema = annotation.into();
    self
  }

  #[must_use]
  pub fn doc(mut self, description: impl Into<Cow<'static, str>>) -> Self {
    self.doc = Some(description.into());
    self
  }

  #[must_use]
  pub fn extras(mut self, annotation: impl Into<Cow<'static, str>>) -> Self {
    self.extras = annotation.into();
    self
  }

  #[must_use]
  pub fn param_in(mut self, location: impl Into<Cow<'static, str>>) -> Self {
    self.param_in = Some(location.into());
    self
  }

  #[must_use]
  pub fn ident(&self) -> &str {
    &self.ident
  }

  #[must_use]
  pub fn type_ref(&self) -> TypeRef {
    self.ty
  }

  #[must_use]
  pub fn descriptor(&self) -> TypeDescriptor {
    (self.ty)()
  }

  #[must_use]
  pub fn is_embedded(&self) -> bool {
    self.embedded
  }

  #[must_use]
  pub fn serde_annotation(&self) -> Option<&str> {
    self.serde.as_deref()
  }

  #[must_use]
  pub fn yaml_annotation(&self) -> Option<&str> {
    self.yaml.as_deref()
  }

  #[must_use]
  pub fn schema_annotation(&self) -> &str {
    &self.schema
  }

  #[must_use]
  pub fn description(&self) -> Option<&str> {
    self.doc.as_deref()
  }

  #[must_use]
  pub fn extras_annotation(&self) -> &str {
    &self.extras
  }

  #[must_use]
  pub fn location(&self) -> Option<&str> {
    self.param_in.as_deref()
  }
}
