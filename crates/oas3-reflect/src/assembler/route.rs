use std::collections::BTreeMap;

use http::Method;
use oas3_reflect_model::ContentType;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::descriptor::{Describe, TypeDescriptor};

/// A typed payload of an operation, optionally carrying an example value.
#[derive(Debug, Clone)]
pub struct Payload {
  descriptor: TypeDescriptor,
  example: Option<Value>,
  content_type: Option<ContentType>,
}

impl Payload {
  /// Describes `T` and keeps `value` as the example.
  ///
  /// A value that fails to serialize is dropped and the payload keeps only its schema.
  #[must_use]
  pub fn of<T: Describe + Serialize + ?Sized>(value: &T) -> Self {
    let example = serde_json::to_value(value)
      .inspect_err(|error| debug!(%error, type_name = std::any::type_name::<T>(), "dropping example value"))
      .ok();
    Self {
      descriptor: T::describe(),
      example,
      content_type: None,
    }
  }

  /// Describes `T` without an example.
  #[must_use]
  pub fn schema_only<T: Describe + ?Sized>() -> Self {
    Self {
      descriptor: T::describe(),
      example: None,
      content_type: None,
    }
  }

  #[must_use]
  pub fn with_content_type(mut self, content_type: ContentType) -> Self {
    self.content_type = Some(content_type);
    self
  }

  #[must_use]
  pub fn descriptor(&self) -> &TypeDescriptor {
    &self.descriptor
  }

  #[must_use]
  pub fn example(&self) -> Option<&Value> {
    self.example.as_ref()
  }

  /// The explicit content type, else the one the type supplies, else JSON.
  #[must_use]
  pub fn content_type(&self) -> ContentType {
    self
      .content_type
      .clone()
      .or_else(|| self.descriptor.capabilities().content_type.map(|supply| supply()))
      .unwrap_or_default()
  }
}

/// One HTTP operation to document.
#[derive(Debug, Clone, bon::Builder)]
pub struct Route {
  #[builder(into)]
  path: String,
  #[builder(default = Method::GET)]
  method: Method,
  #[builder(into)]
  summary: Option<String>,
  #[builder(into)]
  description: Option<String>,
  #[builder(default)]
  tags: Vec<String>,
  #[builder(into)]
  operation_id: Option<String>,
  #[builder(default)]
  deprecated: bool,
  params: Option<Payload>,
  body: Option<Payload>,
  /// Responses keyed by status code.
  #[builder(default)]
  responses: BTreeMap<u16, Payload>,
}

impl Route {
  #[must_use]
  pub fn path(&self) -> &str {
    &self.path
  }

  #[must_use]
  pub fn method(&self) -> &Method {
    &self.method
  }

  #[must_use]
  pub fn summary(&self) -> Option<&str> {
    self.summary.as_deref()
  }

  #[must_use]
  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  #[must_use]
  pub fn tags(&self) -> &[String] {
    &self.tags
  }

  #[must_use]
  pub fn operation_id(&self) -> Option<&str> {
    self.operation_id.as_deref()
  }

  #[must_use]
  pub fn is_deprecated(&self) -> bool {
    self.deprecated
  }

  #[must_use]
  pub fn params(&self) -> Option<&Payload> {
    self.params.as_ref()
  }

  #[must_use]
  pub fn body(&self) -> Option<&Payload> {
    self.body.as_ref()
  }

  #[must_use]
  pub fn responses(&self) -> &BTreeMap<u16, Payload> {
    &self.responses
  }
}
