use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::{OPENAPI_VERSION, schema::Schema};

/// Root of an OpenAPI document.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
  pub openapi: String,
  pub info: Info,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub servers: Vec<Server>,
  #[serde(default)]
  pub paths: IndexMap<String, PathItem>,
  #[serde(default)]
  pub components: Components,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<Tag>,
  pub external_docs: Option<ExternalDocs>,
}

impl OpenApi {
  #[must_use]
  pub fn new(info: Info) -> Self {
    Self {
      openapi: OPENAPI_VERSION.to_string(),
      info,
      servers: vec![],
      paths: IndexMap::new(),
      components: Components::default(),
      tags: vec![],
      external_docs: None,
    }
  }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
  pub title: String,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub terms_of_service: Option<String>,
  pub contact: Option<Contact>,
  pub license: Option<License>,
  pub version: String,
}

impl Info {
  #[must_use]
  pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      version: version.into(),
      ..Default::default()
    }
  }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub name: Option<String>,
  pub url: Option<String>,
  pub email: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
  pub name: String,
  pub url: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
  pub url: String,
  pub description: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
  pub name: String,
  pub description: Option<String>,
  pub external_docs: Option<ExternalDocs>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
  pub description: Option<String>,
  pub url: String,
}

/// Shared, reusable objects of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub schemas: IndexMap<String, Schema>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub responses: IndexMap<String, Response>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub parameters: IndexMap<String, Parameter>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub request_bodies: IndexMap<String, RequestBody>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub headers: IndexMap<String, Header>,
}

/// Operations available on a single path.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
  pub summary: Option<String>,
  pub description: Option<String>,
  pub get: Option<Operation>,
  pub put: Option<Operation>,
  pub post: Option<Operation>,
  pub delete: Option<Operation>,
  pub options: Option<Operation>,
  pub head: Option<Operation>,
  pub patch: Option<Operation>,
  pub trace: Option<Operation>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub servers: Vec<Server>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<Parameter>,
}

impl PathItem {
  /// Returns the operation slot for `method`.
  ///
  /// Extension methods have no slot in an OpenAPI 3.0 path item.
  pub fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Operation>> {
    match method.as_str() {
      "GET" => Some(&mut self.get),
      "PUT" => Some(&mut self.put),
      "POST" => Some(&mut self.post),
      "DELETE" => Some(&mut self.delete),
      "OPTIONS" => Some(&mut self.options),
      "HEAD" => Some(&mut self.head),
      "PATCH" => Some(&mut self.patch),
      "TRACE" => Some(&mut self.trace),
      _ => None,
    }
  }

  #[must_use]
  pub fn operation(&self, method: &Method) -> Option<&Operation> {
    match method.as_str() {
      "GET" => self.get.as_ref(),
      "PUT" => self.put.as_ref(),
      "POST" => self.post.as_ref(),
      "DELETE" => self.delete.as_ref(),
      "OPTIONS" => self.options.as_ref(),
      "HEAD" => self.head.as_ref(),
      "PATCH" => self.patch.as_ref(),
      "TRACE" => self.trace.as_ref(),
      _ => None,
    }
  }

  /// Iterates the populated operations in document order.
  pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
    [
      (Method::GET, &self.get),
      (Method::PUT, &self.put),
      (Method::POST, &self.post),
      (Method::DELETE, &self.delete),
      (Method::OPTIONS, &self.options),
      (Method::HEAD, &self.head),
      (Method::PATCH, &self.patch),
      (Method::TRACE, &self.trace),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
  }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub external_docs: Option<ExternalDocs>,
  pub operation_id: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<Parameter>,
  pub request_body: Option<RequestBody>,
  #[serde(default)]
  pub responses: IndexMap<String, Response>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub deprecated: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub servers: Vec<Server>,
}

/// Location of an operation parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterIn {
  Path,
  #[default]
  Query,
  Header,
  Cookie,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterIn,
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub required: bool,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub deprecated: bool,
  pub style: Option<String>,
  pub explode: Option<bool>,
  pub schema: Option<Schema>,
  pub example: Option<Value>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
  pub description: Option<String>,
  #[serde(default)]
  pub content: IndexMap<String, MediaType>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub required: bool,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
  pub schema: Option<Schema>,
  pub example: Option<Value>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
  pub description: String,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub headers: IndexMap<String, Header>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaType>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub required: bool,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub deprecated: bool,
  pub schema: Option<Schema>,
  pub example: Option<Value>,
}
