//! Output document format for `oas3-reflect`.
//!
//! These types mirror the OpenAPI 3.0 `Schema`, `Operation` and `PathItem`
//! object families. Every optional field is omitted from the serialized JSON
//! when it is empty, `false`, or `None`.

mod content_type;
mod document;
mod extras;
mod schema;


pub use content_type::ContentType;
pub use document::{
  Components, Contact, ExternalDocs, Header, Info, License, MediaType, OpenApi, Operation, Parameter, ParameterIn,
  PathItem, RequestBody, Response, Server, Tag,
};
pub use extras::Extras;
pub use schema::{REF_PREFIX, Schema, SchemaType, Xml, parse_ref};

/// OpenAPI version written into every document.
pub const OPENAPI_VERSION: &str = "3.0.3";
