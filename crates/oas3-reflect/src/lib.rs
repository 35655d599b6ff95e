//! Compile Rust type descriptions into OpenAPI 3.0 schemas and operations.
//!
//! Types implement [`Describe`] to expose their structure and per-field
//! annotations. The [`SchemaCompiler`] turns descriptors into schema nodes and
//! a table of named definitions, the [`OperationAssembler`] builds request
//! bodies, parameters and responses for a [`Route`], and the
//! [`DocumentRegistry`] collects operations into a serializable [`OpenApi`]
//! document.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use oas3_reflect::{
//!   Describe, DocumentRegistry, FieldDescriptor, Info, Payload, Route, SchemaCompiler, TypeDescriptor,
//! };
//!
//! #[derive(serde::Serialize)]
//! struct Greeting {
//!   message: String,
//! }
//!
//! impl Describe for Greeting {
//!   fn describe() -> TypeDescriptor {
//!     TypeDescriptor::structure::<Self>([FieldDescriptor::of::<String>("message").serde("message")])
//!   }
//! }
//!
//! let route = Route::builder()
//!   .path("/hello")
//!   .responses(BTreeMap::from([(200, Payload::of(&Greeting { message: "hi".into() }))]))
//!   .build();
//!
//! let mut registry = DocumentRegistry::new(Info::new("Greeter", "1.0.0"));
//! registry.register(&route, &SchemaCompiler::default())?;
//! assert!(registry.document().components.schemas.contains_key("Greeting"));
//! # Ok::<(), oas3_reflect::CompileError>(())
//! ```

pub mod annotations;
pub mod assembler;
pub mod compiler;
pub mod descriptor;
pub mod registry;

pub use assembler::{OperationAssembler, OperationBundle, Payload, Route};
pub use compiler::{CompileError, Compilation, CompilerOptions, Definitions, SchemaCompiler};
pub use descriptor::{
  Describe, DescribesEnum, FieldDescriptor, Kind, SuppliesContentType, SuppliesFieldDocs, SuppliesSchema,
  TypeDescriptor,
};
pub use oas3_reflect_model::{self as model, ContentType, Info, OpenApi, ParameterIn, Schema, SchemaType};
pub use registry::DocumentRegistry;
