//! Turns a [`Route`] into an OpenAPI operation and the definitions it references.

mod examples;
mod operation_id;
mod route;

#[cfg(test)]
mod tests;

use http::StatusCode;
use indexmap::IndexMap;
use oas3_reflect_model::{MediaType, Operation, Parameter, ParameterIn, RequestBody, Response, Schema, SchemaType};
pub use route::{Payload, Route, RouteBuilder};
use tracing::{debug, trace};

use crate::compiler::{CompileError, Definitions, SchemaCompiler};

const DEFAULT_RESPONSE_STATUS: &str = "200";
const DEFAULT_RESPONSE_DESCRIPTION: &str = "Successful Response";
const FALLBACK_RESPONSE_DESCRIPTION: &str = "Response";

/// The pieces of one assembled operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationBundle {
  pub operation_id: String,
  pub parameters: Vec<Parameter>,
  pub request_body: Option<RequestBody>,
  pub responses: IndexMap<String, Response>,
  /// Every definition referenced by the parameters, body and responses.
  pub definitions: Definitions,
}

impl OperationBundle {
  /// Builds the document operation, carrying over the route's descriptive fields.
  #[must_use]
  pub fn into_operation(self, route: &Route) -> (Operation, Definitions) {
    let operation = Operation {
      tags: route.tags().to_vec(),
      summary: route.summary().map(str::to_string),
      description: route.description().map(str::to_string),
      operation_id: Some(self.operation_id),
      parameters: self.parameters,
      request_body: self.request_body,
      responses: self.responses,
      deprecated: route.is_deprecated(),
      ..Default::default()
    };
    (operation, self.definitions)
  }
}

pub struct OperationAssembler<'c> {
  compiler: &'c SchemaCompiler,
}

impl<'c> OperationAssembler<'c> {
  #[must_use]
  pub fn new(compiler: &'c SchemaCompiler) -> Self {
    Self { compiler }
  }

  pub fn assemble(&self, route: &Route) -> Result<OperationBundle, CompileError> {
    debug!(path = route.path(), method = %route.method(), "assembling operation");
    let mut definitions = Definitions::new();

    let parameters = match route.params() {
      Some(params) => self.parameters(params, &mut definitions)?,
      None => vec![],
    };
    let request_body = route
      .body()
      .map(|body| self.request_body(body, &mut definitions))
      .transpose()?;
    let responses = self.responses(route, &mut definitions)?;

    Ok(OperationBundle {
      operation_id: operation_id::operation_id(route),
      parameters,
      request_body,
      responses,
      definitions,
    })
  }

  fn request_body(&self, payload: &Payload, definitions: &mut Definitions) -> Result<RequestBody, CompileError> {
    let mut local = Definitions::new();
    let schema = self.compiler.compile_into(payload.descriptor(), &mut local)?;
    let example = payload.example().map(|value| {
      let root = local.resolve(&schema).unwrap_or(&schema);
      examples::shape_example(root, value)
    });
    definitions.merge(local);

    Ok(RequestBody {
      description: None,
      content: [(payload.content_type().to_string(), MediaType {
        schema: Some(schema),
        example,
      })]
      .into_iter()
      .collect(),
      required: true,
    })
  }

  /// Emits one parameter per property of the parameter struct.
  ///
  /// The location comes from the source field's `param_in` channel and
  /// defaults to `query`. Path parameters are always required.
  fn parameters(&self, payload: &Payload, definitions: &mut Definitions) -> Result<Vec<Parameter>, CompileError> {
    let descriptor = payload.descriptor();
    let mut aggregate = Schema::typed(SchemaType::Object);
    let mut local = Definitions::new();
    self
      .compiler
      .expand_fields_into(descriptor, &mut aggregate, &mut local)?;
    definitions.merge(local);

    let required = std::mem::take(&mut aggregate.required);
    let parameters = aggregate
      .properties
      .into_iter()
      .map(|(name, schema)| {
        let location = schema
          .field_location
          .as_deref()
          .map(parse_location)
          .unwrap_or_default();
        let example = payload
          .example()
          .and_then(|value| examples::property_example(value, &name, &schema));

        Parameter {
          required: location == ParameterIn::Path || required.contains(&name),
          description: schema.description.clone(),
          deprecated: schema.deprecated,
          name,
          location,
          schema: Some(schema),
          example,
          ..Default::default()
        }
      })
      .collect();
    Ok(parameters)
  }

  fn responses(&self, route: &Route, definitions: &mut Definitions) -> Result<IndexMap<String, Response>, CompileError> {
    if route.responses().is_empty() {
      let default = Response {
        description: DEFAULT_RESPONSE_DESCRIPTION.to_string(),
        ..Default::default()
      };
      return Ok([(DEFAULT_RESPONSE_STATUS.to_string(), default)].into_iter().collect());
    }

    let mut responses = IndexMap::new();
    for (status, payload) in route.responses() {
      let mut local = Definitions::new();
      let schema = self.compiler.compile_into(payload.descriptor(), &mut local)?;
      definitions.merge(local);

      let description = StatusCode::from_u16(*status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or(FALLBACK_RESPONSE_DESCRIPTION);

      responses.insert(status.to_string(), Response {
        description: description.to_string(),
        content: [(payload.content_type().to_string(), MediaType {
          schema: Some(schema),
          example: payload.example().cloned(),
        })]
        .into_iter()
        .collect(),
        ..Default::default()
      });
    }
    Ok(responses)
  }
}

fn parse_location(raw: &str) -> ParameterIn {
  raw.trim().parse().unwrap_or_else(|_| {
    trace!(location = raw, "unknown parameter location, using query");
    ParameterIn::Query
  })
}
