//! Accumulates assembled operations into one OpenAPI document.
//!
//! [`DocumentRegistry`] is the owned form. The free functions operate on a
//! process-wide registry for services that register their routes from
//! scattered initialization code.

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use oas3_reflect_model::{Info, OpenApi};
use tracing::{debug, warn};

use crate::{
  assembler::{OperationAssembler, Route},
  compiler::{CompileError, CompilerOptions, SchemaCompiler},
};

const DEFAULT_TITLE: &str = "API";
const DEFAULT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRegistry {
  document: OpenApi,
}

impl Default for DocumentRegistry {
  fn default() -> Self {
    Self::new(Info::new(DEFAULT_TITLE, DEFAULT_VERSION))
  }
}

impl DocumentRegistry {
  #[must_use]
  pub fn new(info: Info) -> Self {
    Self {
      document: OpenApi::new(info),
    }
  }

  /// Assembles `route` and stores it under its path and method.
  ///
  /// Definitions are merged into the document's components; a name registered
  /// again replaces the earlier schema. Registering the same path and method
  /// twice keeps the last operation. Extension methods have no slot in a path
  /// item, so their operation is dropped while their definitions are kept.
  pub fn register(&mut self, route: &Route, compiler: &SchemaCompiler) -> Result<(), CompileError> {
    let bundle = OperationAssembler::new(compiler).assemble(route)?;
    let (operation, definitions) = bundle.into_operation(route);
    debug!(
      path = route.path(),
      method = %route.method(),
      operation_id = operation.operation_id.as_deref(),
      definitions = definitions.len(),
      "registering operation"
    );

    self.document.components.schemas.extend(definitions);

    let item = self.document.paths.entry(route.path().to_string()).or_default();
    match item.slot_mut(route.method()) {
      Some(slot) => *slot = Some(operation),
      None => warn!(
        path = route.path(),
        method = %route.method(),
        "method has no operation slot, dropping operation"
      ),
    }
    Ok(())
  }

  #[must_use]
  pub fn document(&self) -> &OpenApi {
    &self.document
  }

  #[must_use]
  pub fn into_document(self) -> OpenApi {
    self.document
  }

  pub fn to_json_pretty(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&self.document)
  }
}

static REGISTRY: LazyLock<Mutex<DocumentRegistry>> = LazyLock::new(|| Mutex::new(DocumentRegistry::default()));

fn registry() -> MutexGuard<'static, DocumentRegistry> {
  REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the process-wide registry with an empty document described by `info`.
pub fn init(info: Info) {
  *registry() = DocumentRegistry::new(info);
}

/// Registers `route` in the process-wide registry with default options.
pub fn register(route: &Route) -> Result<(), CompileError> {
  register_with(route, &CompilerOptions::default())
}

pub fn register_with(route: &Route, options: &CompilerOptions) -> Result<(), CompileError> {
  let compiler = SchemaCompiler::new(options.clone());
  registry().register(route, &compiler)
}

/// A copy of the process-wide document as registered so far.
#[must_use]
pub fn snapshot() -> OpenApi {
  registry().document().clone()
}
