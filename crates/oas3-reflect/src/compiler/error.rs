/// Failures raised while compiling a type into a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
  #[error("unsupported type `{type_name}` at {path}")]
  UnsupportedType { type_name: String, path: String },
}
