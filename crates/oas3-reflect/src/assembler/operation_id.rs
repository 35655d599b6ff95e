use inflections::Inflect;

use super::Route;
use crate::descriptor::{Kind, TypeDescriptor, naming::sanitize};

const STANDARD_CRATES: &[&str] = &["alloc", "core", "std"];

/// Derives a stable operation id for `route`.
///
/// An explicit id wins. Otherwise the id is built from the module path and
/// name of the body, parameter or first response type plus the method.
/// Containers contribute their element type. Types from the standard library
/// fall back to the method and path.
pub(crate) fn operation_id(route: &Route) -> String {
  if let Some(explicit) = route.operation_id() {
    return explicit.to_string();
  }

  let method = route.method().as_str().to_lowercase();
  let primary = route
    .body()
    .or_else(|| route.params())
    .or_else(|| route.responses().values().next());

  let raw = match primary.map(|payload| element_type(payload.descriptor())) {
    Some(descriptor) if is_user_module(descriptor.module_path()) => {
      format!("{}_{}_{method}", descriptor.module_path(), descriptor.name())
    }
    _ => format!("{method}_{}", route.path()),
  };

  sanitize(&raw).to_snake_case()
}

/// Follows wrappers, sequences and map values down to the carried type.
fn element_type(descriptor: &TypeDescriptor) -> TypeDescriptor {
  let mut current = descriptor.unwrap_indirect();
  loop {
    let next = match current.kind() {
      Kind::Seq { element, .. } => element(),
      Kind::Map { value, .. } => value(),
      _ => return current,
    };
    current = next.unwrap_indirect();
  }
}

fn is_user_module(module_path: &str) -> bool {
  let root = module_path.split("::").next().unwrap_or_default();
  !root.is_empty() && !STANDARD_CRATES.contains(&root)
}
