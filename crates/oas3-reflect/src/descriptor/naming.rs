use std::sync::LazyLock;

use any_ascii::any_ascii;
use regex::Regex;

static PATH_QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:[A-Za-z_][A-Za-z0-9_]*::)+").unwrap());
static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores,
/// collapses consecutive underscores and trims them from both ends.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Splits a `std::any::type_name` string into `(module_path, definition_name)`.
///
/// Generic arguments are flattened into the name with their own module paths
/// dropped, so `app::Page<app::User>` yields `("app", "Page_User")`.
pub(crate) fn split_type_name(rust_name: &str) -> (String, String) {
  let head = rust_name.split('<').next().unwrap_or(rust_name);
  let head = head
    .trim_start_matches(['&', '*', '[', '('])
    .trim_start_matches("mut ")
    .trim_start_matches("const ")
    .trim_start_matches("dyn ");
  let module_path = head
    .rsplit_once("::")
    .map(|(module, _)| module.to_string())
    .unwrap_or_default();

  let unqualified = PATH_QUALIFIER_RE.replace_all(rust_name, "");
  (module_path, sanitize(&unqualified))
}
