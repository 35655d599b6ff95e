//! Field annotation mini-languages.
//!
//! The schema channel is a comma-separated list of `key=value` pairs and bare
//! flags. Generic keywords apply to every node, the remaining grammar is
//! picked by the node's type. Malformed literals are skipped with a trace
//! event and never fail compilation.

mod keywords;
mod naming;


pub use keywords::apply_annotations;
pub(crate) use naming::FieldNaming;

/// One item of a comma-separated annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
  Flag(&'a str),
  Pair(&'a str, &'a str),
}

/// Splits an annotation on commas, then each item on its first `=`.
pub(crate) fn tokenize(annotation: &str) -> impl Iterator<Item = Token<'_>> {
  annotation
    .split(',')
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map(|item| match item.split_once('=') {
      Some((key, value)) => Token::Pair(key.trim(), value),
      None => Token::Flag(item),
    })
}
