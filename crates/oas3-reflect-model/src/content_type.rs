use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Media type key used for request and response `content` maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(Cow<'static, str>);

impl ContentType {
  pub const JSON: Self = Self(Cow::Borrowed("application/json"));
  pub const FORM: Self = Self(Cow::Borrowed("application/x-www-form-urlencoded"));
  pub const FORM_DATA: Self = Self(Cow::Borrowed("multipart/form-data"));
  pub const OCTET_STREAM: Self = Self(Cow::Borrowed("application/octet-stream"));
  pub const TEXT: Self = Self(Cow::Borrowed("text/plain"));

  /// Creates a content type from an arbitrary media type string.
  #[must_use]
  pub fn new(media_type: impl Into<Cow<'static, str>>) -> Self {
    Self(media_type.into())
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for ContentType {
  fn default() -> Self {
    Self::JSON
  }
}

impl fmt::Display for ContentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ContentType {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
