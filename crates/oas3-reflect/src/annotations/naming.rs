use crate::{compiler::CompilerOptions, descriptor::FieldDescriptor};

/// How a field surfaces in its enclosing object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldNaming {
  /// Property name. Empty when the field is inlined.
  pub name: String,
  /// Promote the field's own fields into the enclosing object.
  pub embed: bool,
  pub required: bool,
  pub nullable: bool,
}

impl FieldNaming {
  /// Resolves the property name and flags of `field`, or `None` if it is ignored.
  pub(crate) fn resolve(field: &FieldDescriptor, options: &CompilerOptions) -> Option<Self> {
    let yaml = field.yaml_annotation();
    let (naming, has_entry) = match field.serde_annotation() {
      Some(serde) if !options.prefer_alternate_naming_channel => (serde, true),
      _ => (yaml.unwrap_or_default(), yaml.is_some()),
    };

    let mut naming_tokens = naming.split(',').map(str::trim);
    let naming_head = naming_tokens.next().unwrap_or_default();
    if naming_head == "-" {
      return None;
    }
    let omit_empty = naming_tokens.any(|token| token == "omitempty");

    let schema_tokens: Vec<&str> = field.schema_annotation().split(',').map(str::trim).collect();
    if schema_tokens.first() == Some(&"-") {
      return None;
    }

    let required = if options.require_from_schema_annotation_only {
      schema_tokens.contains(&"required")
    } else {
      !omit_empty
    };
    let nullable = schema_tokens.contains(&"nullable");

    let mut name = if naming_head.is_empty() {
      field.ident().to_string()
    } else {
      naming_head.to_string()
    };
    let mut embed = false;

    if field.is_embedded() && !has_entry {
      if options.alternate_embedded_structs {
        name = name.to_lowercase();
      } else {
        name.clear();
        embed = true;
      }
    }

    if yaml.is_some_and(|entry| entry.split(',').any(|token| token.trim() == "inline")) {
      name.clear();
      embed = true;
    }

    Some(Self {
      name,
      embed,
      required,
      nullable,
    })
  }
}
