use oas3_reflect_model::{Schema, SchemaType};
use regex::Regex;
use serde_json::{Number, Value};
use tracing::trace;

use super::{Token, tokenize};
use crate::descriptor::FieldDescriptor;

const ALLOWED_FORMATS: &[&str] = &["date-time", "email", "hostname", "ipv4", "ipv6", "uri"];

/// Applies a field's documentation, schema keywords and extras to its compiled node.
///
/// `enclosing` is the object schema that owns the property; `oneof_required=`
/// records `property` as required inside one of its `oneOf` groups.
/// Reference nodes only accept keywords that do not touch structure.
pub fn apply_annotations(node: &mut Schema, field: &FieldDescriptor, enclosing: &mut Schema, property: &str) {
  if let Some(doc) = field.description() {
    node.description = Some(doc.to_string());
  }

  let tokens: Vec<Token<'_>> = tokenize(field.schema_annotation()).collect();
  apply_generic(node, &tokens, enclosing, property);

  if !node.is_reference() {
    match node.schema_type {
      Some(SchemaType::String) => apply_string(node, &tokens),
      Some(SchemaType::Integer | SchemaType::Number) => apply_numeric(node, &tokens),
      Some(SchemaType::Array) => apply_array(node, &tokens),
      _ => {}
    }
  }

  for token in tokenize(field.extras_annotation()) {
    if let Token::Pair(key, value) = token {
      node.extras.insert(key, value);
    }
  }
}

fn apply_generic(node: &mut Schema, tokens: &[Token<'_>], enclosing: &mut Schema, property: &str) {
  let structural = !node.is_reference();

  for token in tokens {
    match *token {
      Token::Pair("title", value) => node.title = Some(value.to_string()),
      Token::Pair("desc", value) => node.description = Some(value.to_string()),
      Token::Pair("type", value) if structural => match value.parse::<SchemaType>() {
        Ok(schema_type) => node.schema_type = Some(schema_type),
        Err(_) => trace!(property, value, "ignoring unknown schema type"),
      },
      Token::Pair("enum", value) if structural => {
        if let Some(literal) = coerce_literal(node.schema_type, value) {
          node.enum_values.push(literal);
        }
      }
      Token::Pair("oneof_type", value) if structural => {
        node.schema_type = None;
        node.one_of = value
          .split(';')
          .filter_map(|name| name.trim().parse::<SchemaType>().ok())
          .map(Schema::typed)
          .collect();
      }
      Token::Pair("oneof_required", group) => enclosing.one_of_group_mut(group).require(property),
      Token::Flag("deprecated") => node.deprecated = true,
      Token::Flag("readonly") => node.read_only = true,
      Token::Flag("writeonly") => node.write_only = true,
      _ => {}
    }
  }
}

fn apply_string(node: &mut Schema, tokens: &[Token<'_>]) {
  for token in tokens {
    let Token::Pair(key, value) = *token else {
      continue;
    };
    match key {
      "minLen" => {
        if let Some(count) = parse_count(key, value) {
          node.min_length = Some(count);
        }
      }
      "maxLen" => {
        if let Some(count) = parse_count(key, value) {
          node.max_length = Some(count);
        }
      }
      "len" => {
        if let Some(count) = parse_count(key, value) {
          node.min_length = Some(count);
          node.max_length = Some(count);
        }
      }
      "pattern" => {
        if Regex::new(value).is_ok() {
          node.pattern = Some(value.to_string());
        } else {
          trace!(pattern = value, "ignoring invalid pattern");
        }
      }
      "format" => {
        if ALLOWED_FORMATS.contains(&value) {
          node.format = Some(value.to_string());
        } else {
          trace!(format = value, "ignoring unsupported string format");
        }
      }
      "default" => node.default = Some(Value::String(value.to_string())),
      "example" => node.examples.push(Value::String(value.to_string())),
      _ => {}
    }
  }
}

fn apply_numeric(node: &mut Schema, tokens: &[Token<'_>]) {
  for token in tokens {
    let Token::Pair(key, value) = *token else {
      continue;
    };
    match key {
      "multi" => {
        if let Some(number) = parse_number(key, value) {
          node.multiple_of = Some(number);
        }
      }
      "gte" | "gt" => {
        if let Some(number) = parse_number(key, value) {
          node.minimum = Some(number);
          node.exclusive_minimum = key == "gt";
        }
      }
      "lte" | "lt" => {
        if let Some(number) = parse_number(key, value) {
          node.maximum = Some(number);
          node.exclusive_maximum = key == "lt";
        }
      }
      "default" => {
        if let Some(literal) = coerce_literal(node.schema_type, value) {
          node.default = Some(literal);
        }
      }
      "example" => {
        if let Some(literal) = coerce_literal(node.schema_type, value) {
          node.examples.push(literal);
        }
      }
      _ => {}
    }
  }
}

fn apply_array(node: &mut Schema, tokens: &[Token<'_>]) {
  let mut defaults = vec![];

  for token in tokens {
    match *token {
      Token::Pair("minLen", value) => {
        if let Some(count) = parse_count("minLen", value) {
          node.min_items = Some(count);
        }
      }
      Token::Pair("maxLen", value) => {
        if let Some(count) = parse_count("maxLen", value) {
          node.max_items = Some(count);
        }
      }
      Token::Pair("len", value) => {
        if let Some(count) = parse_count("len", value) {
          node.min_items = Some(count);
          node.max_items = Some(count);
        }
      }
      Token::Pair("unique", value) => node.unique_items = !value.trim().eq_ignore_ascii_case("false"),
      Token::Pair("default", value) => {
        if let Some(literal) = coerce_literal(item_type(node), value) {
          defaults.push(literal);
        }
      }
      Token::Pair("enum", value) => {
        let literal = coerce_literal(item_type(node), value);
        if let (Some(items), Some(literal)) = (node.items.as_deref_mut(), literal) {
          items.enum_values.push(literal);
        }
      }
      Token::Flag(flag) if flag.contains('|') => {
        if let Some(items) = node.items.as_deref_mut() {
          items
            .enum_values
            .extend(flag.split('|').map(|choice| Value::String(choice.to_string())));
        }
      }
      _ => {}
    }
  }

  if !defaults.is_empty() {
    node.default = Some(Value::Array(defaults));
  }
}

fn item_type(node: &Schema) -> Option<SchemaType> {
  node.items.as_deref().and_then(|items| items.schema_type)
}

fn parse_count(key: &str, value: &str) -> Option<u64> {
  value
    .trim()
    .parse()
    .inspect_err(|_| trace!(key, value, "ignoring malformed length"))
    .ok()
}

fn parse_number(key: &str, value: &str) -> Option<Number> {
  let number = parse_json_number(value.trim());
  if number.is_none() {
    trace!(key, value, "ignoring malformed number");
  }
  number
}

/// Parses an integer exactly when possible and falls back to a finite float.
fn parse_json_number(value: &str) -> Option<Number> {
  if let Ok(int) = value.parse::<i64>() {
    return Some(int.into());
  }
  if let Ok(int) = value.parse::<u64>() {
    return Some(int.into());
  }
  value.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Converts a literal to the JSON value of `schema_type`.
fn coerce_literal(schema_type: Option<SchemaType>, value: &str) -> Option<Value> {
  let literal = match schema_type? {
    SchemaType::String => Some(Value::String(value.to_string())),
    SchemaType::Integer => {
      let trimmed = value.trim();
      trimmed
        .parse::<i64>()
        .map(Value::from)
        .or_else(|_| trimmed.parse::<u64>().map(Value::from))
        .ok()
    }
    SchemaType::Number => parse_json_number(value.trim()).map(Value::Number),
    SchemaType::Boolean => value.trim().parse::<bool>().ok().map(Value::Bool),
    _ => return None,
  };
  if literal.is_none() {
    trace!(?schema_type, value, "ignoring literal that does not match the node type");
  }
  literal
}
