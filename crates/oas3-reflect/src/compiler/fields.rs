use oas3_reflect_model::Schema;
use tracing::trace;

use super::{CompileError, Walk};
use crate::{
  annotations::{FieldNaming, apply_annotations},
  descriptor::{FieldDescriptor, Kind, TypeDescriptor},
};

impl Walk<'_, '_> {
  /// Visits the declared fields of `descriptor`, then its synthetic fields,
  /// adding a property for each named field to `aggregate`.
  pub(crate) fn expand_fields(&mut self, aggregate: &mut Schema, descriptor: &TypeDescriptor) -> Result<(), CompileError> {
    let descriptor = descriptor.unwrap_indirect();
    if !matches!(descriptor.kind(), Kind::Struct(_)) {
      return Ok(());
    }

    let synthetic = self
      .options()
      .synthetic_fields
      .as_ref()
      .map(|hook| hook(&descriptor))
      .unwrap_or_default();

    for field in descriptor.fields().iter().chain(&synthetic) {
      self.expand_field(aggregate, &descriptor, field)?;
    }
    Ok(())
  }

  fn expand_field(
    &mut self,
    aggregate: &mut Schema,
    owner: &TypeDescriptor,
    field: &FieldDescriptor,
  ) -> Result<(), CompileError> {
    let Some(naming) = FieldNaming::resolve(field, self.options()) else {
      trace!(field = field.ident(), "skipping ignored field");
      return Ok(());
    };

    if naming.name.is_empty() {
      if naming.embed {
        self.embed(aggregate, field)?;
      }
      return Ok(());
    }

    self.path.push(field.ident().to_string());
    let compiled = self.compile(&field.descriptor());
    self.path.pop();
    let mut property = compiled?;

    apply_annotations(&mut property, field, aggregate, &naming.name);

    if let Some(field_docs) = owner.capabilities().field_docs
      && let Some(doc) = field_docs(field.ident())
    {
      property.description = Some(doc);
    }

    if naming.nullable {
      property = property.into_nullable();
    }
    property.field_name = Some(field.ident().to_string());
    property.field_location = field.location().map(str::to_string);

    aggregate.properties.insert(naming.name.clone(), property);
    if naming.required {
      aggregate.require(&naming.name);
    }
    Ok(())
  }

  /// Promotes the fields of an embedded struct into `aggregate`.
  fn embed(&mut self, aggregate: &mut Schema, field: &FieldDescriptor) -> Result<(), CompileError> {
    let inner = field.descriptor().unwrap_indirect();
    if self.embedding.contains(&inner.id()) {
      trace!(field = field.ident(), "skipping recursive embedding");
      return Ok(());
    }

    self.embedding.push(inner.id());
    self.path.push(field.ident().to_string());
    let expanded = self.expand_fields(aggregate, &inner);
    self.path.pop();
    self.embedding.pop();
    expanded
  }
}
