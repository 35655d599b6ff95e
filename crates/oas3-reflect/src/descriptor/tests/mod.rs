use std::{
  collections::{BTreeSet, HashMap},
  marker::PhantomData,
};

use serde_json::Number;

use crate::descriptor::{
  Describe, FieldDescriptor, FloatKind, IntKind, Kind, KnownShape, TypeDescriptor, naming::split_type_name,
};

struct Widget;

impl Describe for Widget {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([FieldDescriptor::of::<String>("label").serde("label,omitempty")])
  }
}

struct Page<T>(PhantomData<T>);

impl<T: Describe> Describe for Page<T> {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::structure::<Self>([FieldDescriptor::of::<Vec<T>>("items")])
  }
}

#[test]
fn test_split_type_name() {
  let cases = [
    ("app::models::User", ("app::models", "User")),
    ("app::Page<app::models::User>", ("app", "Page_User")),
    ("alloc::vec::Vec<i32>", ("alloc::vec", "Vec_i32")),
    ("std::collections::hash::map::HashMap<alloc::string::String, u8>", (
      "std::collections::hash::map",
      "HashMap_String_u8",
    )),
    ("[i32; 3]", ("", "i32_3")),
    ("&str", ("", "str")),
    ("i64", ("", "i64")),
    ("()", ("", "")),
  ];

  for (input, (module, name)) in cases {
    assert_eq!(
      split_type_name(input),
      (module.to_string(), name.to_string()),
      "failed for {input}"
    );
  }
}

#[test]
fn test_struct_descriptor_names() {
  let widget = Widget::describe();
  assert_eq!(widget.name(), "Widget");
  assert_eq!(widget.module_path(), "oas3_reflect::descriptor::tests");
  assert_eq!(widget.qualified_name(), "oas3_reflect.descriptor.tests.Widget");
  assert!(widget.is::<Widget>());
  assert_eq!(widget.fields().len(), 1);
  assert_eq!(widget.fields()[0].serde_annotation(), Some("label,omitempty"));

  let page = Page::<Widget>::describe();
  assert_eq!(page.name(), "Page_Widget");
}

#[test]
fn test_named_overrides_derived_name() {
  let renamed = Widget::describe().named("Gadget");
  assert_eq!(renamed.name(), "Gadget");
  assert_eq!(renamed.qualified_name(), "oas3_reflect.descriptor.tests.Gadget");
}

#[test]
fn test_primitive_kinds() {
  assert!(matches!(bool::describe().kind(), Kind::Bool));
  assert!(matches!(u16::describe().kind(), Kind::Int(IntKind::U16)));
  assert!(matches!(f32::describe().kind(), Kind::Float(FloatKind::F32)));
  assert!(matches!(String::describe().kind(), Kind::String));
  assert!(matches!(<str>::describe().kind(), Kind::String));
  assert!(matches!(serde_json::Value::describe().kind(), Kind::Any));
  assert!(String::describe().fields().is_empty());
}

#[test]
fn test_known_shapes() {
  let shape = |descriptor: TypeDescriptor| match descriptor.kind() {
    Kind::Known(shape) => Some(*shape),
    _ => None,
  };
  assert_eq!(
    shape(chrono::DateTime::<chrono::Utc>::describe()),
    Some(KnownShape::Timestamp)
  );
  assert_eq!(shape(chrono::NaiveDateTime::describe()), Some(KnownShape::Timestamp));
  assert_eq!(shape(http::Uri::describe()), Some(KnownShape::Uri));
  assert_eq!(shape(std::net::Ipv4Addr::describe()), Some(KnownShape::Ipv4));
  assert_eq!(shape(std::net::IpAddr::describe()), Some(KnownShape::Ipv4));
  assert_eq!(shape(std::net::Ipv6Addr::describe()), Some(KnownShape::Ipv6));
  assert_eq!(
    shape(<serde_json::value::RawValue>::describe()),
    Some(KnownShape::RawJson)
  );
}

#[test]
fn test_collection_kinds() {
  match <[u8; 4]>::describe().kind() {
    Kind::Seq { element, len, unique } => {
      assert!(element().is::<u8>());
      assert_eq!(*len, Some(4));
      assert!(!unique);
    }
    other => panic!("expected sequence, got {other:?}"),
  }

  assert!(matches!(BTreeSet::<String>::describe().kind(), Kind::Seq { unique: true, .. }));

  match HashMap::<u32, Widget>::describe().kind() {
    Kind::Map { key, value } => {
      assert!(key().is::<u32>());
      assert!(value().is::<Widget>());
    }
    other => panic!("expected map, got {other:?}"),
  }

  match <(i32, String)>::describe().kind() {
    Kind::Tuple(elements) => assert_eq!(elements.len(), 2),
    other => panic!("expected tuple, got {other:?}"),
  }
}

#[test]
fn test_unwrap_indirect() {
  let descriptor = Option::<Box<std::sync::Arc<Widget>>>::describe();
  assert!(matches!(descriptor.kind(), Kind::Optional(_)));
  assert!(descriptor.unwrap_indirect().is::<Widget>());
  assert!(Widget::describe().unwrap_indirect().is::<Widget>());
}

#[test]
fn test_integer_bounds_are_exact() {
  assert_eq!(
    IntKind::I64.bounds(),
    (Number::from(i64::MIN), Number::from(i64::MAX))
  );
  assert_eq!(IntKind::U64.bounds(), (Number::from(0u64), Number::from(u64::MAX)));
  assert_eq!(IntKind::I8.bounds(), (Number::from(-128), Number::from(127)));
  assert_eq!(FloatKind::F32.max_magnitude(), f64::from(f32::MAX));
}

#[test]
fn test_field_channels() {
  let field = FieldDescriptor::flatten::<Widget>("base")
    .yaml("base,inline")
    .schema("required")
    .doc("the base")
    .extras("x-order=1")
    .param_in("path");

  assert!(field.is_embedded());
  assert_eq!(field.ident(), "base");
  assert_eq!(field.serde_annotation(), None);
  assert_eq!(field.yaml_annotation(), Some("base,inline"));
  assert_eq!(field.schema_annotation(), "required");
  assert_eq!(field.description(), Some("the base"));
  assert_eq!(field.extras_annotation(), "x-order=1");
  assert_eq!(field.location(), Some("path"));
  assert!(field.descriptor().is::<Widget>());
}
