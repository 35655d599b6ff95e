use std::{
  collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
  net::{IpAddr, Ipv4Addr, Ipv6Addr},
  rc::Rc,
  sync::Arc,
};

use chrono::{DateTime, NaiveDateTime, TimeZone};
use indexmap::{IndexMap, IndexSet};
use serde_json::value::RawValue;

use super::{Describe, FloatKind, IntKind, Kind, KnownShape, TypeDescriptor, TypeRef};

macro_rules! describe_as {
  ($($ty:ty => $kind:expr),* $(,)?) => {
    $(
      impl Describe for $ty {
        fn describe() -> TypeDescriptor {
          TypeDescriptor::new::<Self>($kind)
        }
      }
    )*
  };
}

describe_as! {
  bool => Kind::Bool,
  i8 => Kind::Int(IntKind::I8),
  i16 => Kind::Int(IntKind::I16),
  i32 => Kind::Int(IntKind::I32),
  i64 => Kind::Int(IntKind::I64),
  isize => Kind::Int(IntKind::Isize),
  u8 => Kind::Int(IntKind::U8),
  u16 => Kind::Int(IntKind::U16),
  u32 => Kind::Int(IntKind::U32),
  u64 => Kind::Int(IntKind::U64),
  usize => Kind::Int(IntKind::Usize),
  f32 => Kind::Float(FloatKind::F32),
  f64 => Kind::Float(FloatKind::F64),
  char => Kind::String,
  str => Kind::String,
  String => Kind::String,
  serde_json::Value => Kind::Any,
  RawValue => Kind::Known(KnownShape::RawJson),
  NaiveDateTime => Kind::Known(KnownShape::Timestamp),
  http::Uri => Kind::Known(KnownShape::Uri),
  IpAddr => Kind::Known(KnownShape::Ipv4),
  Ipv4Addr => Kind::Known(KnownShape::Ipv4),
  Ipv6Addr => Kind::Known(KnownShape::Ipv6),
}

impl<Tz: TimeZone + 'static> Describe for DateTime<Tz> {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::new::<Self>(Kind::Known(KnownShape::Timestamp))
  }
}

macro_rules! describe_seq {
  ($($ty:ident<T $(, $extra:ident)*> => unique: $unique:expr),* $(,)?) => {
    $(
      impl<T: Describe $(, $extra: 'static)*> Describe for $ty<T $(, $extra)*> {
        fn describe() -> TypeDescriptor {
          TypeDescriptor::new::<Self>(Kind::Seq {
            element: T::describe,
            len: None,
            unique: $unique,
          })
        }
      }
    )*
  };
}

describe_seq! {
  Vec<T> => unique: false,
  VecDeque<T> => unique: false,
  HashSet<T, S> => unique: true,
  BTreeSet<T> => unique: true,
  IndexSet<T, S> => unique: true,
}

impl<T: Describe> Describe for [T] {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::new::<Self>(Kind::Seq {
      element: T::describe,
      len: None,
      unique: false,
    })
  }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::new::<Self>(Kind::Seq {
      element: T::describe,
      len: Some(N),
      unique: false,
    })
  }
}

macro_rules! describe_map {
  ($($ty:ident<K, V $(, $extra:ident)*>),* $(,)?) => {
    $(
      impl<K: Describe, V: Describe $(, $extra: 'static)*> Describe for $ty<K, V $(, $extra)*> {
        fn describe() -> TypeDescriptor {
          TypeDescriptor::new::<Self>(Kind::Map {
            key: K::describe,
            value: V::describe,
          })
        }
      }
    )*
  };
}

describe_map! {
  HashMap<K, V, S>,
  BTreeMap<K, V>,
  IndexMap<K, V, S>,
}

impl<T: Describe> Describe for Option<T> {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::new::<Self>(Kind::Optional(T::describe))
  }
}

macro_rules! describe_pointer {
  ($($ty:ident),* $(,)?) => {
    $(
      impl<T: Describe + ?Sized> Describe for $ty<T> {
        fn describe() -> TypeDescriptor {
          TypeDescriptor::new::<Self>(Kind::Pointer(T::describe))
        }
      }
    )*
  };
}

describe_pointer!(Box, Rc, Arc);

impl<T: Describe + ?Sized> Describe for &'static T {
  fn describe() -> TypeDescriptor {
    TypeDescriptor::new::<Self>(Kind::Pointer(T::describe))
  }
}

macro_rules! describe_tuple {
  ($(($($name:ident),*)),* $(,)?) => {
    $(
      impl<$($name: Describe),*> Describe for ($($name,)*) {
        fn describe() -> TypeDescriptor {
          TypeDescriptor::new::<Self>(Kind::Tuple(vec![$($name::describe as TypeRef),*]))
        }
      }
    )*
  };
}

describe_tuple! {
  (),
  (A),
  (A, B),
  (A, B, C),
  (A, B, C, D),
}
