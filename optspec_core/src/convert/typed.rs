use crate::model::{ScalarType, Value, ValueType};

/// Behaviour for a type that an option may be declared with and read back as.
///
/// Implemented for the primitive scalars, `String`, and up to two levels of `Vec` around them.
/// User registered types are read through [`OptionValue::as_custom`](crate::OptionValue::as_custom) instead.
pub trait Typed: Sized {
    /// The value type tag for `Self`.
    fn value_type() -> ValueType;

    /// Extract `Self` from a materialized value of matching shape.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! typed {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Typed for $t {
                fn value_type() -> ValueType {
                    ValueType::Single(ScalarType::$variant)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    }
                }
            }

            impl Typed for Vec<$t> {
                fn value_type() -> ValueType {
                    ValueType::List(ScalarType::$variant)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::List(items) => items.iter().map(<$t as Typed>::from_value).collect(),
                        _ => None,
                    }
                }
            }

            impl Typed for Vec<Vec<$t>> {
                fn value_type() -> ValueType {
                    ValueType::NestedList(ScalarType::$variant)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::List(rows) => rows.iter().map(<Vec<$t> as Typed>::from_value).collect(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

typed!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => ISize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => USize,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Str,
);
