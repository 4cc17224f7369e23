mod integer;
mod text;
mod typed;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ConversionError;
use crate::model::{CustomKind, CustomValue, ScalarType, Value, ValueType};
use integer::parse_integer;
use text::{parse_bool, parse_char, parse_from_str};

pub use typed::Typed;

type ConvertFn = dyn Fn(&str) -> Result<Value, ConversionError> + Send + Sync;
type DefaultFn = dyn Fn() -> Value + Send + Sync;

#[derive(Clone)]
struct CustomConverter {
    kind: CustomKind,
    convert: Arc<ConvertFn>,
    default: Arc<DefaultFn>,
}

/// The conversion table: every built-in scalar plus the user registered types.
#[derive(Clone, Default)]
pub(crate) struct Converters {
    custom: HashMap<TypeId, CustomConverter>,
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.custom.values().map(|c| c.kind.type_name()))
            .finish()
    }
}

impl Converters {
    pub(crate) fn register<T, F>(&mut self, converter: F)
    where
        T: Any + Default + Send + Sync,
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        let kind = CustomKind::of::<T>();
        let convert = move |text: &str| match converter(text) {
            Some(value) => Ok(Value::Custom(CustomValue::new(value))),
            None => Err(ConversionError::new(text, kind.type_name())),
        };

        self.custom.insert(
            kind.type_id(),
            CustomConverter {
                kind,
                convert: Arc::new(convert),
                default: Arc::new(|| Value::Custom(CustomValue::new(T::default()))),
            },
        );
    }

    pub(crate) fn supports(&self, scalar: ScalarType) -> bool {
        match scalar {
            ScalarType::Custom(kind) => self.custom.contains_key(&kind.type_id()),
            _ => true,
        }
    }

    /// Convert the whole text of one occurrence.
    ///
    /// Containers yield a `Value::List` of the delimited segments; an empty text yields one default element.
    pub(crate) fn convert(
        &self,
        value_type: ValueType,
        delimiter: char,
        text: &str,
    ) -> Result<Value, ConversionError> {
        match value_type {
            ValueType::Single(scalar) => self.convert_scalar(scalar, text),
            ValueType::List(scalar) | ValueType::NestedList(scalar) => {
                if text.is_empty() {
                    return Ok(Value::List(vec![self.default_scalar(scalar, text)?]));
                }

                text.split_terminator(delimiter)
                    .map(|segment| self.convert_scalar(scalar, segment))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List)
            }
        }
    }

    pub(crate) fn convert_scalar(
        &self,
        scalar: ScalarType,
        text: &str,
    ) -> Result<Value, ConversionError> {
        Ok(match scalar {
            ScalarType::Bool => Value::Bool(parse_bool(text)?),
            ScalarType::I8 => Value::I8(parse_integer(text)?),
            ScalarType::I16 => Value::I16(parse_integer(text)?),
            ScalarType::I32 => Value::I32(parse_integer(text)?),
            ScalarType::I64 => Value::I64(parse_integer(text)?),
            ScalarType::ISize => Value::ISize(parse_integer(text)?),
            ScalarType::U8 => Value::U8(parse_integer(text)?),
            ScalarType::U16 => Value::U16(parse_integer(text)?),
            ScalarType::U32 => Value::U32(parse_integer(text)?),
            ScalarType::U64 => Value::U64(parse_integer(text)?),
            ScalarType::USize => Value::USize(parse_integer(text)?),
            ScalarType::F32 => Value::F32(parse_from_str(text, "f32")?),
            ScalarType::F64 => Value::F64(parse_from_str(text, "f64")?),
            ScalarType::Char => Value::Char(parse_char(text)?),
            ScalarType::Str => Value::Str(text.to_string()),
            ScalarType::Custom(kind) => match self.custom.get(&kind.type_id()) {
                Some(custom) => (custom.convert)(text)?,
                None => return Err(ConversionError::new(text, kind.type_name())),
            },
        })
    }

    fn default_scalar(&self, scalar: ScalarType, text: &str) -> Result<Value, ConversionError> {
        Ok(match scalar {
            ScalarType::Bool => Value::Bool(false),
            ScalarType::I8 => Value::I8(0),
            ScalarType::I16 => Value::I16(0),
            ScalarType::I32 => Value::I32(0),
            ScalarType::I64 => Value::I64(0),
            ScalarType::ISize => Value::ISize(0),
            ScalarType::U8 => Value::U8(0),
            ScalarType::U16 => Value::U16(0),
            ScalarType::U32 => Value::U32(0),
            ScalarType::U64 => Value::U64(0),
            ScalarType::USize => Value::USize(0),
            ScalarType::F32 => Value::F32(0.0),
            ScalarType::F64 => Value::F64(0.0),
            ScalarType::Char => Value::Char('\0'),
            ScalarType::Str => Value::Str(String::default()),
            ScalarType::Custom(kind) => match self.custom.get(&kind.type_id()) {
                Some(custom) => (custom.default)(),
                None => return Err(ConversionError::new(text, kind.type_name())),
            },
        })
    }
}
