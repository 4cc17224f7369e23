use std::any::Any;
use std::collections::HashMap;

use crate::api::OptionKey;
use crate::constant::DEFAULT_DELIMITER;
use crate::convert::{Converters, Typed};
use crate::error::{ConversionError, Error, ParseError, ValueError};
use crate::model::{CustomKind, ScalarType, Value, ValueType};

/// The per-parse slot of one declared option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionValue {
    name: String,
    value_type: ValueType,
    count: usize,
    default: bool,
    value: Option<Value>,
}

impl OptionValue {
    pub(crate) fn new(name: String, value_type: ValueType) -> Self {
        Self {
            name,
            value_type,
            count: 0,
            default: false,
            value: None,
        }
    }

    /// Record one occurrence holding `value`.
    pub(crate) fn occur(&mut self, value: Value) {
        self.count += 1;
        self.absorb(value);
    }

    /// Materialize the default; not an occurrence.
    pub(crate) fn apply_default(&mut self, value: Value) {
        self.default = true;
        self.absorb(value);
    }

    /// Record one occurrence that replaces whatever value the default materialized.
    pub(crate) fn occur_over_default(&mut self, value: Value) {
        self.value.take();
        self.occur(value);
    }

    fn absorb(&mut self, value: Value) {
        let merged = match (self.value_type, self.value.take(), value) {
            (ValueType::List(_), Some(Value::List(mut items)), Value::List(more)) => {
                items.extend(more);
                Value::List(items)
            }
            (ValueType::NestedList(_), Some(Value::List(mut rows)), row) => {
                rows.push(row);
                Value::List(rows)
            }
            (ValueType::NestedList(_), _, row) => Value::List(vec![row]),
            (_, _, value) => value,
        };

        self.value.replace(merged);
    }

    /// The number of times this option occurred, including an environment variable fallback.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the declared default was applied, even if an environment variable later replaced it.
    pub fn has_default(&self) -> bool {
        self.default
    }

    /// Whether any occurrence, default, or environment variable supplied a value.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The declared value type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The materialized value, if any.
    pub fn raw(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Read the value as `T`, which must be the declared type.
    pub fn as_type<T: Typed>(&self) -> Result<T, ValueError> {
        let value = self.present(T::value_type())?;
        T::from_value(value).ok_or_else(|| self.mismatch(T::value_type()))
    }

    /// Read a single user registered value.
    pub fn as_custom<T: Any>(&self) -> Result<&T, ValueError> {
        let requested = ValueType::Single(ScalarType::Custom(CustomKind::of::<T>()));

        let found = match self.present(requested)? {
            Value::Custom(custom) => custom.downcast_ref::<T>(),
            _ => None,
        };

        found.ok_or_else(|| self.mismatch(requested))
    }

    /// Read a list of user registered values.
    pub fn as_custom_list<T: Any>(&self) -> Result<Vec<&T>, ValueError> {
        let requested = ValueType::List(ScalarType::Custom(CustomKind::of::<T>()));

        let found: Option<Vec<&T>> = match self.present(requested)? {
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Custom(custom) => custom.downcast_ref::<T>(),
                    _ => None,
                })
                .collect(),
            _ => None,
        };

        found.ok_or_else(|| self.mismatch(requested))
    }

    fn present(&self, requested: ValueType) -> Result<&Value, ValueError> {
        if requested != self.value_type {
            return Err(self.mismatch(requested));
        }

        self.value
            .as_ref()
            .ok_or_else(|| ValueError::OptionHasNoValue(self.name.clone()))
    }

    fn mismatch(&self, requested: ValueType) -> ValueError {
        ValueError::TypeMismatch {
            name: self.name.clone(),
            declared: self.value_type.to_string(),
            requested: requested.to_string(),
        }
    }
}

/// One option binding consumed from the argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    pub(crate) fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The long name of the option, or its short name when it has no long name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw text that was bound.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Convert the raw text to a built-in `T`.
    pub fn as_type<T: Typed>(&self) -> Result<T, ConversionError> {
        let value = Converters::default().convert(T::value_type(), DEFAULT_DELIMITER, &self.value)?;

        T::from_value(&value)
            .ok_or_else(|| ConversionError::new(self.value.clone(), T::value_type().to_string()))
    }
}

/// The outcome of one parse, independent of the registry that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    keys: HashMap<String, OptionKey>,
    values: HashMap<OptionKey, OptionValue>,
    sequential: Vec<KeyValue>,
    unmatched: Vec<String>,
    consumed: usize,
}

impl ParseResult {
    pub(crate) fn new(
        keys: HashMap<String, OptionKey>,
        values: HashMap<OptionKey, OptionValue>,
        sequential: Vec<KeyValue>,
        unmatched: Vec<String>,
        consumed: usize,
    ) -> Self {
        debug_assert!(keys.values().all(|key| values.contains_key(key)));

        Self {
            keys,
            values,
            sequential,
            unmatched,
            consumed,
        }
    }

    /// The occurrence count of `name`; 0 when it is not declared.
    pub fn count(&self, name: &str) -> usize {
        self.keys
            .get(name)
            .and_then(|key| self.values.get(key))
            .map_or(0, OptionValue::count)
    }

    /// Whether `name` occurred at least once.
    pub fn has(&self, name: &str) -> bool {
        self.count(name) != 0
    }

    /// The slot of the declared option `name`, by short or long name.
    pub fn get(&self, name: &str) -> Result<&OptionValue, ParseError> {
        self.keys
            .get(name)
            .and_then(|key| self.values.get(key))
            .ok_or_else(|| ParseError::OptionNotPresent(name.to_string()))
    }

    /// Shorthand for `get(name)` followed by `as_type::<T>()`.
    pub fn value<T: Typed>(&self, name: &str) -> Result<T, Error> {
        Ok(self.get(name)?.as_type::<T>()?)
    }

    /// The options bound from the argument vector, in order.
    /// Defaults and environment variable fallbacks are not included.
    pub fn arguments(&self) -> &[KeyValue] {
        &self.sequential
    }

    /// Tokens that were neither options nor absorbed by a positional binding, in order.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Index into the argument vector at which parsing stopped.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}
