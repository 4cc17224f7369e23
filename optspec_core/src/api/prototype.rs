use std::any::Any;

use crate::constant::{BOOLEAN_DEFAULT, BOOLEAN_IMPLICIT, DEFAULT_DELIMITER};
use crate::convert::Typed;
use crate::model::{CustomKind, ScalarType, ValueType};

/// Describes what kind of value an option takes.
///
/// ### Example
/// ```
/// # use optspec_core as optspec;
/// use optspec::value;
///
/// let prototype = value::<Vec<u32>>()
///     .default_value("1;2")
///     .delimiter(';')
///     .env("PORTS");
///
/// assert!(prototype.is_container());
/// assert_eq!(prototype.default_text(), Some("1;2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePrototype {
    value_type: ValueType,
    default: Option<String>,
    implicit: Option<String>,
    env: Option<String>,
    delimiter: char,
    no_value: bool,
}

/// Prototype for an option holding a `T`.
///
/// A `bool` starts out with the default `"false"` and the implicit value `"true"`.
pub fn value<T: Typed>() -> ValuePrototype {
    ValuePrototype::of(T::value_type())
}

/// Prototype for an option holding a single user registered `T`.
pub fn custom<T: Any>() -> ValuePrototype {
    ValuePrototype::of(ValueType::Single(ScalarType::Custom(CustomKind::of::<T>())))
}

/// Prototype for an option holding a list of user registered `T`.
pub fn custom_list<T: Any>() -> ValuePrototype {
    ValuePrototype::of(ValueType::List(ScalarType::Custom(CustomKind::of::<T>())))
}

impl ValuePrototype {
    /// Prototype for an explicit value type.
    pub fn of(value_type: ValueType) -> Self {
        let boolean = value_type.is_boolean();

        Self {
            value_type,
            default: boolean.then(|| BOOLEAN_DEFAULT.to_string()),
            implicit: boolean.then(|| BOOLEAN_IMPLICIT.to_string()),
            env: None,
            delimiter: DEFAULT_DELIMITER,
            no_value: false,
        }
    }

    /// The text applied when the option never occurs.
    /// Does not increment the occurrence count.
    pub fn default_value(mut self, text: impl Into<String>) -> Self {
        self.default.replace(text.into());
        self
    }

    /// The text bound when the option occurs without a value.
    pub fn implicit_value(mut self, text: impl Into<String>) -> Self {
        self.implicit.replace(text.into());
        self
    }

    /// Require an explicit value, even for a `bool`.
    pub fn no_implicit_value(mut self) -> Self {
        self.implicit = None;
        self
    }

    /// Fall back to the named environment variable when the option never occurs.
    pub fn env(mut self, variable: impl Into<String>) -> Self {
        self.env.replace(variable.into());
        self
    }

    /// The segment delimiter for list values (default `','`).
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Never take the following token as the value; only the implicit value may be bound.
    pub fn no_value(mut self) -> Self {
        self.no_value = true;
        self
    }

    /// The declared value type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The default text, if any.
    pub fn default_text(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The implicit text, if any.
    pub fn implicit_text(&self) -> Option<&str> {
        self.implicit.as_deref()
    }

    /// The fallback environment variable, if any.
    pub fn env_var(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// The segment delimiter for list values.
    pub fn list_delimiter(&self) -> char {
        self.delimiter
    }

    /// Whether a default was declared.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether an implicit value was declared.
    pub fn has_implicit(&self) -> bool {
        self.implicit.is_some()
    }

    /// Whether an environment variable fallback was declared.
    pub fn has_env(&self) -> bool {
        self.env.is_some()
    }

    /// Whether the following token is never taken as the value.
    pub fn takes_no_value(&self) -> bool {
        self.no_value
    }

    /// Whether values accumulate across occurrences.
    pub fn is_container(&self) -> bool {
        self.value_type.is_container()
    }

    /// Whether this is a plain `bool`.
    pub fn is_boolean(&self) -> bool {
        self.value_type.is_boolean()
    }
}
