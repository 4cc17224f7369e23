use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Identifies a user type registered with [`Options::register_type`](crate::Options::register_type).
#[derive(Debug, Clone, Copy)]
pub struct CustomKind {
    type_id: TypeId,
    type_name: &'static str,
}

impl CustomKind {
    /// The kind of the user type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// The Rust type name of this kind.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for CustomKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CustomKind {}

/// The element type of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    ISize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    USize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// A single `char`.
    Char,
    /// `String`.
    Str,
    /// A type registered on the [`Options`](crate::Options).
    Custom(CustomKind),
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Bool => "bool",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::ISize => "isize",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::USize => "usize",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Char => "char",
            ScalarType::Str => "String",
            ScalarType::Custom(kind) => kind.type_name(),
        };
        write!(f, "{name}")
    }
}

/// The declared shape of an option value.
///
/// Containers nest at most two levels deep; there is no way to express a deeper shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// A single value, overwritten by each occurrence.
    Single(ScalarType),
    /// A flat list; each occurrence appends its delimited segments.
    List(ScalarType),
    /// A list of lists; each occurrence appends one inner list.
    NestedList(ScalarType),
}

impl ValueType {
    /// The element type, regardless of nesting.
    pub fn scalar(&self) -> ScalarType {
        match self {
            ValueType::Single(scalar)
            | ValueType::List(scalar)
            | ValueType::NestedList(scalar) => *scalar,
        }
    }

    /// Whether this value accumulates across occurrences.
    pub fn is_container(&self) -> bool {
        !matches!(self, ValueType::Single(_))
    }

    /// Whether this is a plain `bool`.
    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueType::Single(ScalarType::Bool))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Single(scalar) => write!(f, "{scalar}"),
            ValueType::List(scalar) => write!(f, "Vec<{scalar}>"),
            ValueType::NestedList(scalar) => write!(f, "Vec<Vec<{scalar}>>"),
        }
    }
}

/// A materialized option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A `bool`.
    Bool(bool),
    /// An `i8`.
    I8(i8),
    /// An `i16`.
    I16(i16),
    /// An `i32`.
    I32(i32),
    /// An `i64`.
    I64(i64),
    /// An `isize`.
    ISize(isize),
    /// A `u8`.
    U8(u8),
    /// A `u16`.
    U16(u16),
    /// A `u32`.
    U32(u32),
    /// A `u64`.
    U64(u64),
    /// A `usize`.
    USize(usize),
    /// A `f32`.
    F32(f32),
    /// A `f64`.
    F64(f64),
    /// A `char`.
    Char(char),
    /// A `String`.
    Str(String),
    /// A value produced by a registered converter.
    Custom(CustomValue),
    /// A list of values.
    List(Vec<Value>),
}

/// A value of a user registered type.
#[derive(Clone)]
pub struct CustomValue {
    kind: CustomKind,
    inner: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    /// Wrap a user value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            kind: CustomKind::of::<T>(),
            inner: Arc::new(value),
        }
    }

    /// The kind of the wrapped value.
    pub fn kind(&self) -> CustomKind {
        self.kind
    }

    /// Borrow the wrapped value, if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("type_name", &self.kind.type_name())
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
