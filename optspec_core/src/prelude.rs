//! Items which, typically, may be imported without concern: `use optspec::prelude::*`.

pub use crate::api::{custom, custom_list, value};

/// Behaviour for a type that an option may hold directly.
// Needs to be imported in order to implement a custom typed read.
pub use crate::convert::Typed;
