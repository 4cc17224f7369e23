mod base;
mod result;

pub(crate) use base::ParseEngine;
pub use result::*;
