//! Core engine for `optspec`.
//! See the `optspec` crate documentation root for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod convert;
mod error;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use convert::Typed;
pub use error::*;
pub use model::*;
pub use parser::{KeyValue, OptionValue, ParseResult};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
