mod adder;
mod core;
mod option;
mod prototype;

pub use self::core::*;
pub use adder::*;
pub use option::*;
pub use prototype::*;
