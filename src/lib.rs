//! `optspec` is a getopt-style command line option parser for Rust.
//!
//! Options are declared up front on an [`Options`] registry, after which any number of argument vectors may be parsed against it.
//! Each parse produces an independent [`ParseResult`], queried by short or long option name.
//! `optspec` prioritizes the following concerns:
//! * *One fixed option grammar*:
//! Long options (`--name`, `--name=value`), short options (`-n`, `-nvalue`), short clusters (`-abc`), and the `--` terminator.
//! There is no grammar configuration beyond two switches: tolerating unknown options, and stopping at the first positional token.
//! * *Typed, overflow checked values*:
//! Integers accept an optional sign and `0x` hex prefix, and are range checked against the declared width.
//! Lists accumulate across occurrences and split each occurrence on a delimiter.
//! * *Predictable fallbacks*:
//! An option that never occurs takes its environment variable (when set), and otherwise its default.
//! Defaults never count as an occurrence.
//!
//! # Usage
//! This page includes a few demos on using `optspec`.
//! ```no_run
#![doc = include_str!("../demos/demo_basic.rs")]
//! ```
//!
//! ```console
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ SUMMER_START=10 summer 1 2 3
//! Sum: 16
//!
//! $ summer --start 0x10 -v 1
//! Item: 1
//! Sum: 17
//!
//! $ summer 1 blah
//! Parse error: Argument 'blah' failed to parse as i64.
//! ```
//!
//! # Declaring options
//! Declare options with [`Options::declare`], or with the `"s,long"` shorthand via [`Options::add_options`].
//! A short name is a single alphanumeric character (or `?`); a long name is at least two characters, starting alphanumeric and continuing with alphanumerics, `-` or `_`.
//!
//! The value of an option is described by a [`ValuePrototype`], built from [`value`]:
//! * [`ValuePrototype::default_value`]: applied when the option never occurs.
//! * [`ValuePrototype::implicit_value`]: bound when the option occurs without a value.
//! A `bool` starts out with the default `"false"` and the implicit value `"true"`.
//! * [`ValuePrototype::env`]: consulted when the option never occurs; replaces the default.
//! * [`ValuePrototype::delimiter`]: splits each occurrence of a list value (default `','`).
//! * [`ValuePrototype::no_value`]: never take the following token as the value.
//!
//! User types are registered with [`Options::register_type`] (via [`std::str::FromStr`]) or [`Options::register_converter`], and declared with [`custom`] or [`custom_list`].
//!
//! # Parsing
//! When an option is given without an attached value, the following token becomes its value, unless it is `--` or itself names a declared option.
//! In that case the implicit value is used instead, or the parse fails with [`ParseError::MissingArgument`].
//!
//! Plain tokens fill the options bound with [`Options::parse_positional`], in order.
//! A list option absorbs every remaining positional token.
//! Everything after `--` is positional, regardless of how it looks.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_sub_command.rs")]
//! ```
//!
//! # Custom types
//! ```no_run
#![doc = include_str!("../demos/demo_custom.rs")]
//! ```
//!
//! # Features
//! * `tracing_debug`: emit `tracing::debug!` events for each token classification and value binding.

pub use optspec_core::*;
