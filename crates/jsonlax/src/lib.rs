//! A permissive JSON parser.
//!
//! `jsonlax` reads a fully buffered document into a tree of [`Value`]s.
//! Strict RFC 8259 input always works; beyond that, a set of individually
//! configurable extensions accepts the JSON people actually write:
//!
//! - `//` and `/* */` comments, optionally collected and attached to the
//!   values they precede or trail ([`CommentPlacement`]);
//! - single-quoted strings, numeric object keys, `NaN`/`Infinity` literals;
//! - elided values like `[1,,3]` read as nulls;
//! - opt-in rejection of duplicate keys and trailing garbage.
//!
//! Every parsed value is annotated with its byte span in the source, and
//! every error carries a 1-based line and column. Syntax errors inside a
//! container recover at the closing delimiter, so one bad member does not
//! hide the rest of the report.
//!
//! # Examples
//!
//! ```
//! let config = jsonlax::parse(
//!     r#"
//!     {
//!         // retry budget for flaky backends
//!         "retries": 3,
//!         "backoff": [0.5, 1.0, 2.0]
//!     }
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config["retries"].as_i64(), Some(3));
//! assert_eq!(config["backoff"].len(), 3);
//! ```
//!
//! Options come either typed ([`ParserOptions`]) or as a string-keyed bag
//! ([`ReaderBuilder`]) for callers driven by external configuration.
//!
//! The crate is `no_std` + `alloc`; the default `std` feature adds the
//! [`parse_from_reader`] stream adapter.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

mod builder;
mod comments;
mod error;
mod lexer;
mod number;
mod options;
mod reader;
#[cfg(feature = "std")]
mod stream;
mod unescape;
mod value;

pub use builder::{ReaderBuilder, UnknownSettings};
pub use error::{ErrorInfo, ErrorReport, Location, ParseError};
pub use options::ParserOptions;
pub use reader::CharReader;
#[cfg(feature = "std")]
pub use stream::{ReadError, parse_from_reader};
pub use value::{Array, CommentPlacement, Map, Value, ValueKind};

/// Parses `doc` with the default (lenient) options.
///
/// # Errors
///
/// See [`CharReader::parse`].
pub fn parse(doc: &str) -> Result<Value, ParseError> {
    CharReader::new(ParserOptions::default()).parse_str(doc)
}

#[cfg(test)]
mod tests;
