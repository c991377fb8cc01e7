//! Stream adapter: buffer an entire input stream, then parse it.

use alloc::vec::Vec;
use std::io::{self, Read};

use thiserror::Error;

use crate::error::ParseError;
use crate::reader::CharReader;
use crate::value::Value;

/// Error from [`parse_from_reader`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input stream could not be drained.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The buffered document failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Reads `input` to its end and parses the buffered bytes with `reader`.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use jsonlax::{CharReader, ParserOptions, parse_from_reader};
///
/// let reader = CharReader::new(ParserOptions::default());
/// let root = parse_from_reader(&reader, Cursor::new(b"[1, 2, 3]")).unwrap();
/// assert_eq!(root.len(), 3);
/// ```
///
/// # Errors
///
/// I/O failures from draining the stream, or any [`ParseError`].
pub fn parse_from_reader<R: Read>(reader: &CharReader, mut input: R) -> Result<Value, ReadError> {
    let mut doc = Vec::new();
    input.read_to_end(&mut doc)?;
    Ok(reader.parse(&doc)?)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::options::ParserOptions;

    #[test]
    fn drains_and_parses() {
        let reader = CharReader::new(ParserOptions::default());
        let root = parse_from_reader(&reader, Cursor::new(b"{\"n\": 1}")).unwrap();
        assert_eq!(root["n"].as_i64(), Some(1));
    }

    #[test]
    fn parse_errors_pass_through() {
        let reader = CharReader::new(ParserOptions::default());
        let err = parse_from_reader(&reader, Cursor::new(b"{")).unwrap_err();
        assert!(matches!(err, ReadError::Parse(_)));
    }
}
