//! Error reporting: source locations, the accumulated error report, and the
//! top-level parse error.

use alloc::{string::String, vec::Vec};
use core::fmt;

use thiserror::Error;

use crate::value::Value;

/// A 1-based line/column position in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Column {}", self.line, self.column)
    }
}

/// One recorded parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Position of the offending token.
    pub location: Location,
    /// Human-readable description.
    pub message: String,
    /// Secondary position with more detail, e.g. the byte inside a string
    /// literal where escape decoding failed.
    pub extra: Option<Location>,
}

/// The ordered list of errors recorded during a parse.
///
/// `Display` renders the report in the classic format:
///
/// ```text
/// * Line 1, Column 8
///   Missing ':' after object member name
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorReport {
    errors: Vec<ErrorInfo>,
}

impl ErrorReport {
    pub(crate) fn from_errors(errors: Vec<ErrorInfo>) -> Self {
        Self { errors }
    }

    /// The recorded errors, in the order their tokens were encountered.
    #[must_use]
    pub fn errors(&self) -> &[ErrorInfo] {
        &self.errors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "* {}", error.location)?;
            writeln!(f, "  {}", error.message)?;
            if let Some(extra) = error.extra {
                writeln!(f, "See {extra} for detail.")?;
            }
        }
        Ok(())
    }
}

/// Why a document failed to parse.
///
/// Syntax errors are recoverable: the reader skips to the enclosing
/// container terminator and keeps going, so `Syntax` carries both the full
/// [`ErrorReport`] and the tree built around the bad spots. The remaining
/// variants abort the walk outright.
#[derive(Debug, Error)]
pub enum ParseError {
    /// One or more syntax errors were recorded.
    #[error("{report}")]
    Syntax {
        /// The partially built tree.
        root: Value,
        /// All recorded errors, in source order.
        report: ErrorReport,
    },
    /// Container nesting exceeded [`stack_limit`].
    ///
    /// [`stack_limit`]: crate::ParserOptions::stack_limit
    #[error("Exceeded stackLimit in readValue()")]
    StackLimit,
    /// An object member name of 2^30 bytes or more.
    #[error("keylength >= 2^30")]
    KeyTooLong,
}

impl ParseError {
    /// The error report, if this is a syntax failure.
    #[must_use]
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::Syntax { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Computes the 1-based line and column of `offset` in `doc`.
///
/// `\r\n` counts as one newline, as does a lone `\r`. The scan is linear in
/// `offset`; errors are rare enough that this never shows up.
pub(crate) fn location_at(doc: &[u8], offset: usize) -> Location {
    let end = offset.min(doc.len());
    let mut line = 0;
    let mut last_line_start = 0;
    let mut i = 0;
    while i < end {
        let c = doc[i];
        i += 1;
        if c == b'\r' {
            if doc.get(i) == Some(&b'\n') {
                i += 1;
            }
            last_line_start = i;
            line += 1;
        } else if c == b'\n' {
            last_line_start = i;
            line += 1;
        }
    }
    Location {
        line: line + 1,
        column: (end + 1).saturating_sub(last_line_start),
    }
}
