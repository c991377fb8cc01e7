//! Parser configuration.

/// Configuration switches for the lenient JSON reader.
///
/// The default profile enables comment handling and nothing else; use
/// [`ParserOptions::strict`] for a profile that accepts only RFC 8259
/// documents with an array or object root.
///
/// # Examples
///
/// ```
/// use jsonlax::{CharReader, ParserOptions};
///
/// let options = ParserOptions {
///     allow_special_floats: true,
///     ..ParserOptions::default()
/// };
/// let reader = CharReader::new(options);
/// assert!(reader.parse_str("-Infinity").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to attach comments to the values they precede or trail.
    ///
    /// Ignored when `allow_comments` is `false`.
    ///
    /// # Default
    ///
    /// `true`
    pub collect_comments: bool,

    /// Whether `//...` and `/* ... */` comments are accepted between tokens.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_comments: bool,

    /// Whether the root value must be an array or an object.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_root: bool,

    /// Whether an elided value between separators (`[1,,3]`, `{"a":,}`)
    /// reads as an explicit null.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_dropped_null_placeholders: bool,

    /// Whether numeric object keys are accepted and coerced to their string
    /// representation.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_numeric_keys: bool,

    /// Whether single-quoted strings are accepted for keys and values.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_single_quotes: bool,

    /// Maximum container nesting depth before the parse aborts fatally.
    ///
    /// # Default
    ///
    /// `1000`
    pub stack_limit: usize,

    /// Whether non-whitespace trailing the root value fails the parse.
    ///
    /// # Default
    ///
    /// `false`
    pub fail_if_extra: bool,

    /// Whether a duplicated object key fails the parse. When `false`, the
    /// last occurrence wins.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_dup_keys: bool,

    /// Whether `NaN`, `Infinity`, and `-Infinity` literals are accepted.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_special_floats: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            collect_comments: true,
            allow_comments: true,
            strict_root: false,
            allow_dropped_null_placeholders: false,
            allow_numeric_keys: false,
            allow_single_quotes: false,
            stack_limit: 1000,
            fail_if_extra: false,
            reject_dup_keys: false,
            allow_special_floats: false,
        }
    }
}

impl ParserOptions {
    /// The strict profile: comments off, array/object root required,
    /// trailing garbage and duplicate keys rejected, no lenient extensions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            collect_comments: true,
            allow_comments: false,
            strict_root: true,
            allow_dropped_null_placeholders: false,
            allow_numeric_keys: false,
            allow_single_quotes: false,
            stack_limit: 1000,
            fail_if_extra: true,
            reject_dup_keys: true,
            allow_special_floats: false,
        }
    }
}
