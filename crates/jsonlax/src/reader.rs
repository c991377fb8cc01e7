//! The recursive-descent value builder and the public [`CharReader`].
//!
//! `Parser` drives the lexer token by token and writes into the output tree
//! through `&mut Value` cursors threaded down the recursion. Each
//! `read_value` call consumes exactly one value. Syntax errors inside a
//! container are recorded and recovery skips to the container's closing
//! delimiter so surrounding structure keeps parsing; stack-limit and
//! key-length violations abort the walk.
//!
//! Comment binding: a comment trailing a value on the same line belongs to
//! that value, but by the time the comment token is read the value's `&mut`
//! borrow is gone. The parser therefore remembers the *path* of the most
//! recently completed value (`Key`/`Index` components) and applies such
//! attachments after the walk finishes.

use alloc::{format, string::String, vec::Vec};
use core::mem;

use crate::comments::{contains_newline, normalize_eol};
use crate::error::{ErrorInfo, ErrorReport, ParseError, location_at};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::number;
use crate::options::ParserOptions;
use crate::unescape;
use crate::value::{CommentPlacement, Map, Value, ValueData};

/// Reads JSON documents into [`Value`] trees under a fixed set of
/// [`ParserOptions`].
///
/// All parse state lives in the call, so one reader can parse any number of
/// documents, from any thread.
///
/// # Examples
///
/// ```
/// use jsonlax::{CharReader, ParserOptions};
///
/// let reader = CharReader::new(ParserOptions::default());
/// let root = reader.parse_str("// config\n{\"port\": 8080}").unwrap();
/// assert_eq!(root["port"].as_i64(), Some(8080));
///
/// let strict = CharReader::new(ParserOptions::strict());
/// assert!(strict.parse_str("// config\n{\"port\": 8080}").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CharReader {
    options: ParserOptions,
}

impl CharReader {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a complete document from a byte range.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] carries the ordered error report along with
    /// whatever tree was built around the bad spots; the fatal variants
    /// (stack limit, key length) abort with nothing.
    pub fn parse(&self, doc: &[u8]) -> Result<Value, ParseError> {
        let mut root = Value::default();
        let mut parser = Parser::new(doc, self.options);
        match parser.parse_document(&mut root) {
            Ok(true) => Ok(root),
            Ok(false) => Err(ParseError::Syntax {
                root,
                report: ErrorReport::from_errors(parser.errors),
            }),
            Err(Fatal::StackLimit) => Err(ParseError::StackLimit),
            Err(Fatal::KeyTooLong) => Err(ParseError::KeyTooLong),
        }
    }

    /// Parses a complete document from a string slice.
    ///
    /// # Errors
    ///
    /// See [`CharReader::parse`].
    pub fn parse_str(&self, doc: &str) -> Result<Value, ParseError> {
        self.parse(doc.as_bytes())
    }
}

/// Hard failures that abort the walk.
enum Fatal {
    StackLimit,
    KeyTooLong,
}

/// Path component of a value in the tree under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathItem {
    Key(String),
    Index(usize),
}

struct Parser<'a> {
    doc: &'a [u8],
    lexer: Lexer<'a>,
    options: ParserOptions,
    collect_comments: bool,
    errors: Vec<ErrorInfo>,
    /// Pending comment text, flushed into the next value's `Before` slot.
    comments_before: String,
    /// Same-line attachments waiting for the borrow on their target to end.
    deferred_comments: Vec<(Vec<PathItem>, String)>,
    /// Path of the container currently being filled.
    path: Vec<PathItem>,
    last_value_end: Option<usize>,
    last_value_path: Option<Vec<PathItem>>,
}

impl<'a> Parser<'a> {
    fn new(doc: &'a [u8], options: ParserOptions) -> Self {
        Self {
            doc,
            lexer: Lexer::new(doc, &options),
            options,
            collect_comments: options.collect_comments && options.allow_comments,
            errors: Vec::new(),
            comments_before: String::new(),
            deferred_comments: Vec::new(),
            path: Vec::new(),
            last_value_end: None,
            last_value_path: None,
        }
    }

    fn parse_document(&mut self, root: &mut Value) -> Result<bool, Fatal> {
        let successful = self.read_value(root, 0)?;
        let token = self.skip_comment_tokens();
        if self.options.fail_if_extra && token.kind != TokenKind::EndOfStream {
            self.add_error("Extra non-whitespace after JSON value.", &token, None);
            self.apply_deferred_comments(root);
            return Ok(false);
        }
        if self.collect_comments && !self.comments_before.is_empty() {
            root.set_comment(
                CommentPlacement::After,
                mem::take(&mut self.comments_before),
            );
        }
        self.apply_deferred_comments(root);
        if self.options.strict_root && !root.is_array() && !root.is_object() {
            let whole_doc = Token {
                kind: TokenKind::Error,
                start: 0,
                end: self.doc.len(),
            };
            self.add_error(
                "A valid JSON document must be either an array or an object value.",
                &whole_doc,
                None,
            );
            return Ok(false);
        }
        Ok(successful)
    }

    /// Consumes exactly one value into `dest`. `depth` is the container
    /// nesting level, checked against the stack limit before anything else.
    fn read_value(&mut self, dest: &mut Value, depth: usize) -> Result<bool, Fatal> {
        if depth > self.options.stack_limit {
            return Err(Fatal::StackLimit);
        }
        let token = self.skip_comment_tokens();
        let mut successful = true;

        if self.collect_comments && !self.comments_before.is_empty() {
            dest.set_comment(
                CommentPlacement::Before,
                mem::take(&mut self.comments_before),
            );
        }

        match token.kind {
            TokenKind::ObjectBegin => {
                successful = self.read_object(dest, &token, depth)?;
                dest.set_offset_limit(self.lexer.pos());
            }
            TokenKind::ArrayBegin => {
                successful = self.read_array(dest, &token, depth)?;
                dest.set_offset_limit(self.lexer.pos());
            }
            TokenKind::Number => successful = self.decode_number_into(dest, &token),
            TokenKind::String => successful = self.decode_string_into(dest, &token),
            TokenKind::True => set_scalar(dest, &token, ValueData::Bool(true)),
            TokenKind::False => set_scalar(dest, &token, ValueData::Bool(false)),
            TokenKind::Null => set_scalar(dest, &token, ValueData::Null),
            TokenKind::NaN => set_scalar(dest, &token, ValueData::Double(f64::NAN)),
            TokenKind::PosInf => set_scalar(dest, &token, ValueData::Double(f64::INFINITY)),
            TokenKind::NegInf => set_scalar(dest, &token, ValueData::Double(f64::NEG_INFINITY)),
            TokenKind::ArraySeparator | TokenKind::ObjectEnd | TokenKind::ArrayEnd
                if self.options.allow_dropped_null_placeholders =>
            {
                // Un-read the token: the enclosing container must see it
                // again. The elided value becomes a null with a synthetic
                // one-byte span just before the separator.
                self.lexer.unread();
                let pos = self.lexer.pos();
                dest.set_data(ValueData::Null);
                dest.set_offset_start(pos.saturating_sub(1));
                dest.set_offset_limit(pos);
            }
            _ => {
                dest.set_offset_start(token.start);
                dest.set_offset_limit(token.end);
                return Ok(self.add_error(
                    "Syntax error: value, object or array expected.",
                    &token,
                    None,
                ));
            }
        }

        if self.collect_comments {
            self.last_value_end = Some(self.lexer.pos());
            self.last_value_path = Some(self.path.clone());
        }

        Ok(successful)
    }

    fn read_object(
        &mut self,
        dest: &mut Value,
        token_start: &Token,
        depth: usize,
    ) -> Result<bool, Fatal> {
        dest.set_data(ValueData::Object(Map::new()));
        dest.set_offset_start(token_start.start);
        let mut member_accepted = false;
        let bad_token = loop {
            let mut token_name = self.read_token();
            while token_name.kind == TokenKind::Comment {
                token_name = self.read_token();
            }
            if token_name.kind == TokenKind::ObjectEnd && !member_accepted {
                // empty object
                return Ok(true);
            }
            let name = match token_name.kind {
                TokenKind::String => match unescape::decode_string(self.doc, &token_name) {
                    Ok(name) => name,
                    Err(err) => {
                        self.add_error(err.message, &token_name, err.extra);
                        return Ok(self.recover_from_error(TokenKind::ObjectEnd));
                    }
                },
                TokenKind::Number if self.options.allow_numeric_keys => {
                    let doc = self.doc;
                    let text = &doc[token_name.start..token_name.end];
                    match number::decode(text) {
                        Some(number) => number.to_key(),
                        None => {
                            self.add_error(not_a_number(text), &token_name, None);
                            return Ok(self.recover_from_error(TokenKind::ObjectEnd));
                        }
                    }
                }
                _ => break token_name,
            };

            let colon = self.read_token();
            if colon.kind != TokenKind::MemberSeparator {
                return Ok(self.add_error_and_recover(
                    "Missing ':' after object member name",
                    &colon,
                    TokenKind::ObjectEnd,
                ));
            }
            if name.len() >= (1 << 30) {
                return Err(Fatal::KeyTooLong);
            }
            if self.options.reject_dup_keys && dest.is_member(&name) {
                let message = format!("Duplicate key: '{name}'");
                return Ok(self.add_error_and_recover(
                    message,
                    &token_name,
                    TokenKind::ObjectEnd,
                ));
            }

            member_accepted = true;
            self.path.push(PathItem::Key(name.clone()));
            let ok = self.read_value(dest.member_mut(&name), depth + 1)?;
            self.path.pop();
            if !ok {
                // error already recorded
                return Ok(self.recover_from_error(TokenKind::ObjectEnd));
            }

            let mut comma = self.read_token();
            while comma.kind == TokenKind::Comment {
                comma = self.read_token();
            }
            if comma.kind != TokenKind::ObjectEnd && comma.kind != TokenKind::ArraySeparator {
                return Ok(self.add_error_and_recover(
                    "Missing ',' or '}' in object declaration",
                    &comma,
                    TokenKind::ObjectEnd,
                ));
            }
            if comma.kind == TokenKind::ObjectEnd {
                return Ok(true);
            }
        };
        Ok(self.add_error_and_recover(
            "Missing '}' or object member name",
            &bad_token,
            TokenKind::ObjectEnd,
        ))
    }

    fn read_array(
        &mut self,
        dest: &mut Value,
        token_start: &Token,
        depth: usize,
    ) -> Result<bool, Fatal> {
        dest.set_data(ValueData::Array(Vec::new()));
        dest.set_offset_start(token_start.start);
        self.lexer.skip_spaces();
        if self.lexer.peek() == Some(b']') {
            // empty array
            let _ = self.read_token();
            return Ok(true);
        }
        let mut index = 0;
        loop {
            self.path.push(PathItem::Index(index));
            let ok = self.read_value(dest.element_mut(index), depth + 1)?;
            self.path.pop();
            index += 1;
            if !ok {
                // error already recorded
                return Ok(self.recover_from_error(TokenKind::ArrayEnd));
            }

            let mut token = self.read_token();
            while token.kind == TokenKind::Comment {
                token = self.read_token();
            }
            if token.kind != TokenKind::ArraySeparator && token.kind != TokenKind::ArrayEnd {
                return Ok(self.add_error_and_recover(
                    "Missing ',' or ']' in array declaration",
                    &token,
                    TokenKind::ArrayEnd,
                ));
            }
            if token.kind == TokenKind::ArrayEnd {
                return Ok(true);
            }
        }
    }

    fn decode_number_into(&mut self, dest: &mut Value, token: &Token) -> bool {
        let doc = self.doc;
        let text = &doc[token.start..token.end];
        match number::decode(text) {
            Some(number) => {
                set_scalar(dest, token, number.into());
                true
            }
            None => self.add_error(not_a_number(text), token, None),
        }
    }

    fn decode_string_into(&mut self, dest: &mut Value, token: &Token) -> bool {
        match unescape::decode_string(self.doc, token) {
            Ok(decoded) => {
                set_scalar(dest, token, ValueData::String(decoded));
                true
            }
            Err(err) => self.add_error(err.message, token, err.extra),
        }
    }

    /// Reads one raw token, routing comment tokens into the collector.
    fn read_token(&mut self) -> Token {
        let token = self.lexer.next_token();
        if token.kind == TokenKind::Comment && self.collect_comments {
            self.collect_comment(&token);
        }
        token
    }

    /// Reads the next non-comment token. With comments disallowed a comment
    /// token is returned as-is and the caller reports it as a syntax error.
    fn skip_comment_tokens(&mut self) -> Token {
        if self.options.allow_comments {
            loop {
                let token = self.read_token();
                if token.kind != TokenKind::Comment {
                    return token;
                }
            }
        } else {
            self.read_token()
        }
    }

    fn collect_comment(&mut self, token: &Token) {
        let doc = self.doc;
        let text = normalize_eol(&doc[token.start..token.end]);
        // Trailing placement: the comment starts on the line the previous
        // value ended on, and a block comment must not span lines itself.
        let same_line = match self.last_value_end {
            Some(value_end) if !contains_newline(&doc[value_end..token.start]) => {
                doc[token.start + 1] != b'*' || !contains_newline(&doc[token.start..token.end])
            }
            _ => false,
        };
        if same_line {
            if let Some(path) = self.last_value_path.clone() {
                self.deferred_comments.push((path, text));
            }
        } else {
            self.comments_before.push_str(&text);
        }
    }

    fn apply_deferred_comments(&mut self, root: &mut Value) {
        for (path, text) in mem::take(&mut self.deferred_comments) {
            if let Some(target) = navigate(root, &path) {
                target.set_comment(CommentPlacement::AfterOnSameLine, text);
            }
        }
    }

    fn add_error(
        &mut self,
        message: impl Into<String>,
        token: &Token,
        extra: Option<usize>,
    ) -> bool {
        self.errors.push(ErrorInfo {
            location: location_at(self.doc, token.start),
            message: message.into(),
            extra: extra.map(|offset| location_at(self.doc, offset)),
        });
        false
    }

    /// Skips tokens until `skip_until` or end of stream, then discards any
    /// errors recorded while skipping so only the original error reports.
    fn recover_from_error(&mut self, skip_until: TokenKind) -> bool {
        let error_count = self.errors.len();
        loop {
            let skip = self.read_token();
            if skip.kind == skip_until || skip.kind == TokenKind::EndOfStream {
                break;
            }
        }
        self.errors.truncate(error_count);
        false
    }

    fn add_error_and_recover(
        &mut self,
        message: impl Into<String>,
        token: &Token,
        skip_until: TokenKind,
    ) -> bool {
        self.add_error(message, token, None);
        self.recover_from_error(skip_until)
    }
}

fn set_scalar(dest: &mut Value, token: &Token, data: ValueData) {
    dest.set_data(data);
    dest.set_offset_start(token.start);
    dest.set_offset_limit(token.end);
}

fn navigate<'v>(root: &'v mut Value, path: &[PathItem]) -> Option<&'v mut Value> {
    let mut target = root;
    for item in path {
        let current = target;
        target = match item {
            PathItem::Key(key) => current.as_object_mut()?.get_mut(key.as_str())?,
            PathItem::Index(index) => current.as_array_mut()?.get_mut(*index)?,
        };
    }
    Some(target)
}

fn not_a_number(text: &[u8]) -> String {
    format!("'{}' is not a number.", String::from_utf8_lossy(text))
}
