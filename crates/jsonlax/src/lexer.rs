//! Byte-level lexer.
//!
//! [`Lexer::next_token`] classifies exactly one token per call and records
//! its byte span. It never fails: lexical problems surface as
//! [`TokenKind::Error`] tokens so the reader can report them with a
//! position. String contents and numbers are not decoded here; the scanners
//! only find the end of the span (escape validation and numeric range
//! checks happen in `unescape` and `number`).

use crate::options::ParserOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    EndOfStream,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    String,
    Number,
    True,
    False,
    Null,
    NaN,
    PosInf,
    NegInf,
    ArraySeparator,
    MemberSeparator,
    Comment,
    Error,
}

/// A classified span of the input. `start..end` are byte offsets into the
/// document, with `start <= end <= doc.len()`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

pub(crate) struct Lexer<'a> {
    doc: &'a [u8],
    pos: usize,
    allow_single_quotes: bool,
    allow_special_floats: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(doc: &'a [u8], options: &ParserOptions) -> Self {
        Self {
            doc,
            pos: 0,
            allow_single_quotes: options.allow_single_quotes,
            allow_special_floats: options.allow_special_floats,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Steps back one byte, so the enclosing container sees the token again.
    /// Used for dropped-null placeholders, whose triggering tokens are all
    /// single bytes.
    pub fn unread(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn peek(&self) -> Option<u8> {
        self.doc.get(self.pos).copied()
    }

    fn next_char(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Advances past ASCII whitespace. Other Unicode whitespace is not
    /// recognized.
    pub fn skip_spaces(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn match_literal(&mut self, pattern: &[u8]) -> bool {
        if self.doc.len() - self.pos < pattern.len() {
            return false;
        }
        if &self.doc[self.pos..self.pos + pattern.len()] != pattern {
            return false;
        }
        self.pos += pattern.len();
        true
    }

    /// Reads the next token. Infallible; malformed input yields an `Error`
    /// token spanning the bytes consumed while classifying it.
    pub fn next_token(&mut self) -> Token {
        self.skip_spaces();
        let start = self.pos;
        let kind = match self.next_char() {
            None => TokenKind::EndOfStream,
            Some(b'{') => TokenKind::ObjectBegin,
            Some(b'}') => TokenKind::ObjectEnd,
            Some(b'[') => TokenKind::ArrayBegin,
            Some(b']') => TokenKind::ArrayEnd,
            Some(b',') => TokenKind::ArraySeparator,
            Some(b':') => TokenKind::MemberSeparator,
            Some(b'"') => {
                if self.scan_string(b'"') {
                    TokenKind::String
                } else {
                    TokenKind::Error
                }
            }
            Some(b'\'') => {
                if self.allow_single_quotes && self.scan_string(b'\'') {
                    TokenKind::String
                } else {
                    TokenKind::Error
                }
            }
            Some(b'/') => {
                if self.scan_comment() {
                    TokenKind::Comment
                } else {
                    TokenKind::Error
                }
            }
            Some(b'0'..=b'9') => {
                self.scan_number();
                TokenKind::Number
            }
            Some(b'-') => {
                if self.peek() == Some(b'I') {
                    self.pos += 1;
                    if self.allow_special_floats && self.match_literal(b"nfinity") {
                        TokenKind::NegInf
                    } else {
                        TokenKind::Error
                    }
                } else {
                    self.scan_number();
                    TokenKind::Number
                }
            }
            Some(b't') => {
                if self.match_literal(b"rue") {
                    TokenKind::True
                } else {
                    TokenKind::Error
                }
            }
            Some(b'f') => {
                if self.match_literal(b"alse") {
                    TokenKind::False
                } else {
                    TokenKind::Error
                }
            }
            Some(b'n') => {
                if self.match_literal(b"ull") {
                    TokenKind::Null
                } else {
                    TokenKind::Error
                }
            }
            Some(b'N') => {
                if self.allow_special_floats && self.match_literal(b"aN") {
                    TokenKind::NaN
                } else {
                    TokenKind::Error
                }
            }
            Some(b'I') => {
                if self.allow_special_floats && self.match_literal(b"nfinity") {
                    TokenKind::PosInf
                } else {
                    TokenKind::Error
                }
            }
            Some(_) => TokenKind::Error,
        };
        Token {
            kind,
            start,
            end: self.pos,
        }
    }

    /// Consumes bytes until an unescaped `terminator` or end of input. A
    /// backslash swallows the following byte without interpretation; escape
    /// validation belongs to the string decoder. Returns whether the
    /// terminator was found.
    fn scan_string(&mut self, terminator: u8) -> bool {
        let mut c = 0u8;
        while self.pos < self.doc.len() {
            c = self.doc[self.pos];
            self.pos += 1;
            if c == b'\\' {
                if self.pos < self.doc.len() {
                    self.pos += 1;
                }
            } else if c == terminator {
                break;
            }
        }
        c == terminator
    }

    /// Greedy `[0-9]*(\.[0-9]*)?([eE][+-]?[0-9]*)?` scan; the leading digit
    /// or sign has already been consumed. Deliberately loose: `1.` and `1e`
    /// scan as number tokens and the numeric decoder sorts them out.
    fn scan_number(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
    }

    /// The leading `/` has been consumed; requires `*` (block) or `/`
    /// (line) next. A block comment left open at end of input fails.
    fn scan_comment(&mut self) -> bool {
        match self.next_char() {
            Some(b'*') => self.scan_block_comment(),
            Some(b'/') => {
                self.scan_line_comment();
                true
            }
            _ => false,
        }
    }

    fn scan_block_comment(&mut self) -> bool {
        while self.pos + 1 < self.doc.len() {
            let c = self.doc[self.pos];
            self.pos += 1;
            if c == b'*' && self.doc[self.pos] == b'/' {
                break;
            }
        }
        self.next_char() == Some(b'/')
    }

    fn scan_line_comment(&mut self) {
        while let Some(c) = self.next_char() {
            if c == b'\n' {
                break;
            }
            if c == b'\r' {
                // DOS EOL is consumed whole; normalization happens later.
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn lex_with(doc: &str, options: &ParserOptions) -> Vec<(TokenKind, usize, usize)> {
        let mut lexer = Lexer::new(doc.as_bytes(), options);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfStream {
                break;
            }
            tokens.push((token.kind, token.start, token.end));
        }
        tokens
    }

    fn kinds(doc: &str) -> Vec<TokenKind> {
        lex_with(doc, &ParserOptions::default())
            .into_iter()
            .map(|(kind, _, _)| kind)
            .collect()
    }

    #[test]
    fn structural_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("{}[],:"),
            vec![
                ObjectBegin,
                ObjectEnd,
                ArrayBegin,
                ArrayEnd,
                ArraySeparator,
                MemberSeparator,
            ]
        );
    }

    #[test]
    fn literals() {
        use TokenKind::*;
        assert_eq!(kinds("true false null"), vec![True, False, Null]);
        // A failed literal consumes only its first byte; the leftovers lex
        // as further error tokens.
        assert_eq!(kinds("tru"), vec![Error; 3]);
        assert_eq!(kinds("nul"), vec![Error; 3]);
    }

    #[test]
    fn string_spans_include_quotes() {
        let tokens = lex_with(r#"  "ab\"c"  "#, &ParserOptions::default());
        assert_eq!(tokens, vec![(TokenKind::String, 2, 9)]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert_eq!(kinds("\"abc"), vec![TokenKind::Error]);
        assert_eq!(kinds("\"abc\\\""), vec![TokenKind::Error]);
    }

    #[test]
    fn single_quotes_are_gated() {
        let lenient = ParserOptions {
            allow_single_quotes: true,
            ..ParserOptions::default()
        };
        assert_eq!(
            lex_with("'ab'", &lenient),
            vec![(TokenKind::String, 0, 4)]
        );
        // `'` errors, then `a`, `b`, `'` each lex as bare garbage.
        assert_eq!(kinds("'ab'"), vec![TokenKind::Error; 4]);
    }

    #[test]
    fn number_spans() {
        let tokens = lex_with("12 -3.5e+7 1. 1e", &ParserOptions::default());
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Number, 0, 2),
                (TokenKind::Number, 3, 10),
                (TokenKind::Number, 11, 13),
                (TokenKind::Number, 14, 16),
            ]
        );
    }

    #[test]
    fn special_floats_are_gated() {
        use TokenKind::*;
        let lenient = ParserOptions {
            allow_special_floats: true,
            ..ParserOptions::default()
        };
        let tokens: Vec<TokenKind> = lex_with("NaN Infinity -Infinity", &lenient)
            .into_iter()
            .map(|(kind, _, _)| kind)
            .collect();
        assert_eq!(tokens, vec![NaN, PosInf, NegInf]);

        assert_eq!(kinds("NaN"), vec![Error; 3]);
        assert_eq!(kinds("-Infinity")[0], Error);
    }

    #[test]
    fn comments() {
        use TokenKind::*;
        assert_eq!(kinds("// line\n1"), vec![Comment, Number]);
        assert_eq!(kinds("/* block */ 1"), vec![Comment, Number]);
        assert_eq!(kinds("/* open"), vec![Error]);
        assert_eq!(kinds("/x"), vec![Error]);
    }

    #[test]
    fn line_comment_span_includes_eol() {
        let tokens = lex_with("//a\r\n1", &ParserOptions::default());
        assert_eq!(tokens[0], (TokenKind::Comment, 0, 5));
    }

    #[test]
    fn whitespace_only_input() {
        assert!(kinds(" \t\r\n").is_empty());
    }
}
