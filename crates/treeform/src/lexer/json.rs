//! JSON lexer

use std::collections::VecDeque;

use crate::error::{Pos, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

/// Lexer for the JSON grammar.
///
/// Scalars are carried as literal source text: strings keep their quotes,
/// numbers and booleans their spelling. This library does not type JSON
/// values.
///
/// A bracketed region is resolved in one pass: `[` emits `OpenList`, every
/// top-level comma-separated element becomes one `Value` token (an element
/// that is itself an object or array is carried verbatim as sub-document
/// text), and the matching `]` emits `CloseList`. The tree builder re-runs
/// the lexer on embedded sub-documents.
#[derive(Clone, Debug)]
pub struct JsonLexer<'a> {
    cursor: Cursor<'a>,
    pending: VecDeque<Token>,
}

impl<'a> JsonLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input.as_bytes()),
            pending: VecDeque::new(),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }

            self.skip_ignorable();
            let start = self.cursor.position();
            match self.cursor.current() {
                None => return Token::eof(Span::new(start, start)),
                Some(b'{') => {
                    self.cursor.advance();
                    return Token::new(
                        TokenKind::Open(String::new()),
                        Span::new(start, self.cursor.position()),
                    );
                }
                Some(b'}') => {
                    self.cursor.advance();
                    return Token::new(
                        TokenKind::Close(String::new()),
                        Span::new(start, self.cursor.position()),
                    );
                }
                Some(b'[') => return self.lex_list(start),
                Some(b']') | Some(b':') => {
                    // stray structure, skip best-effort
                    self.cursor.advance();
                }
                Some(b'"') => return self.lex_string(start),
                Some(_) => return self.lex_scalar(start),
            }
        }
    }

    /// Whitespace and member separators carry no information here
    fn skip_ignorable(&mut self) {
        while let Some(b) = self.cursor.current() {
            if matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b',') {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    /// A quoted run followed by `:` is a member name (quotes stripped);
    /// otherwise it is a scalar string value (quotes preserved)
    fn lex_string(&mut self, start: Pos) -> Token {
        let raw_start = self.cursor.pos();
        self.read_quoted();
        let raw = String::from_utf8_lossy(self.cursor.slice_from(raw_start)).into_owned();

        self.cursor.skip_whitespace();
        if self.cursor.consume(b':') {
            let inner = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(&raw)
                .to_string();
            Token::new(TokenKind::Key(inner), Span::new(start, self.cursor.position()))
        } else {
            Token::new(TokenKind::Value(raw), Span::new(start, self.cursor.position()))
        }
    }

    /// Scalar value text up to the next top-level `,`, `}`, or `]`
    fn lex_scalar(&mut self, start: Pos) -> Token {
        let scalar_start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if matches!(b, b',' | b'}' | b']') {
                break;
            }
            self.cursor.advance();
        }
        let text = String::from_utf8_lossy(self.cursor.slice_from(scalar_start))
            .trim()
            .to_string();
        Token::new(TokenKind::Value(text), Span::new(start, self.cursor.position()))
    }

    /// Resolve an entire bracketed region: `OpenList`, one `Value` per
    /// top-level element, `CloseList` at the matching bracket
    fn lex_list(&mut self, start: Pos) -> Token {
        self.cursor.advance();
        let open_span = Span::new(start, self.cursor.position());

        'elements: loop {
            self.cursor.skip_whitespace();
            let elem_start = self.cursor.pos();
            let elem_pos = self.cursor.position();
            let mut depth: usize = 0;
            loop {
                match self.cursor.current() {
                    None => {
                        self.flush_element(elem_start, elem_pos);
                        break 'elements;
                    }
                    Some(b'"') => self.read_quoted(),
                    Some(b'{') | Some(b'[') => {
                        depth += 1;
                        self.cursor.advance();
                    }
                    Some(b'}') => {
                        depth = depth.saturating_sub(1);
                        self.cursor.advance();
                    }
                    Some(b']') if depth == 0 => {
                        self.flush_element(elem_start, elem_pos);
                        self.cursor.advance();
                        break 'elements;
                    }
                    Some(b']') => {
                        depth -= 1;
                        self.cursor.advance();
                    }
                    Some(b',') if depth == 0 => {
                        self.flush_element(elem_start, elem_pos);
                        self.cursor.advance();
                        continue 'elements;
                    }
                    Some(_) => self.cursor.advance(),
                }
            }
        }

        let end = self.cursor.position();
        self.pending
            .push_back(Token::new(TokenKind::CloseList, Span::new(end, end)));
        Token::new(TokenKind::OpenList, open_span)
    }

    fn flush_element(&mut self, start: usize, start_pos: Pos) {
        let text = String::from_utf8_lossy(self.cursor.slice_from(start))
            .trim()
            .to_string();
        if !text.is_empty() {
            let span = Span::new(start_pos, self.cursor.position());
            self.pending.push_back(Token::new(TokenKind::Value(text), span));
        }
    }

    /// Consume a quoted run including both quotes, honoring `\"` escapes
    fn read_quoted(&mut self) {
        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            match b {
                b'\\' => self.cursor.advance_by(2),
                b'"' => {
                    self.cursor.advance();
                    return;
                }
                _ => self.cursor.advance(),
            }
        }
    }
}

impl<'a> Iterator for JsonLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
