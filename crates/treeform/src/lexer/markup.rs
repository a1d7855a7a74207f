//! XML-family lexer shared by the XML, HTML, and SVG dialects

use std::collections::VecDeque;

use crate::error::{Pos, Span};
use crate::format::{is_void_tag, Dialect};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

/// Lexer for the XML family.
///
/// One left-to-right scan; it does not validate nesting. Unterminated tags
/// and mismatched closes degrade to a best-effort token stream rather than
/// an error, so malformed markup may produce a structurally wrong tree.
///
/// Dialect switches: under HTML, void elements synthesize their `Close`
/// token right after `Open` (and an explicit closing tag for a void element
/// is dropped). Self-closing `.../>` tags synthesize `Close` under every
/// dialect.
#[derive(Clone, Debug)]
pub struct MarkupLexer<'a> {
    cursor: Cursor<'a>,
    dialect: Dialect,
    pending: VecDeque<Token>,
}

impl<'a> MarkupLexer<'a> {
    pub fn new(input: &'a str, dialect: Dialect) -> Self {
        Self {
            cursor: Cursor::new(input.as_bytes()),
            dialect,
            pending: VecDeque::new(),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }

            let start = self.cursor.position();
            match self.cursor.current() {
                None => return Token::eof(Span::new(start, start)),
                Some(b'<') if matches!(self.cursor.peek(1), Some(b'!' | b'?')) => {
                    self.skip_declaration();
                }
                Some(b'<') => {
                    if let Some(token) = self.lex_tag(start) {
                        return token;
                    }
                }
                Some(_) => return self.lex_content(start),
            }
        }
    }

    /// `<!` and `<?` runs (comments, DOCTYPE, the XML prolog) produce no
    /// tokens; skip to the next `>`
    fn skip_declaration(&mut self) {
        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            if b == b'>' {
                break;
            }
        }
    }

    /// Lex one tag starting at `<`. Returns `None` when the tag emits
    /// nothing (an explicit closing tag for a void element).
    fn lex_tag(&mut self, start: Pos) -> Option<Token> {
        self.cursor.advance();
        let is_close = self.cursor.consume(b'/');
        let name = self.lex_name();

        let mut self_closed = false;
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                None => break,
                Some(b'>') => {
                    self.cursor.advance();
                    break;
                }
                Some(b'/') => {
                    self.cursor.advance();
                    self_closed = true;
                }
                Some(_) => self.lex_attribute(),
            }
        }

        let span = Span::new(start, self.cursor.position());
        let is_void = is_void_tag(self.dialect, &name);

        if is_close {
            // void elements never appear with an explicit closing tag;
            // drop the stray close entirely
            if is_void {
                self.pending.clear();
                return None;
            }
            return Some(Token::new(TokenKind::Close(name), span));
        }

        if self_closed || is_void {
            let end = self.cursor.position();
            self.pending
                .push_back(Token::new(TokenKind::Close(name.clone()), Span::new(end, end)));
        }

        Some(Token::new(TokenKind::Open(name), span))
    }

    /// Tag name: everything up to whitespace, `>`, or `/`
    fn lex_name(&mut self) -> String {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/') {
                break;
            }
            self.cursor.advance();
        }
        String::from_utf8_lossy(self.cursor.slice_from(start)).into_owned()
    }

    /// One `name=value` attribute; queues a `Key`/`Value` pair.
    /// A bare attribute with no `=` is consumed without emitting tokens.
    fn lex_attribute(&mut self) {
        let key_start = self.cursor.pos();
        let key_pos = self.cursor.position();
        while let Some(b) = self.cursor.current() {
            if matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'=' | b'>' | b'/') {
                break;
            }
            self.cursor.advance();
        }
        let key = String::from_utf8_lossy(self.cursor.slice_from(key_start)).into_owned();

        self.cursor.skip_whitespace();
        if !self.cursor.consume(b'=') {
            return;
        }
        self.cursor.skip_whitespace();

        let value_pos = self.cursor.position();
        let value = if self.cursor.consume(b'"') {
            let start = self.cursor.pos();
            while let Some(b) = self.cursor.current() {
                if b == b'"' {
                    break;
                }
                self.cursor.advance();
            }
            let raw = String::from_utf8_lossy(self.cursor.slice_from(start)).into_owned();
            self.cursor.consume(b'"');
            raw
        } else {
            let start = self.cursor.pos();
            while let Some(b) = self.cursor.current() {
                if matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'>') {
                    break;
                }
                self.cursor.advance();
            }
            String::from_utf8_lossy(self.cursor.slice_from(start)).into_owned()
        };

        let end = self.cursor.position();
        self.pending
            .push_back(Token::new(TokenKind::Key(key), Span::new(key_pos, value_pos)));
        self.pending
            .push_back(Token::new(TokenKind::Value(value), Span::new(value_pos, end)));
    }

    /// Text run up to the next `<`, emitted verbatim
    fn lex_content(&mut self, start: Pos) -> Token {
        let text_start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }
        let text = String::from_utf8_lossy(self.cursor.slice_from(text_start)).into_owned();
        Token::new(
            TokenKind::Content(text),
            Span::new(start, self.cursor.position()),
        )
    }
}

impl<'a> Iterator for MarkupLexer<'a> {
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
