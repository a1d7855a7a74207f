//! Tree builder for the XML family

use std::mem;

use crate::error::{Error, ErrorKind, Result, Span};
use crate::format::Dialect;
use crate::lexer::{MarkupLexer, TokenKind};
use crate::node::Node;

/// Builds a tree from the markup token stream.
///
/// Classic parenthesis matching over `Open`/`Close` with an explicit
/// ancestor stack: `Open` pushes the in-progress parent and descends into a
/// fresh node; `Close` pops the parent and appends the finished child to its
/// `children`. The first `Open` names the root itself — a document has
/// exactly one top-level element.
///
/// Nesting is not validated; unbalanced input drains best-effort.
#[derive(Debug)]
pub struct MarkupParser<'a> {
    lexer: MarkupLexer<'a>,
}

impl<'a> MarkupParser<'a> {
    pub fn new(input: &'a str, dialect: Dialect) -> Self {
        Self {
            lexer: MarkupLexer::new(input, dialect),
        }
    }

    pub fn parse(&mut self) -> Result<Node> {
        let mut current = Node::default();
        let mut stack: Vec<Node> = Vec::new();
        let mut pending_attr: Option<String> = None;
        let end;

        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Eof => {
                    end = token.span;
                    break;
                }
                TokenKind::Open(name) => {
                    if stack.is_empty() && current.key.is_empty() && current.is_empty() {
                        current.key = name;
                    } else {
                        stack.push(mem::take(&mut current));
                        current.key = name;
                    }
                }
                TokenKind::Close(_) => {
                    if let Some(mut parent) = stack.pop() {
                        parent.children.push(mem::take(&mut current));
                        current = parent;
                    }
                }
                TokenKind::Key(name) => {
                    pending_attr = Some(name.trim().to_string());
                }
                TokenKind::Value(value) => {
                    if let Some(attr) = pending_attr.take() {
                        current.args.insert(attr, value);
                    }
                }
                TokenKind::Content(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        current.value = text.to_string();
                    }
                }
                // the markup lexer never emits list tokens
                TokenKind::OpenList | TokenKind::CloseList => {}
            }
        }

        while let Some(mut parent) = stack.pop() {
            parent.children.push(current);
            current = parent;
        }

        if current.key.is_empty() && current.is_empty() && current.value.is_empty() {
            return Err(Error::with_message(
                ErrorKind::EmptyDocument,
                Span::new(end.start, end.start),
                "no markup found in input",
            ));
        }

        Ok(current)
    }
}
