//! Tree builder for the JSON family (JSON and transcoded CSV)

use std::mem;

use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::{JsonLexer, TokenKind};
use crate::node::Node;

/// Builds a tree from the JSON token stream.
///
/// Same ancestor-stack discipline as the markup builder, generalized with a
/// list-depth counter because object nesting and array nesting interleave.
/// While list depth is positive, `Value` tokens append to the current node's
/// `items` instead of its `children`.
///
/// A `Value` whose text begins with `{` or `[` is an embedded sub-document:
/// it is re-run through the lexer and builder (mutual recursion bounded by
/// the shrinking input) and the resulting node is spliced in.
#[derive(Debug)]
pub struct JsonParser<'a> {
    lexer: JsonLexer<'a>,
}

impl<'a> JsonParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: JsonLexer::new(input),
        }
    }

    pub fn parse(&mut self) -> Result<Node> {
        let mut current = Node::default();
        let mut stack: Vec<Node> = Vec::new();
        let mut pending_key: Option<String> = None;
        let mut list_depth: usize = 0;
        let end;

        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Eof => {
                    end = token.span;
                    break;
                }
                TokenKind::Open(_) => {
                    let key = pending_key.take().unwrap_or_default();
                    stack.push(mem::take(&mut current));
                    current.key = key;
                }
                TokenKind::OpenList => {
                    let key = pending_key.take().unwrap_or_default();
                    stack.push(mem::take(&mut current));
                    current.key = key;
                    list_depth += 1;
                }
                TokenKind::Close(_) => {
                    if let Some(mut parent) = stack.pop() {
                        parent.children.push(mem::take(&mut current));
                        current = parent;
                    }
                }
                TokenKind::CloseList => {
                    list_depth = list_depth.saturating_sub(1);
                    if let Some(mut parent) = stack.pop() {
                        parent.children.push(mem::take(&mut current));
                        current = parent;
                    }
                }
                TokenKind::Key(key) => {
                    pending_key = Some(key);
                }
                TokenKind::Value(text) => {
                    if stack.is_empty() {
                        // scalar outside any container; nothing to attach it to
                    } else if text.starts_with('{') || text.starts_with('[') {
                        let mut node = parse_document(&text)?;
                        if list_depth > 0 {
                            node.key.clear();
                            current.items.push(node);
                        } else {
                            node.key = pending_key.take().unwrap_or_default();
                            current.children.push(node);
                        }
                    } else if list_depth > 0 {
                        current.items.push(Node::scalar(text));
                    } else {
                        current
                            .children
                            .push(Node::new(pending_key.take().unwrap_or_default(), text));
                    }
                }
                // the JSON lexer never emits content tokens
                TokenKind::Content(_) => {}
            }
        }

        while let Some(mut parent) = stack.pop() {
            parent.children.push(current);
            current = parent;
        }

        // unwrap the synthetic wrapper produced by the outermost container
        current.children.into_iter().next().ok_or_else(|| {
            Error::with_message(
                ErrorKind::EmptyDocument,
                Span::new(end.start, end.start),
                "no top-level members found",
            )
        })
    }
}

/// Parse one embedded sub-document. Entry point for the mutual recursion
/// between "parse array element" and "parse document".
pub(crate) fn parse_document(text: &str) -> Result<Node> {
    JsonParser::new(text).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Node> {
        JsonParser::new(input).parse()
    }

    #[test]
    fn test_flat_object() -> Result<()> {
        let root = parse(r#"{"name": "Alice", "age": 30}"#)?;
        assert_eq!(root.len(), 2);
        assert_eq!(root.lookup("name")?.value, "\"Alice\"");
        assert_eq!(root.lookup("name")?.text(), "Alice");
        assert_eq!(root.lookup("age")?.value, "30");
        Ok(())
    }

    #[test]
    fn test_nested_objects() -> Result<()> {
        let root = parse(r#"{"a": {"b": {"c": 1}}}"#)?;
        assert_eq!(root.lookup("a")?.lookup("b")?.lookup("c")?.value, "1");
        Ok(())
    }

    #[test]
    fn test_list_of_scalars_and_subdocument() -> Result<()> {
        let root = parse(r#"{"l":[1,2,{"k":3}]}"#)?;
        let l = root.lookup("l")?;
        assert_eq!(l.items.len(), 3);
        assert_eq!(l.item(0)?.value, "1");
        assert_eq!(l.item(1)?.value, "2");
        assert_eq!(l.item(2)?.lookup("k")?.value, "3");
        Ok(())
    }

    #[test]
    fn test_top_level_array() -> Result<()> {
        let root = parse("[1, 2, 3]")?;
        assert_eq!(root.items.len(), 3);
        assert_eq!(root.item(2)?.value, "3");
        assert!(root.is_empty());
        Ok(())
    }

    #[test]
    fn test_nested_arrays_embed_recursively() -> Result<()> {
        let root = parse("[[1,2],[3]]")?;
        assert_eq!(root.items.len(), 2);
        assert_eq!(root.item(0)?.items.len(), 2);
        assert_eq!(root.item(0)?.item(1)?.value, "2");
        assert_eq!(root.item(1)?.item(0)?.value, "3");
        Ok(())
    }

    #[test]
    fn test_empty_object_member() -> Result<()> {
        let root = parse(r#"{"empty": {}}"#)?;
        let empty = root.lookup("empty")?;
        assert!(empty.is_empty());
        assert_eq!(empty.value, "");
        Ok(())
    }

    #[test]
    fn test_empty_list_member() -> Result<()> {
        let root = parse(r#"{"l": []}"#)?;
        assert!(root.lookup("l")?.items.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_input_is_parse_failure() {
        for input in ["", "   ", "42"] {
            let result = parse(input);
            assert!(
                matches!(&result, Err(e) if *e.kind() == ErrorKind::EmptyDocument),
                "expected EmptyDocument for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_unterminated_object_drains() -> Result<()> {
        let root = parse(r#"{"a": 1"#)?;
        assert_eq!(root.lookup("a")?.value, "1");
        Ok(())
    }

    #[test]
    fn test_duplicate_keys_kept_in_order() -> Result<()> {
        let root = parse(r#"{"k": 1, "k": 2}"#)?;
        assert_eq!(root.len(), 2);
        assert_eq!(root.lookup("k")?.value, "1");
        Ok(())
    }
}
