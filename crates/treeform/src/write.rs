//! Tree-to-text emission

use crate::error::{Error, ErrorKind, Result, Span};
use crate::format::{Dialect, Format};
use crate::node::Node;

/// Serialize a tree to the given format.
///
/// JSON and the XML family are supported targets; CSV is parse-only and
/// yields an `UnsupportedFormat` error.
pub fn to_string(node: &Node, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(write_json(node)),
        Format::Xml => Ok(write_markup(node, Dialect::Xml)),
        Format::Html => Ok(write_markup(node, Dialect::Html)),
        Format::Svg => Ok(write_markup(node, Dialect::Svg)),
        Format::Csv => Err(Error::new(
            ErrorKind::UnsupportedFormat {
                format: format.name().to_string(),
            },
            Span::empty(),
        )),
    }
}

/// JSON emission. An anonymous node carrying only list elements is emitted
/// as a top-level array; everything else as an object over its children.
fn write_json(node: &Node) -> String {
    if node.children.is_empty() && !node.items.is_empty() {
        write_list(node)
    } else {
        write_object(node)
    }
}

fn write_object(node: &Node) -> String {
    let members: Vec<String> = node
        .children
        .iter()
        .map(|child| format!("{}:{}", quote_key(&child.key), write_member(child)))
        .collect();
    format!("{{{}}}", members.join(","))
}

fn write_member(node: &Node) -> String {
    if !node.children.is_empty() {
        write_object(node)
    } else if !node.items.is_empty() {
        write_list(node)
    } else if node.value.is_empty() {
        // no scalar text and no members: an empty container
        "{}".to_string()
    } else {
        node.value.clone()
    }
}

fn write_list(node: &Node) -> String {
    let items: Vec<String> = node.items.iter().map(write_member).collect();
    format!("[{}]", items.join(","))
}

fn quote_key(key: &str) -> String {
    if key.starts_with('"') {
        key.to_string()
    } else {
        format!("\"{key}\"")
    }
}

/// XML-family emission: DOCTYPE line, then the tree. A node with a key is
/// itself the root element; an anonymous container emits its children.
/// List elements have no markup representation and are skipped.
fn write_markup(node: &Node, dialect: Dialect) -> String {
    let mut out = format!("<!DOCTYPE {}>\n", dialect.doctype());
    if node.key.is_empty() {
        for child in node {
            write_element(child, &mut out);
        }
    } else {
        write_element(node, &mut out);
    }
    out
}

fn write_element(node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(&node.key);
    for (name, value) in &node.args {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push_str(">\n");

    if !node.value.is_empty() {
        out.push_str(&node.value);
        out.push('\n');
    }
    for child in node {
        write_element(child, out);
    }

    out.push_str("</");
    out.push_str(&node.key);
    out.push_str(">\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flat_object() {
        let mut node = Node::default();
        node.push("name", "\"Alice\"");
        node.push("age", "30");
        assert_eq!(
            to_string(&node, Format::Json).ok(),
            Some(r#"{"name":"Alice","age":30}"#.to_string())
        );
    }

    #[test]
    fn test_json_nested_object() {
        let mut inner = Node::new("inner", "");
        inner.push("k", "1");
        let mut node = Node::default();
        node.push_node(inner);
        assert_eq!(
            to_string(&node, Format::Json).ok(),
            Some(r#"{"inner":{"k":1}}"#.to_string())
        );
    }

    #[test]
    fn test_json_list_member() {
        let mut list = Node::new("l", "");
        list.items.push(Node::scalar("1"));
        list.items.push(Node::scalar("\"two\""));
        let mut node = Node::default();
        node.push_node(list);
        assert_eq!(
            to_string(&node, Format::Json).ok(),
            Some(r#"{"l":[1,"two"]}"#.to_string())
        );
    }

    #[test]
    fn test_json_top_level_array() {
        let mut node = Node::default();
        node.items.push(Node::scalar("1"));
        node.items.push(Node::scalar("2"));
        assert_eq!(to_string(&node, Format::Json).ok(), Some("[1,2]".to_string()));
    }

    #[test]
    fn test_json_empty_member_is_empty_object() {
        let mut node = Node::default();
        node.push("empty", "");
        assert_eq!(
            to_string(&node, Format::Json).ok(),
            Some(r#"{"empty":{}}"#.to_string())
        );
    }

    #[test]
    fn test_markup_doctype_per_dialect() {
        let node = Node::new("r", "");
        for (format, doctype) in [
            (Format::Xml, "<!DOCTYPE xml>"),
            (Format::Html, "<!DOCTYPE html>"),
            (Format::Svg, "<!DOCTYPE svg>"),
        ] {
            let out = to_string(&node, format).unwrap_or_default();
            assert!(out.starts_with(doctype), "missing {doctype} in {out}");
        }
    }

    #[test]
    fn test_markup_element_with_attributes() {
        let mut node = Node::new("a", "link");
        node.args.insert("href".to_string(), "x".to_string());
        let out = to_string(&node, Format::Xml).unwrap_or_default();
        assert_eq!(out, "<!DOCTYPE xml>\n<a href=\"x\">\nlink\n</a>\n");
    }

    #[test]
    fn test_markup_anonymous_root_emits_children() {
        let mut node = Node::default();
        node.push("a", "1");
        node.push("b", "2");
        let out = to_string(&node, Format::Xml).unwrap_or_default();
        assert_eq!(out, "<!DOCTYPE xml>\n<a>\n1\n</a>\n<b>\n2\n</b>\n");
    }

    #[test]
    fn test_csv_target_unsupported() {
        let node = Node::default();
        let result = to_string(&node, Format::Csv);
        assert!(matches!(
            result,
            Err(e) if *e.kind() == (ErrorKind::UnsupportedFormat { format: "csv".to_string() })
        ));
    }
}
