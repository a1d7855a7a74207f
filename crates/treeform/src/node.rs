//! The unified data tree all parsers build and all writers consume

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result, Span};

/// A single node of the data tree.
///
/// One node type covers the whole format family: an XML element, a JSON
/// object member, a JSON array, or a bare scalar. Which role a node plays
/// follows from which fields are populated:
///
/// - object-like nodes carry ordered members in `children`
/// - array-like nodes carry ordered elements in `items`
/// - scalar leaves carry only `value`
///
/// Scalar values are kept as literal source text: JSON strings keep their
/// quotes, numbers and booleans keep their spelling. Nothing is typed.
///
/// Ownership is strictly hierarchical; a parent exclusively owns its
/// `children` and `items`, so the tree is copied and dropped by plain
/// recursive traversal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Tag name, member name, or CSV column name; empty for anonymous
    /// list elements and freshly created nodes
    pub key: String,
    /// Scalar literal text (tag content for the XML family)
    pub value: String,
    /// XML-family attributes; keys unique, last write wins
    pub args: IndexMap<String, String>,
    /// Ordered object/element members; key uniqueness is not enforced
    pub children: Vec<Node>,
    /// Ordered array elements
    pub items: Vec<Node>,
}

impl Node {
    /// Creates a node with the given key and scalar value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Creates an anonymous scalar node (a list element)
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::new(String::new(), value)
    }

    /// Returns the first child whose key matches, in insertion order
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.key == key)
    }

    /// Returns a mutable reference to the first child whose key matches
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.key == key)
    }

    /// Returns the first child whose key matches, or a `KeyNotFound` error
    pub fn lookup(&self, key: &str) -> Result<&Node> {
        self.get(key).ok_or_else(|| {
            Error::new(
                ErrorKind::KeyNotFound {
                    key: key.to_string(),
                },
                Span::empty(),
            )
        })
    }

    /// Returns the list element at `index`, or an `IndexOutOfRange` error
    pub fn item(&self, index: usize) -> Result<&Node> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or_else(|| Error::new(ErrorKind::IndexOutOfRange { index, len }, Span::empty()))
    }

    /// Appends a key/value child
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.children.push(Self::new(key, value));
    }

    /// Appends an already-built child node
    pub fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Removes and returns the last child
    pub fn pop(&mut self) -> Option<Node> {
        self.children.pop()
    }

    /// Returns true if the node has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns the scalar value with surrounding double quotes stripped
    pub fn text(&self) -> &str {
        let v = self.value.as_str();
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(v)
    }

    /// Iterates over the node's children
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Iterates mutably over the node's children
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.children.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl From<(&str, &str)> for Node {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_push_and_get() {
        let mut node = Node::default();
        node.push("name", "\"Alice\"");
        node.push("age", "30");

        assert_eq!(node.len(), 2);
        assert!(!node.is_empty());
        assert_eq!(node.get("age").map(|n| n.value.as_str()), Some("30"));
        assert!(node.get("missing").is_none());
    }

    #[test]
    fn test_get_returns_first_match() {
        let mut node = Node::default();
        node.push("dup", "1");
        node.push("dup", "2");

        assert_eq!(node.get("dup").map(|n| n.value.as_str()), Some("1"));
    }

    #[test]
    fn test_lookup_miss_is_key_not_found() {
        let node = Node::default();
        let err = match node.lookup("nope") {
            Err(e) => e,
            Ok(_) => unreachable!("lookup on empty node must miss"),
        };
        assert_eq!(
            err.kind(),
            &ErrorKind::KeyNotFound {
                key: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_item_bounds_checked() {
        let mut node = Node::default();
        node.items.push(Node::scalar("1"));

        assert!(node.item(0).is_ok());
        let err = match node.item(5) {
            Err(e) => e,
            Ok(_) => unreachable!("index 5 must be out of range"),
        };
        assert_eq!(err.kind(), &ErrorKind::IndexOutOfRange { index: 5, len: 1 });
    }

    #[test]
    fn test_pop_removes_last() {
        let mut node = Node::default();
        node.push("a", "1");
        node.push("b", "2");

        let popped = node.pop();
        assert_eq!(popped.map(|n| n.key), Some("b".to_string()));
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_text_strips_quotes() {
        assert_eq!(Node::scalar("\"Alice\"").text(), "Alice");
        assert_eq!(Node::scalar("30").text(), "30");
        assert_eq!(Node::scalar("\"").text(), "\"");
    }

    #[test]
    fn test_args_last_write_wins() {
        let mut node = Node::default();
        node.args.insert("id".to_string(), "1".to_string());
        node.args.insert("id".to_string(), "2".to_string());

        assert_eq!(node.args.get("id").map(String::as_str), Some("2"));
        assert_eq!(node.args.len(), 1);
    }

    #[test]
    fn test_child_order_preserved() {
        let mut node = Node::default();
        node.push("first", "1");
        node.push("second", "2");
        node.push("third", "3");

        let keys: Vec<_> = node.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_push_node_and_iterate() {
        let mut node = Node::default();
        node.push_node(Node::new("child", ""));

        let mut count = 0;
        for c in &node {
            assert_eq!(c.key, "child");
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
