//! treeform - multi-format structured-data front end
//!
//! Ingests XML/HTML/SVG/JSON/CSV text and builds one unified, mutable tree;
//! serializes that tree back to JSON or an XML-family dialect.
//!
//! Not a validating parser: nesting is never checked and malformed markup
//! degrades to a best-effort tree. Not a streaming parser: the whole input
//! is tokenized before any node is built.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), treeform::Error> {
//! let tree = treeform::from_str(r#"{"name": "Ada", "age": 36}"#)?;
//! assert_eq!(tree.lookup("name")?.text(), "Ada");
//!
//! let xml = treeform::to_string(&tree, treeform::Format::Xml)?;
//! assert!(xml.contains("<name>"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod node;
pub use node::Node;

pub mod format;
pub use format::{detect, detect_from_path, Dialect, Format, VOID_TAGS};

pub mod lexer;
pub use lexer::{Token, TokenKind};

pub mod csv;
pub use csv::Divider;

pub mod parser;
pub use parser::{JsonParser, MarkupParser};

pub mod write;

/// Parse text into a tree, guessing the format with [`detect`]
pub fn from_str(s: &str) -> Result<Node> {
    from_str_with_format(s, detect(s))
}

/// Parse text into a tree using an explicit format
pub fn from_str_with_format(s: &str, format: Format) -> Result<Node> {
    match format {
        Format::Xml => MarkupParser::new(s, Dialect::Xml).parse(),
        Format::Html => MarkupParser::new(s, Dialect::Html).parse(),
        Format::Svg => MarkupParser::new(s, Dialect::Svg).parse(),
        Format::Json => JsonParser::new(s).parse(),
        Format::Csv => csv::parse(s, None),
    }
}

/// Parse CSV text with an explicit field divider
pub fn from_csv_str_with_divider(s: &str, divider: Divider) -> Result<Node> {
    csv::parse(s, Some(divider))
}

/// Serialize a tree to text in the given format
pub fn to_string(node: &Node, format: Format) -> Result<String> {
    write::to_string(node, format)
}
