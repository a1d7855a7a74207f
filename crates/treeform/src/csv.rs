//! CSV transcoder
//!
//! CSV has no bespoke tree builder: the record lines are rewritten into an
//! equivalent JSON array literal and handed to the JSON lexer and builder.
//! The first line is the header; every later non-empty line becomes one
//! object pairing the header keys, in order, with that line's fields.

use crate::error::Result;
use crate::node::Node;
use crate::parser::json::parse_document;

/// Field divider of a CSV buffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Divider {
    #[default]
    Comma,
    Semicolon,
}

impl Divider {
    const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
        }
    }
}

/// Sample the first line for a divider: whichever of `,` and `;` appears
/// first wins; comma is the default
pub fn detect_divider(text: &str) -> Divider {
    let first_line = text.lines().next().unwrap_or("");
    for ch in first_line.chars() {
        match ch {
            ',' => return Divider::Comma,
            ';' => return Divider::Semicolon,
            _ => {}
        }
    }
    Divider::Comma
}

/// Rewrite CSV text into an equivalent JSON array literal.
///
/// Quoting rules: header fields are always quoted (they become member
/// names); record fields containing alphabetic characters are quoted unless
/// already quoted, while numeric and other bare tokens stay unquoted.
pub fn transcode(text: &str, divider: Divider) -> String {
    let mut lines = text.lines();
    let header: Vec<String> = match lines.next() {
        Some(line) => split_fields(line, divider).iter().map(|f| quote(f)).collect(),
        None => Vec::new(),
    };

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line, divider);
        let members: Vec<String> = header
            .iter()
            .zip(fields.iter())
            .map(|(key, field)| {
                let value = if field.chars().any(|c| c.is_alphabetic()) {
                    quote(field)
                } else {
                    (*field).to_string()
                };
                format!("{key}:{value}")
            })
            .collect();
        records.push(format!("{{{}}}", members.join(",")));
    }

    cleanup_trailing_commas(&format!("[{}]", records.join(",")))
}

/// Split one line on the divider, trimming fields and dropping the empty
/// tail a dangling separator leaves behind
fn split_fields(line: &str, divider: Divider) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(divider.as_char()).map(str::trim).collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}

fn quote(field: &str) -> String {
    if field.starts_with('"') {
        field.to_string()
    } else {
        format!("\"{field}\"")
    }
}

/// Dangling separators leave commas hanging before a closing bracket;
/// strip them before handing the text to the JSON lexer
fn cleanup_trailing_commas(text: &str) -> String {
    text.replace(",}", "}").replace(",]", "]")
}

/// Transcode and parse CSV text; `divider` of `None` requests detection
pub(crate) fn parse(text: &str, divider: Option<Divider>) -> Result<Node> {
    let divider = divider.unwrap_or_else(|| detect_divider(text));
    parse_document(&transcode(text, divider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcode_single_record() {
        assert_eq!(
            transcode("name,age\nAlice,30\n", Divider::Comma),
            r#"[{"name":"Alice","age":30}]"#
        );
    }

    #[test]
    fn test_transcode_quotes_alphabetic_fields_only() {
        let json = transcode("id,label\n7,x1\n", Divider::Comma);
        assert_eq!(json, r#"[{"id":7,"label":"x1"}]"#);
    }

    #[test]
    fn test_transcode_keeps_existing_quotes() {
        let json = transcode("\"name\"\n\"Alice\"\n", Divider::Comma);
        assert_eq!(json, r#"[{"name":"Alice"}]"#);
    }

    #[test]
    fn test_transcode_semicolon_divider() {
        assert_eq!(
            transcode("a;b\n1;2\n", Divider::Semicolon),
            r#"[{"a":1,"b":2}]"#
        );
    }

    #[test]
    fn test_dangling_separator_cleaned_up() {
        assert_eq!(
            transcode("a,b,\n1,2,\n", Divider::Comma),
            r#"[{"a":1,"b":2}]"#
        );
    }

    #[test]
    fn test_short_record_pairs_what_it_has() {
        assert_eq!(
            transcode("a,b\n1\n", Divider::Comma),
            r#"[{"a":1}]"#
        );
    }

    #[test]
    fn test_detect_divider() {
        assert_eq!(detect_divider("a,b\n"), Divider::Comma);
        assert_eq!(detect_divider("a;b\n"), Divider::Semicolon);
        assert_eq!(detect_divider("a;b,c\n"), Divider::Semicolon);
        assert_eq!(detect_divider("plain\n"), Divider::Comma);
    }

    #[test]
    fn test_parse_builds_record_objects() -> Result<()> {
        let root = parse("name,age\nAlice,30\nBob,41\n", None)?;
        assert_eq!(root.items.len(), 2);
        let alice = root.item(0)?;
        assert_eq!(alice.lookup("name")?.text(), "Alice");
        assert_eq!(alice.lookup("age")?.value, "30");
        let bob = root.item(1)?;
        assert_eq!(bob.lookup("name")?.text(), "Bob");
        Ok(())
    }

    #[test]
    fn test_parse_header_only_is_empty_list() -> Result<()> {
        let root = parse("name,age\n", None)?;
        assert!(root.items.is_empty());
        Ok(())
    }
}
