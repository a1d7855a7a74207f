//! Format model and content-based format detection

use std::fmt;

/// A concrete input/output format.
///
/// There is no `Guess` variant: guessing is simply the absence of an
/// explicit format. `crate::from_str` runs [`detect`] and the CLI passes
/// `Option<Format>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Xml,
    Html,
    Svg,
    Json,
    Csv,
}

impl Format {
    /// XML-family dialect for this format, if it has one
    pub const fn dialect(self) -> Option<Dialect> {
        match self {
            Self::Xml => Some(Dialect::Xml),
            Self::Html => Some(Dialect::Html),
            Self::Svg => Some(Dialect::Svg),
            Self::Json | Self::Csv => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three markup dialects sharing the XML-family lexer and builder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Xml,
    Html,
    Svg,
}

impl Dialect {
    /// DOCTYPE string emitted by the markup writer
    pub const fn doctype(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Svg => "svg",
        }
    }

    pub const fn is_html(self) -> bool {
        matches!(self, Self::Html)
    }
}

/// HTML elements that never carry separate closing-tag syntax.
///
/// Immutable and process-wide; the lexer consults it per call, so parses of
/// different dialects can run concurrently.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Returns true if `name` is a void element under the given dialect
pub fn is_void_tag(dialect: Dialect, name: &str) -> bool {
    dialect.is_html() && VOID_TAGS.contains(&name)
}

/// Guess the format of a raw text buffer.
///
/// Best-effort heuristic, not a grammar check, applied in order:
///
/// 1. CSV if a `,` or `;` separator appears before any markup character
///    (`<` or `{`)
/// 2. JSON if `{` appears before `<`
/// 3. otherwise the buffer is markup: the substring `"html"` anywhere
///    selects HTML, `"svg"` selects SVG, and XML is the default
///
/// The substring scan in step 3 can false-positive on unrelated content
/// containing those letters; it is kept as-is and documented as unreliable.
/// Detection never fails; plain text with no markup signal comes back as
/// [`Format::Xml`].
pub fn detect(text: &str) -> Format {
    let angle = text.find('<');
    let brace = text.find('{');
    let separator = [text.find(','), text.find(';')]
        .into_iter()
        .flatten()
        .min();

    let markup = [angle, brace].into_iter().flatten().min();
    if let Some(sep) = separator {
        if markup.map_or(true, |m| sep < m) {
            return Format::Csv;
        }
    }

    if let Some(b) = brace {
        if angle.map_or(true, |a| b < a) {
            return Format::Json;
        }
    }

    if text.contains("html") {
        Format::Html
    } else if text.contains("svg") {
        Format::Svg
    } else {
        Format::Xml
    }
}

/// Detect a format from a file extension, for callers that have a path
pub fn detect_from_path(path: &str) -> Option<Format> {
    let ext = path.rsplit('.').next()?;
    match ext.to_ascii_lowercase().as_str() {
        "xml" => Some(Format::Xml),
        "html" | "htm" => Some(Format::Html),
        "svg" => Some(Format::Svg),
        "json" => Some(Format::Json),
        "csv" => Some(Format::Csv),
        _ => None,
    }
}
