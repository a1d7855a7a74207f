use treeform::{detect, detect_from_path, Format};

#[test]
fn detect_classifies_the_format_family() {
    assert_eq!(detect(r#"{"a": 1}"#), Format::Json);
    assert_eq!(detect("name,age\nAlice,30"), Format::Csv);
    assert_eq!(detect("name;age\nAlice;30"), Format::Csv);
    assert_eq!(detect("<html><body></body></html>"), Format::Html);
    assert_eq!(detect("<svg></svg>"), Format::Svg);
    assert_eq!(detect("<note><to>you</to></note>"), Format::Xml);
}

#[test]
fn detect_never_fails() {
    // no markup signal at all still resolves to the XML-family default
    assert_eq!(detect(""), Format::Xml);
    assert_eq!(detect("just words"), Format::Xml);
}

#[test]
fn detect_substring_heuristic_is_best_effort() {
    // documented false positive: "svg" anywhere in an XML buffer wins.
    // This pins current behavior; do not "fix" without re-deriving the
    // detection contract.
    assert_eq!(detect("<note>my svg collection</note>"), Format::Svg);
}

#[test]
fn detect_separator_order_decides_csv() {
    // separator before any markup character means CSV...
    assert_eq!(detect("a,b\n<not markup>"), Format::Csv);
    // ...but markup first keeps the buffer in the markup/JSON families
    assert_eq!(detect("<r>a,b</r>"), Format::Xml);
    assert_eq!(detect(r#"{"a": "1,2"}"#), Format::Json);
}

#[test]
fn detect_from_path_supports_extensions() {
    assert_eq!(detect_from_path("input.json"), Some(Format::Json));
    assert_eq!(detect_from_path("input.JSON"), Some(Format::Json));
    assert_eq!(detect_from_path("input.csv"), Some(Format::Csv));
    assert_eq!(detect_from_path("input.xml"), Some(Format::Xml));
    assert_eq!(detect_from_path("input.html"), Some(Format::Html));
    assert_eq!(detect_from_path("input.htm"), Some(Format::Html));
    assert_eq!(detect_from_path("input.svg"), Some(Format::Svg));
}

#[test]
fn detect_from_path_returns_none_for_unknown_or_missing_extensions() {
    assert_eq!(detect_from_path("input"), None);
    assert_eq!(detect_from_path("input.txt"), None);
}
