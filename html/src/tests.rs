use super::*;
use pretty_assertions::assert_eq;

fn element(name: &str, attributes: Option<DOMAttributes>, contents: Vec<DOMContent>) -> DOMContent {
    DOMElement::new(name, attributes, contents).into()
}

#[test]
fn test_document() {
    let i = r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8"/>
        <title>The minimal, valid HTML5 document</title>
    </head>
    <body>
        <!-- User-visible content goes in the body -->
        <p>Some paragraph</p>
    </body>
</html>"#;
    let target = Fragment::new(vec![
        DOMContent::Doctype("DOCTYPE html".to_string()),
        "\n".into(),
        element(
            "html",
            Some(attributes!("lang" => "en")),
            vec![
                "\n    ".into(),
                element(
                    "head",
                    None,
                    vec![
                        "\n        ".into(),
                        element("meta", Some(attributes!("charset" => "utf-8")), vec![]),
                        "\n        ".into(),
                        element(
                            "title",
                            None,
                            vec!["The minimal, valid HTML5 document".into()],
                        ),
                        "\n    ".into(),
                    ],
                ),
                "\n    ".into(),
                element(
                    "body",
                    None,
                    vec![
                        "\n        ".into(),
                        DOMContent::Comment(" User-visible content goes in the body ".to_string()),
                        "\n        ".into(),
                        element("p", None, vec!["Some paragraph".into()]),
                        "\n    ".into(),
                    ],
                ),
                "\n".into(),
            ],
        ),
    ]);
    assert_eq!(fragment(i), Ok(target));
}

#[test]
fn test_empty_input() {
    assert_eq!(fragment(""), Ok(Fragment::default()));
}

#[test]
fn test_attributes_keep_order_case_and_entities() {
    let parsed = fragment(r#"<svg viewBox="0 0 1 1" Zed="1" alpha title="a &amp; b"></svg>"#).unwrap();
    let svg = parsed.contents[0].as_element().unwrap();
    assert_eq!(
        svg.attributes,
        attributes!("viewBox" => "0 0 1 1", "Zed" => "1", "alpha" => "", "title" => "a &amp; b")
    );
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let parsed = fragment(r#"<p id="a" id="b"></p>"#).unwrap();
    assert_eq!(parsed.elements()[0].get_attribute("id"), Some("a"));
}

#[test]
fn test_element_queries() {
    let parsed = fragment(r#"<p class=" b  a "><br></p><img>"#).unwrap();
    let elements = parsed.elements();
    let names: Vec<&str> = elements.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["p", "br", "img"]);
    let p = elements[0];
    assert_eq!(p.classes().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(p.get_attribute("id"), None);
    assert!(!p.is_void());
    assert!(p.contents[0].as_element().is_some_and(DOMElement::is_void));
    assert!(elements[2].is_void());
}

#[test]
fn test_text_keeps_raw_entities() {
    let parsed = fragment("<p>&lt;b&gt; &nbsp;</p>").unwrap();
    let p = parsed.contents[0].as_element().unwrap();
    assert_eq!(p.contents, vec!["&lt;b&gt; &nbsp;".into()]);
}

#[test]
fn test_void_elements_never_take_children() {
    let parsed = fragment(r#"<input type="text"><span>after</span></input>"#).unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![
            element("input", Some(attributes!("type" => "text")), vec![]),
            element("span", None, vec!["after".into()]),
        ])
    );
}

#[test]
fn test_self_closing_only_in_foreign_content() {
    let parsed = fragment(r#"<div/><span></span>"#).unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element(
            "div",
            None,
            vec![element("span", None, vec![])]
        )])
    );

    let parsed = fragment(r#"<svg><g/><circle r="1"/></svg>"#).unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element(
            "svg",
            None,
            vec![
                element("g", None, vec![]),
                element("circle", Some(attributes!("r" => "1")), vec![]),
            ]
        )])
    );
}

#[test]
fn test_svg_tag_names_are_canonicalised() {
    let parsed = fragment("<svg><clippath></clippath><feblend/></svg>").unwrap();
    let names: Vec<&str> = parsed.elements().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["svg", "clipPath", "feBlend"]);
}

#[test]
fn test_table_rows_stay_where_authored() {
    let parsed = fragment("<table><tr><td>1</td></tr></table>").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element(
            "table",
            None,
            vec![element(
                "tr",
                None,
                vec![element("td", None, vec!["1".into()])]
            )]
        )])
    );
}

#[test]
fn test_stray_row_outside_table_is_kept() {
    let parsed = fragment("<tr><td>x</td></tr><table></table>").unwrap();
    let names: Vec<&str> = parsed.elements().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["tr", "td", "table"]);
}

#[test]
fn test_implied_end_tags() {
    let parsed = fragment("<ul><li>one<li>two</ul>").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element(
            "ul",
            None,
            vec![
                element("li", None, vec!["one".into()]),
                element("li", None, vec!["two".into()]),
            ]
        )])
    );

    let parsed = fragment("<p>a<div>b</div>").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![
            element("p", None, vec!["a".into()]),
            element("div", None, vec!["b".into()]),
        ])
    );
}

#[test]
fn test_unmatched_end_tags_are_dropped() {
    let parsed = fragment("<div></span>text</div></p>").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element("div", None, vec!["text".into()])])
    );
}

#[test]
fn test_unclosed_elements_close_at_end() {
    let parsed = fragment("<div><b>bold").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element(
            "div",
            None,
            vec![element("b", None, vec!["bold".into()])]
        )])
    );
}

#[test]
fn test_raw_text_elements() {
    let parsed = fragment("<script>if (a < b) { x = '<p>'; }</script>").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element(
            "script",
            None,
            vec!["if (a < b) { x = '<p>'; }".into()]
        )])
    );
}

#[test]
fn test_lone_less_than_is_text() {
    let parsed = fragment("<p>1 < 2</p>").unwrap();
    assert_eq!(
        parsed,
        Fragment::new(vec![element("p", None, vec!["1 < 2".into()])])
    );
}

#[test]
fn test_spans_are_one_based() {
    let parsed = fragment("ab<p>x</p><br>").unwrap();
    let elements = parsed.elements();
    assert_eq!(elements[0].span, Some(Span { start: 3, end: 10 }));
    assert_eq!(elements[1].span, Some(Span { start: 11, end: 14 }));
}

#[test]
fn test_parse_malformed() {
    assert_eq!(
        fragment(r#"<div class="x"#),
        Err(ParseError::Unterminated {
            construct: "tag",
            offset: 1
        })
    );
    assert_eq!(
        fragment("<p>a<!-- never closed"),
        Err(ParseError::Unterminated {
            construct: "comment",
            offset: 5
        })
    );
    assert_eq!(
        fragment(r#"<p>x</p><div class="a>b</div>"#),
        Err(ParseError::MalformedTag { offset: 9 })
    );
}

#[test]
fn test_depth_guard() {
    let input = "<div>".repeat(MAX_DEPTH + 1);
    assert!(matches!(
        fragment(&input),
        Err(ParseError::TooDeep { limit: MAX_DEPTH, .. })
    ));
    assert!(fragment(&"<div>".repeat(MAX_DEPTH)).is_ok());
}
