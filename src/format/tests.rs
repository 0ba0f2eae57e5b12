use super::*;
use html::fragment;
use pretty_assertions::assert_eq;

fn diffable_with(markup: &str, config: &FormattingConfig) -> String {
    render(&fragment(markup).unwrap(), config).unwrap()
}

fn diffable(markup: &str) -> String {
    diffable_with(markup, &FormattingConfig::default())
}

#[test]
fn test_indentation() {
    let markup = r#"<div id="a"><p>Hi <b>there</b></p><!-- note --></div>"#;
    let expected = r#"<div id="a">
  <p>
    Hi
    <b>
      there
    </b>
  </p>
  <!-- note -->
</div>"#;
    assert_eq!(diffable(markup), expected);
}

#[test]
fn test_void_elements() {
    let style = |void_elements| FormattingConfig {
        void_elements,
        ..Default::default()
    };
    assert_eq!(diffable_with("<br>", &style(VoidElements::Html)), "<br>");
    assert_eq!(diffable_with("<br>", &style(VoidElements::Xhtml)), "<br />");
    assert_eq!(diffable_with("<br>", &style(VoidElements::Xml)), "<br></br>");

    let input = r#"<input type="range" max="50">"#;
    assert_eq!(
        diffable_with(input, &style(VoidElements::Html)),
        "<input\n  type=\"range\"\n  max=\"50\"\n>"
    );
    assert_eq!(
        diffable_with(input, &style(VoidElements::Xhtml)),
        "<input\n  type=\"range\"\n  max=\"50\"\n/>"
    );
    assert_eq!(
        diffable_with(input, &style(VoidElements::Xml)),
        "<input\n  type=\"range\"\n  max=\"50\"\n></input>"
    );
}

#[test]
fn test_empty_elements() {
    assert_eq!(diffable("<div></div>"), "<div></div>");
    assert_eq!(diffable("<div>\n   </div>"), "<div></div>");
    let self_closing = FormattingConfig {
        self_closing_tag: true,
        ..Default::default()
    };
    assert_eq!(diffable_with("<div></div>", &self_closing), "<div />");
    assert_eq!(
        diffable(r#"<svg><circle r="1"></circle><g></g></svg>"#),
        "<svg>\n  <circle r=\"1\" />\n  <g></g>\n</svg>"
    );
}

#[test]
fn test_whitespace_preserved() {
    assert_eq!(diffable("<pre>Hello World</pre>"), "<pre>Hello World</pre>");
    assert_eq!(
        diffable("<div><pre>  a\n b </pre></div>"),
        "<div>\n  <pre>  a\n b </pre>\n</div>"
    );
    assert_eq!(
        diffable("<pre><b>x</b> y <!-- c --></pre>"),
        "<pre><b>\n    x\n  </b> y <!-- c --></pre>"
    );
    assert_eq!(
        diffable(r#"<p><a href="/">Home</a></p>"#),
        "<p>\n  <a href=\"/\">Home</a>\n</p>"
    );
    assert_eq!(diffable("<pre> </pre>"), "<pre> </pre>");
}

#[test]
fn test_whitespace_follows_nearest_tag() {
    let once = diffable("<pre><span>  x  </span></pre>");
    assert_eq!(once, "<pre><span>\n    x\n  </span></pre>");
    assert_eq!(diffable(&once), once);

    assert_eq!(
        diffable("<pre><span><i>a</i> </span></pre>"),
        "<pre><span>\n    <i>\n      a\n    </i>\n  </span></pre>"
    );
    assert_eq!(diffable("<pre><span>  </span></pre>"), "<pre><span></span></pre>");
    assert_eq!(
        diffable("<pre><span><pre> y </pre></span></pre>"),
        "<pre><span>\n    <pre> y </pre>\n  </span></pre>"
    );
}

#[test]
fn test_attribute_wrapping() {
    let none_inline = FormattingConfig {
        attributes_per_line: 0,
        ..Default::default()
    };
    assert_eq!(
        diffable_with(r#"<div id="a"></div>"#, &none_inline),
        "<div\n  id=\"a\"\n></div>"
    );
    let three_inline = FormattingConfig {
        attributes_per_line: 3,
        ..Default::default()
    };
    assert_eq!(
        diffable_with(r#"<img alt="" src="x.png">"#, &three_inline),
        "<img alt=\"\" src=\"x.png\" />"
    );
}

#[test]
fn test_class_wrapping() {
    assert_eq!(
        diffable(r#"<div class="b a  c"></div>"#),
        "<div class=\"\n  b\n  a\n  c\n\"></div>"
    );
    let expected = r#"<div
  id="x"
  class="
    a
    b
  "
>
  text
</div>"#;
    assert_eq!(diffable(r#"<div id="x" class="a b">text</div>"#), expected);

    let two_classes = FormattingConfig {
        classes_per_line: 2,
        ..Default::default()
    };
    assert_eq!(
        diffable_with(r#"<i class=" a   b "></i>"#, &two_classes),
        "<i class=\"a b\"></i>"
    );
}

#[test]
fn test_empty_attributes() {
    assert_eq!(diffable(r#"<p class=""></p>"#), r#"<p class=""></p>"#);
    let bare = FormattingConfig {
        empty_attributes: false,
        ..Default::default()
    };
    assert_eq!(diffable_with(r#"<p class=""></p>"#, &bare), "<p class></p>");
    assert_eq!(diffable_with("<input disabled>", &bare), "<input disabled />");
}

#[test]
fn test_escaping() {
    let markup = r#"<p title="a &amp; b">1 &lt; 2&nbsp;3</p>"#;
    assert_eq!(
        diffable(markup),
        "<p title=\"a & b\">\n  1 &lt; 2&nbsp;3\n</p>"
    );
    let inverted = FormattingConfig {
        escape_attributes: true,
        escape_inner_text: false,
        ..Default::default()
    };
    assert_eq!(
        diffable_with(markup, &inverted),
        "<p title=\"a &amp; b\">\n  1 < 2\u{a0}3\n</p>"
    );
    assert_eq!(
        diffable("<script>if (a < b && c) { go(); }</script>"),
        "<script>\n  if (a < b && c) { go(); }\n</script>"
    );
}

#[test]
fn test_comments_and_doctype() {
    assert_eq!(diffable("<div><!--  --></div>"), "<div>\n  <!---->\n</div>");
    assert_eq!(
        diffable("<!--\n  multi\n    line\n-->"),
        "<!--\n  multi\n    line\n-->"
    );
    assert_eq!(
        diffable("<!DOCTYPE html><html></html>"),
        "<!DOCTYPE html>\n<html></html>"
    );
}

#[test]
fn test_depth_guard() {
    let mut element = DOMElement::new("i", None, Vec::new());
    for _ in 0..MAX_DEPTH + 2 {
        element = DOMElement::new("b", None, vec![element.into()]);
    }
    let tree = Fragment::new(vec![element.into()]);
    assert!(matches!(
        render(&tree, &FormattingConfig::default()),
        Err(Error::DepthExceeded { .. })
    ));
}

#[test]
fn test_serialize() {
    let markup = r#"<div data-x="1"><br><!--c-->t<p></p></div>"#;
    assert_eq!(serialize(&fragment(markup).unwrap()), markup);
}
