use std::sync::Arc;

use diffable::settings::{self, SettingsWarning};
use diffable::{
    format_markup, print, print_with, test, BoundValue, ComponentWrapper, Error, Formatting,
    LiveValues, Markup, Printable, Settings,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn with(settings: serde_json::Value) -> Settings {
    let (settings, warnings) = Settings::parse(&settings);
    assert_eq!(warnings, Vec::<SettingsWarning>::new());
    settings
}

fn snapshot(markup: &str) -> String {
    format_markup(markup, &Settings::default()).unwrap()
}

#[test]
fn test_rendering_is_idempotent() {
    let markup = concat!(
        r#"<div id="x" class="b a"><p>Hello &amp; <b>world</b></p>"#,
        "<pre>  keep\n  this </pre>",
        r#"<input disabled><!-- note --><!--   -->"#,
        r#"<svg viewBox="0 0 1 1"><circle r="1"/></svg>"#,
        r#"<ul><li>one<li>two <a href="/x" title="t">link</a></ul>"#,
        "<script>if (a < b) run();</script></div>",
        r#"<p title="say &quot;hi&quot;">x</p>"#,
    );
    let once = snapshot(markup);
    assert_eq!(snapshot(&once), once);
}

#[test]
fn test_quoted_attribute_values_reparse() {
    let once = snapshot(r#"<p title="say &quot;hi&quot;">x</p>"#);
    assert_eq!(once, "<p title=\"say &quot;hi&quot;\">\n  x\n</p>");
    assert_eq!(snapshot(&once), once);
}

#[test]
fn test_attributes_are_sorted() {
    let rendered = snapshot(r#"<a z="1" b="2" m="3" A="4" _x="5"></a>"#);
    let names: Vec<&str> = rendered
        .lines()
        .skip(1)
        .filter_map(|line| line.trim().split_once('=').map(|(name, _)| name))
        .collect();
    assert_eq!(names.len(), 5);
    assert!(names.windows(2).all(|w| w[0] < w[1]), "{names:?}");
}

#[test]
fn test_void_element_styles() {
    let input = r#"<input type="range" max="50">"#;
    let style = |void: &str| with(json!({ "formatting": { "voidElements": void } }));
    assert_eq!(
        format_markup(input, &style("html")).unwrap(),
        "<input\n  max=\"50\"\n  type=\"range\"\n>"
    );
    assert_eq!(
        format_markup(input, &style("xhtml")).unwrap(),
        "<input\n  max=\"50\"\n  type=\"range\"\n/>"
    );
    assert_eq!(
        format_markup(input, &style("xml")).unwrap(),
        "<input\n  max=\"50\"\n  type=\"range\"\n></input>"
    );
}

#[test]
fn test_whitespace_preserved_tag() {
    assert_eq!(snapshot("<pre>Hello World</pre>"), "<pre>Hello World</pre>");
    assert_eq!(
        snapshot("<section><div><pre>Hello World</pre></div></section>"),
        "<section>\n  <div>\n    <pre>Hello World</pre>\n  </div>\n</section>"
    );
    assert_eq!(
        snapshot("<pre><span>  x  </span></pre>"),
        "<pre><span>\n    x\n  </span></pre>"
    );
}

#[test]
fn test_comment_minification() {
    assert_eq!(snapshot("<!--  -->"), "<!---->");
}

#[test]
fn test_empty_attribute_toggle() {
    assert_eq!(snapshot(r#"<p class=""></p>"#), r#"<p class=""></p>"#);
    let bare = with(json!({ "formatting": { "emptyAttributes": false } }));
    assert_eq!(
        format_markup(r#"<p class=""></p>"#, &bare).unwrap(),
        "<p class></p>"
    );
}

#[test]
fn test_stub_names() {
    let settings = with(json!({ "stubs": [".artichoke", "#A li:nth-of-type(odd)"] }));
    let markup = r#"<div class="artichoke">x</div><ul id="A"><li>1</li><li>2</li><li>3</li></ul>"#;
    let expected = r#"<artichoke-stub></artichoke-stub>
<ul id="A">
  <a_li-nth-of-type-odd-stub></a_li-nth-of-type-odd-stub>
  <li>
    2
  </li>
  <a_li-nth-of-type-odd-stub></a_li-nth-of-type-odd-stub>
</ul>"#;
    assert_eq!(format_markup(markup, &settings).unwrap(), expected);
}

#[test]
fn test_out_of_range_stub_position() {
    let settings = with(json!({ "stubs": ["li:nth-child(-2147483648)"] }));
    assert_eq!(
        format_markup("<ul><li>a</li></ul>", &settings).unwrap(),
        "<ul>\n  <li>\n    a\n  </li>\n</ul>"
    );
}

#[test]
fn test_test_token_removal() {
    let settings = with(json!({ "removeDataTest": true, "formatting": "none" }));
    assert_eq!(
        format_markup(r#"<div data-test="token">Test</div>"#, &settings).unwrap(),
        "<div>Test</div>"
    );
    assert_eq!(
        snapshot(r#"<div data-test="token">Test</div>"#),
        "<div>\n  Test\n</div>"
    );
}

#[test]
fn test_table_rows_stay_where_authored() {
    let expected = "<table>\n  <tr>\n    <td>\n      1\n    </td>\n  </tr>\n</table>";
    assert_eq!(snapshot("<table><tr><td>1</td></tr></table>"), expected);
    assert_eq!(
        snapshot("<tr><td>stray</td></tr>"),
        "<tr>\n  <td>\n    stray\n  </td>\n</tr>"
    );
}

#[test]
fn test_unparseable_markup() {
    assert!(matches!(
        format_markup("<div", &Settings::default()),
        Err(Error::Parse(_))
    ));
    assert_eq!(snapshot(""), "");

    let deep = "<b>".repeat(600);
    assert!(matches!(
        format_markup(&deep, &Settings::default()),
        Err(Error::DepthExceeded { limit: 512 })
    ));
}

#[test]
fn test_custom_formatter() {
    let mut settings = Settings::default();
    settings.formatting =
        Formatting::Custom(Arc::new(|markup: &str| Some(markup.to_uppercase())));
    assert_eq!(
        format_markup(r#"<b data-test="x">hi</b>"#, &settings).unwrap(),
        "<B>HI</B>"
    );

    settings.formatting = Formatting::Custom(Arc::new(|_: &str| -> Option<String> { None }));
    assert_eq!(
        format_markup(r#"<b data-test="x">hi</b>"#, &settings).unwrap(),
        r#"<b data-test="x">hi</b>"#
    );
}

struct Mounted;

impl Markup for Mounted {
    fn html(&self) -> String {
        r#"<label>Name <input type="text"></label><div data-config="[object Object]"></div>"#
            .to_string()
    }
}

impl LiveValues for Mounted {
    fn control_value(&self, index: usize) -> Option<BoundValue> {
        (index == 0).then(|| "Ada".into())
    }

    fn bound_attributes(&self, index: usize) -> Vec<(String, BoundValue)> {
        match index {
            2 => vec![("data-config".to_string(), json!({ "open": true }).into())],
            _ => Vec::new(),
        }
    }
}

impl ComponentWrapper for Mounted {
    fn live_values(&self) -> Option<&dyn LiveValues> {
        Some(self)
    }
}

#[test]
fn test_component_wrapper() {
    let wrapper = Printable::Wrapper(&Mounted);
    assert!(test(&wrapper));
    assert!(test(&Printable::Markup("  <div></div>")));
    assert!(!test(&Printable::Markup("just text")));

    let expected = r#"<label>
  Name
  <input
    type="text"
    value="Ada"
  />
</label>
<div data-config="{open:true}"></div>"#;
    assert_eq!(print_with(&wrapper, &Settings::default()).unwrap(), expected);
}

#[test]
fn test_print_reads_installed_settings() {
    settings::install(with(json!({ "formatting": "none", "sortAttributes": false })));
    let printed = print(&Printable::Markup(r#"<i z="1" a="2"></i>"#)).unwrap();
    settings::install(Settings::default());
    assert_eq!(printed, r#"<i z="1" a="2"></i>"#);
}
