/// `<!--body-->`, with a blank body collapsed to `<!---->`. Anything else is kept
/// exactly, line breaks included.
pub fn render(body: &str, out: &mut String) {
    out.push_str("<!--");
    if !body.trim().is_empty() {
        out.push_str(body);
    }
    out.push_str("-->");
}

#[cfg(test)]
#[test]
fn test_render_comment() {
    let rendered = |body| {
        let mut out = String::new();
        render(body, &mut out);
        out
    };
    assert_eq!(rendered("  "), "<!---->");
    assert_eq!(rendered(""), "<!---->");
    assert_eq!(rendered(" keep\n   me "), "<!-- keep\n   me -->");
}
