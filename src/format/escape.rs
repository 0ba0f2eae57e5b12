//! Entity policy for text and attribute values.
//!
//! Values come out of the parser undecoded. They are decoded first so that `&amp;`
//! and `&` end up identical, then either re-encoded or left as literal characters.

use std::borrow::Cow;

const NBSP: char = '\u{a0}';

pub fn text(raw: &str, escape: bool) -> Cow<'_, str> {
    let decoded = html_escape::decode_html_entities(raw);
    if !escape {
        return decoded;
    }
    let encoded = html_escape::encode_text(&decoded).into_owned();
    nbsp(Cow::Owned(encoded))
}

/// Attribute values always sit inside double quotes, so a literal `"` is encoded
/// even when escaping is off
pub fn attribute(raw: &str, escape: bool) -> Cow<'_, str> {
    let decoded = html_escape::decode_html_entities(raw);
    if !escape {
        if decoded.contains('"') {
            return Cow::Owned(decoded.replace('"', "&quot;"));
        }
        return decoded;
    }
    let encoded = html_escape::encode_double_quoted_attribute(&decoded).into_owned();
    nbsp(Cow::Owned(encoded))
}

fn nbsp(s: Cow<'_, str>) -> Cow<'_, str> {
    if s.contains(NBSP) {
        Cow::Owned(s.replace(NBSP, "&nbsp;"))
    } else {
        s
    }
}
