/// Elements that can never have children or a closing tag
pub static VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is taken verbatim up to the matching end tag
pub static RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title", "xmp"];

// https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign
static SVG_TAG_NAMES: &[(&str, &str)] = &[
    ("altglyph", "altGlyph"),
    ("altglyphdef", "altGlyphDef"),
    ("altglyphitem", "altGlyphItem"),
    ("animatecolor", "animateColor"),
    ("animatemotion", "animateMotion"),
    ("animatetransform", "animateTransform"),
    ("clippath", "clipPath"),
    ("feblend", "feBlend"),
    ("fecolormatrix", "feColorMatrix"),
    ("fecomponenttransfer", "feComponentTransfer"),
    ("fecomposite", "feComposite"),
    ("feconvolvematrix", "feConvolveMatrix"),
    ("fediffuselighting", "feDiffuseLighting"),
    ("fedisplacementmap", "feDisplacementMap"),
    ("fedistantlight", "feDistantLight"),
    ("fedropshadow", "feDropShadow"),
    ("feflood", "feFlood"),
    ("fefunca", "feFuncA"),
    ("fefuncb", "feFuncB"),
    ("fefuncg", "feFuncG"),
    ("fefuncr", "feFuncR"),
    ("fegaussianblur", "feGaussianBlur"),
    ("feimage", "feImage"),
    ("femerge", "feMerge"),
    ("femergenode", "feMergeNode"),
    ("femorphology", "feMorphology"),
    ("feoffset", "feOffset"),
    ("fepointlight", "fePointLight"),
    ("fespecularlighting", "feSpecularLighting"),
    ("fespotlight", "feSpotLight"),
    ("fetile", "feTile"),
    ("feturbulence", "feTurbulence"),
    ("foreignobject", "foreignObject"),
    ("glyphref", "glyphRef"),
    ("lineargradient", "linearGradient"),
    ("radialgradient", "radialGradient"),
    ("textpath", "textPath"),
];

/// SVG shapes and filter primitives that render as `<tag />` when they have no children
static SVG_SELF_CLOSING: &[&str] = &[
    "circle",
    "ellipse",
    "line",
    "path",
    "polygon",
    "polyline",
    "rect",
    "stop",
    "use",
    "feBlend",
    "feColorMatrix",
    "feComposite",
    "feConvolveMatrix",
    "feDisplacementMap",
    "feDistantLight",
    "feDropShadow",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpotLight",
    "feTile",
    "feTurbulence",
];

/// Start tags that close an open `<p>`
static CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

fn contains_ignore_ascii_case(set: &[&str], name: &str) -> bool {
    set.iter().any(|s| s.eq_ignore_ascii_case(name))
}

pub fn is_void(name: &str) -> bool {
    contains_ignore_ascii_case(VOID_ELEMENTS, name)
}

pub fn is_raw_text(name: &str) -> bool {
    contains_ignore_ascii_case(RAW_TEXT_ELEMENTS, name)
}

pub fn is_svg_self_closing(name: &str) -> bool {
    contains_ignore_ascii_case(SVG_SELF_CLOSING, name)
}

/// Restore the canonical casing of SVG tag names that were written (or lower-cased) as
/// case-insensitive markup. Every other name is returned as authored.
pub fn canonical_tag_name(name: &str) -> String {
    SVG_TAG_NAMES
        .iter()
        .find(|(lower, _)| lower.eq_ignore_ascii_case(name))
        .map_or_else(|| name.to_string(), |(_, canonical)| canonical.to_string())
}

/// Whether an open element named `open` is implicitly closed by a start tag named `start`
pub fn implicitly_closed_by(open: &str, start: &str) -> bool {
    let open = open.to_ascii_lowercase();
    let start = start.to_ascii_lowercase();
    match open.as_str() {
        "p" => CLOSES_PARAGRAPH.contains(&start.as_str()),
        "li" => start == "li",
        "dt" | "dd" => start == "dt" || start == "dd",
        "option" => start == "option" || start == "optgroup",
        "tr" => start == "tr",
        "td" | "th" => start == "td" || start == "th" || start == "tr",
        _ => false,
    }
}

#[cfg(test)]
#[test]
fn test_canonical_tag_name() {
    assert_eq!(canonical_tag_name("feblend"), "feBlend");
    assert_eq!(canonical_tag_name("CLIPPATH"), "clipPath");
    assert_eq!(canonical_tag_name("MyComponent"), "MyComponent");
    assert!(is_svg_self_closing("feblend"));
    assert!(!is_svg_self_closing("g"));
}

#[cfg(test)]
#[test]
fn test_implicitly_closed_by() {
    assert!(implicitly_closed_by("p", "div"));
    assert!(implicitly_closed_by("LI", "li"));
    assert!(implicitly_closed_by("td", "th"));
    assert!(!implicitly_closed_by("p", "span"));
    assert!(!implicitly_closed_by("div", "div"));
}
