use crate::settings::StubSpec;

/// Tag name of the placeholder that replaces elements matched by `selector`: the
/// configured `tagName`, or a slug of the selector
pub fn resolve_stub_tag_name(selector: &str, spec: &StubSpec) -> String {
    match spec.tag_name.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => slugify_selector(selector),
    }
}

/// `#A li:nth-of-type(odd)` becomes `a_li-nth-of-type-odd-stub`.
///
/// Each run of characters outside `[A-Za-z0-9]` collapses to a single separator:
/// `_` when the run contains whitespace, `-` otherwise. Separators at either end are
/// dropped. Distinct selectors may share a slug.
pub fn slugify_selector(selector: &str) -> String {
    let mut slug = String::with_capacity(selector.len() + 5);
    let mut separator = None;
    for c in selector.chars() {
        if c.is_ascii_alphanumeric() {
            if let Some(sep) = separator.take() {
                if !slug.is_empty() {
                    slug.push(sep);
                }
            }
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || separator == Some('_') {
            separator = Some('_');
        } else {
            separator = Some('-');
        }
    }
    if slug.is_empty() {
        "stub".to_string()
    } else if slug.ends_with("-stub") {
        slug
    } else {
        slug.push_str("-stub");
        slug
    }
}
