use html::Fragment;
use lazy_static::lazy_static;
use regex::Regex;

use super::Context;

lazy_static! {
    // `function (...)`, `async function name(...)`, `(a, b) =>`, `x =>`
    static ref INLINE_FUNCTION: Regex = Regex::new(
        r"^\s*(async\s+)?(function\b|\([^()]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)"
    )
    .unwrap();
}

pub fn clear_attributes(tree: &mut Fragment, context: &Context) {
    for name in &context.config.attributes_to_clear {
        if name.is_empty() || name.contains(char::is_whitespace) {
            context.warn(format_args!(
                "attributesToClear: `{name}` is not an attribute name, skipping"
            ));
            continue;
        }
        tree.for_each_element_mut(&mut |e| {
            if e.attributes.contains(name) {
                e.attributes.set(name.as_str(), "");
            }
        });
    }
}

pub fn clear_inline_functions(tree: &mut Fragment, context: &Context) {
    if !context.config.clear_inline_functions {
        return;
    }
    tree.for_each_element_mut(&mut |e| {
        for (_, value) in e.attributes.iter_mut() {
            if INLINE_FUNCTION.is_match(value) {
                *value = "[function]".to_string();
            }
        }
    });
}

pub fn sort_attributes(tree: &mut Fragment, context: &Context) {
    if !context.config.sort_attributes {
        return;
    }
    tree.for_each_element_mut(&mut |e| e.attributes.sort_by_name());
}

pub fn sort_classes(tree: &mut Fragment, context: &Context) {
    if !context.config.sort_classes {
        return;
    }
    tree.for_each_element_mut(&mut |e| {
        let Some(class) = e.get_attribute("class") else {
            return;
        };
        let mut tokens: Vec<&str> = class.split_whitespace().collect();
        tokens.sort_unstable();
        let sorted = tokens.join(" ");
        e.attributes.set("class", sorted);
    });
}
