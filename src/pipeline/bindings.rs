//! Passes that read runtime state from a live component

use html::Fragment;

use super::Context;
use crate::live::{stringify, BoundValue};

const CONTROLS: &[&str] = &["input", "textarea", "select"];

/// Replace the placeholder text of non-string bindings with their source-like form
pub fn stringify_attributes(tree: &mut Fragment, context: &Context) {
    let (true, Some(live)) = (context.config.stringify_attributes, context.live) else {
        return;
    };
    let excluded = &context.config.attributes_not_to_stringify;
    let mut index = 0;
    tree.for_each_element_mut(&mut |e| {
        for (name, value) in live.bound_attributes(index) {
            if excluded.contains(&name) || !e.attributes.contains(&name) {
                continue;
            }
            e.attributes.set(name, stringify(&value));
        }
        index += 1;
    });
}

/// Write the current value of every form control into a `value` attribute
pub fn add_input_values(tree: &mut Fragment, context: &Context) {
    let (true, Some(live)) = (context.config.add_input_values, context.live) else {
        return;
    };
    let mut index = 0;
    tree.for_each_element_mut(&mut |e| {
        if !CONTROLS.iter().any(|c| e.name.eq_ignore_ascii_case(c)) {
            return;
        }
        if let Some(value) = live.control_value(index) {
            let value = match value {
                BoundValue::Text(text) => text,
                other => stringify(&other),
            };
            e.attributes.set("value", value);
        }
        index += 1;
    });
}
