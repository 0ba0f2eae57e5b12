use std::collections::BTreeSet;

use html::{DOMContent, Fragment};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::Context;

lazy_static! {
    static ref SCOPED_STYLE_ID: Regex = Regex::new("^data-v-[A-Za-z0-9_-]+$").unwrap();
}

pub fn remove_server_rendered(tree: &mut Fragment, context: &Context) {
    if !context.config.remove_server_rendered {
        return;
    }
    tree.for_each_element_mut(&mut |e| {
        e.attributes.remove("data-server-rendered");
    });
}

fn starts_with_test(s: &str) -> bool {
    s.get(..4).map_or(false, |p| p.eq_ignore_ascii_case("test"))
}

pub fn remove_test_tokens(tree: &mut Fragment, context: &Context) {
    let config = context.config;
    let families: Vec<&str> = [
        (config.remove_data_test, "data-test"),
        (config.remove_data_testid, "data-testid"),
        (config.remove_data_test_id, "data-test-id"),
        (config.remove_data_qa, "data-qa"),
        (config.remove_data_cy, "data-cy"),
        (config.remove_data_pw, "data-pw"),
    ]
    .into_iter()
    .filter_map(|(enabled, name)| enabled.then_some(name))
    .collect();

    tree.for_each_element_mut(&mut |e| {
        e.attributes.retain(|name, _| !families.contains(&name));

        if config.remove_id_test && e.get_attribute("id").map_or(false, starts_with_test) {
            e.attributes.remove("id");
        }

        if config.remove_class_test {
            let Some(class) = e.get_attribute("class") else {
                return;
            };
            let tokens: Vec<&str> = class.split_whitespace().collect();
            let kept: Vec<&str> = tokens
                .iter()
                .copied()
                .filter(|t| !starts_with_test(t))
                .collect();
            if kept.len() == tokens.len() {
                return;
            }
            if kept.is_empty() {
                e.attributes.remove("class");
            } else {
                let kept = kept.join(" ");
                e.attributes.set("class", kept);
            }
        }
    });
}

pub fn remove_scoped_style_ids(tree: &mut Fragment, context: &Context) {
    if !context.config.remove_data_v_id {
        return;
    }
    let scoped: BTreeSet<String> = tree
        .elements()
        .into_iter()
        .flat_map(|e| e.attributes.names())
        .filter(|name| SCOPED_STYLE_ID.is_match(name))
        .map(str::to_string)
        .collect();
    if scoped.is_empty() {
        return;
    }
    debug!(?scoped, "Removing scoped style ids");
    tree.for_each_element_mut(&mut |e| {
        e.attributes.retain(|name, _| !scoped.contains(name));
    });
}

pub fn remove_comments(tree: &mut Fragment, context: &Context) {
    if !context.config.remove_comments {
        return;
    }
    tree.retain_nodes(&mut |c| !matches!(c, DOMContent::Comment(_)));
}
