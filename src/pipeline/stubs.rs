use html::{DOMAttributes, DOMContent, Fragment};
use tracing::debug;

use super::Context;
use crate::settings::{AttributeRemoval, StubSpec};
use crate::stub::resolve_stub_tag_name;

/// Replace every element matched by a configured selector with a placeholder.
/// Elements inside an already stubbed element are left to the outer stub.
pub fn stub_components(tree: &mut Fragment, context: &Context) {
    for (selector, spec) in &context.config.stubs {
        let selectors = match css::selector_list(selector) {
            Ok(selectors) => selectors,
            Err(e) => {
                context.warn(format_args!("stubs: {e}, skipping"));
                continue;
            }
        };
        let paths = outermost(css::select(tree, &selectors));
        debug!(selector = selector.as_str(), matches = paths.len(), "Stubbing");
        let tag_name = resolve_stub_tag_name(selector, spec);
        for path in paths {
            if let Some(DOMContent::Element(e)) = tree.get_mut(&path) {
                e.name = tag_name.clone();
                apply(spec, &mut e.attributes, &mut e.contents);
            }
        }
    }
}

fn apply(spec: &StubSpec, attributes: &mut DOMAttributes, contents: &mut Vec<DOMContent>) {
    if spec.remove_inner_html {
        contents.clear();
    }
    match &spec.remove_attributes {
        AttributeRemoval::All(true) => *attributes = DOMAttributes::empty(),
        AttributeRemoval::All(false) => {}
        AttributeRemoval::Named(names) => {
            attributes.retain(|name, _| !names.iter().any(|n| n == name))
        }
    }
}

/// Drop paths that lie under another path. `paths` is in document order, so an
/// ancestor always comes before its descendants.
fn outermost(paths: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    let mut kept: Vec<Vec<usize>> = Vec::with_capacity(paths.len());
    for path in paths {
        if kept.last().map_or(false, |last| path.starts_with(last)) {
            continue;
        }
        kept.push(path);
    }
    kept
}

#[cfg(test)]
#[test]
fn test_outermost() {
    let paths = vec![vec![0], vec![0, 1], vec![0, 1, 2], vec![1], vec![2, 0], vec![2, 3]];
    assert_eq!(
        outermost(paths),
        vec![vec![0], vec![1], vec![2, 0], vec![2, 3]]
    );
}
