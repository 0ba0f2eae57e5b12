//! Ordered passes that normalize a parsed tree before it is formatted.
//!
//! Passes run in a fixed order and each one checks its own switch in
//! [`TransformConfig`]. None of them fail: configuration they cannot use is
//! reported as a warning and skipped.

use std::fmt::Display;

use html::Fragment;
use tracing::{debug, span, warn, Level};

use crate::live::LiveValues;
use crate::settings::TransformConfig;

mod attributes;
mod bindings;
mod stubs;
mod tokens;

/// What every pass gets to look at
pub struct Context<'a> {
    pub config: &'a TransformConfig,
    pub live: Option<&'a dyn LiveValues>,
    pub verbose: bool,
}

impl Context<'_> {
    fn warn(&self, message: impl Display) {
        if self.verbose {
            warn!("{message}");
        }
    }
}

type Pass = fn(&mut Fragment, &Context);

static PASSES: &[(&str, Pass)] = &[
    ("removeServerRendered", tokens::remove_server_rendered),
    ("removeTestTokens", tokens::remove_test_tokens),
    ("removeScopedStyleIds", tokens::remove_scoped_style_ids),
    ("clearAttributes", attributes::clear_attributes),
    ("clearInlineFunctions", attributes::clear_inline_functions),
    ("stringifyAttributes", bindings::stringify_attributes),
    ("addInputValues", bindings::add_input_values),
    ("stubComponents", stubs::stub_components),
    ("removeComments", tokens::remove_comments),
    ("sortAttributes", attributes::sort_attributes),
    ("sortClasses", attributes::sort_classes),
];

/// Run every pass over `tree`, in order
pub fn transform(tree: &mut Fragment, context: &Context) {
    for (name, pass) in PASSES {
        let span = span!(Level::DEBUG, "pass", name);
        let _enter = span.enter();
        debug!("Running {name}");
        pass(tree, context);
    }
}
