//! Entry points for a snapshot harness

use std::borrow::Cow;

use tracing::{span, warn, Level};

use crate::error::Result;
use crate::format;
use crate::live::{ComponentWrapper, LiveValues};
use crate::pipeline::{self, Context};
use crate::settings::{self, Formatting, Settings};

/// A value a snapshot can be taken of
#[derive(Clone, Copy)]
pub enum Printable<'a> {
    Markup(&'a str),
    Wrapper(&'a dyn ComponentWrapper),
}

/// Whether `value` is something [`print`] knows how to format
pub fn test(value: &Printable) -> bool {
    match value {
        Printable::Markup(markup) => markup.trim_start().starts_with('<'),
        Printable::Wrapper(_) => true,
    }
}

/// Snapshot text for `value`, using the process-wide settings
pub fn print(value: &Printable) -> Result<String> {
    print_with(value, &settings::snapshot())
}

pub fn print_with(value: &Printable, settings: &Settings) -> Result<String> {
    let (markup, live) = match value {
        Printable::Markup(markup) => (Cow::Borrowed(*markup), None),
        Printable::Wrapper(wrapper) => (Cow::Owned(wrapper.html()), wrapper.live_values()),
    };
    format_with_live(&markup, live, settings)
}

/// Snapshot text for a markup string
pub fn format_markup(markup: &str, settings: &Settings) -> Result<String> {
    format_with_live(markup, None, settings)
}

fn format_with_live(
    markup: &str,
    live: Option<&dyn LiveValues>,
    settings: &Settings,
) -> Result<String> {
    let span = span!(Level::DEBUG, "Formatting snapshot", bytes = markup.len());
    let _enter = span.enter();
    let mut tree = html::fragment(markup)?;
    let context = Context {
        config: &settings.transform,
        live,
        verbose: settings.verbose,
    };
    pipeline::transform(&mut tree, &context);
    match &settings.formatting {
        Formatting::None => Ok(format::serialize(&tree)),
        Formatting::Diffable(config) => format::render(&tree, config),
        Formatting::Custom(formatter) => match formatter(&format::serialize(&tree)) {
            Some(formatted) => Ok(formatted),
            None => {
                if settings.verbose {
                    warn!("Custom formatter returned nothing, using the unformatted markup");
                }
                Ok(markup.to_string())
            }
        },
    }
}
