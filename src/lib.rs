//! Turns rendered component markup into stable, diffable text for snapshot tests.
//!
//! Markup is parsed with [`html::fragment`], normalized by the [`pipeline`] passes and
//! written out by [`format::render`].

mod error;
/// Rendering of a normalized tree as diffable text
pub mod format;
/// Runtime state of mounted components
pub mod live;
/// Normalization passes over a parsed tree
pub mod pipeline;
pub mod serializer;
pub mod settings;
/// Placeholder names for stubbed elements
pub mod stub;

pub use error::{Error, Result};
pub use live::{stringify, BoundValue, ComponentWrapper, LiveValues, Markup};
pub use serializer::{format_markup, print, print_with, test, Printable};
pub use settings::{
    Formatting, FormattingConfig, Settings, StubSpec, TransformConfig, VoidElements,
};
pub use stub::resolve_stub_tag_name;
