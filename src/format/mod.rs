//! Canonical, indentation based text for a normalized tree.
//!
//! The walk carries a [`Scope`]: indentation depth and the name of the nearest
//! enclosing element. That one tag alone decides how its direct children print.
//! Under a preserved tag, text stays verbatim and child nodes stay inline. Under
//! `script` or `style`, text skips entity handling. An element nested in a
//! preserved tag is laid out by its own name again.

use html::{is_svg_self_closing, DOMContent, DOMElement, Fragment, MAX_DEPTH};
use tracing::{span, Level};

use crate::error::{Error, Result};
use crate::settings::{FormattingConfig, VoidElements};

mod comment;
mod escape;
#[cfg(test)]
mod tests;

/// Elements whose text is printed without any entity handling
const RAW_TEXT: &[&str] = &["script", "style"];

#[derive(Clone, Copy)]
struct Scope<'t> {
    depth: usize,
    tag: Option<&'t str>,
}

struct Renderer<'c> {
    config: &'c FormattingConfig,
    out: String,
}

/// Render `tree` as diffable text
pub fn render(tree: &Fragment, config: &FormattingConfig) -> Result<String> {
    let span = span!(Level::DEBUG, "Rendering diffable text");
    let _enter = span.enter();
    let mut renderer = Renderer {
        config,
        out: String::new(),
    };
    let scope = Scope { depth: 0, tag: None };
    for node in &tree.contents {
        renderer.node(node, scope)?;
    }
    Ok(renderer.out.trim().to_string())
}

impl<'c> Renderer<'c> {
    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }

    /// Whether the nearest enclosing tag keeps its whitespace
    fn preserving(&self, scope: Scope) -> bool {
        scope.tag.is_some_and(|tag| self.preserves_whitespace(tag))
    }

    /// Start a node on its own line, unless whitespace is being preserved
    fn open_line(&mut self, scope: Scope) {
        if !self.preserving(scope) {
            self.newline(scope.depth);
        }
    }

    fn node<'t>(&mut self, node: &'t DOMContent, scope: Scope<'t>) -> Result<()> {
        match node {
            DOMContent::Element(e) => self.element(e, scope)?,
            DOMContent::Text(text) => self.text(text, scope),
            DOMContent::Comment(body) => {
                self.open_line(scope);
                comment::render(body, &mut self.out);
            }
            DOMContent::Doctype(body) => {
                self.open_line(scope);
                self.out.push_str("<!");
                self.out.push_str(body);
                self.out.push('>');
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str, scope: Scope) {
        let text = if self.preserving(scope) {
            text
        } else {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return;
            }
            self.newline(scope.depth);
            trimmed
        };
        let raw_text = scope
            .tag
            .is_some_and(|tag| RAW_TEXT.iter().any(|t| tag.eq_ignore_ascii_case(t)));
        if raw_text {
            self.out.push_str(text);
        } else {
            self.out
                .push_str(&escape::text(text, self.config.escape_inner_text));
        }
    }

    /// Whether an element has nothing to render between its tags
    fn is_empty(&self, element: &DOMElement) -> bool {
        if self.preserves_whitespace(&element.name) {
            return element.contents.is_empty();
        }
        element.contents.iter().all(|c| match c {
            DOMContent::Text(t) => t.trim().is_empty(),
            _ => false,
        })
    }

    fn preserves_whitespace(&self, name: &str) -> bool {
        self.config
            .tags_with_whitespace_preserved
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))
    }

    fn element<'t>(&mut self, element: &'t DOMElement, scope: Scope<'t>) -> Result<()> {
        if scope.depth > MAX_DEPTH {
            return Err(Error::DepthExceeded { limit: MAX_DEPTH });
        }
        let depth = scope.depth;
        self.open_line(scope);
        self.out.push('<');
        self.out.push_str(&element.name);

        let wrap = element.attributes.len() > self.config.attributes_per_line;
        for (name, value) in element.attributes.iter() {
            if wrap {
                self.newline(depth + 1);
                self.attribute(name, value, depth + 1);
            } else {
                self.out.push(' ');
                self.attribute(name, value, depth);
            }
        }
        if wrap {
            self.newline(depth);
        }
        // `<a />` when inline, `/>` alone on its line when wrapped
        let slash = if wrap { "/>" } else { " />" };

        if element.is_void() {
            match self.config.void_elements {
                VoidElements::Html => self.out.push('>'),
                VoidElements::Xhtml => self.out.push_str(slash),
                VoidElements::Xml => {
                    self.out.push('>');
                    self.close_tag(&element.name);
                }
            }
            return Ok(());
        }

        if self.is_empty(element) {
            if self.config.self_closing_tag || is_svg_self_closing(&element.name) {
                self.out.push_str(slash);
            } else {
                self.out.push('>');
                self.close_tag(&element.name);
            }
            return Ok(());
        }

        self.out.push('>');
        let inner = Scope {
            depth: depth + 1,
            tag: Some(element.name.as_str()),
        };
        for child in &element.contents {
            self.node(child, inner)?;
        }
        if !self.preserving(inner) {
            self.newline(depth);
        }
        self.close_tag(&element.name);
        Ok(())
    }

    fn close_tag(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    /// `name="value"`, with `class` tokens one per line past the threshold
    fn attribute(&mut self, name: &str, value: &str, depth: usize) {
        self.out.push_str(name);
        if name == "class" {
            let classes: Vec<&str> = value.split_whitespace().collect();
            if classes.len() > self.config.classes_per_line {
                self.out.push_str("=\"");
                for class in classes {
                    self.newline(depth + 1);
                    self.out
                        .push_str(&escape::attribute(class, self.config.escape_attributes));
                }
                self.newline(depth);
                self.out.push('"');
                return;
            }
            let joined = classes.join(" ");
            self.value(&joined);
        } else {
            self.value(value);
        }
    }

    fn value(&mut self, value: &str) {
        if value.is_empty() && !self.config.empty_attributes {
            return;
        }
        self.out.push_str("=\"");
        self.out
            .push_str(&escape::attribute(value, self.config.escape_attributes));
        self.out.push('"');
    }
}

/// Serialize `tree` back to markup with no reformatting: attributes double quoted,
/// void elements without a closing tag, everything else as it stands in the tree
pub fn serialize(tree: &Fragment) -> String {
    fn walk(contents: &[DOMContent], out: &mut String) {
        for node in contents {
            match node {
                DOMContent::Text(text) => out.push_str(text),
                DOMContent::Comment(body) => out.push_str(&format!("<!--{body}-->")),
                DOMContent::Doctype(body) => out.push_str(&format!("<!{body}>")),
                DOMContent::Element(e) => {
                    out.push('<');
                    out.push_str(&e.name);
                    for (name, value) in e.attributes.iter() {
                        out.push_str(&format!(" {name}=\"{}\"", value.replace('"', "&quot;")));
                    }
                    out.push('>');
                    if e.is_void() {
                        continue;
                    }
                    walk(&e.contents, out);
                    out.push_str(&format!("</{}>", e.name));
                }
            }
        }
    }
    let mut out = String::new();
    walk(&tree.contents, &mut out);
    out
}
