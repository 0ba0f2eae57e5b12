mod parsing;
mod tags;
#[cfg(test)]
mod tests;

pub use parsing::{fragment, ParseError, MAX_DEPTH};
pub use tags::*;

/// One-based byte offsets of an element in the markup it was parsed from.
/// `end` points at the last byte the element covers: the `>` of its end tag, or the
/// byte before whatever closed it implicitly.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DOMContent {
    Element(DOMElement),
    Text(String),
    Comment(String),
    /// Everything between `<!` and `>`, e.g. `DOCTYPE html`
    Doctype(String),
}

#[derive(Debug, Clone, Eq)]
pub struct DOMElement {
    pub name: String,
    pub attributes: DOMAttributes,
    pub contents: Vec<DOMContent>,
    pub span: Option<Span>,
}

/// Spans are location metadata and take no part in structural equality
impl PartialEq for DOMElement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.contents == other.contents
    }
}

/// Attributes in authored order. Names are unique within one element.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DOMAttributes(pub Vec<(String, String)>);

/// A markup tree with no single enclosing root
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Fragment {
    pub contents: Vec<DOMContent>,
}

#[macro_export]
macro_rules! attributes {
    ($($k:expr => $v:expr),* $(,)?) => {
        $crate::DOMAttributes(vec![$(($k.to_string(), $v.to_string())),*])
    };
}

impl DOMAttributes {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    /// Replace the value of `name` in place, or append it if absent
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.0.retain(|(k, v)| keep(k, v));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.0.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Names are unique, so a stable sort gives a total order
    pub fn sort_by_name(&mut self) {
        self.0.sort_by(|(a, _), (b, _)| a.cmp(b));
    }
}

impl FromIterator<(String, String)> for DOMAttributes {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut attributes = Self::empty();
        for (k, v) in iter {
            if !attributes.contains(&k) {
                attributes.0.push((k, v));
            }
        }
        attributes
    }
}

impl DOMElement {
    pub fn new(
        name: impl Into<String>,
        attributes: Option<DOMAttributes>,
        contents: Vec<DOMContent>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.unwrap_or_default(),
            contents,
            span: None,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Space separated tokens of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .unwrap_or_default()
            .split_whitespace()
    }

    pub fn is_void(&self) -> bool {
        is_void(&self.name)
    }
}

impl DOMContent {
    pub fn as_element(&self) -> Option<&DOMElement> {
        match self {
            DOMContent::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut DOMElement> {
        match self {
            DOMContent::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DOMElement> for DOMContent {
    fn from(e: DOMElement) -> Self {
        DOMContent::Element(e)
    }
}

impl From<&str> for DOMContent {
    fn from(s: &str) -> Self {
        DOMContent::Text(s.to_string())
    }
}

impl Fragment {
    pub fn new(contents: Vec<DOMContent>) -> Self {
        Self { contents }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Every element in document (pre-)order
    pub fn elements(&self) -> Vec<&DOMElement> {
        fn collect<'a>(contents: &'a [DOMContent], out: &mut Vec<&'a DOMElement>) {
            for element in contents.iter().filter_map(DOMContent::as_element) {
                out.push(element);
                collect(&element.contents, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.contents, &mut out);
        out
    }

    /// Visit every element in document (pre-)order. The visitor runs on a parent
    /// before any of its children.
    pub fn for_each_element_mut(&mut self, visit: &mut impl FnMut(&mut DOMElement)) {
        fn walk(contents: &mut [DOMContent], visit: &mut impl FnMut(&mut DOMElement)) {
            for element in contents.iter_mut().filter_map(DOMContent::as_element_mut) {
                visit(element);
                walk(&mut element.contents, visit);
            }
        }
        walk(&mut self.contents, visit);
    }

    /// Drop every node for which `keep` returns false, at any depth
    pub fn retain_nodes(&mut self, keep: &mut impl FnMut(&DOMContent) -> bool) {
        fn walk(contents: &mut Vec<DOMContent>, keep: &mut impl FnMut(&DOMContent) -> bool) {
            contents.retain(|c| keep(c));
            for element in contents.iter_mut().filter_map(DOMContent::as_element_mut) {
                walk(&mut element.contents, keep);
            }
        }
        walk(&mut self.contents, keep);
    }

    /// Follow a path of child indices from the root
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut DOMContent> {
        let (first, rest) = path.split_first()?;
        let mut node = self.contents.get_mut(*first)?;
        for index in rest {
            node = match node {
                DOMContent::Element(e) => e.contents.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(node)
    }
}
