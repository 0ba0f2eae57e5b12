use html::{DOMContent, DOMElement, Fragment};
use tracing::{span, Level};

use super::*;

/// An element together with where it sits in its tree
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub element: &'a DOMElement,
    siblings: &'a [DOMContent],
    index: usize,
    parent: Option<&'a ElementRef<'a>>,
}

/// Paths (child indices from the fragment root) of every element matched by any of
/// `selectors`, in document order
pub fn select(fragment: &Fragment, selectors: &[Selector]) -> Vec<Vec<usize>> {
    let span = span!(Level::DEBUG, "Selecting", selectors = selectors.len());
    let _enter = span.enter();
    let mut found = Vec::new();
    let mut path = Vec::new();
    collect(&fragment.contents, None, selectors, &mut path, &mut found);
    found
}

fn collect<'a>(
    siblings: &'a [DOMContent],
    parent: Option<&'a ElementRef<'a>>,
    selectors: &[Selector],
    path: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    for (index, content) in siblings.iter().enumerate() {
        let DOMContent::Element(element) = content else {
            continue;
        };
        let element = ElementRef {
            element,
            siblings,
            index,
            parent,
        };
        path.push(index);
        if selectors.iter().any(|s| element.matches(s)) {
            found.push(path.clone());
        }
        collect(&element.element.contents, Some(&element), selectors, path, found);
        path.pop();
    }
}

impl<'a> ElementRef<'a> {
    /// Check if the provided [`Selector`] selects this element
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Simple(s) => self.matches_simple(s),
            Selector::Compound(sels) => sels.iter().all(|s| self.matches_simple(s)),
            Selector::Combinator(left, combinator, right) => {
                self.matches(right) && self.related_matches(*combinator, left)
            }
        }
    }

    fn related_matches(&self, combinator: Combinator, left: &Selector) -> bool {
        match combinator {
            Combinator::Descendant => self.ancestors().any(|a| a.matches(left)),
            Combinator::Child => self.parent.map_or(false, |p| p.matches(left)),
            Combinator::NextSibling => self
                .preceding_siblings()
                .next()
                .map_or(false, |s| s.matches(left)),
            Combinator::SubsequentSibling => self.preceding_siblings().any(|s| s.matches(left)),
        }
    }

    fn ancestors(&self) -> impl Iterator<Item = &'a ElementRef<'a>> {
        std::iter::successors(self.parent, |p| p.parent)
    }

    /// Element siblings before this one, nearest first
    fn preceding_siblings(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.siblings
            .iter()
            .enumerate()
            .take(self.index)
            .rev()
            .filter_map(move |(index, c)| self.sibling(index, c))
    }

    /// Element siblings after this one, nearest first
    fn following_siblings(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.siblings
            .iter()
            .enumerate()
            .skip(self.index + 1)
            .filter_map(move |(index, c)| self.sibling(index, c))
    }

    fn sibling(&self, index: usize, content: &'a DOMContent) -> Option<ElementRef<'a>> {
        content.as_element().map(|element| ElementRef {
            element,
            siblings: self.siblings,
            index,
            parent: self.parent,
        })
    }

    fn same_type(&self, other: &ElementRef) -> bool {
        other.element.name.eq_ignore_ascii_case(&self.element.name)
    }

    /// Check if the provided [`SimpleSelector`] selects this element
    fn matches_simple(&self, selector: &SimpleSelector) -> bool {
        match selector {
            SimpleSelector::Type(name) => self.element.name.eq_ignore_ascii_case(name),
            SimpleSelector::Universal => true,
            SimpleSelector::Attribute(attribute) => self.matches_attribute(attribute),
            SimpleSelector::Class(name) => self.has_class(name),
            SimpleSelector::PseudoClass(pseudo) => self.matches_pseudo_class(pseudo),
            SimpleSelector::ID(id) => self.id_is(id),
        }
    }

    /// Check if the `class` attribute is present and contains the specified class
    fn has_class(&self, class: &str) -> bool {
        self.element.classes().any(|c| c == class)
    }

    /// Check if the `id` attribute exists and is an exact match for the provided ID
    fn id_is(&self, id: &str) -> bool {
        self.element.get_attribute("id") == Some(id)
    }

    fn matches_attribute(&self, selector: &AttributeSelector) -> bool {
        let Some(actual) = self.element.get_attribute(selector.name) else {
            return false;
        };
        let Some((operator, expected)) = selector.operator else {
            return true;
        };
        match operator {
            AttributeOperator::Equals => actual == expected,
            AttributeOperator::Includes => actual.split_whitespace().any(|t| t == expected),
            AttributeOperator::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .map_or(false, |rest| rest.starts_with('-'))
            }
            AttributeOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttributeOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttributeOperator::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }

    fn matches_pseudo_class(&self, pseudo: &PseudoClass) -> bool {
        // One-based positions among element siblings
        let position = || self.preceding_siblings().count() + 1;
        let position_from_end = || self.following_siblings().count() + 1;
        let type_position = || {
            self.preceding_siblings()
                .filter(|s| self.same_type(s))
                .count()
                + 1
        };
        let type_position_from_end = || {
            self.following_siblings()
                .filter(|s| self.same_type(s))
                .count()
                + 1
        };
        match pseudo {
            PseudoClass::FirstChild => position() == 1,
            PseudoClass::LastChild => position_from_end() == 1,
            PseudoClass::OnlyChild => position() == 1 && position_from_end() == 1,
            PseudoClass::FirstOfType => type_position() == 1,
            PseudoClass::LastOfType => type_position_from_end() == 1,
            PseudoClass::OnlyOfType => type_position() == 1 && type_position_from_end() == 1,
            PseudoClass::Empty => self.element.contents.iter().all(|c| match c {
                DOMContent::Element(_) => false,
                DOMContent::Text(t) => t.is_empty(),
                DOMContent::Comment(_) | DOMContent::Doctype(_) => true,
            }),
            PseudoClass::NthChild(nth) => nth.matches(position()),
            PseudoClass::NthLastChild(nth) => nth.matches(position_from_end()),
            PseudoClass::NthOfType(nth) => nth.matches(type_position()),
            PseudoClass::NthLastOfType(nth) => nth.matches(type_position_from_end()),
            PseudoClass::Not(sels) => !sels.iter().all(|s| self.matches_simple(s)),
        }
    }
}
