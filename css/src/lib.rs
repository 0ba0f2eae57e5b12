//! CSS selectors: parsing and matching against [`html`] trees

#[derive(PartialEq, Clone, Debug)]
pub enum Selector<'a> {
    Simple(SimpleSelector<'a>),
    Compound(Vec<SimpleSelector<'a>>),
    Combinator(Box<Selector<'a>>, Combinator, Box<Selector<'a>>),
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Combinator {
    // ( )
    Descendant,
    // (>)
    Child,
    // (+)
    NextSibling,
    // (~)
    SubsequentSibling,
}

#[derive(PartialEq, Clone, Debug)]
pub enum SimpleSelector<'a> {
    Type(&'a str),
    Universal,
    Attribute(AttributeSelector<'a>),
    Class(&'a str),
    PseudoClass(PseudoClass<'a>),
    ID(&'a str),
}

#[derive(PartialEq, Clone, Debug)]
pub struct AttributeSelector<'a> {
    pub name: &'a str,
    pub operator: Option<(AttributeOperator, &'a str)>,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum AttributeOperator {
    // [att=val]
    Equals,
    // [att~=val]
    Includes,
    // [att|=val]
    // `att` is val or begins with val-
    DashMatch,
    // [att^=val]
    Prefix,
    // [att$=val]
    Suffix,
    // [att*=val]
    Substring,
}

#[derive(PartialEq, Clone, Debug)]
pub enum PseudoClass<'a> {
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    Empty,
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    Not(Vec<SimpleSelector<'a>>),
}

/// `An+B`: matches the one-based positions `a*n + b` for some `n >= 0`
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Nth {
    pub a: i32,
    pub b: i32,
}

impl Nth {
    pub const ODD: Nth = Nth { a: 2, b: 1 };
    pub const EVEN: Nth = Nth { a: 2, b: 0 };

    pub fn matches(self, position: usize) -> bool {
        // Widened so that no `a` or `b` the parser accepts can overflow
        let Some(offset) = i64::try_from(position)
            .ok()
            .and_then(|p| p.checked_sub(i64::from(self.b)))
        else {
            return false;
        };
        let a = i64::from(self.a);
        if a == 0 {
            offset == 0
        } else {
            offset % a == 0 && offset / a >= 0
        }
    }
}

#[macro_export]
macro_rules! simple_selector {
    (#$x:expr) => {
        SimpleSelector::ID(stringify!($x))
    };
    (.$x:expr) => {
        SimpleSelector::Class(stringify!($x))
    };
    (*) => {
        SimpleSelector::Universal
    };
    ($x:expr) => {
        SimpleSelector::Type(stringify!($x))
    };
}

#[macro_export]
macro_rules! compound_selector {
    ($($sel:expr),*) => {Selector::Compound(vec![$($sel),*])}
}

#[macro_export]
macro_rules! combinator_selector {
    ($l:expr,$c:expr,$r:expr) => {
        Selector::Combinator($l.into(), $c, $r.into())
    };
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{selector}` at byte {offset}")]
pub struct SelectorError {
    pub selector: String,
    pub offset: usize,
}

mod matching;
mod parsing;

pub use matching::{select, ElementRef};
pub use parsing::selector_list;
