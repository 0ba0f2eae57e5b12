use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, tag_no_case, take_till, take_till1, take_while1};
use nom::character::complete::{char, multispace0, multispace1, one_of};
use nom::combinator::{all_consuming, map, map_opt, opt, value, verify};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

use super::*;

/// Parse a comma separated selector list. The whole input must be consumed.
pub fn selector_list(input: &str) -> Result<Vec<Selector>, SelectorError> {
    let list = separated_list1(tuple((multispace0, char(','), multispace0)), selector);
    all_consuming(delimited(multispace0, list, multispace0))(input)
        .map(|(_, selectors)| selectors)
        .map_err(|e| {
            let offset = match e {
                nom::Err::Error(e) | nom::Err::Failure(e) => input.len() - e.input.len(),
                nom::Err::Incomplete(_) => input.len(),
            };
            SelectorError {
                selector: input.to_string(),
                offset,
            }
        })
}

/// Compound selectors joined by combinators, grouped to the left
fn selector(input: &str) -> IResult<&str, Selector> {
    let (input, first) = compound(input)?;
    let (input, rest) = many0(pair(combinator, compound))(input)?;
    let selector = rest.into_iter().fold(first, |left, (c, right)| {
        Selector::Combinator(Box::new(left), c, Box::new(right))
    });
    Ok((input, selector))
}

fn combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        delimited(
            multispace0,
            map(one_of(">+~"), |c| match c {
                '>' => Combinator::Child,
                '+' => Combinator::NextSibling,
                _ => Combinator::SubsequentSibling,
            }),
            multispace0,
        ),
        value(Combinator::Descendant, multispace1),
    ))(input)
}

fn compound(input: &str) -> IResult<&str, Selector> {
    let (input, mut simple) = many1(simple_selector)(input)?;
    let selector = if simple.len() == 1 {
        Selector::Simple(simple.remove(0))
    } else {
        Selector::Compound(simple)
    };
    Ok((input, selector))
}

fn simple_selector(input: &str) -> IResult<&str, SimpleSelector> {
    alt((
        value(SimpleSelector::Universal, char('*')),
        map(preceded(char('#'), identifier), SimpleSelector::ID),
        map(preceded(char('.'), identifier), SimpleSelector::Class),
        map(attribute, SimpleSelector::Attribute),
        map(preceded(char(':'), pseudo_class), SimpleSelector::PseudoClass),
        map(identifier, SimpleSelector::Type),
    ))(input)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn identifier(input: &str) -> IResult<&str, &str> {
    verify(take_while1(is_identifier_char), |s: &str| {
        !s.starts_with(|c: char| c.is_ascii_digit()) && !s.starts_with("--")
    })(input)
}

/// `[name]`, `[name=value]`, `[name~="value"]`, ...
fn attribute(input: &str) -> IResult<&str, AttributeSelector> {
    let name = take_till1(|c: char| c.is_whitespace() || "=~|^$*]".contains(c));
    let operator = alt((
        value(AttributeOperator::Equals, char('=')),
        value(AttributeOperator::Includes, tag("~=")),
        value(AttributeOperator::DashMatch, tag("|=")),
        value(AttributeOperator::Prefix, tag("^=")),
        value(AttributeOperator::Suffix, tag("$=")),
        value(AttributeOperator::Substring, tag("*=")),
    ));
    let (input, (name, operator)) = delimited(
        terminated(char('['), multispace0),
        pair(
            name,
            opt(preceded(
                multispace0,
                pair(operator, preceded(multispace0, attribute_value)),
            )),
        ),
        preceded(multispace0, char(']')),
    )(input)?;
    Ok((input, AttributeSelector { name, operator }))
}

fn attribute_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
        is_not(" \t\r\n]"),
    ))(input)
}

fn pseudo_class(input: &str) -> IResult<&str, PseudoClass> {
    alt((
        map(functional("nth-child", nth), PseudoClass::NthChild),
        map(functional("nth-last-child", nth), PseudoClass::NthLastChild),
        map(functional("nth-of-type", nth), PseudoClass::NthOfType),
        map(functional("nth-last-of-type", nth), PseudoClass::NthLastOfType),
        map(functional("not", many1(simple_selector)), PseudoClass::Not),
        value(PseudoClass::FirstChild, tag_no_case("first-child")),
        value(PseudoClass::LastChild, tag_no_case("last-child")),
        value(PseudoClass::OnlyChild, tag_no_case("only-child")),
        value(PseudoClass::FirstOfType, tag_no_case("first-of-type")),
        value(PseudoClass::LastOfType, tag_no_case("last-of-type")),
        value(PseudoClass::OnlyOfType, tag_no_case("only-of-type")),
        value(PseudoClass::Empty, tag_no_case("empty")),
    ))(input)
}

/// `name(` argument `)`
fn functional<'a, O>(
    name: &'static str,
    argument: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(
        tuple((tag_no_case(name), char('('), multispace0)),
        argument,
        tuple((multispace0, char(')'))),
    )
}

fn nth(input: &str) -> IResult<&str, Nth> {
    map_opt(take_till1(|c| c == ')'), parse_nth)(input)
}

/// `odd`, `even`, `3`, `n`, `-n+3`, `2n + 1`
fn parse_nth(input: &str) -> Option<Nth> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.to_ascii_lowercase();
    match compact.as_str() {
        "odd" => return Some(Nth::ODD),
        "even" => return Some(Nth::EVEN),
        _ => {}
    }
    let Some((a, b)) = compact.split_once('n') else {
        return Some(Nth {
            a: 0,
            b: compact.parse().ok()?,
        });
    };
    let a = match a {
        "" | "+" => 1,
        "-" => -1,
        a => a.parse().ok()?,
    };
    let b = match b {
        "" => 0,
        b => b.strip_prefix('+').unwrap_or(b).parse().ok()?,
    };
    Some(Nth { a, b })
}

#[cfg(test)]
#[test]
fn test_parse_nth() {
    assert_eq!(parse_nth("odd"), Some(Nth::ODD));
    assert_eq!(parse_nth(" EVEN "), Some(Nth::EVEN));
    assert_eq!(parse_nth("3"), Some(Nth { a: 0, b: 3 }));
    assert_eq!(parse_nth("n"), Some(Nth { a: 1, b: 0 }));
    assert_eq!(parse_nth("-n+3"), Some(Nth { a: -1, b: 3 }));
    assert_eq!(parse_nth("2n + 1"), Some(Nth { a: 2, b: 1 }));
    assert_eq!(parse_nth("3n-2"), Some(Nth { a: 3, b: -2 }));
    assert_eq!(parse_nth("x"), None);
}

#[cfg(test)]
#[test]
fn test_parse_ident() {
    assert!(identifier("test").is_ok());
    assert!(identifier("_test").is_ok());
    assert!(identifier("--test").is_err());
    assert!(identifier("1test").is_err());
}

#[cfg(test)]
#[test]
fn test_parse_attribute() {
    assert_eq!(
        attribute("[data-test]").unwrap(),
        (
            "",
            AttributeSelector {
                name: "data-test",
                operator: None
            }
        )
    );
    assert_eq!(
        attribute(r#"[ type = "text" ]"#).unwrap(),
        (
            "",
            AttributeSelector {
                name: "type",
                operator: Some((AttributeOperator::Equals, "text"))
            }
        )
    );
    assert_eq!(
        attribute("[lang|=en]").unwrap(),
        (
            "",
            AttributeSelector {
                name: "lang",
                operator: Some((AttributeOperator::DashMatch, "en"))
            }
        )
    );
}
