use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till, take_till1, take_until, take_while},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{map, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use tracing::{debug, span, Level};

use super::*;

/// Deepest element nesting accepted before parsing fails
pub const MAX_DEPTH: usize = 512;

/// Offsets are one-based byte positions in the input
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated {construct} starting at byte {offset}")]
    Unterminated { construct: &'static str, offset: usize },
    #[error("malformed tag at byte {offset}")]
    MalformedTag { offset: usize },
    #[error("elements nested deeper than {limit} levels at byte {offset}")]
    TooDeep { limit: usize, offset: usize },
}

#[derive(Debug, Eq, PartialEq)]
enum Token<'a> {
    Open(OpenTag<'a>),
    Close(&'a str),
    Text(&'a str),
    Comment(&'a str),
    Doctype(&'a str),
}

#[derive(Debug, Eq, PartialEq)]
struct OpenTag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
    self_closing: bool,
}

/// A token with the zero-based byte range it was read from
struct Located<'a> {
    start: usize,
    end: usize,
    token: Token<'a>,
}

/// Parse a markup string into a [`Fragment`], keeping attribute order, attribute name
/// case and raw (undecoded) entities. Elements stay where they were authored: no
/// HTML5 tree-construction relocation is performed.
pub fn fragment(input: &str) -> Result<Fragment, ParseError> {
    let span = span!(Level::DEBUG, "Parsing fragment", bytes = input.len());
    let _enter = span.enter();
    let mut builder = TreeBuilder::default();
    for Located { start, end, token } in tokenize(input)? {
        match token {
            Token::Open(open) => builder.start_element(open, start, end)?,
            Token::Close(name) => builder.end_element(name, start, end),
            Token::Text(text) => builder.append(DOMContent::Text(text.to_string())),
            Token::Comment(body) => builder.append(DOMContent::Comment(body.to_string())),
            Token::Doctype(body) => builder.append(DOMContent::Doctype(body.to_string())),
        }
    }
    Ok(builder.finish(input.len()))
}

fn tokenize(input: &str) -> Result<Vec<Located>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        let start = input.len() - rest.len();
        let (remaining, token) = next_token(rest, start)?;
        let end = input.len() - remaining.len();
        let raw_text = match &token {
            Token::Open(open) if !open.self_closing && is_raw_text(open.name) => Some(open.name),
            _ => None,
        };
        tokens.push(Located { start, end, token });
        rest = remaining;
        if let Some(name) = raw_text {
            let len = raw_text_len(rest, name);
            if len > 0 {
                tokens.push(Located {
                    start: end,
                    end: end + len,
                    token: Token::Text(&rest[..len]),
                });
            }
            rest = &rest[len..];
        }
    }
    Ok(tokens)
}

fn next_token(input: &str, offset: usize) -> Result<(&str, Token), ParseError> {
    if input.starts_with("<!--") {
        return parse_comment(input).map_err(|_| ParseError::Unterminated {
            construct: "comment",
            offset: offset + 1,
        });
    }
    if let Ok(res) = alt((
        parse_declaration,
        map(parse_close_tag, Token::Close),
        map(parse_open_tag, Token::Open),
        parse_text,
    ))(input)
    {
        return Ok(res);
    }
    // Every parser above failed, so the input starts with `<`
    let after = &input[1..];
    let starts_tag = after.starts_with(|c: char| c.is_ascii_alphabetic() || c == '!')
        || after
            .strip_prefix('/')
            .map_or(false, |s| s.starts_with(|c: char| c.is_ascii_alphabetic()));
    if starts_tag {
        return Err(if input.contains('>') {
            ParseError::MalformedTag { offset: offset + 1 }
        } else {
            ParseError::Unterminated {
                construct: "tag",
                offset: offset + 1,
            }
        });
    }
    // A lone `<` is text
    let len = 1 + after.find('<').unwrap_or(after.len());
    Ok((&input[len..], Token::Text(&input[..len])))
}

/// Length of raw text content up to the end tag for `name`, ASCII case-insensitive
fn raw_text_len(input: &str, name: &str) -> usize {
    let closing = format!("</{}", name.to_ascii_lowercase());
    input
        .to_ascii_lowercase()
        .find(&closing)
        .unwrap_or(input.len())
}

/// Attempt to parse a string as a valid tag name
fn parse_tag_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')),
    ))(input)
}

fn parse_comment(input: &str) -> IResult<&str, Token> {
    map(
        delimited(tag("<!--"), take_until("-->"), tag("-->")),
        Token::Comment,
    )(input)
}

/// `<!DOCTYPE ...>`. Any other `<!...>` declaration is a bogus comment, as browsers treat it.
fn parse_declaration(input: &str) -> IResult<&str, Token> {
    let (remaining, body) = delimited(tag("<!"), take_till(|c| c == '>'), char('>'))(input)?;
    let is_doctype = body
        .get(..7)
        .map_or(false, |s| s.eq_ignore_ascii_case("doctype"));
    let token = if is_doctype {
        Token::Doctype(body)
    } else {
        Token::Comment(body)
    };
    Ok((remaining, token))
}

/// Parse a tag in the form `</name>`, returning `name`
fn parse_close_tag(input: &str) -> IResult<&str, &str> {
    let (remaining, (_, name, _, _)) = tuple((
        tag("</"),
        parse_tag_name,
        take_till(|c| c == '>'),
        char('>'),
    ))(input)?;
    Ok((remaining, name))
}

/// Parse a tag in the form `<name attr=value ...>` or `<name ... />`
fn parse_open_tag(input: &str) -> IResult<&str, OpenTag> {
    let (remaining, (_, name, attributes, _, slash, _)) = tuple((
        char('<'),
        parse_tag_name,
        many0(preceded(multispace1, single_attr_parser)),
        multispace0,
        opt(char('/')),
        char('>'),
    ))(input)?;
    Ok((
        remaining,
        OpenTag {
            name,
            attributes,
            self_closing: slash.is_some(),
        },
    ))
}

/// Parse the text up to the next `<`
fn parse_text(input: &str) -> IResult<&str, Token> {
    map(take_till1(|c| c == '<'), Token::Text)(input)
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<DOMContent>,
    open: Vec<DOMElement>,
}

impl TreeBuilder {
    fn append(&mut self, content: DOMContent) {
        let contents = match self.open.last_mut() {
            Some(parent) => &mut parent.contents,
            None => &mut self.root,
        };
        if let (Some(DOMContent::Text(previous)), DOMContent::Text(text)) =
            (contents.last_mut(), &content)
        {
            previous.push_str(text);
            return;
        }
        contents.push(content);
    }

    /// Whether `/>` should be honoured for an element named `name` opened here
    fn allows_self_closing(&self, name: &str) -> bool {
        let foreign = |n: &str| n.eq_ignore_ascii_case("svg") || n.eq_ignore_ascii_case("math");
        foreign(name) || is_svg_self_closing(name) || self.open.iter().any(|e| foreign(e.name.as_str()))
    }

    fn start_element(&mut self, open: OpenTag, start: usize, end: usize) -> Result<(), ParseError> {
        while self
            .open
            .last()
            .map_or(false, |top| implicitly_closed_by(&top.name, open.name))
        {
            self.close_top(start);
        }
        let attributes = open
            .attributes
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut element = DOMElement::new(canonical_tag_name(open.name), Some(attributes), vec![]);
        element.span = Some(Span {
            start: start + 1,
            end,
        });
        if element.is_void() || (open.self_closing && self.allows_self_closing(open.name)) {
            self.append(element.into());
            return Ok(());
        }
        if self.open.len() >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                offset: start + 1,
            });
        }
        self.open.push(element);
        Ok(())
    }

    fn end_element(&mut self, name: &str, start: usize, end: usize) {
        match self
            .open
            .iter()
            .rposition(|e| e.name.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                while self.open.len() > index + 1 {
                    self.close_top(start);
                }
                self.close_top(end);
            }
            None => debug!(name, offset = start + 1, "Dropping unmatched end tag"),
        }
    }

    fn close_top(&mut self, end: usize) {
        if let Some(mut element) = self.open.pop() {
            if let Some(span) = element.span.as_mut() {
                span.end = end;
            }
            self.append(element.into());
        }
    }

    fn finish(mut self, end: usize) -> Fragment {
        while !self.open.is_empty() {
            self.close_top(end);
        }
        Fragment::new(self.root)
    }
}

#[cfg(test)]
#[test]
fn test_tag_parse() {
    let data = r#"<div>"#;
    let target = OpenTag {
        name: "div",
        attributes: vec![],
        self_closing: false,
    };
    assert_eq!(parse_open_tag(data).unwrap(), ("", target));

    let data = r#"<div class=nothing>"#;
    let target = OpenTag {
        name: "div",
        attributes: vec![("class", "nothing")],
        self_closing: false,
    };
    assert_eq!(parse_open_tag(data).unwrap(), ("", target));

    let data = r#"<div attr1 attr2=two attr3='three' attr4="number four">"#;
    let target = OpenTag {
        name: "div",
        attributes: vec![
            ("attr1", ""),
            ("attr2", "two"),
            ("attr3", "three"),
            ("attr4", "number four"),
        ],
        self_closing: false,
    };
    assert_eq!(parse_open_tag(data).unwrap(), ("", target));

    let data = "<path\n  d=\"M0 0\"\n  :fill=\"color\"\n/>";
    let target = OpenTag {
        name: "path",
        attributes: vec![("d", "M0 0"), (":fill", "color")],
        self_closing: true,
    };
    assert_eq!(parse_open_tag(data).unwrap(), ("", target));
}

#[cfg(test)]
#[test]
fn test_close_tag_parse() {
    assert_eq!(parse_close_tag("</div>").unwrap(), ("", "div"));
    assert_eq!(parse_close_tag("</div >rest").unwrap(), ("rest", "div"));
    assert!(parse_close_tag("</>").is_err());
}

#[cfg(test)]
#[test]
fn test_declaration_parse() {
    assert_eq!(
        parse_declaration("<!DOCTYPE html>").unwrap(),
        ("", Token::Doctype("DOCTYPE html"))
    );
    assert_eq!(
        parse_declaration("<![CDATA[x]]>").unwrap(),
        ("", Token::Comment("[CDATA[x]]"))
    );
}

// Attribute parsing below

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_till(|c| c == '\''), char('\''))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"'))(input)
}

fn parse_unquoted(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\x0c\"'=<>`")(input)
}

fn value_parser(input: &str) -> IResult<&str, &str> {
    alt((parse_double_quoted, parse_single_quoted, parse_unquoted))(input)
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\x0c\"'>/=")(input)
}

fn single_attr_parser(input: &str) -> IResult<&str, (&str, &str)> {
    let (r, (name, value)) = pair(
        name_parser,
        opt(preceded(
            tuple((multispace0, char('='), multispace0)),
            value_parser,
        )),
    )(input)?;
    Ok((r, (name, value.unwrap_or(""))))
}

#[cfg(test)]
#[test]
fn test_attr_parse() {
    assert_eq!(single_attr_parser("disabled").unwrap(), ("", ("disabled", "")));
    assert_eq!(
        single_attr_parser(r#"viewBox = "0 0 10 10""#).unwrap(),
        ("", ("viewBox", "0 0 10 10"))
    );
    assert_eq!(
        single_attr_parser(r#"title="a &amp; b""#).unwrap(),
        ("", ("title", "a &amp; b"))
    );
    assert_eq!(single_attr_parser(r#"class="""#).unwrap(), ("", ("class", "")));
}
