//! Lenient HTML fragment parser.
//!
//! Tokenizing is done with `nom`; a small stack machine then builds the tree,
//! applying the few recovery rules hand-authored list markup needs.

use super::{Element, Node, ParseError, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{map, not, opt, recognize, value},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult, Parser,
};
use once_cell::sync::Lazy;
use std::collections::HashSet;

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ]
    .into_iter()
    .collect()
});

/// Reports whether `tag` is an element that never has children or an end tag.
pub(super) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(tag)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    End(String),
    Text(String),
    Ignored,
}

fn tag_name(input: &str) -> IResult<&str, String> {
    map(
        recognize((
            satisfy(|c| c.is_ascii_alphabetic()),
            take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')),
        )),
        |s: &str| s.to_ascii_lowercase(),
    )
    .parse(input)
}

fn attr_name(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| !c.is_whitespace() && !matches!(c, '/' | '>' | '<' | '=' | '"' | '\'')),
        |s: &str| s.to_ascii_lowercase(),
    )
    .parse(input)
}

fn attr_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_until("\""), char('"')),
        delimited(char('\''), take_until("'"), char('\'')),
        take_while1(|c: char| !c.is_whitespace() && c != '>' && c != '<'),
    ))
    .parse(input)
}

fn attribute(input: &str) -> IResult<&str, (String, String)> {
    map(
        preceded(
            multispace1,
            (
                attr_name,
                opt(preceded((multispace0, char('='), multispace0), attr_value)),
            ),
        ),
        |(name, value)| (name, value.map(decode_entities).unwrap_or_default()),
    )
    .parse(input)
}

fn start_tag(input: &str) -> IResult<&str, Token> {
    map(
        (
            char('<'),
            tag_name,
            many0(attribute),
            multispace0,
            opt(char('/')),
            char('>'),
        ),
        |(_, name, attrs, _, slash, _)| Token::Start {
            name,
            attrs,
            self_closing: slash.is_some(),
        },
    )
    .parse(input)
}

fn end_tag(input: &str) -> IResult<&str, Token> {
    map(
        delimited(tag("</"), tag_name, (multispace0, char('>'))),
        Token::End,
    )
    .parse(input)
}

fn comment(input: &str) -> IResult<&str, Token> {
    value(Token::Ignored, (tag("<!--"), take_until("-->"), tag("-->"))).parse(input)
}

fn declaration(input: &str) -> IResult<&str, Token> {
    value(
        Token::Ignored,
        (alt((tag("<!"), tag("<?"))), take_until(">"), char('>')),
    )
    .parse(input)
}

fn text(input: &str) -> IResult<&str, Token> {
    map(take_while1(|c: char| c != '<'), |s: &str| {
        Token::Text(decode_entities(s))
    })
    .parse(input)
}

// A '<' that cannot begin markup, e.g. "1 < 2", is literal text.
fn stray_lt(input: &str) -> IResult<&str, Token> {
    map(
        terminated(
            char('<'),
            not(satisfy(|c: char| {
                c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')
            })),
        ),
        |_| Token::Text("<".to_string()),
    )
    .parse(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((comment, declaration, end_tag, start_tag, text, stray_lt)).parse(input)
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match token(rest) {
            Ok((next, tok)) => {
                tokens.push(tok);
                rest = next;
            }
            Err(_) => {
                return Err(ParseError::Unterminated {
                    offset: input.len() - rest.len(),
                })
            }
        }
    }
    Ok(tokens)
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<Element>,
    roots: Vec<Node>,
}

impl TreeBuilder {
    fn attach(&mut self, node: Node) {
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        if let (Node::Text(new), Some(Node::Text(prev))) = (&node, siblings.last_mut()) {
            prev.push_str(new);
            return;
        }
        siblings.push(node);
    }

    fn close_top(&mut self) {
        if let Some(el) = self.open.pop() {
            self.attach(Node::Element(el));
        }
    }

    /// Closes open elements until only `depth` remain.
    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            self.close_top();
        }
    }

    // An open <li> is closed by a new <li>, unless a nested list intervenes.
    fn open_li_in_scope(&self) -> Option<usize> {
        for (i, el) in self.open.iter().enumerate().rev() {
            match el.tag.as_str() {
                "li" => return Some(i),
                "ul" | "ol" => return None,
                _ => {}
            }
        }
        None
    }

    fn start(&mut self, name: String, attrs: Vec<(String, String)>, self_closing: bool) {
        if name == "li" {
            if let Some(pos) = self.open_li_in_scope() {
                self.close_to(pos);
            }
        }
        let mut el = Element::new(name);
        for (attr, val) in attrs {
            // First occurrence wins, as in browsers.
            if !el.has_attr(&attr) {
                el.set_attr(attr, val);
            }
        }
        if self_closing || is_void(&el.tag) {
            self.attach(Node::Element(el));
        } else {
            self.open.push(el);
        }
    }

    fn end(&mut self, name: &str) {
        if is_void(name) {
            return;
        }
        match self.open.iter().rposition(|el| el.tag == name) {
            Some(pos) => self.close_to(pos),
            None => tracing::trace!(tag = name, "ignoring stray end tag"),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.close_to(0);
        self.roots
    }
}

/// Parses an HTML fragment into a list of top-level nodes.
///
/// Comments, doctypes and processing instructions are dropped. Entities in
/// text and attribute values are decoded.
///
/// # Errors
///
/// Returns [`ParseError::Unterminated`] when a tag, comment or declaration
/// starts but does not finish, e.g. `<li class="a"`.
pub fn parse_fragment(markup: &str) -> Result<Vec<Node>> {
    let mut builder = TreeBuilder::default();
    for tok in tokenize(markup)? {
        match tok {
            Token::Start {
                name,
                attrs,
                self_closing,
            } => builder.start(name, attrs, self_closing),
            Token::End(name) => builder.end(&name),
            Token::Text(t) => builder.attach(Node::Text(t)),
            Token::Ignored => {}
        }
    }
    Ok(builder.finish())
}

/// Parses a fragment and returns the first element with the given tag,
/// searching depth-first.
///
/// # Errors
///
/// Fails like [`parse_fragment`], or with [`ParseError::MissingElement`] if no
/// such element exists.
pub fn parse_element(markup: &str, tag: &str) -> Result<Element> {
    let wanted = tag.to_ascii_lowercase();
    parse_fragment(markup)?
        .iter()
        .filter_map(Node::as_element)
        .find_map(|el| el.find(&|e: &Element| e.tag == wanted).cloned())
        .ok_or(ParseError::MissingElement(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn li(text: &str) -> Node {
        Node::Element(Element::new("li").with_text(text))
    }

    #[test]
    fn test_unclosed_li_is_closed_by_next_li() {
        let nodes = parse_fragment("<ul><li>a<li>b</ul>").unwrap();
        let ul = nodes[0].as_element().unwrap();
        assert_eq!(ul.children, vec![li("a"), li("b")]);
    }

    #[test]
    fn test_nested_list_does_not_close_outer_li() {
        let nodes = parse_fragment("<ul><li>a<ul><li>b</ul></li></ul>").unwrap();
        let outer = nodes[0].as_element().unwrap();
        assert_eq!(outer.children.len(), 1);
        let inner = outer.child("li").unwrap().child("ul").unwrap();
        assert_eq!(inner.children, vec![li("b")]);
    }

    #[test]
    fn test_stray_end_tag_ignored_and_eof_closes() {
        let nodes = parse_fragment("<div></span><p>x").unwrap();
        let div = nodes[0].as_element().unwrap();
        assert_eq!(div.tag, "div");
        assert_eq!(div.child("p").unwrap().text_content(), "x");
    }

    #[test]
    fn test_attribute_forms() {
        let el = parse_element(
            r#"<input ID="a" type=text required placeholder='Item &amp; more' id="b">"#,
            "input",
        )
        .unwrap();
        assert_eq!(el.attr("id"), Some("a"));
        assert_eq!(el.attr("type"), Some("text"));
        assert_eq!(el.attr("required"), Some(""));
        assert_eq!(el.attr("placeholder"), Some("Item & more"));
    }

    #[test]
    fn test_void_element_has_no_children() {
        let nodes = parse_fragment("<li><input>Name</li>").unwrap();
        let li = nodes[0].as_element().unwrap();
        assert_eq!(li.child("input").unwrap().children.len(), 0);
        assert_eq!(li.children[1], Node::Text("Name".into()));
    }

    #[test]
    fn test_comments_and_entities() {
        let nodes = parse_fragment("<p><!-- note -->1 &lt; 2 &#x26; 3 &bogus; < 4</p>").unwrap();
        assert_eq!(
            nodes[0].as_element().unwrap().text_content(),
            "1 < 2 & 3 &bogus; < 4"
        );
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        let err = parse_fragment(r#"<ul><li class="a""#).unwrap_err();
        assert_eq!(err, ParseError::Unterminated { offset: 4 });
    }

    #[test]
    fn test_missing_element() {
        let err = parse_element("<div></div>", "list-input").unwrap_err();
        assert_eq!(err, ParseError::MissingElement("list-input".into()));
    }

    #[test]
    fn test_round_trip_through_html() {
        let src = r#"<list-input id="x" required><ul><li><label for="x-input-0">Name</label><input id="x-input-0" type="text"></li></ul></list-input>"#;
        let el = parse_element(src, "list-input").unwrap();
        assert_eq!(el.to_html(), src);
    }
}
