//! HTML serialization.

use super::parser::is_void;
use super::{Element, Node};
use std::fmt;

impl Element {
    /// Serializes the element and its subtree as HTML.
    ///
    /// Attributes with an empty value are written in boolean form
    /// (`required` rather than `required=""`). Void elements such as
    /// `<input>` get no end tag.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
        }
        out.push('>');
        if is_void(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl Node {
    /// Serializes the node as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => escape_into(text, false, out),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn escape_into(s: &str, attribute: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_and_boolean_attributes() {
        let el = Element::new("input")
            .with_attr("type", "text")
            .with_attr("required", "");
        assert_eq!(el.to_html(), r#"<input type="text" required>"#);
    }

    #[test]
    fn test_escaping() {
        let el = Element::new("p")
            .with_attr("title", r#"say "hi" & <go>"#)
            .with_text("1 < 2 & 3 > 2 \"quoted\"");
        assert_eq!(
            el.to_html(),
            r#"<p title="say &quot;hi&quot; &amp; &lt;go&gt;">1 &lt; 2 &amp; 3 &gt; 2 "quoted"</p>"#
        );
    }
}
