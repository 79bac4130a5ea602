//! # HTML Rendering
//!
//! [`HtmlRenderer`] maps node tags to render functions. Built-in rules cover
//! the host grammar; plugins register more with [`HtmlRenderer::add_rule`].
//! Nodes whose tag has no rule render their children.

mod document;

use std::collections::HashMap;

use crate::parsing::inline::{Attrs, Node, NodeKind};

/// Renders one node to HTML.
pub type RenderRule = Box<dyn Fn(&HtmlRenderer, &Node) -> String + Send + Sync>;

pub struct HtmlRenderer {
    rules: HashMap<&'static str, RenderRule>,
}

impl HtmlRenderer {
    /// A renderer with the built-in rules.
    pub fn new() -> Self {
        let mut renderer = Self {
            rules: HashMap::new(),
        };
        renderer.add_rule("text", Box::new(render_text));
        renderer.add_rule("code_inline", Box::new(render_code_inline));
        renderer.add_rule("em", Box::new(|r: &HtmlRenderer, n: &Node| wrap(r, n, "em")));
        renderer.add_rule(
            "strong",
            Box::new(|r: &HtmlRenderer, n: &Node| wrap(r, n, "strong")),
        );
        renderer.add_rule("link", Box::new(render_link));
        renderer.add_rule("softbreak", Box::new(|_: &HtmlRenderer, _: &Node| "\n".to_string()));
        renderer.add_rule(
            "hardbreak",
            Box::new(|_: &HtmlRenderer, _: &Node| "<br />\n".to_string()),
        );
        renderer
    }

    /// Registers `rule` for `tag`, returning the rule it replaced.
    pub fn add_rule(&mut self, tag: &'static str, rule: RenderRule) -> Option<RenderRule> {
        self.rules.insert(tag, rule)
    }

    pub fn has_rule(&self, tag: &str) -> bool {
        self.rules.contains_key(tag)
    }

    pub fn render_node(&self, node: &Node) -> String {
        match self.rules.get(node.tag()) {
            Some(rule) => rule(self, node),
            None => {
                log::trace!("no render rule for `{}`, rendering children", node.tag());
                self.render_inline(node.children())
            }
        }
    }

    pub fn render_inline(&self, nodes: &[Node]) -> String {
        nodes.iter().map(|n| self.render_node(n)).collect()
    }

    /// ` name="value"` for each attribute, values escaped.
    pub fn render_attrs(&self, attrs: &Attrs) -> String {
        attrs
            .iter()
            .map(|(name, value)| {
                format!(
                    " {}=\"{}\"",
                    html_escape::encode_double_quoted_attribute(name),
                    html_escape::encode_double_quoted_attribute(value)
                )
            })
            .collect()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_text(_: &HtmlRenderer, node: &Node) -> String {
    match &node.kind {
        NodeKind::Text(text) => html_escape::encode_text(text).into_owned(),
        _ => String::new(),
    }
}

fn render_code_inline(r: &HtmlRenderer, node: &Node) -> String {
    match &node.kind {
        NodeKind::CodeSpan(code) => format!(
            "<code{}>{}</code>",
            r.render_attrs(&node.attrs),
            html_escape::encode_text(code)
        ),
        _ => String::new(),
    }
}

fn render_link(r: &HtmlRenderer, node: &Node) -> String {
    format!(
        "<a{}>{}</a>",
        r.render_attrs(&node.attrs),
        r.render_inline(node.children())
    )
}

fn wrap(r: &HtmlRenderer, node: &Node, tag: &str) -> String {
    format!(
        "<{tag}{}>{}</{tag}>",
        r.render_attrs(&node.attrs),
        r.render_inline(node.children())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::InlineParser;
    use pretty_assertions::assert_eq;

    fn render(src: &str) -> String {
        let nodes = InlineParser::default().parse(0, src);
        HtmlRenderer::new().render_inline(&nodes)
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(render("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn inline_markup() {
        assert_eq!(
            render(r#"*a* **b** `<c>` [d](/d "t")"#),
            r#"<em>a</em> <strong>b</strong> <code>&lt;c&gt;</code> <a href="/d" title="t">d</a>"#
        );
    }

    #[test]
    fn breaks() {
        assert_eq!(render("a\nb  \nc"), "a\nb<br />\nc");
    }

    #[test]
    fn attrs_are_escaped() {
        let mut attrs = Attrs::new();
        attrs.set("title", r#"a "q" & b"#);
        assert_eq!(
            HtmlRenderer::new().render_attrs(&attrs),
            r#" title="a &quot;q&quot; &amp; b""#
        );
    }

    #[test]
    fn custom_rule_replaces_builtin() {
        let mut renderer = HtmlRenderer::new();
        let old = renderer.add_rule(
            "em",
            Box::new(|r: &HtmlRenderer, n: &Node| format!("_{}_", r.render_inline(n.children()))),
        );
        assert!(old.is_some());
        let nodes = InlineParser::default().parse(0, "*x*");
        assert_eq!(renderer.render_inline(&nodes), "_x_");
    }

    #[test]
    fn missing_rule_renders_children() {
        let mut renderer = HtmlRenderer::new();
        renderer.rules.remove("strong");
        let nodes = InlineParser::default().parse(0, "**x**");
        assert_eq!(renderer.render_inline(&nodes), "x");
    }
}
