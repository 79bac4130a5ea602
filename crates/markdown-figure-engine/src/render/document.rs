use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc,
    blocks::BlockKind,
    inline::InlineParser,
    parse_inline_for_block,
    rope::slice::slice_to_string,
};

use super::HtmlRenderer;

impl HtmlRenderer {
    /// Renders every block of a parsed document.
    pub fn render_blocks(
        &self,
        rope: &Rope,
        doc: &ParsedDoc,
        parser: &InlineParser,
    ) -> String {
        let mut out = String::new();
        for block in &doc.blocks {
            match &block.kind {
                BlockKind::Paragraph => {
                    let nodes = parse_inline_for_block(rope, block, parser);
                    out.push_str("<p>");
                    out.push_str(&self.render_inline(&nodes));
                    out.push_str("</p>\n");
                }
                BlockKind::FencedCode { info } => {
                    let code = slice_to_string(rope, block.content_span);
                    match info.split_whitespace().next() {
                        Some(lang) => out.push_str(&format!(
                            "<pre><code class=\"language-{}\">",
                            html_escape::encode_double_quoted_attribute(lang)
                        )),
                        None => out.push_str("<pre><code>"),
                    }
                    out.push_str(&html_escape::encode_text(&code));
                    out.push_str("</code></pre>\n");
                }
            }
        }
        out
    }
}
