use crate::parsing::inline::Node;
use crate::render::HtmlRenderer;

/// Renders a figure node.
///
/// `<figure id="{id_prefix}{identifier}"><img .../><figcaption>{caption}</figcaption></figure>`
///
/// The id attribute is omitted without an identifier. Image attributes come
/// from the node's attrs through the renderer's attribute helper. The caption
/// is the raw caption source, inserted without escaping; the parsed caption
/// nodes are not used.
pub fn render_figure(renderer: &HtmlRenderer, node: &Node, id_prefix: &str) -> String {
    let Some(figure) = node.as_figure() else {
        return String::new();
    };

    let id = match figure.identifier() {
        Some(id) if !id.is_empty() => format!(" id=\"{id_prefix}{id}\""),
        _ => String::new(),
    };
    format!(
        "<figure{id}><img{attrs}/><figcaption>{caption}</figcaption></figure>",
        attrs = renderer.render_attrs(&node.attrs),
        caption = figure.caption_source(),
    )
}
