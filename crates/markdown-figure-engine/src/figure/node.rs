use crate::parsing::{
    inline::{Attrs, Node, NodeKind},
    rope::Span,
};

/// A recognized figure.
///
/// Built once when the recognizer commits to a match and never modified
/// afterwards; fields are only readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    identifier: Option<String>,
    caption_source: String,
    caption_nodes: Vec<Node>,
    destination: String,
    alt: Option<String>,
}

impl Figure {
    pub const TAG: &'static str = "figure";

    /// `caption_nodes` must be the inline parse of `caption_source`.
    pub(crate) fn new(
        identifier: Option<String>,
        caption_source: String,
        caption_nodes: Vec<Node>,
        destination: String,
        alt: Option<String>,
    ) -> Self {
        debug_assert!(
            identifier
                .as_deref()
                .is_none_or(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
        );
        Self {
            identifier,
            caption_source,
            caption_nodes,
            destination,
            alt,
        }
    }

    /// Digits written after `#`, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The caption exactly as written between the brackets.
    pub fn caption_source(&self) -> &str {
        &self.caption_source
    }

    /// The caption parsed as inline markup.
    pub fn caption_nodes(&self) -> &[Node] {
        &self.caption_nodes
    }

    /// Normalized destination, or empty if none was given or it failed validation.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    /// Wraps the figure in a node, attaching `src` and `alt` as image attributes.
    pub fn into_node(self, span: Span) -> Node {
        let mut attrs = Attrs::new();
        attrs.set("src", self.destination.as_str());
        if let Some(alt) = &self.alt {
            attrs.set("alt", alt.as_str());
        }
        Node::new(NodeKind::Figure(self), span).with_attrs(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_node_attaches_image_attrs_in_order() {
        let fig = Figure::new(
            Some("3".into()),
            "cap".into(),
            vec![],
            "/a.png".into(),
            Some("alt text".into()),
        );
        let node = fig.into_node(Span::new(0, 20));
        assert_eq!(node.tag(), "figure");
        let attrs: Vec<_> = node.attrs.iter().collect();
        assert_eq!(attrs, vec![("src", "/a.png"), ("alt", "alt text")]);
        assert_eq!(node.as_figure().and_then(Figure::identifier), Some("3"));
    }

    #[test]
    fn src_is_present_even_when_empty() {
        let node = Figure::new(None, "c".into(), vec![], String::new(), None)
            .into_node(Span::new(0, 6));
        let attrs: Vec<_> = node.attrs.iter().collect();
        assert_eq!(attrs, vec![("src", "")]);
    }
}
