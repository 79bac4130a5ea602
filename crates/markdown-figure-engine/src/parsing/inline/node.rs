use crate::figure::Figure;
use crate::parsing::rope::span::Span;

/// Ordered attribute list attached to a node.
///
/// Order is insertion order, which is also render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(Vec<(String, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What a node is, together with its decoded content or children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain text with escapes already resolved.
    Text(String),
    /// Content of a code span. Raw zone: nothing inside is parsed.
    CodeSpan(String),
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    /// An inline link; `href` and `title` live in the node's attrs.
    Link(Vec<Node>),
    SoftBreak,
    HardBreak,
    Figure(Figure),
}

impl NodeKind {
    /// Type tag used to dispatch render rules.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Text(_) => "text",
            NodeKind::CodeSpan(_) => "code_inline",
            NodeKind::Emphasis(_) => "em",
            NodeKind::Strong(_) => "strong",
            NodeKind::Link(_) => "link",
            NodeKind::SoftBreak => "softbreak",
            NodeKind::HardBreak => "hardbreak",
            NodeKind::Figure(_) => "figure",
        }
    }
}

/// A parsed inline node with its absolute source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub attrs: Attrs,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            attrs: Attrs::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Child nodes for container kinds; empty for leaves.
    ///
    /// Figures report no children: their caption nodes are reached through
    /// [`Figure::caption_nodes`].
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Emphasis(c) | NodeKind::Strong(c) | NodeKind::Link(c) => c,
            _ => &[],
        }
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match &self.kind {
            NodeKind::Figure(f) => Some(f),
            _ => None,
        }
    }
}
