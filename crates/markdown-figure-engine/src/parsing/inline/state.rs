use crate::parsing::rope::span::Span;

use super::{
    cursor::Cursor,
    node::{Node, NodeKind},
    parser::InlineParser,
};

/// Mutable state of one inline parse.
///
/// Positions (`pos`, `max`) are byte indices into `src`; node spans are
/// absolute, i.e. shifted by `base`.
pub struct InlineState<'a> {
    /// The parser running this pass; rules reach helpers and nested parses through it.
    pub parser: &'a InlineParser,
    pub src: &'a str,
    pub pos: usize,
    pub max: usize,
    /// Absolute offset of `src[0]` in the document.
    pub base: usize,
    /// Number of enclosing inline parses.
    pub depth: usize,
    /// Set while parsing a link label; links do not nest.
    pub in_link: bool,
    pending_start: Option<usize>,
    nodes: Vec<Node>,
}

impl<'a> InlineState<'a> {
    pub fn new(parser: &'a InlineParser, src: &'a str, base: usize, depth: usize) -> Self {
        Self {
            parser,
            src,
            pos: 0,
            max: src.len(),
            base,
            depth,
            in_link: false,
            pending_start: None,
            nodes: vec![],
        }
    }

    /// A cursor at the current position. Moving it does not move `pos`.
    pub fn cursor(&self) -> Cursor<'a> {
        Cursor::new(self.src, self.pos, self.max)
    }

    /// Absolute span for local byte indices.
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(start, end).offset(self.base)
    }

    /// Start of the text no rule has claimed yet, if any.
    pub fn pending_start(&self) -> Option<usize> {
        self.pending_start
    }

    /// Marks `at` as the start of pending text unless some is already pending.
    pub fn mark_pending(&mut self, at: usize) {
        self.pending_start.get_or_insert(at);
    }

    /// Flushes pending text up to the node's start, then appends the node.
    pub fn push(&mut self, node: Node) {
        self.flush_pending(node.span.start.saturating_sub(self.base));
        self.append(node);
    }

    /// Flushes remaining text and returns the nodes.
    pub fn finish(mut self) -> Vec<Node> {
        self.flush_pending(self.pos.min(self.max));
        self.nodes
    }

    fn flush_pending(&mut self, until: usize) {
        let Some(start) = self.pending_start.take() else {
            return;
        };
        if until > start {
            let text = self.src[start..until].to_string();
            self.append(Node::new(NodeKind::Text(text), self.span(start, until)));
        }
    }

    /// Appends a node, merging it into a directly preceding text node.
    fn append(&mut self, node: Node) {
        if let NodeKind::Text(next) = &node.kind
            && let Some(last) = self.nodes.last_mut()
            && last.span.end == node.span.start
            && let NodeKind::Text(prev) = &mut last.kind
        {
            prev.push_str(next);
            last.span.end = node.span.end;
            return;
        }
        self.nodes.push(node);
    }
}
