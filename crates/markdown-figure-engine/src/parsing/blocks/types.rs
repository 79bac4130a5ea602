use crate::parsing::rope::span::Span;

/// The kind of a leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A paragraph: consecutive non-blank lines outside any fence.
    Paragraph,
    /// A fenced code block (``` or ~~~) with its info string.
    FencedCode { info: String },
}

/// A parsed block node with its kind and spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Full byte span of the block including fence lines.
    pub span: Span,
    /// Span handed to inline parsing (paragraphs) or emitted verbatim (code).
    pub content_span: Span,
}
