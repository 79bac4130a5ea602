use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    fence::Fence,
    types::{BlockKind, BlockNode},
};

#[derive(Debug, Clone)]
enum LeafState {
    None,
    Paragraph {
        start: usize,
        content: Span,
        last_line_end: usize,
    },
    Fence {
        fence: Fence,
        start: usize,
        body_start: usize,
        last_line_end: usize,
    },
}

/// Groups classified lines into [`BlockNode`]s.
pub struct BlockBuilder {
    leaf: LeafState,
    out: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        if matches!(self.leaf, LeafState::Fence { .. }) {
            self.consume_fence_line(c);
            return;
        }

        if c.is_blank {
            self.flush_paragraph();
            return;
        }

        if let Some(fence) = &c.fence {
            self.flush_paragraph();
            self.leaf = LeafState::Fence {
                fence: fence.clone(),
                start: c.line.start,
                body_start: c.line.end,
                last_line_end: c.line.end,
            };
            return;
        }

        self.extend_paragraph(c);
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        self.flush_paragraph();
        // Unterminated fence: runs to end of input.
        if let LeafState::Fence {
            fence,
            start,
            body_start,
            last_line_end,
        } = std::mem::replace(&mut self.leaf, LeafState::None)
        {
            self.push_fence(fence, start, body_start, last_line_end, last_line_end);
        }
        self.out
    }

    fn consume_fence_line(&mut self, c: &LineClass) {
        let LeafState::Fence {
            fence,
            start,
            body_start,
            last_line_end,
        } = &mut self.leaf
        else {
            return;
        };

        if fence.is_closed_by(&c.text) {
            let (fence, start, body_start) = (fence.clone(), *start, *body_start);
            self.leaf = LeafState::None;
            self.push_fence(fence, start, body_start, c.line.start, c.line.end);
        } else {
            *last_line_end = c.line.end;
        }
    }

    fn push_fence(
        &mut self,
        fence: Fence,
        start: usize,
        body_start: usize,
        body_end: usize,
        end: usize,
    ) {
        self.out.push(BlockNode {
            kind: BlockKind::FencedCode { info: fence.info },
            span: Span { start, end },
            content_span: Span {
                start: body_start,
                end: body_end.max(body_start),
            },
        });
    }

    fn extend_paragraph(&mut self, c: &LineClass) {
        match &mut self.leaf {
            LeafState::Paragraph {
                content,
                last_line_end,
                ..
            } => {
                content.end = c.content.end;
                *last_line_end = c.line.end;
            }
            _ => {
                self.leaf = LeafState::Paragraph {
                    start: c.line.start,
                    content: c.content,
                    last_line_end: c.line.end,
                };
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if let LeafState::Paragraph {
            start,
            content,
            last_line_end,
        } = self.leaf
        {
            self.out.push(BlockNode {
                kind: BlockKind::Paragraph,
                span: Span {
                    start,
                    end: last_line_end,
                },
                content_span: content,
            });
            self.leaf = LeafState::None;
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
