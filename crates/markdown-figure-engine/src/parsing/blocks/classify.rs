use crate::parsing::rope::{lines::LineRef, span::Span};

use super::fence::Fence;

/// Local facts about one line, gathered without looking at its neighbours.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line in the rope.
    pub line: Span,
    pub is_blank: bool,
    /// The line's text span with surrounding whitespace and newline removed.
    pub content: Span,
    /// The trimmed line text, for fence matching.
    pub text: String,
    /// Set if the line could open a fence.
    pub fence: Option<Fence>,
}

pub fn classify_line(lr: &LineRef) -> LineClass {
    let without_newline = lr.trimmed();
    let leading = without_newline.len() - without_newline.trim_start().len();
    let trimmed = without_newline.trim();

    LineClass {
        line: lr.span,
        is_blank: trimmed.is_empty(),
        content: Span {
            start: lr.span.start + leading,
            end: lr.span.start + leading + trimmed.len(),
        },
        text: without_newline.to_string(),
        fence: Fence::open(without_newline),
    }
}
