use crate::parsing::inline::{
    node::{Node, NodeKind},
    ruler::InlineRule,
    state::InlineState,
};

/// Line endings inside a paragraph.
///
/// Two or more spaces before the newline make a hard break, otherwise a soft
/// break. Trailing spaces and the next line's indentation belong to the
/// break's span, not to the surrounding text.
pub struct Newline;

impl Newline {
    pub const NEWLINE: u8 = b'\n';
    /// Trailing spaces needed for a hard break.
    pub const HARD_BREAK_SPACES: usize = 2;
}

impl InlineRule for Newline {
    fn name(&self) -> &'static str {
        "newline"
    }

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let mut cur = state.cursor();
        if cur.peek() != Some(Self::NEWLINE) {
            return false;
        }
        let pos = cur.pos();
        let bytes = state.src.as_bytes();

        let text_start = state.pending_start().unwrap_or(pos);
        let mut start = pos;
        while start > text_start && bytes[start - 1] == b' ' {
            start -= 1;
        }
        let kind = if pos - start >= Self::HARD_BREAK_SPACES {
            NodeKind::HardBreak
        } else {
            NodeKind::SoftBreak
        };

        cur.bump();
        cur.skip_while(|b| b == b' ' || b == b'\t');

        if !silent {
            let span = state.span(start, cur.pos());
            state.push(Node::new(kind, span));
        }
        state.pos = cur.pos();
        true
    }
}
