use crate::parsing::inline::{
    node::{Node, NodeKind},
    ruler::InlineRule,
    state::InlineState,
};

/// `\` before ASCII punctuation yields the literal character;
/// `\` at the end of a line is a hard break.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';
}

impl InlineRule for Escape {
    fn name(&self) -> &'static str {
        "escape"
    }

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let mut cur = state.cursor();
        if cur.peek() != Some(Self::BACKSLASH) {
            return false;
        }
        let start = cur.pos();
        cur.bump();

        let kind = match cur.peek() {
            Some(b'\n') => {
                cur.bump();
                cur.skip_while(|b| b == b' ' || b == b'\t');
                NodeKind::HardBreak
            }
            Some(b) if b.is_ascii_punctuation() => {
                cur.bump();
                NodeKind::Text((b as char).to_string())
            }
            _ => return false,
        };

        if !silent {
            let span = state.span(start, cur.pos());
            state.push(Node::new(kind, span));
        }
        state.pos = cur.pos();
        true
    }
}
