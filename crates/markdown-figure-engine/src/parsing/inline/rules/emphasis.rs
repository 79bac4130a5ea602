use crate::parsing::inline::{
    node::{Node, NodeKind},
    ruler::InlineRule,
    state::InlineState,
};

use super::is_space;

/// `*em*`, `_em_`, `**strong**`, `__strong__`.
///
/// Matching is local: an opener looks ahead for the first run that can close
/// it, stepping over one level of nested emphasis and over anything the other
/// rules match in silent mode.
/// There is no delimiter stack, so some CommonMark corner cases differ.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    /// Widest delimiter handled: two markers for strong.
    pub const MAX_WIDTH: usize = 2;
}

fn run_len(bytes: &[u8], at: usize, max: usize, marker: u8) -> usize {
    bytes[at..max].iter().take_while(|&&b| b == marker).count()
}

/// A run can open if the next byte is not whitespace. `_` may not open
/// inside a word.
fn can_open(bytes: &[u8], at: usize, len: usize, max: usize, marker: u8) -> bool {
    let after = at + len;
    if after >= max || is_space(bytes[after]) {
        return false;
    }
    marker != Emphasis::UNDERSCORE || at == 0 || !bytes[at - 1].is_ascii_alphanumeric()
}

/// A run can close if the previous byte is not whitespace. `_` may not close
/// inside a word.
fn can_close(bytes: &[u8], at: usize, len: usize, max: usize, marker: u8) -> bool {
    if at == 0 || is_space(bytes[at - 1]) {
        return false;
    }
    let after = at + len;
    marker != Emphasis::UNDERSCORE || after >= max || !bytes[after].is_ascii_alphanumeric()
}

/// Finds the start of a run closing a `width`-wide opener whose content
/// starts at `from`.
///
/// `skip` reports where a construct matched by another rule ends, so markers
/// inside code spans, links or figures are never taken as closers.
fn find_closer(
    bytes: &[u8],
    from: usize,
    max: usize,
    marker: u8,
    width: usize,
    nested: bool,
    skip: &dyn Fn(usize) -> Option<usize>,
) -> Option<usize> {
    let mut i = from;
    while i < max {
        let b = bytes[i];
        if b != marker {
            i = if b.is_ascii() {
                skip(i).unwrap_or(i + 1)
            } else {
                i + 1
            };
            continue;
        }

        let n = run_len(bytes, i, max, marker);
        if n >= width && can_close(bytes, i, n, max, marker) {
            return Some(i);
        }
        if !nested && can_open(bytes, i, n, max, marker) {
            let w = n.min(Emphasis::MAX_WIDTH);
            if let Some(close) = find_closer(bytes, i + w, max, marker, w, true, skip) {
                i = close + w;
                continue;
            }
        }
        i += n;
    }
    None
}

impl InlineRule for Emphasis {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        // Lookahead never skips a delimiter run as a unit.
        if silent {
            return false;
        }
        let cur = state.cursor();
        let Some(marker) = cur.peek() else {
            return false;
        };
        if marker != Self::STAR && marker != Self::UNDERSCORE {
            return false;
        }

        let src = state.src;
        let bytes = src.as_bytes();
        let start = cur.pos();
        let run = run_len(bytes, start, state.max, marker);
        if !can_open(bytes, start, run, state.max, marker) {
            return false;
        }

        let (parser, max, depth, in_link) = (state.parser, state.max, state.depth, state.in_link);
        let skip = |at: usize| parser.skip_token(src, at, max, depth, in_link);

        for width in (1..=run.min(Self::MAX_WIDTH)).rev() {
            let inner = start + width;
            let Some(close) = find_closer(bytes, inner, max, marker, width, false, &skip) else {
                continue;
            };
            let end = close + width;
            let children =
                parser.parse_nested(state.base + inner, &src[inner..close], depth + 1, in_link);
            let kind = if width == 2 {
                NodeKind::Strong(children)
            } else {
                NodeKind::Emphasis(children)
            };
            let span = state.span(start, end);
            state.push(Node::new(kind, span));
            state.pos = end;
            return true;
        }
        false
    }
}
