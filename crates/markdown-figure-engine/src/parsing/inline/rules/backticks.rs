use crate::parsing::inline::{
    node::{Node, NodeKind},
    ruler::InlineRule,
    state::InlineState,
};

/// Code spans: a backtick run closed by a run of the same length.
pub struct Backticks;

impl Backticks {
    pub const TICK: u8 = b'`';
}

/// Byte positions of a matched code span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpanMatch {
    pub open_len: usize,
    /// Index of the first byte of the closing run.
    pub close_start: usize,
    /// Index just past the closing run.
    pub end: usize,
}

/// Finds the closing run for the backtick run starting at `start`.
pub fn scan_code_span(bytes: &[u8], start: usize, max: usize) -> Option<CodeSpanMatch> {
    let run = |from: usize| {
        bytes[from..max]
            .iter()
            .take_while(|&&b| b == Backticks::TICK)
            .count()
    };

    let open_len = run(start);
    if open_len == 0 {
        return None;
    }

    let mut i = start + open_len;
    while i < max {
        if bytes[i] != Backticks::TICK {
            i += 1;
            continue;
        }
        let close_len = run(i);
        if close_len == open_len {
            return Some(CodeSpanMatch {
                open_len,
                close_start: i,
                end: i + close_len,
            });
        }
        i += close_len;
    }
    None
}

/// Line endings become spaces; one leading and trailing space is stripped
/// when both are present and the content is not all spaces.
fn normalize_code(content: &str) -> String {
    let s = content.replace('\n', " ");
    if s.len() >= 2 && s.starts_with(' ') && s.ends_with(' ') && !s.bytes().all(|b| b == b' ') {
        return s[1..s.len() - 1].to_string();
    }
    s
}

impl InlineRule for Backticks {
    fn name(&self) -> &'static str {
        "backticks"
    }

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let cur = state.cursor();
        if cur.peek() != Some(Self::TICK) {
            return false;
        }
        let start = cur.pos();
        let src = state.src;
        let bytes = src.as_bytes();

        let Some(m) = scan_code_span(bytes, start, state.max) else {
            // No closer: the whole opening run is literal text.
            let run = bytes[start..state.max]
                .iter()
                .take_while(|&&b| b == Self::TICK)
                .count();
            if !silent {
                state.mark_pending(start);
            }
            state.pos = start + run;
            return true;
        };

        if !silent {
            let content = normalize_code(&src[start + m.open_len..m.close_start]);
            let span = state.span(start, m.end);
            state.push(Node::new(NodeKind::CodeSpan(content), span));
        }
        state.pos = m.end;
        true
    }
}
