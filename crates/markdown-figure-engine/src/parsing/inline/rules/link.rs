use crate::parsing::inline::{
    links::{LinkHelpers, match_link_label},
    node::{Attrs, Node, NodeKind},
    ruler::InlineRule,
    state::InlineState,
};

/// Inline links: `[label](destination "title")`.
///
/// Only the inline form exists; there are no reference definitions.
pub struct Link;

impl Link {
    pub const NAME: &'static str = "link";
    pub const LABEL_OPEN: u8 = b'[';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
}

impl InlineRule for Link {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.in_link {
            return false;
        }
        let mut cur = state.cursor();
        if cur.peek() != Some(Self::LABEL_OPEN) {
            return false;
        }
        let start = cur.pos();
        let helpers = state.parser;

        let Some(label_end) = match_link_label(helpers, state.src, start, state.max, state.depth)
        else {
            return false;
        };
        cur.jump(label_end + 1);
        if cur.peek() != Some(Self::DEST_OPEN) {
            return false;
        }
        cur.bump();
        cur.skip_whitespace();

        let mut href = String::new();
        if let Some(dest) = helpers.parse_destination(state.src, cur.pos(), state.max) {
            let url = helpers.normalize_link(&dest.raw);
            if helpers.validate_link(&url) {
                href = url;
                cur.jump(dest.end);
            }
        }

        let dest_end = cur.pos();
        cur.skip_whitespace();
        let mut title = None;
        if cur.pos() > dest_end
            && let Some(t) = helpers.parse_title(state.src, cur.pos(), state.max)
        {
            title = Some(t.text);
            cur.jump(t.end);
            cur.skip_whitespace();
        }

        if cur.peek() != Some(Self::DEST_CLOSE) {
            return false;
        }
        cur.bump();

        if !silent {
            let children = state.parser.parse_nested(
                state.base + start + 1,
                &state.src[start + 1..label_end],
                state.depth + 1,
                true,
            );
            let mut attrs = Attrs::new();
            attrs.set("href", href);
            if let Some(title) = title {
                attrs.set("title", title);
            }
            let span = state.span(start, cur.pos());
            state.push(Node::new(NodeKind::Link(children), span).with_attrs(attrs));
        }
        state.pos = cur.pos();
        true
    }
}
