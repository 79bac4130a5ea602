use super::{
    node::Node,
    ruler::{InlineRule, Ruler, RulerError},
    rules::{Backticks, Emphasis, Escape, Link, Newline},
    state::InlineState,
};

/// Parses inline content into a sequence of [`Node`]s.
///
/// Holds the ordered rule chain and the nesting limit. A parser is immutable
/// while parsing; every call owns its own [`InlineState`].
pub struct InlineParser {
    ruler: Ruler,
    max_nesting: usize,
}

impl InlineParser {
    /// A parser with no rules: everything parses as text.
    pub fn new(max_nesting: usize) -> Self {
        Self {
            ruler: Ruler::new(),
            max_nesting,
        }
    }

    /// A parser with the built-in rules in their default order.
    pub fn with_default_rules(max_nesting: usize) -> Self {
        let mut parser = Self::new(max_nesting);
        let rules: [Box<dyn InlineRule>; 5] = [
            Box::new(Escape),
            Box::new(Backticks),
            Box::new(Emphasis),
            Box::new(Link),
            Box::new(Newline),
        ];
        for rule in rules {
            // Built-in names are distinct, so pushing cannot collide.
            let _ = parser.ruler.push(rule);
        }
        parser
    }

    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    pub fn ruler_mut(&mut self) -> &mut Ruler {
        &mut self.ruler
    }

    /// Convenience for `ruler_mut().insert_before(..)`.
    pub fn insert_rule_before(
        &mut self,
        anchor: &str,
        rule: Box<dyn InlineRule>,
    ) -> Result<(), RulerError> {
        self.ruler.insert_before(anchor, rule)
    }

    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Parses `src`, whose first byte sits at absolute offset `base`.
    ///
    /// Returns nodes covering the entire input; text between constructs is
    /// emitted as `Text`.
    pub fn parse(&self, base: usize, src: &str) -> Vec<Node> {
        self.parse_nested(base, src, 0, false)
    }

    /// Parses `src` as the body of an enclosing construct.
    ///
    /// At `depth >= max_nesting` no rules run and the whole input is text.
    pub fn parse_nested(&self, base: usize, src: &str, depth: usize, in_link: bool) -> Vec<Node> {
        let mut state = InlineState::new(self, src, base, depth);
        state.in_link = in_link;

        while state.pos < state.max {
            if self.try_rules(&mut state, false) {
                continue;
            }
            let at = state.pos;
            state.mark_pending(at);
            let mut cur = state.cursor();
            cur.bump_char();
            state.pos = cur.pos();
        }

        state.finish()
    }

    /// Runs the rules in silent mode at `pos` and returns the index just past
    /// the first match.
    ///
    /// Lookahead (link labels, emphasis closers) uses this to step over whole
    /// constructs instead of counting raw bytes.
    pub fn skip_token(
        &self,
        src: &str,
        pos: usize,
        max: usize,
        depth: usize,
        in_link: bool,
    ) -> Option<usize> {
        let mut state = InlineState::new(self, src, 0, depth);
        state.pos = pos;
        state.max = max.min(src.len());
        state.in_link = in_link;
        (self.try_rules(&mut state, true) && state.pos > pos).then_some(state.pos)
    }

    /// Offers the current position to each rule in order.
    pub fn try_rules(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.depth >= self.max_nesting {
            return false;
        }
        self.ruler.iter().any(|rule| rule.try_parse(state, silent))
    }
}

impl Default for InlineParser {
    fn default() -> Self {
        Self::with_default_rules(crate::options::DEFAULT_MAX_NESTING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::NodeKind;
    use crate::parsing::rope::Span;

    #[test]
    fn parse_simple_text() {
        let nodes = InlineParser::default().parse(0, "hello world");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind, NodeKind::Text("hello world".into()));
        assert_eq!(nodes[0].span, Span::new(0, 11));
    }

    #[test]
    fn empty_input_has_no_nodes() {
        assert!(InlineParser::default().parse(0, "").is_empty());
    }

    #[test]
    fn parser_without_rules_yields_text() {
        let nodes = InlineParser::new(20).parse(5, "*a* `b`");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].span, Span::new(5, 12));
    }

    #[test]
    fn nesting_limit_turns_bodies_into_text() {
        let parser = InlineParser::with_default_rules(1);
        let nodes = parser.parse(0, "*a `b`*");
        let NodeKind::Emphasis(children) = &nodes[0].kind else {
            panic!("expected emphasis");
        };
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind, NodeKind::Text("a `b`".into()));
    }

    #[test]
    fn multibyte_text_is_kept_whole() {
        let nodes = InlineParser::default().parse(0, "café *crème*");
        assert_eq!(nodes[0].kind, NodeKind::Text("café ".into()));
        assert_eq!(nodes[1].tag(), "em");
    }

    #[test]
    fn skip_token_steps_over_whole_constructs() {
        let parser = InlineParser::default();
        let src = "a `x]` [l](/u) *e*";
        assert_eq!(parser.skip_token(src, 0, src.len(), 0, false), None);
        assert_eq!(parser.skip_token(src, 2, src.len(), 0, false), Some(6));
        assert_eq!(parser.skip_token(src, 7, src.len(), 0, false), Some(14));
        assert_eq!(parser.skip_token(src, 7, src.len(), 0, true), None);
        assert_eq!(parser.skip_token(src, 15, src.len(), 0, false), None);
    }

    #[test]
    fn skip_token_runs_no_rules_past_the_nesting_limit() {
        let parser = InlineParser::with_default_rules(1);
        assert_eq!(parser.skip_token("`x`", 0, 3, 1, false), None);
    }

    #[test]
    fn default_rule_order() {
        assert_eq!(
            InlineParser::default().ruler().names(),
            vec!["escape", "backticks", "emphasis", "link", "newline"]
        );
    }
}
