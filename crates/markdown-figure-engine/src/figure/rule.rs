use crate::parsing::{
    inline::{Cursor, InlineParser, InlineRule, InlineState, LinkHelpers, Node},
    rope::Span,
};

use super::{
    node::Figure,
    scan::{FigureMatch, FigureScanner, UnclosedAlt},
};

/// Re-parses caption text with the host's inline grammar.
pub trait CaptionParser {
    /// `base` is the caption's absolute offset; `depth` the nesting level
    /// the caption is parsed at.
    fn parse_caption(&self, caption: &str, base: usize, depth: usize) -> Vec<Node>;
}

impl CaptionParser for InlineParser {
    fn parse_caption(&self, caption: &str, base: usize, depth: usize) -> Vec<Node> {
        self.parse_nested(base, caption, depth, false)
    }
}

/// Outcome of a successful recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    /// Index just past the figure.
    pub end: usize,
    /// The figure node; `None` in silent mode.
    pub node: Option<Node>,
}

/// Inline rule for figures, registered ahead of `link`.
pub struct FigureRule {
    scanner: FigureScanner,
}

impl FigureRule {
    pub fn new(unclosed_alt: UnclosedAlt) -> Self {
        Self {
            scanner: FigureScanner::new(unclosed_alt),
        }
    }

    /// Recognizes a figure at the cursor.
    ///
    /// Silent mode only reports the match: no caption parse, no node.
    pub fn recognize<H>(
        &self,
        host: &H,
        cur: &Cursor<'_>,
        base: usize,
        depth: usize,
        silent: bool,
    ) -> Option<Recognized>
    where
        H: LinkHelpers + CaptionParser + ?Sized,
    {
        let FigureMatch::Matched { end, parts } = self.scanner.scan(host, cur.s, cur.pos(), cur.max)
        else {
            return None;
        };
        if silent {
            return Some(Recognized { end, node: None });
        }

        let caption_source = cur.slice(parts.caption.start, parts.caption.end).to_string();
        let caption_nodes =
            host.parse_caption(&caption_source, base + parts.caption.start, depth + 1);
        log::trace!(
            "figure {:?} at {}..{}: {} caption node(s)",
            parts.identifier,
            cur.pos(),
            end,
            caption_nodes.len()
        );

        let figure = Figure::new(
            parts.identifier,
            caption_source,
            caption_nodes,
            parts.destination,
            parts.alt,
        );
        Some(Recognized {
            end,
            node: Some(figure.into_node(Span::new(cur.pos(), end).offset(base))),
        })
    }
}

impl InlineRule for FigureRule {
    fn name(&self) -> &'static str {
        Figure::TAG
    }

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let Some(found) =
            self.recognize(state.parser, &state.cursor(), state.base, state.depth, silent)
        else {
            return false;
        };
        if let Some(node) = found.node {
            state.push(node);
        }
        state.pos = found.end;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::parsing::inline::{Destination, NodeKind, Title, links};
    use pretty_assertions::assert_eq;

    /// Real link helpers plus a caption parser that only counts its calls.
    #[derive(Default)]
    struct CountingHost {
        caption_parses: Cell<usize>,
    }

    impl LinkHelpers for CountingHost {
        fn match_label(&self, src: &str, open: usize, max: usize) -> Option<usize> {
            links::match_label(src, open, max)
        }

        fn parse_destination(&self, src: &str, pos: usize, max: usize) -> Option<Destination> {
            links::parse_link_destination(src, pos, max)
        }

        fn parse_title(&self, src: &str, pos: usize, max: usize) -> Option<Title> {
            links::parse_link_title(src, pos, max)
        }

        fn normalize_link(&self, raw: &str) -> String {
            links::normalize_link(raw)
        }

        fn validate_link(&self, url: &str) -> bool {
            links::validate_link(url)
        }
    }

    impl CaptionParser for CountingHost {
        fn parse_caption(&self, caption: &str, base: usize, _depth: usize) -> Vec<Node> {
            self.caption_parses.set(self.caption_parses.get() + 1);
            vec![Node::new(
                NodeKind::Text(caption.to_string()),
                Span::new(base, base + caption.len()),
            )]
        }
    }

    fn parser() -> InlineParser {
        let mut parser = InlineParser::default();
        parser
            .insert_rule_before("link", Box::new(FigureRule::new(UnclosedAlt::Reject)))
            .unwrap();
        parser
    }

    #[test]
    fn silent_mode_skips_caption_parse_and_node() {
        let host = CountingHost::default();
        let src = "#1[cap](/a.png)";
        let found = FigureRule::new(UnclosedAlt::Reject)
            .recognize(&host, &Cursor::new(src, 0, src.len()), 0, 0, true)
            .unwrap();
        assert_eq!(found, Recognized {
            end: src.len(),
            node: None
        });
        assert_eq!(host.caption_parses.get(), 0);
    }

    #[test]
    fn non_silent_mode_parses_caption_once() {
        let host = CountingHost::default();
        let src = "#1[cap](/a.png)";
        let found = FigureRule::new(UnclosedAlt::Reject)
            .recognize(&host, &Cursor::new(src, 0, src.len()), 40, 0, false)
            .unwrap();
        assert_eq!(host.caption_parses.get(), 1);
        let node = found.node.unwrap();
        assert_eq!(node.span, Span::new(40, 55));
        let fig = node.as_figure().unwrap();
        assert_eq!(fig.caption_nodes()[0].span, Span::new(43, 46));
    }

    #[test]
    fn failed_recognition_does_not_parse_caption() {
        let host = CountingHost::default();
        let src = "#1[cap](/a.png";
        let rule = FigureRule::new(UnclosedAlt::Reject);
        assert_eq!(
            rule.recognize(&host, &Cursor::new(src, 0, src.len()), 0, 0, false),
            None
        );
        assert_eq!(host.caption_parses.get(), 0);
    }

    #[test]
    fn caption_is_parsed_as_inline_markup() {
        let nodes = parser().parse(0, "#7[A *cat*](/cat.png)");
        assert_eq!(nodes.len(), 1);
        let fig = nodes[0].as_figure().unwrap();
        assert_eq!(fig.identifier(), Some("7"));
        assert_eq!(fig.caption_source(), "A *cat*");
        assert_eq!(fig.destination(), "/cat.png");
        let tags: Vec<_> = fig.caption_nodes().iter().map(Node::tag).collect();
        assert_eq!(tags, vec!["text", "em"]);
        assert_eq!(fig.caption_nodes()[1].span, Span::new(5, 10));
    }

    #[test]
    fn silent_try_parse_advances_without_pushing() {
        let parser = parser();
        let src = "#1[a](/a.png) rest";
        let mut state = InlineState::new(&parser, src, 0, 0);
        let rule = FigureRule::new(UnclosedAlt::Reject);
        assert!(rule.try_parse(&mut state, true));
        assert_eq!(state.pos, 13);
        assert!(state.finish().is_empty());
    }

    #[test]
    fn every_truncation_leaves_state_untouched() {
        let parser = parser();
        let rule = FigureRule::new(UnclosedAlt::Reject);
        let src = r#"#7[A *cat*](/cat.png [alt] "t")"#;
        for max in 0..src.len() {
            for silent in [false, true] {
                let mut state = InlineState::new(&parser, src, 0, 0);
                state.max = max;
                assert!(!rule.try_parse(&mut state, silent), "matched at max={max}");
                assert_eq!(state.pos, 0);
                assert_eq!(state.pending_start(), None);
                assert!(state.finish().is_empty());
            }
        }
    }

    #[test]
    fn non_hash_start_is_declined() {
        let parser = parser();
        let rule = FigureRule::new(UnclosedAlt::Reject);
        for src in ["[a](/a.png)", "x#1[a](/a.png)", " #1[a](/a.png)", ""] {
            let mut state = InlineState::new(&parser, src, 0, 0);
            assert!(!rule.try_parse(&mut state, false));
            assert_eq!(state.pos, 0);
        }
    }

    #[test]
    fn figure_wins_over_link_and_text_around_it_survives() {
        let nodes = parser().parse(0, "see #2[c](/c.png) and [l](/l)");
        let tags: Vec<_> = nodes.iter().map(Node::tag).collect();
        assert_eq!(tags, vec!["text", "figure", "text", "link"]);
    }

    #[test]
    fn figure_inside_emphasis() {
        let nodes = parser().parse(0, "*#[c](/c.png)*");
        let NodeKind::Emphasis(children) = &nodes[0].kind else {
            panic!("expected emphasis");
        };
        assert_eq!(children[0].tag(), "figure");
    }
}
