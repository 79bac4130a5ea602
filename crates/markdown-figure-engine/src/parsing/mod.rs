pub mod blocks;
pub mod inline;
pub mod rope;

use xi_rope::Rope;

use blocks::{BlockBuilder, BlockKind, BlockNode, classify_line};
use inline::{InlineParser, Node};
use rope::{lines_with_spans, slice::slice_to_string};

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

pub fn parse_document(rope: &Rope) -> ParsedDoc {
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(rope) {
        builder.push(&classify_line(&lr));
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}

/// Inline parse for a paragraph block. Other block kinds have no inline content.
///
/// Node spans are absolute offsets into the rope.
pub fn parse_inline_for_block(rope: &Rope, b: &BlockNode, parser: &InlineParser) -> Vec<Node> {
    if !matches!(b.kind, BlockKind::Paragraph) {
        return vec![];
    }
    let s = slice_to_string(rope, b.content_span);
    parser.parse(b.content_span.start, &s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_separate_paragraphs() {
        let rope = Rope::from("one\ntwo\n\n  three  \n");
        let doc = parse_document(&rope);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(slice_to_string(&rope, doc.blocks[0].content_span), "one\ntwo");
        assert_eq!(slice_to_string(&rope, doc.blocks[1].content_span), "three");
        assert_eq!(doc.blocks[1].span, Span::new(9, 19));
    }

    #[test]
    fn fence_is_a_raw_zone() {
        let rope = Rope::from("```rust\n#1[x](/a.png)\n```\nafter\n");
        let doc = parse_document(&rope);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(
            doc.blocks[0].kind,
            BlockKind::FencedCode {
                info: "rust".to_string()
            }
        );
        assert_eq!(
            slice_to_string(&rope, doc.blocks[0].content_span),
            "#1[x](/a.png)\n"
        );

        let parser = InlineParser::with_default_rules(20);
        assert!(parse_inline_for_block(&rope, &doc.blocks[0], &parser).is_empty());
        assert_eq!(doc.blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let rope = Rope::from("text\n~~~\ncode\nmore");
        let doc = parse_document(&rope);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(
            slice_to_string(&rope, doc.blocks[1].content_span),
            "code\nmore"
        );
    }

    #[test]
    fn inline_spans_are_absolute() {
        let rope = Rope::from("first\n\nsecond `code`\n");
        let doc = parse_document(&rope);
        let parser = InlineParser::with_default_rules(20);
        let nodes = parse_inline_for_block(&rope, &doc.blocks[1], &parser);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].span, Span::new(14, 20));
    }
}
