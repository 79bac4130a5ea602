use xi_rope::Rope;

use crate::figure;
use crate::options::{Options, OptionsError};
use crate::parsing::{ParsedDoc, inline::InlineParser, inline::Node, parse_document};
use crate::render::HtmlRenderer;

/// Parser and renderer configured from [`Options`].
///
/// Immutable once built; share it by reference.
pub struct Pipeline {
    parser: InlineParser,
    renderer: HtmlRenderer,
    options: Options,
}

impl Pipeline {
    pub fn new(options: Options) -> Result<Self, OptionsError> {
        options.validate()?;

        let mut parser = InlineParser::with_default_rules(options.max_nesting);
        let mut renderer = HtmlRenderer::new();
        if options.figures.enabled {
            figure::install(&mut parser, &mut renderer, &options.figures)?;
        } else {
            log::debug!("figures disabled");
        }

        Ok(Self {
            parser,
            renderer,
            options,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn parser(&self) -> &InlineParser {
        &self.parser
    }

    pub fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }

    pub fn parse(&self, rope: &Rope) -> ParsedDoc {
        parse_document(rope)
    }

    /// Inline-parses a single fragment, spans relative to its start.
    pub fn parse_inline(&self, src: &str) -> Vec<Node> {
        self.parser.parse(0, src)
    }

    pub fn render(&self, rope: &Rope) -> String {
        let doc = self.parse(rope);
        log::trace!("rendering {} blocks", doc.blocks.len());
        self.renderer.render_blocks(rope, &doc, &self.parser)
    }

    pub fn render_str(&self, src: &str) -> String {
        self.render(&Rope::from(src))
    }
}
