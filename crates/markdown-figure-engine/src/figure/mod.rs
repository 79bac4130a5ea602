//! # Figures
//!
//! Inline figures: an image with an optional numeric id, a caption written in
//! inline markup and an optional alt text.
//!
//! ```text
//! #7[A *cat*](/cat.png [a sleeping cat])
//! ^ ^         ^        ^
//! | caption   |        alt (optional)
//! id (optional digits) destination (optional)
//! ```
//!
//! ## Modules
//!
//! - **`node`**: `Figure`, the immutable parse result
//! - **`scan`**: `FigureScanner`, a pure scanner returning `FigureMatch`
//! - **`rule`**: `FigureRule`, the inline rule that runs the scanner and
//!   builds the node
//! - **`render`**: `render_figure`, HTML output
//!
//! ## Quirks
//!
//! The renderer emits the caption's *source text* verbatim inside
//! `<figcaption>`; the parsed caption nodes are kept on the node but are not
//! used for output.

pub mod node;
pub mod render;
pub mod rule;
pub mod scan;

pub use node::Figure;
pub use render::render_figure;
pub use rule::{CaptionParser, FigureRule, Recognized};
pub use scan::{FigureMatch, FigureParts, FigureScanner, UnclosedAlt};

use crate::options::FigureOptions;
use crate::parsing::inline::{InlineParser, Node, RulerError, rules::Link};
use crate::render::HtmlRenderer;

/// Registers the figure rule ahead of `link` and its renderer under `"figure"`.
pub fn install(
    parser: &mut InlineParser,
    renderer: &mut HtmlRenderer,
    options: &FigureOptions,
) -> Result<(), RulerError> {
    parser.insert_rule_before(Link::NAME, Box::new(FigureRule::new(options.unclosed_alt)))?;

    let prefix = options.id_prefix.clone();
    renderer.add_rule(
        Figure::TAG,
        Box::new(move |r: &HtmlRenderer, node: &Node| {
            render_figure(r, node, &prefix)
        }),
    );
    log::debug!(
        "figure plugin installed (id prefix {:?}, unclosed alt {:?})",
        options.id_prefix,
        options.unclosed_alt
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_puts_figure_before_link() {
        let mut parser = InlineParser::default();
        let mut renderer = HtmlRenderer::new();
        install(&mut parser, &mut renderer, &FigureOptions::default()).unwrap();
        assert_eq!(
            parser.ruler().names(),
            vec!["escape", "backticks", "emphasis", "figure", "link", "newline"]
        );
        assert!(renderer.has_rule("figure"));
    }

    #[test]
    fn install_twice_is_rejected() {
        let mut parser = InlineParser::default();
        let mut renderer = HtmlRenderer::new();
        let options = FigureOptions::default();
        install(&mut parser, &mut renderer, &options).unwrap();
        assert_eq!(
            install(&mut parser, &mut renderer, &options),
            Err(RulerError::Duplicate("figure".into()))
        );
    }

    #[test]
    fn install_needs_link_rule() {
        let mut parser = InlineParser::new(20);
        let mut renderer = HtmlRenderer::new();
        assert_eq!(
            install(&mut parser, &mut renderer, &FigureOptions::default()),
            Err(RulerError::NotFound("link".into()))
        );
    }
}
