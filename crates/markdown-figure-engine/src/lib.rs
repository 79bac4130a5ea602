pub mod figure;
pub mod options;
pub mod parsing;
pub mod pipeline;
pub mod render;

pub use figure::{Figure, UnclosedAlt};
pub use options::{FigureOptions, Options, OptionsError};
pub use parsing::inline::{Attrs, InlineParser, Node, NodeKind};
pub use pipeline::Pipeline;
pub use render::HtmlRenderer;
