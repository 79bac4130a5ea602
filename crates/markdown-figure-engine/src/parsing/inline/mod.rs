//! # Inline Parsing
//!
//! Cursor-based inline parsing driven by an ordered list of rules.
//!
//! ## Architecture
//!
//! Inline parsing runs over the content span of a paragraph. At every cursor
//! position each rule in the [`Ruler`] gets a chance to match, in order; the
//! first one that succeeds consumes input and (outside silent mode) pushes a
//! [`Node`]. Bytes no rule claims accumulate as pending text and are flushed
//! as a single `Text` node.
//!
//! ## Modules
//!
//! - **`cursor`**: `Cursor` for bounded byte-level scanning
//! - **`node`**: `Node`, `NodeKind` and the ordered `Attrs` list
//! - **`state`**: `InlineState`, the per-parse mutable state rules operate on
//! - **`ruler`**: `InlineRule` trait and the ordered `Ruler`
//! - **`links`**: `LinkHelpers` (label matching, destinations, titles,
//!   normalization, validation)
//! - **`rules`**: the built-in rules (escape, backticks, emphasis, link, newline)
//! - **`parser`**: `InlineParser`, the entry point
//!
//! ## Silent Mode
//!
//! A rule called with `silent = true` only answers whether it matches and
//! advances `pos`; it must not push nodes or run nested parses.

pub mod cursor;
pub mod links;
pub mod node;
pub mod parser;
pub mod ruler;
pub mod rules;
pub mod state;

pub use cursor::Cursor;
pub use links::{Destination, LinkHelpers, Title};
pub use node::{Attrs, Node, NodeKind};
pub use parser::InlineParser;
pub use ruler::{InlineRule, Ruler, RulerError};
pub use state::InlineState;
