//! # Block Parsing
//!
//! Splits a document into leaf blocks before any inline parsing happens.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified on its own
//!    into a `LineClass` (blank status, content span, fence signature).
//! 2. **Block Construction** (`builder`): a `BlockBuilder` state machine
//!    groups classified lines into paragraphs and fenced code blocks.
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no inline parsing inside
//! - Paragraph content spans exclude the final newline and surrounding
//!   whitespace, so inline parsing sees exactly the paragraph text
//! - All block nodes store byte spans into the rope

pub mod builder;
pub mod classify;
pub mod fence;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, classify_line};
pub use fence::Fence;
pub use types::{BlockKind, BlockNode};
