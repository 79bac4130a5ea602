//! # Inline Rules
//!
//! Built-in rules. Each rule type owns its delimiter constants; the scanning
//! code refers to those constants rather than literal bytes.
//!
//! Default order: `escape`, `backticks`, `emphasis`, `link`, `newline`.
//! Code spans come early so their content is a raw zone.

pub mod backticks;
pub mod emphasis;
pub mod escape;
pub mod link;
pub mod newline;

pub use backticks::Backticks;
pub use emphasis::Emphasis;
pub use escape::Escape;
pub use link::Link;
pub use newline::Newline;

/// Spaces, tabs and line endings.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
