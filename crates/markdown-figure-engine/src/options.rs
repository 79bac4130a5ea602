//! Pipeline options and their validation.

use thiserror::Error;

use crate::figure::UnclosedAlt;
use crate::parsing::inline::RulerError;

/// Nesting limit for inline constructs.
pub const DEFAULT_MAX_NESTING: usize = 20;

pub const DEFAULT_ID_PREFIX: &str = "figure-";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("max_nesting must be at least 1")]
    ZeroNesting,
    #[error("invalid figure id prefix {0:?}: must not contain quotes, angle brackets or whitespace")]
    InvalidIdPrefix(String),
    #[error("failed to install figure plugin: {0}")]
    Plugin(#[from] RulerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub max_nesting: usize,
    pub figures: FigureOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
            figures: FigureOptions::default(),
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_nesting == 0 {
            return Err(OptionsError::ZeroNesting);
        }
        self.figures.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureOptions {
    /// When false the figure rule is not installed and `#[..](..)` stays text.
    pub enabled: bool,
    /// Prepended to the identifier in the rendered `id` attribute.
    pub id_prefix: String,
    pub unclosed_alt: UnclosedAlt,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            unclosed_alt: UnclosedAlt::default(),
        }
    }
}

impl FigureOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        let bad = |c: char| matches!(c, '"' | '<' | '>') || c.is_whitespace();
        if self.id_prefix.chars().any(bad) {
            return Err(OptionsError::InvalidIdPrefix(self.id_prefix.clone()));
        }
        Ok(())
    }
}
