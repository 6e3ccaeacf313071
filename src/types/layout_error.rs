use thiserror::Error;

use crate::types::ParseError;

/// A glyph has no metrics in the font the builder asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Font metrics not found for character {character:?} in font {font}")]
pub struct MetricsLookupError {
    /// The missing character
    pub character: char,
    /// Font name, e.g. `Main-Regular`
    pub font: String,
}

/// Any failure while turning markup into a box tree.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Malformed input
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A glyph is missing from the metrics provider
    #[error(transparent)]
    Metrics(#[from] MetricsLookupError),
}
