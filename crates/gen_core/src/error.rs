//! Error type for the generation core.
//!
//! Generation itself recovers locally (clamping, placeholders, short fields), so
//! these errors only surface at fallible boundaries: `try_*` texture calls,
//! config loading, and raw id conversions.

use thiserror::Error;

/// Errors raised at the fallible edges of generation.
#[derive(Debug, Error)]
pub enum GenError {
    /// A numeric input was outside its valid range.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// A texture was requested with dimensions outside `1..=max`.
    #[error("texture size {width}x{height} outside 1..={max}")]
    TextureSize { width: u32, height: u32, max: u32 },

    /// A sub-resource needed for generation could not be produced.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Configuration could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Shorthand for [`GenError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
