/// Convenience result type used across the unwrap engine.
pub type UnwrapResult<T> = Result<T, UnwrapError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Geometry operations never surface errors: out-of-bounds placements are clamped and
/// degenerate grids snap nothing. Only configuration, persisted state, and texture
/// generation can fail.
#[derive(thiserror::Error, Debug)]
pub enum UnwrapError {
    /// Non-positive dimension, out-of-range pixel scale, or malformed state.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors when serializing or deserializing persisted layout state.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UnwrapError {
    /// Build an [`UnwrapError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`UnwrapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
