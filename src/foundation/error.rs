/// Convenience result type used across the engine's setup APIs.
pub type SwarmResult<T> = Result<T, SwarmError>;

/// Top-level error taxonomy.
///
/// Only setup paths (show parsing, engine construction, image decode) produce these. The
/// per-frame update never fails.
#[derive(thiserror::Error, Debug)]
pub enum SwarmError {
    /// Invalid user-provided show configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Formations that cannot be animated together (e.g. mismatched lengths).
    #[error("formation error: {0}")]
    Formation(String),

    /// Raster images that could not be decoded or have an invalid shape.
    #[error("image error: {0}")]
    Image(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SwarmError {
    /// Build a [`SwarmError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SwarmError::Formation`] value.
    pub fn formation(msg: impl Into<String>) -> Self {
        Self::Formation(msg.into())
    }

    /// Build a [`SwarmError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`SwarmError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
